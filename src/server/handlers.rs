//! ルートハンドラ

use actix_web::{web, HttpResponse, Responder};
use log::warn;
use malla_common::ProcessRequest;

use super::models::{ErrorResponse, HealthResponse};
use crate::config::Config;

/// GET / - ヘルスチェック
pub async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::ok())
}

/// POST /procesar - nombreJob に一致するジョブIDを返す
///
/// jsonMalla は構造化データ・`statuses=[...]` 形式の文字列・欠落のいずれも受け付ける。
pub async fn procesar_handler(
    body: web::Json<ProcessRequest>,
    config: web::Data<Config>,
) -> impl Responder {
    match malla_common::process(&body, &config.match_options) {
        Ok(response) => HttpResponse::Ok().json(response),
        // process が返すのは nombreJob / jsonMalla の検証エラーのみ
        Err(e) => {
            warn!("POST /procesar 400: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
        }
    }
}
