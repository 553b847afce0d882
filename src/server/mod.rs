//! HTTPサーバ
//!
//! ## エンドポイント
//! - GET / - ヘルスチェック
//! - POST /procesar - ジョブID抽出

pub mod handlers;
pub mod models;

use actix_web::{error::InternalError, middleware, web, App, HttpResponse, HttpServer};
use log::{info, warn};

use crate::config::Config;
use crate::error::{MallaJobsError, Result};
use handlers::{health_handler, procesar_handler};
use models::ErrorResponse;

/// JSONボディの上限と、デコード失敗時の400レスポンス
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            warn!("JSONボディを受け付けません: {}", err);
            let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
            InternalError::from_response(err, response).into()
        })
}

/// ルートと共有データを登録
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(web::Data::new(config.clone()))
        .app_data(json_config(config.body_limit_bytes))
        .route("/", web::get().to(health_handler))
        .route("/procesar", web::post().to(procesar_handler));
}

/// サーバを起動し、停止まで待つ
pub async fn run(config: Config) -> Result<()> {
    let (host, port) = config.bind_addr();
    info!(
        "照合設定: normalization={}, requireStatuses={}",
        config.match_options.normalization, config.match_options.require_statuses
    );

    let app_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(|cfg| configure(cfg, &app_config))
    })
    .bind((host.as_str(), port))
    .map_err(|e| MallaJobsError::Server(format!("{}:{} にバインドできません: {}", host, port, e)))?;

    info!("API escuchando en puerto {}", port);
    server.run().await?;
    Ok(())
}
