//! ログ初期化
//!
//! tracing-subscriber を使い、`log::*` マクロは `tracing_log::LogTracer` 経由で
//! 同じ subscriber に流す。

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// 既定レベルに加え、騒がしいクレートを抑える
pub fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let mut directives = vec![level.to_string()];

    let noisy: &[(&str, &str)] = &[
        ("actix_server", "warn"),
        ("actix_http", "warn"),
    ];
    for (target, lvl) in noisy {
        directives.push(format!("{}={}", target, lvl));
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("ログフィルタが不正です '{}': {}", filter_str, e))
}

/// コンソール出力のロガーを初期化
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    tracing_log::LogTracer::init().ok(); // 初期化済みでも続行

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(build_env_filter(level)?),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("ログ初期化に失敗: {}", e))?;

    tracing::trace!("Logging initialized: level={}", level);
    Ok(())
}
