use clap::Parser;
use malla_jobs::{cli, config, logging, offline, server};
use cli::{Cli, Commands};
use config::Config;
use log::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?.with_overrides(|key| std::env::var(key).ok())?,
        None => Config::load()?,
    };
    if cli.verbose {
        config.log_level = "debug".into();
    }

    logging::init_logging(&config.log_level)?;

    match cli.command {
        Commands::Serve { host, port, options } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            config.match_options = offline::apply_match_args(config.match_options, &options);

            info!("malla-jobs v{} を起動", env!("CARGO_PKG_VERSION"));
            server::run(config).await?;
        }

        Commands::Match { filter, input, raw, options } => {
            let match_options = offline::apply_match_args(config.match_options, &options);
            let malla = offline::load_malla(input.as_deref(), raw.as_deref())?;
            let response = offline::run_match(&filter, malla, &match_options)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Config { show, save } => {
            if save {
                let path = match cli.config {
                    Some(path) => path,
                    None => Config::config_path()?,
                };
                config.save_to(&path)?;
                println!("✔ 設定を保存しました: {}", path.display());
            }

            if show {
                println!("設定:");
                println!("  ホスト: {}", config.host);
                println!("  ポート: {}", config.port);
                println!("  ボディ上限: {} bytes", config.body_limit_bytes);
                println!("  ログレベル: {}", config.log_level);
                println!("  正規化: {}", config.match_options.normalization);
                println!("  statuses必須: {}", config.match_options.require_statuses);
            } else if !save {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}
