use anyhow::Result;
use clap::Parser;

use shopee_affiliate::cli::Cli;
use shopee_affiliate::config::{get_config, init_config, init_config_from};
use shopee_affiliate::runtime::modes::{Mode, detect_mode};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.config.as_deref() {
        Some(path) => init_config_from(path),
        None => init_config(),
    }

    match detect_mode(cli.command.as_ref()) {
        #[cfg(feature = "server")]
        Mode::Server => {
            let config = get_config();
            // guard 必须存活到进程退出，保证日志刷盘
            let _guard = shopee_affiliate::system::logging::init_logging(&config.logging)?;

            actix_web::rt::System::new().block_on(shopee_affiliate::runtime::modes::run_server())
        }
        #[cfg(feature = "cli")]
        Mode::Cli => {
            let Some(command) = cli.command else {
                anyhow::bail!("No command provided");
            };
            if let Err(e) = shopee_affiliate::runtime::modes::run_cli(command) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        Mode::Unknown => {
            anyhow::bail!("No execution mode enabled. Build with the `server` or `cli` feature.")
        }
    }
}
