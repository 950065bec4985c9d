// Entrypoint for the CLI application.
// - Installs logging, loads the disk configuration and hands a client to the
//   menu loop.
// - A missing or blank token file is recovered from by asking for a token.

use anyhow::Result;
use disk_autotest::{ui, ConfigError, DiskApiClient, DiskConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // RUST_LOG wins; otherwise only warnings, on stderr so the menu stays clean.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = match DiskConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingTokenFile { path }) | Err(ConfigError::EmptyToken { path }) => {
            let token = ui::prompt_token(&path)?;
            DiskConfig::new(DiskConfig::base_url_from_env(), token)
        }
        Err(e) => return Err(e.into()),
    };

    let api = DiskApiClient::new(config)?;
    ui::main_menu(api)?;
    Ok(())
}
