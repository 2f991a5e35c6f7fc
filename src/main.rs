use clap::Parser as _;
use liquidcalc::{
    cli::{Cli, Command, ConfigCommand},
    config, Config, LiquidCalc,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config(ConfigCommand::Template)) => {
            config::print_config_template();
            return Ok(());
        }
        Some(Command::Config(ConfigCommand::Init { config_path })) => {
            config::init_config(config_path)?;
            return Ok(());
        }
        None => (),
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load(cli.serve.config_path)?;
    if let Some(bind_address) = cli.serve.bind_address {
        config.bind_address = bind_address;
    }
    debug!("Loaded configuration: {config:?}");

    LiquidCalc::boot(config)?.serve().await?;

    Ok(())
}
