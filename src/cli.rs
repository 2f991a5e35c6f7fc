use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(name = "liquidcalc", version, about = "Mix and keep track of e-liquids")]
#[command(args_conflicts_with_subcommands(true))]
pub struct Cli {
    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options for running the web server, the default when no subcommand is given.
#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Config file. Defaults to $XDG_CONFIG_HOME/liquidcalc/config.yml
    #[arg(short, long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Listen here instead of the configured bind_address
    #[arg(short, long = "bind", value_name = "ADDR")]
    pub bind_address: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print a documented config template
    Template,
    /// Write the config template to disk
    Init {
        #[arg(short, long = "config", value_name = "FILE")]
        config_path: Option<PathBuf>,
    },
}
