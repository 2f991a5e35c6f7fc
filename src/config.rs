use confique::{yaml::FormatOptions, Config as _};
use derive_masked::DebugMasked;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Confique(#[from] confique::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not determine config dir parent path")]
    ParentPath,

    #[error(transparent)]
    Xdg(#[from] xdg::BaseDirectoriesError),
}

#[derive(Clone, DebugMasked, Serialize, Deserialize, confique::Config)]
pub struct Config {
    /// Address the HTTP server listens on
    #[config(env = "LIQUIDCALC_BIND_ADDRESS", default = "127.0.0.1:3000")]
    pub bind_address: String,

    /// Base64 encoded session key (at least 64 bytes once decoded)
    #[config(env = "LIQUIDCALC_SESSION_KEY")]
    #[masked]
    pub session_key: Option<String>,

    /// Hosted backend configuration
    #[config(nested)]
    pub backend: BackendConfig,

    /// Locale configuration
    #[config(nested)]
    pub i18n: I18nConfig,
}

#[derive(Clone, DebugMasked, Serialize, Deserialize, confique::Config)]
pub struct BackendConfig {
    /// Project URL of the hosted backend, e.g. https://<project>.supabase.co
    #[config(env = "LIQUIDCALC_BACKEND_URL")]
    pub url: String,

    /// Public (anon) API key of the project
    #[masked]
    #[config(env = "LIQUIDCALC_BACKEND_ANON_KEY")]
    pub anon_key: String,

    /// Seconds to wait for a backend response before giving up
    #[config(default = 30)]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, confique::Config)]
pub struct I18nConfig {
    /// Locales accepted as the first path segment
    #[config(default = ["en", "de"])]
    pub locales: Vec<String>,

    /// Locale used when the path carries no locale segment
    #[config(default = "en")]
    pub default_locale: String,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Config> {
        let config_path = get_config_path(config_path)?;
        let config = Config::builder().env().file(config_path).load()?;

        Ok(config)
    }
}

pub fn init_config(config_path: Option<PathBuf>) -> Result<()> {
    // @TODO this will overwrite an existing config with no warning.
    let config_path = write_config_template(config_path)?;

    println!("Configuration file created: {}", config_path.display());

    Ok(())
}

pub fn get_config_template() -> String {
    confique::yaml::template::<Config>(FormatOptions::default())
}

pub fn print_config_template() {
    println!("{}", get_config_template());
}

pub fn get_config_path(config_path: Option<PathBuf>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path),
        None => {
            let xdg_dirs = xdg::BaseDirectories::with_prefix("liquidcalc")?;
            Ok(xdg_dirs.get_config_file("config.yml"))
        }
    }
}

pub fn write_config_template(config_path: Option<PathBuf>) -> Result<PathBuf> {
    let config_path = get_config_path(config_path)?;
    let config_template = get_config_template();

    let config_path_dir = config_path.parent().ok_or(Error::ParentPath)?;

    std::fs::create_dir_all(config_path_dir)?;
    std::fs::write(config_path.clone(), config_template)?;

    Ok(config_path)
}
