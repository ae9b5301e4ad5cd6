#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::CatalogConfig;

#[cfg(feature = "cli")]
use crate::adapters::sqlite::IN_MEMORY_URL;

/// 讀取配置檔（若有），再套用命令列覆寫
#[cfg(feature = "cli")]
pub fn resolve(cli: &CliConfig) -> crate::utils::error::Result<CatalogConfig> {
    let mut config = match &cli.config {
        Some(path) => CatalogConfig::from_file(path)?,
        None => CatalogConfig::default(),
    };

    if cli.in_memory {
        config.database.url = IN_MEMORY_URL.to_string();
    } else if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
    }
    if let Some(url) = &cli.open_library_url {
        config.open_library.base_url = url.clone();
    }
    Ok(config)
}
