//! Configuration file loading for cnpj-lookup
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CNPJ_LOOKUP_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./cnpj-lookup.toml`
//! 4. Global: `$XDG_CONFIG_HOME/cnpj-lookup/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileHttpConfig, FileOutputConfig, FileOutputFormat,
    FileProviderConfig, FileProvidersConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
