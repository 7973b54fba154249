//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "cnpj-lookup.toml";

/// Environment variable prefix; `__` separates nested keys
pub const ENV_PREFIX: &str = "CNPJ_LOOKUP_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CNPJ_LOOKUP_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./cnpj-lookup.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/cnpj-lookup/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// The merged figment, exposed so callers can inspect value provenance
    pub fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        figment = figment.merge(Toml::file_exact(PROJECT_CONFIG_FILE));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load a single file on top of the defaults, ignoring every other source
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cnpj-lookup").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let marker = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", marker, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{}", PROJECT_CONFIG_FILE);
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.providers.brasilapi.max_attempts, 3);
        assert!(config.http.proxy_url.is_none());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("cnpj-lookup"));
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[providers.receitaws]
use_proxy = true
retry_delay_ms = 250

[http]
proxy_url = "https://proxy.example.com/fetch"
timeout_seconds = 4
"#
        )
        .unwrap();

        let config = ConfigLoader::load_file(file.path()).unwrap();
        assert!(config.providers.receitaws.use_proxy);
        assert_eq!(config.providers.receitaws.retry_delay_ms, 250);
        assert_eq!(config.providers.receitaws.max_attempts, 2);
        assert_eq!(config.http.timeout_seconds, Some(4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_file_rejects_wrong_type() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[providers.cnpjws]\nmax_attempts = \"many\"").unwrap();

        assert!(ConfigLoader::load_file(file.path()).is_err());
    }

    #[test]
    fn test_environment_overrides_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(PROJECT_CONFIG_FILE, "[http]\ntimeout_seconds = 7")?;
            jail.set_env("CNPJ_LOOKUP_PROVIDERS__BRASILAPI__MAX_ATTEMPTS", "6");

            let config: FileConfig = ConfigLoader::figment(None).extract()?;
            assert_eq!(config.http.timeout_seconds, Some(7));
            assert_eq!(config.providers.brasilapi.max_attempts, 6);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_beats_project_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(PROJECT_CONFIG_FILE, "[http]\ntimeout_seconds = 7")?;
            jail.create_file("custom.toml", "[http]\ntimeout_seconds = 2")?;

            let explicit = PathBuf::from("custom.toml");
            let config: FileConfig = ConfigLoader::figment(Some(&explicit)).extract()?;
            assert_eq!(config.http.timeout_seconds, Some(2));
            Ok(())
        });
    }
}
