//! Infrastructure layer for cnpj-lookup
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP gateways for the registry providers
//! and configuration file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileHttpConfig, FileOutputConfig,
    FileOutputFormat, FileProviderConfig, FileProvidersConfig,
};
pub use providers::{
    DEFAULT_USER_AGENT, GatewayBuildError, HttpSourceGateway, ProviderEndpoint, build_gateways,
};
