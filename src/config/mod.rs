//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, ConfiguredAccount, IdentityConfig, LogFormat, LoggingConfig,
};
