//! Registry configuration.

use std::num::NonZeroUsize;

use thiserror::Error;

pub const ENV_EAGER: &str = "GO125_STUBS_EAGER";
pub const ENV_THREADS: &str = "GO125_STUBS_THREADS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Build every registered package up front instead of on first import.
    pub eager: bool,
    /// Worker threads used by an eager prebuild.
    pub build_threads: usize,
}

impl RegistryConfig {
    pub fn builder() -> RegistryConfigBuilder {
        RegistryConfigBuilder::new()
    }

    /// Defaults overridden by `GO125_STUBS_EAGER` and `GO125_STUBS_THREADS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RegistryConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Some(value) = lookup(ENV_EAGER) {
            builder = builder.eager(parse_flag(ENV_EAGER, &value)?);
        }
        if let Some(value) = lookup(ENV_THREADS) {
            let threads = value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_THREADS,
                    value: value.clone(),
                })?;
            builder = builder.build_threads(threads);
        }
        builder.build()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.build_threads == 0 {
            return Err(ConfigError::Invalid("build_threads must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            eager: false,
            build_threads: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistryConfigBuilder {
    inner: RegistryConfig,
}

impl RegistryConfigBuilder {
    pub fn new() -> Self {
        Self {
            inner: RegistryConfig::default(),
        }
    }

    pub fn eager(mut self, enabled: bool) -> Self {
        self.inner.eager = enabled;
        self
    }

    pub fn build_threads(mut self, threads: usize) -> Self {
        self.inner.build_threads = threads;
        self
    }

    pub fn build(self) -> Result<RegistryConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

impl Default for RegistryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid registry configuration: {0}")]
    Invalid(&'static str),
    #[error("{key}: cannot parse {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_defaults() {
        let cfg = RegistryConfig::from_lookup(|key| match key {
            ENV_EAGER => Some("yes".into()),
            ENV_THREADS => Some(" 3 ".into()),
            _ => None,
        })
        .unwrap();
        assert!(cfg.eager);
        assert_eq!(cfg.build_threads, 3);
    }

    #[test]
    fn missing_vars_keep_defaults() {
        let cfg = RegistryConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, RegistryConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        let err = RegistryConfig::from_lookup(|key| (key == ENV_EAGER).then(|| "maybe".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_EAGER, .. }));

        let err = RegistryConfig::builder().build_threads(0).build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid("build_threads must be greater than zero")
        );
    }
}
