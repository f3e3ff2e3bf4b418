use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment, File};
use serde::Deserialize;
use sketch2sbgn::{
    grounding::{GroundingConfig, GROUNDING_URL},
    providers::configs::{OpenAiProviderConfig, OPENAI_HOST, OPENAI_MODEL},
};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

pub const ENV_PREFIX: &str = "SKETCH2SBGN";

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_openai_host")]
    pub host: String,
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_provider_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<i32>,
}

impl ProviderSettings {
    pub fn into_config(self) -> OpenAiProviderConfig {
        OpenAiProviderConfig {
            host: self.host,
            api_key: self.api_key,
            model: self.model,
            timeout: Duration::from_secs(self.timeout_secs),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GroundingSettings {
    #[serde(default = "default_grounding_url")]
    pub url: String,
    #[serde(default = "default_grounding_timeout_secs")]
    pub timeout_secs: u64,
    /// Relay upstream failures as a `null` body, for clients of the old service
    #[serde(default)]
    pub null_on_failure: bool,
}

impl GroundingSettings {
    pub fn to_config(&self) -> GroundingConfig {
        GroundingConfig {
            url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssetSettings {
    #[serde(default = "default_assets_dir")]
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub grounding: GroundingSettings,
    pub assets: AssetSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Server defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("server.public_dir", "public")?
            .set_default("server.max_body_bytes", default_max_body_bytes() as u64)?
            .set_default(
                "server.max_concurrent_requests",
                default_max_concurrent_requests() as u64,
            )?
            // Provider defaults
            .set_default("provider.host", default_openai_host())?
            .set_default("provider.model", default_model())?
            .set_default("provider.timeout_secs", default_provider_timeout_secs())?
            // Grounding defaults
            .set_default("grounding.url", default_grounding_url())?
            .set_default("grounding.timeout_secs", default_grounding_timeout_secs())?
            .set_default("grounding.null_on_failure", false)?
            .set_default("assets.dir", "assets")?
            // Optional settings file next to the binary's working directory
            .add_source(File::with_name("sketch2sbgn").required(false))
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // The two variables the service has always been configured with
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("provider.api_key", std::env::var("OPEN_API_KEY").ok())?
            .build()?;

        let result: Result<Self, config::ConfigError> = config.try_deserialize();

        match result {
            Ok(settings) => settings.validate(),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                // Handle both NotFound and missing field message variants
                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    // Extract field name from error message "missing field `api_key`"
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .split('`')
                        .next()
                        .unwrap_or_default();
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.provider.api_key.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                env_var: to_env_var("provider.api_key"),
            });
        }
        // A zero limit would admit no request at all
        if self.server.max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidValue {
                env_var: to_env_var("server.max_concurrent_requests"),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_max_body_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_max_concurrent_requests() -> usize {
    64
}

fn default_model() -> String {
    OPENAI_MODEL.to_string()
}

fn default_openai_host() -> String {
    OPENAI_HOST.to_string()
}

fn default_provider_timeout_secs() -> u64 {
    600
}

fn default_grounding_url() -> String {
    GROUNDING_URL.to_string()
}

fn default_grounding_timeout_secs() -> u64 {
    60
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("SKETCH2SBGN_") {
                env::remove_var(&key);
            }
        }
        env::remove_var("PORT");
        env::remove_var("OPEN_API_KEY");
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();
        env::set_var("OPEN_API_KEY", "test-key");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.server.public_dir, PathBuf::from("public"));
        assert_eq!(settings.server.max_body_bytes, 20 * 1024 * 1024);
        assert_eq!(settings.server.max_concurrent_requests, 64);
        assert_eq!(settings.assets.dir, PathBuf::from("assets"));

        assert_eq!(settings.grounding.url, "http://grounding.indra.bio/ground_multi");
        assert_eq!(settings.grounding.timeout_secs, 60);
        assert!(!settings.grounding.null_on_failure);

        let provider = settings.provider.into_config();
        assert_eq!(provider.host, "https://api.openai.com");
        assert_eq!(provider.api_key, "test-key");
        assert_eq!(provider.model, "gpt-4o");
        assert_eq!(provider.timeout, Duration::from_secs(600));
        assert_eq!(provider.temperature, None);
        assert_eq!(provider.max_tokens, None);

        clean_env();
    }

    #[test]
    #[serial]
    fn test_port_variable() {
        clean_env();
        env::set_var("OPEN_API_KEY", "test-key");
        env::set_var("PORT", "8080");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.port, 8080);

        clean_env();
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("OPEN_API_KEY", "test-key");
        env::set_var("SKETCH2SBGN_SERVER__HOST", "127.0.0.1");
        env::set_var("SKETCH2SBGN_PROVIDER__HOST", "https://custom.openai.com");
        env::set_var("SKETCH2SBGN_PROVIDER__MODEL", "gpt-4o-mini");
        env::set_var("SKETCH2SBGN_PROVIDER__TEMPERATURE", "0.2");
        env::set_var("SKETCH2SBGN_GROUNDING__URL", "http://localhost:8001/ground_multi");
        env::set_var("SKETCH2SBGN_GROUNDING__NULL_ON_FAILURE", "true");
        env::set_var("SKETCH2SBGN_ASSETS__DIR", "/srv/assets");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.grounding.url, "http://localhost:8001/ground_multi");
        assert!(settings.grounding.null_on_failure);
        assert_eq!(settings.assets.dir, PathBuf::from("/srv/assets"));

        let provider = settings.provider.into_config();
        assert_eq!(provider.host, "https://custom.openai.com");
        assert_eq!(provider.model, "gpt-4o-mini");
        assert_eq!(provider.temperature, Some(0.2));

        clean_env();
    }

    #[test]
    #[serial]
    fn test_missing_api_key() {
        clean_env();

        let err = Settings::new().unwrap_err();
        match err {
            ConfigError::MissingEnvVar { env_var } => assert_eq!(env_var, "OPEN_API_KEY"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[serial]
    fn test_blank_api_key() {
        clean_env();
        env::set_var("OPEN_API_KEY", "  ");

        let err = Settings::new().unwrap_err();
        match err {
            ConfigError::MissingEnvVar { env_var } => assert_eq!(env_var, "OPEN_API_KEY"),
            other => panic!("unexpected error: {other}"),
        }

        clean_env();
    }

    #[test]
    #[serial]
    fn test_zero_concurrency_limit() {
        clean_env();
        env::set_var("OPEN_API_KEY", "test-key");
        env::set_var("SKETCH2SBGN_SERVER__MAX_CONCURRENT_REQUESTS", "0");

        let err = Settings::new().unwrap_err();
        match err {
            ConfigError::InvalidValue { env_var, .. } => {
                assert_eq!(env_var, "SKETCH2SBGN_SERVER__MAX_CONCURRENT_REQUESTS")
            }
            other => panic!("unexpected error: {other}"),
        }

        clean_env();
    }

    #[test]
    fn test_socket_addr_conversion() {
        let server_settings = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 4000,
            public_dir: default_public_dir(),
            max_body_bytes: default_max_body_bytes(),
            max_concurrent_requests: default_max_concurrent_requests(),
        };
        let addr = server_settings.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:4000");
    }
}
