use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use insight_services::{EnrichmentLimits, HttpProviderConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub enrichment: EnrichmentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    pub form_limit: usize,
    pub h2h_limit: usize,
    pub max_limit: usize,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::from_builder(
            Config::builder()
                // Add in settings from configuration file
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
                .add_source(File::with_name("config/local").required(false))
                // Add in settings from environment variables
                .add_source(Environment::with_prefix("INSIGHT").separator("__")),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let defaults = HttpProviderConfig::default();

        let config = builder
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("upstream.base_url", defaults.base_url)?
            .set_default("upstream.timeout_seconds", 10)?
            .set_default("upstream.user_agent", defaults.user_agent)?
            .set_default("enrichment.form_limit", 10)?
            .set_default("enrichment.h2h_limit", 10)?
            .set_default("enrichment.max_limit", 50)?
            .build()?;

        config.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn provider_config(&self) -> HttpProviderConfig {
        HttpProviderConfig {
            base_url: self.upstream.base_url.clone(),
            timeout: Duration::from_secs(self.upstream.timeout_seconds),
            user_agent: self.upstream.user_agent.clone(),
            api_key: self.upstream.api_key.clone().filter(|k| !k.is_empty()),
        }
    }

    pub fn limits(&self) -> EnrichmentLimits {
        EnrichmentLimits {
            form_limit: self.enrichment.form_limit,
            h2h_limit: self.enrichment.h2h_limit,
        }
        .clamped(self.enrichment.max_limit)
    }
}
