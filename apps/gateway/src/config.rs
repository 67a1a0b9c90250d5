use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, FromEnv};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Gateway configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    /// Base URL of the business tier, no trailing slash
    pub upstream_url: String,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let upstream_url = env_or_default("LENDHUB_SERVER_URL", "http://localhost:9090")
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            app: app_info!(),
            server,
            upstream_url,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_url_trailing_slash_is_trimmed() {
        temp_env::with_var("LENDHUB_SERVER_URL", Some("http://server:9090/"), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.upstream_url, "http://server:9090");
        });
    }

    #[test]
    fn test_upstream_url_defaults_to_localhost() {
        temp_env::with_var_unset("LENDHUB_SERVER_URL", || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.upstream_url, "http://localhost:9090");
        });
    }
}
