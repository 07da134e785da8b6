use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub boards: BoardsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the API v3 routes, e.g. `/api/v3`
    pub base_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardsConfig {
    /// Locale for user facing board messages
    pub locale: String,
    /// Seed roles, types, statuses and enumerations on startup
    pub load_default_data: bool,
    /// Seed a sample project on startup
    pub load_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: "/api/v3".to_string(),
        }
    }
}

impl Default for BoardsConfig {
    fn default() -> Self {
        Self {
            locale: crate::i18n::DEFAULT_LOCALE.to_string(),
            load_default_data: false,
            load_demo_data: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Add environment variables with prefix "WPB_", e.g. WPB_SERVER__PORT
        config = config.add_source(
            config::Environment::with_prefix("WPB")
                .separator("__")
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Reject settings the router cannot be built from
    pub fn validate(&self) -> anyhow::Result<()> {
        let base_path = &self.api.base_path;
        if !base_path.starts_with('/') {
            anyhow::bail!("api.base_path must start with '/', got '{}'", base_path);
        }
        if base_path.contains(':') || base_path.contains('*') {
            anyhow::bail!("api.base_path must not contain route parameters, got '{}'", base_path);
        }
        Ok(())
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server_address(), "127.0.0.1:3001");
        assert_eq!(config.api.base_path, "/api/v3");
        assert_eq!(config.boards.locale, "en");
        assert!(!config.boards.load_default_data);
        assert!(!config.boards.load_demo_data);
    }

    #[test]
    fn test_base_path_validation() {
        assert!(AppConfig::default().validate().is_ok());

        let mut config = AppConfig::default();
        config.api.base_path = "api/v3".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));

        config.api.base_path = "/api/:version".to_string();
        assert!(config.validate().is_err());

        config.api.base_path = "/openproject/api/v3/".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_survive_the_config_builder() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default()).unwrap())
            .set_override("boards.locale", "de")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.boards.locale, "de");
        assert_eq!(config.server.port, 3001);
    }
}
