//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use call_agent_core::CallContext;

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - permissive CORS, verbose logs
    #[default]
    Development,
    /// Staging mode
    Staging,
    /// Production mode
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Call context loaded at startup
    #[serde(default)]
    pub call: CallDefaults,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_observability()?;
        self.call.to_context().validate()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port must be non-zero".to_string(),
            });
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.host".to_string(),
                message: "Host must not be blank".to_string(),
            });
        }
        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        let level = self.observability.log_level.to_ascii_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("Unknown log level '{}'", self.observability.log_level),
            });
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Call context the server starts with; editable at runtime over HTTP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallDefaults {
    #[serde(default = "default_principal")]
    pub principal_name: String,

    #[serde(default = "default_purpose")]
    pub purpose: String,

    #[serde(default = "default_talking_points")]
    pub talking_points: Vec<String>,

    #[serde(default = "default_handoff_conditions")]
    pub handoff_conditions: Vec<String>,

    #[serde(default = "default_true")]
    pub consent_to_summary: bool,
}

fn default_principal() -> String {
    call_agent_core::context::DEFAULT_PRINCIPAL.to_string()
}

fn default_purpose() -> String {
    "Follow up on job application".to_string()
}

fn default_talking_points() -> Vec<String> {
    vec![
        "I'm calling to confirm you received the application for the backend engineer role"
            .to_string(),
        "The team would like to set up a short technical interview next week".to_string(),
        "Please let us know which days work best for you".to_string(),
    ]
}

fn default_handoff_conditions() -> Vec<String> {
    vec![
        "Caller asks to speak with the principal".to_string(),
        "Caller asks about topics outside the prepared script".to_string(),
        "Caller stays silent".to_string(),
    ]
}

impl Default for CallDefaults {
    fn default() -> Self {
        Self {
            principal_name: default_principal(),
            purpose: default_purpose(),
            talking_points: default_talking_points(),
            handoff_conditions: default_handoff_conditions(),
            consent_to_summary: true,
        }
    }
}

impl CallDefaults {
    pub fn to_context(&self) -> CallContext {
        CallContext::new(self.purpose.clone())
            .with_principal(self.principal_name.clone())
            .with_talking_points(self.talking_points.iter().cloned())
            .with_handoff_conditions(self.handoff_conditions.iter().cloned())
            .with_consent(self.consent_to_summary)
    }
}

/// Load settings from `config/` in the working directory
///
/// Priority: env vars > config/{env} > config/default > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit config directory
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_path = dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let env_path = dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("CALL_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        dir = %dir.display(),
        env = env.unwrap_or("default"),
        "Settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.observability.log_level, "info");
        assert!(settings.call.consent_to_summary);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());

        settings.server.port = 9000;
        settings.observability.log_level = "loud".to_string();
        assert!(settings.validate().is_err());

        settings.observability.log_level = "DEBUG".to_string();
        assert!(settings.validate().is_ok());

        settings.call.principal_name = "  ".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "principal_name"
        ));
    }

    #[test]
    fn test_call_defaults_to_context() {
        let ctx = CallDefaults::default().to_context();
        assert_eq!(ctx.purpose, "Follow up on job application");
        assert_eq!(ctx.talking_points.len(), 3);
        assert_eq!(ctx.handoff_conditions.len(), 3);
    }

    #[test]
    fn test_load_from_yaml_layers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 9100\ncall:\n  principal_name: Priya\n  purpose: Confirm delivery window\n  talking_points:\n    - Your order ships Friday\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.yaml"),
            "environment: staging\nobservability:\n  log_json: true\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.environment, RuntimeEnvironment::Staging);
        assert_eq!(settings.server.port, 9100);
        assert!(settings.observability.log_json);
        assert_eq!(settings.call.principal_name, "Priya");
        assert_eq!(settings.call.talking_points, vec!["Your order ships Friday"]);
    }

    #[test]
    fn test_load_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("absent"), None).unwrap();
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_settings_yaml_roundtrip_shape() {
        let yaml = serde_yaml::to_string(&Settings::default()).unwrap();
        assert!(yaml.contains("principal_name"));
        assert!(yaml.contains("log_level"));
    }
}
