use config::{Config, ConfigError, File};
use extractors::PatternDefinition;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_QUERY: &str = r#"label:important (subject:(application OR submitted) OR body:(application OR submitted OR "Thank you for your interest"))"#;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TrackerConfig {
    #[serde(default)]
    pub gmail: GmailConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GmailConfig {
    /// OAuth client secret JSON downloaded from Google Cloud Console
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
    /// Authorized user token JSON
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
    #[serde(default = "default_query")]
    pub query: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub max_messages: Option<usize>,
}

impl Default for GmailConfig {
    fn default() -> Self {
        Self {
            credentials_file: default_credentials_file(),
            token_file: default_token_file(),
            query: default_query(),
            user_id: default_user_id(),
            max_messages: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_file")]
    pub file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub extra_patterns: Vec<PatternDefinition>,
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_token_file() -> PathBuf {
    PathBuf::from("token.json")
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

fn default_user_id() -> String {
    "me".to_string()
}

fn default_output_file() -> PathBuf {
    PathBuf::from("job_applications.csv")
}

const DEFAULT_CONFIG_FILE: &str = r#"
[gmail]
credentials_file = "credentials.json"
token_file = "token.json"
user_id = "me"
# query = 'label:important subject:(application OR submitted)'
# max_messages = 500

[output]
file = "job_applications.csv"

[logging]
# file = "email_tracker.log"

[extraction]
# Tried after the built-in patterns, in order. Group 1 is the company name.
# extra_patterns = [
#     { name = "joining", regex = 'joining\s([A-Z][a-zA-Z]+)' },
# ]
"#;

impl TrackerConfig {
    /// Load from `path`, or from the default location when no path is given.
    ///
    /// A commented default file is written first if the file does not exist yet.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::Message(format!("Failed to create config directory: {e}"))
                })?;
            }
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG_FILE).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: TrackerConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("jobtrail").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}
