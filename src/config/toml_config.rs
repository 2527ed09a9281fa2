use crate::config::{DEFAULT_ARTICLES_FILE, DEFAULT_OUTPUT_ROOT};
use crate::core::ConfigProvider;
use crate::domain::model::DuplicatePolicy;
use crate::utils::error::{CollectError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub photos: PhotosConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub url: String,
    pub login: String,
    pub password: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotosConfig {
    pub directory: String,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub articles_file: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            articles_file: DEFAULT_ARTICLES_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub root: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_OUTPUT_ROOT.to_string(),
        }
    }
}

impl TomlConfig {
    /// Reads and parses a TOML settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| CollectError::io(path.as_ref(), e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CollectError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn api_url(&self) -> &str {
        &self.api.url
    }

    fn api_login(&self) -> &str {
        &self.api.login
    }

    fn api_password(&self) -> &str {
        &self.api.password
    }

    fn photo_directory(&self) -> &str {
        &self.photos.directory
    }

    fn articles_file(&self) -> &str {
        &self.input.articles_file
    }

    fn output_root(&self) -> &str {
        &self.output.root
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.photos.duplicate_policy
    }

    fn request_timeout_secs(&self) -> Option<u64> {
        self.api.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::config::validate_provider(self)
    }
}
