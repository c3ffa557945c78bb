use crate::domain::model::{OrganizationFields, SpaceFields};
use crate::domain::ports::ConfigReader;
use crate::utils::error::{CfError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Contents of `~/.cf/config.toml`. Every key is optional; an empty file
/// is a logged-out CLI with no target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub username: String,
    pub request_timeout_seconds: Option<u64>,
    #[serde(default)]
    pub skip_ssl_validation: bool,
    #[serde(default)]
    pub trace: bool,
    pub organization: Option<OrganizationFields>,
    pub space: Option<SpaceFields>,
}

impl TomlConfig {
    /// `$CF_HOME/.cf/config.toml`, falling back to `$HOME`.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("CF_HOME")
            .or_else(|| std::env::var_os("HOME"))
            .map(|home| PathBuf::from(home).join(".cf").join("config.toml"))
    }

    /// Loads the file, treating a missing file as an empty configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(CfError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CfError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CfError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if !self.target.is_empty() {
            validate_url("target", &self.target)?;
        }

        if let Some(timeout) = self.request_timeout_seconds {
            validate_positive_number("request_timeout_seconds", timeout, 1)?;
        }

        if let Some(org) = &self.organization {
            validate_non_empty_string("organization.guid", &org.guid)?;
        }

        if let Some(space) = &self.space {
            if self.organization.is_none() {
                return Err(CfError::ConfigValidationError {
                    field: "space".to_string(),
                    message: "a space is targeted without an organization".to_string(),
                });
            }
            validate_non_empty_string("space.guid", &space.guid)?;
        }

        Ok(())
    }
}

impl ConfigReader for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.target
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn organization_fields(&self) -> Option<&OrganizationFields> {
        self.organization.as_ref()
    }

    fn space_fields(&self) -> Option<&SpaceFields> {
        self.space.as_ref()
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    fn skip_ssl_validation(&self) -> bool {
        self.skip_ssl_validation
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
