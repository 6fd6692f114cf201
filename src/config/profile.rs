use crate::utils::error::{DeskError, Result};
use crate::utils::validation;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML profile for a backend environment, so operators do not
/// retype the base URL and token on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskProfile {
    pub backend: BackendConfig,
    pub tables: Option<TableDefaults>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDefaults {
    pub page_size: Option<u32>,
    pub state_dir: Option<String>,
}

impl DeskProfile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeskError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let profile: DeskProfile =
            toml::from_str(&processed_content).map_err(|e| DeskError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        profile.validate_config()?;
        Ok(profile)
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables
    /// are left in place so validation flags them in context.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("backend.base_url", &self.backend.base_url)?;

        if let Some(timeout) = self.backend.timeout_seconds {
            validation::validate_positive_number("backend.timeout_seconds", timeout as usize, 1)?;
        }

        if let Some(token) = &self.backend.auth_token {
            validation::validate_non_empty_string("backend.auth_token", token)?;
        }

        if let Some(tables) = &self.tables {
            if let Some(page_size) = tables.page_size {
                validation::validate_range("tables.page_size", page_size, 1, 500)?;
            }
            if let Some(state_dir) = &tables.state_dir {
                validation::validate_path("tables.state_dir", state_dir)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_profile_parses() {
        let profile = DeskProfile::from_toml_str(
            r#"
            [backend]
            base_url = "https://desk.internal/api"
            "#,
        )
        .unwrap();
        assert_eq!(profile.backend.base_url, "https://desk.internal/api");
        assert!(profile.tables.is_none());
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("DESK_TEST_TOKEN", "secret-token");
        let profile = DeskProfile::from_toml_str(
            r#"
            [backend]
            base_url = "https://desk.internal/api"
            auth_token = "${DESK_TEST_TOKEN}"
            "#,
        )
        .unwrap();
        assert_eq!(profile.backend.auth_token.as_deref(), Some("secret-token"));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let err = DeskProfile::from_toml_str(
            r#"
            [backend]
            base_url = "ftp://desk.internal"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, DeskError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn oversized_page_size_is_rejected() {
        let err = DeskProfile::from_toml_str(
            r#"
            [backend]
            base_url = "https://desk.internal"

            [tables]
            page_size = 1000
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, DeskError::InvalidConfigValueError { .. }));
    }
}
