//! Configuration validation.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Reject values the pipeline cannot work with.
    ///
    /// Generation parameters are only checked for presence; ranges are left
    /// to the endpoint to enforce.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.model.model_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "model.model_id must not be empty".into(),
            ));
        }
        if self.model.region.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "model.region must not be empty".into(),
            ));
        }
        if self.model.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "model.max_tokens must be > 0".into(),
            ));
        }
        if self.layout.prompt_file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "layout.prompt_file_name must not be empty".into(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_max_tokens() {
        let mut config = Config::default();
        config.model.max_tokens = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }

    #[test]
    fn test_validate_rejects_blank_region() {
        let mut config = Config::default();
        config.model.region = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("model.region"));
    }

    #[test]
    fn test_validate_rejects_empty_model_id() {
        let mut config = Config::default();
        config.model.model_id.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("model_id"));
    }

    #[test]
    fn test_validate_allows_out_of_range_temperature() {
        let mut config = Config::default();
        config.model.temperature = 7.5;
        assert!(config.validate().is_ok());
    }
}
