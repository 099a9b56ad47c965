use crate::error::{DocSendError, DocSendResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_FORMATS: [&str; 2] = ["4.0", "3.1"];
pub const DEFAULT_MAX_AGE_MONTHS: u32 = 1;
pub const DEFAULT_PREPARE_CONTEXT: &str = "Can't prepare file to send";
pub const DEFAULT_SEND_CONTEXT: &str = "Can't send";

/// Settings for a [`crate::pipeline::FileSender`]
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    /// Format version tags accepted by validation
    pub allowed_formats: Vec<String>,

    /// Documents created this many calendar months before now, or earlier, are rejected
    pub max_age_months: u32,

    /// Prefix added to failures from recognition, validation and signing
    pub prepare_context: String,

    /// Prefix added to failures from delivery
    pub send_context: String,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            allowed_formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
            max_age_months: DEFAULT_MAX_AGE_MONTHS,
            prepare_context: DEFAULT_PREPARE_CONTEXT.to_string(),
            send_context: DEFAULT_SEND_CONTEXT.to_string(),
        }
    }
}

impl SenderConfig {
    pub fn builder() -> SenderConfigBuilder {
        SenderConfigBuilder::new()
    }

    /// Read a JSON config file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> DocSendResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: SenderConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DocSendResult<()> {
        if self.allowed_formats.is_empty() {
            return Err(DocSendError::ConfigError(
                "allowed_formats must not be empty".to_string(),
            ));
        }
        if self.max_age_months == 0 {
            return Err(DocSendError::ConfigError(
                "max_age_months must be at least 1".to_string(),
            ));
        }
        if self.prepare_context.is_empty() || self.send_context.is_empty() {
            return Err(DocSendError::ConfigError(
                "error context prefixes must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_allowed_format(&self, format: &str) -> bool {
        self.allowed_formats.iter().any(|f| f == format)
    }
}

/// Fluent construction of a [`SenderConfig`]
///
/// # Example
/// ```
/// use docsend_lib::config::SenderConfig;
///
/// let config = SenderConfig::builder()
///     .allowed_formats(["4.0"])
///     .max_age_months(3)
///     .build()
///     .unwrap();
/// assert!(!config.is_allowed_format("3.1"));
/// ```
#[derive(Debug, Default)]
pub struct SenderConfigBuilder {
    allowed_formats: Option<Vec<String>>,
    max_age_months: Option<u32>,
    prepare_context: Option<String>,
    send_context: Option<String>,
}

impl SenderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_formats = Some(formats.into_iter().map(Into::into).collect());
        self
    }

    pub fn max_age_months(mut self, months: u32) -> Self {
        self.max_age_months = Some(months);
        self
    }

    pub fn prepare_context(mut self, context: impl Into<String>) -> Self {
        self.prepare_context = Some(context.into());
        self
    }

    pub fn send_context(mut self, context: impl Into<String>) -> Self {
        self.send_context = Some(context.into());
        self
    }

    /// # Errors
    /// Returns `DocSendError::BuilderError` when the resulting config is invalid
    pub fn build(self) -> DocSendResult<SenderConfig> {
        let defaults = SenderConfig::default();
        let config = SenderConfig {
            allowed_formats: self.allowed_formats.unwrap_or(defaults.allowed_formats),
            max_age_months: self.max_age_months.unwrap_or(defaults.max_age_months),
            prepare_context: self.prepare_context.unwrap_or(defaults.prepare_context),
            send_context: self.send_context.unwrap_or(defaults.send_context),
        };
        config
            .validate()
            .map_err(|e| DocSendError::BuilderError(e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SenderConfig::default();
        assert!(config.is_allowed_format("4.0"));
        assert!(config.is_allowed_format("3.1"));
        assert!(!config.is_allowed_format("2.0"));
        assert_eq!(config.max_age_months, 1);
        assert_eq!(config.prepare_context, "Can't prepare file to send");
        assert_eq!(config.send_context, "Can't send");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_rejects_empty_formats() {
        let result = SenderConfig::builder()
            .allowed_formats(Vec::<String>::new())
            .build();
        assert!(matches!(result, Err(DocSendError::BuilderError(_))));
    }

    #[test]
    fn test_builder_rejects_zero_age() {
        let result = SenderConfig::builder().max_age_months(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_age_months": 6 }}"#).unwrap();

        let config = SenderConfig::load(file.path()).unwrap();
        assert_eq!(config.max_age_months, 6);
        assert_eq!(config.allowed_formats, vec!["4.0", "3.1"]);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "allowed_formats": [] }}"#).unwrap();
        assert!(matches!(
            SenderConfig::load(file.path()),
            Err(DocSendError::ConfigError(_))
        ));

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "not json").unwrap();
        assert!(matches!(
            SenderConfig::load(broken.path()),
            Err(DocSendError::Json(_))
        ));
    }
}
