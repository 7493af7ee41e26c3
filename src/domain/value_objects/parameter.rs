//! Validated template parameters

use regex::Regex;

/// A value collected at setup time and fed into the template context.
///
/// `pattern` must match the whole answer; it is anchored on construction.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: String,
    pub prompt: String,
    pub default: Option<String>,
    pub secret: bool,
    pattern: Regex,
}

impl ParameterSpec {
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            prompt: prompt.into(),
            default: None,
            secret: false,
            pattern: Regex::new(&format!("^(?:{})$", pattern))?,
        })
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Hide the answer while typing and in error messages
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }

    /// The anchored pattern, for help text
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Parameters asked for during setup unless the configuration overrides them
    pub fn builtin() -> Result<Vec<Self>, regex::Error> {
        Ok(vec![
            Self::new("mode", "Application mode (dev or live)", "dev|live")?.with_default("live"),
            Self::new("db_adapter", "Database adapter", "mysql2|postgres|sqlite3")?
                .with_default("postgres"),
            Self::new("db_host", "Database host", r"[\w.\-]+")?.with_default("localhost"),
            Self::new("db_name", "Database name", r"\w+")?,
            Self::new("db_user", "Database user", r"\w+")?,
            Self::new("db_password", "Database password", ".*")?.secret(),
        ])
    }
}
