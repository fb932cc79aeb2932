/// Placeholder syntax for bind parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placeholder {
    /// PostgreSQL numbered placeholders: `$1, $2, ...`
    #[default]
    Dollar,
    /// Positional placeholders: `?, ?, ...`
    QuestionMark,
}

/// When identifiers are wrapped in double quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentQuoting {
    /// Quote only names that are not plain `[A-Za-z_][A-Za-z0-9_$]*`.
    #[default]
    AsNeeded,
    /// Quote every identifier.
    Always,
}

/// Configuration for rendering statements to SQL.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Bind parameter syntax.
    pub placeholder: Placeholder,
    /// Identifier quoting policy.
    pub quoting: IdentQuoting,
    /// Truncate SQL in debug logs (in bytes). `None` means no truncation.
    pub max_logged_sql: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder: Placeholder::Dollar,
            quoting: IdentQuoting::AsNeeded,
            max_logged_sql: Some(200),
        }
    }
}

impl RenderConfig {
    /// Create a configuration with defaults (`$n` placeholders, quote as needed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder syntax.
    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set the identifier quoting policy.
    pub fn with_quoting(mut self, quoting: IdentQuoting) -> Self {
        self.quoting = quoting;
        self
    }

    /// Set maximum SQL length written to debug logs.
    pub fn max_logged_sql(mut self, len: usize) -> Self {
        self.max_logged_sql = Some(len);
        self
    }

    /// Disable SQL truncation in debug logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql = None;
        self
    }
}
