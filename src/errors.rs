use std::fmt;

#[derive(Debug, Clone)]
pub enum LinkcraftError {
    Config(String),
    FileOperation(String),
    Serialization(String),
    Validation(String),
    Transport(String),
    Remote(String),
    EditorState(String),
}

impl LinkcraftError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            LinkcraftError::Config(_) => "E001",
            LinkcraftError::FileOperation(_) => "E002",
            LinkcraftError::Serialization(_) => "E003",
            LinkcraftError::Validation(_) => "E004",
            LinkcraftError::Transport(_) => "E005",
            LinkcraftError::Remote(_) => "E006",
            LinkcraftError::EditorState(_) => "E007",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            LinkcraftError::Config(_) => "Configuration Error",
            LinkcraftError::FileOperation(_) => "File Operation Error",
            LinkcraftError::Serialization(_) => "Serialization Error",
            LinkcraftError::Validation(_) => "Validation Error",
            LinkcraftError::Transport(_) => "Transport Error",
            LinkcraftError::Remote(_) => "Server Error",
            LinkcraftError::EditorState(_) => "Editor State Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LinkcraftError::Config(msg)
            | LinkcraftError::FileOperation(msg)
            | LinkcraftError::Serialization(msg)
            | LinkcraftError::Validation(msg)
            | LinkcraftError::Transport(msg)
            | LinkcraftError::Remote(msg)
            | LinkcraftError::EditorState(msg) => msg,
        }
    }

    /// Colored output for terminals
    #[cfg(feature = "cli")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkcraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkcraftError {}

impl LinkcraftError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkcraftError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkcraftError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkcraftError::Serialization(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkcraftError::Validation(msg.into())
    }

    pub fn transport<T: Into<String>>(msg: T) -> Self {
        LinkcraftError::Transport(msg.into())
    }

    pub fn remote<T: Into<String>>(msg: T) -> Self {
        LinkcraftError::Remote(msg.into())
    }

    pub fn editor_state<T: Into<String>>(msg: T) -> Self {
        LinkcraftError::EditorState(msg.into())
    }
}

impl From<std::io::Error> for LinkcraftError {
    fn from(err: std::io::Error) -> Self {
        LinkcraftError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkcraftError {
    fn from(err: serde_json::Error) -> Self {
        LinkcraftError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for LinkcraftError {
    fn from(err: toml::ser::Error) -> Self {
        LinkcraftError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for LinkcraftError {
    fn from(err: config::ConfigError) -> Self {
        LinkcraftError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkcraftError>;
