/// Broad failure category, used to pick the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid configuration (e.g. an election year with no known date).
    Config,
    /// The input header lacks a required column.
    MissingColumn,
    /// A date string could not be parsed.
    Format,
    /// Opening, reading, or writing a file failed.
    Io,
    /// Chart drawing failed.
    Render,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Config | ErrorKind::MissingColumn | ErrorKind::Format => 2,
            ErrorKind::Io | ErrorKind::Render => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn missing_column(name: &str) -> Self {
        Self::new(ErrorKind::MissingColumn, format!("Missing required column: `{name}`"))
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(AppError::missing_column("County").exit_code(), 2);
        assert_eq!(AppError::config("bad year").exit_code(), 2);
        assert_eq!(AppError::io("disk full").exit_code(), 4);
        assert_eq!(AppError::render("no area").exit_code(), 4);
    }

    #[test]
    fn missing_column_names_the_column() {
        let err = AppError::missing_column("Birthdate");
        assert_eq!(err.kind(), ErrorKind::MissingColumn);
        assert_eq!(err.to_string(), "Missing required column: `Birthdate`");
    }
}
