use std::fmt;

/// Result type for levelscope-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading telemetry
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// CSV decoding failed
    Csv(csv::Error),

    /// Required columns are absent from the CSV header
    MissingColumns(Vec<String>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::MissingColumns(columns) => {
                write!(f, "Missing required columns in CSV: {}", columns.join(", "))
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::MissingColumns(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_names() {
        let err = Error::MissingColumns(vec!["avg_speed".to_string(), "level_id".to_string()]);
        let msg = err.to_string();

        assert!(msg.starts_with("Missing required columns"));
        assert!(msg.contains("avg_speed, level_id"));
    }
}
