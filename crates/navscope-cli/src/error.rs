use navscope_core::CoreError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] navscope_core::ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("command error: {0}")]
    Command(String),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Command(_) => 2,
            Self::Core(CoreError::Validation(_)) => 2,
            Self::Serialization(_) | Self::Core(CoreError::Serialization(_)) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Io(_) | Self::Core(CoreError::Io(_)) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navscope_core::ValidationError;

    #[test]
    fn maps_categories_to_exit_codes() {
        assert_eq!(CliError::from(ValidationError::EmptySchemeCode).exit_code(), 2);
        assert_eq!(CliError::Command(String::from("bad")).exit_code(), 2);
        assert_eq!(
            CliError::StrictModeViolation {
                warning_count: 1,
                error_count: 0
            }
            .exit_code(),
            5
        );

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(CliError::from(CoreError::from(io)).exit_code(), 10);

        let json = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert_eq!(CliError::from(CoreError::from(json)).exit_code(), 4);
    }
}
