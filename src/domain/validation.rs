use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPrefix { field: &'static str, expected: &'static str },
    InvalidPhoneNumber { input: String },
    TimeoutOutOfRange { min: u16, max: u16, actual: u16 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPrefix { field, expected } => {
                write!(f, "{field} must start with `{expected}`")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::TimeoutOutOfRange { min, max, actual } => {
                write!(
                    f,
                    "ring timeout out of range: {actual} (expected {min}..={max})"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "To" };
        assert_eq!(err.to_string(), "To must not be empty");

        let err = ValidationError::InvalidPrefix {
            field: "AccountSid",
            expected: "AC",
        };
        assert_eq!(err.to_string(), "AccountSid must start with `AC`");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::TimeoutOutOfRange {
            min: 5,
            max: 600,
            actual: 601,
        };
        assert_eq!(
            err.to_string(),
            "ring timeout out of range: 601 (expected 5..=600)"
        );
    }
}
