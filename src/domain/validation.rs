use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidPasswordHash,
    TimezoneOutOfRange { min: i8, max: i8, actual: i8 },
    InvalidTimeRange { start: String, end: String },
    TimezoneWithoutTime,
    ConflictingTime,
    ReservedParam { key: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidPasswordHash => {
                write!(f, "password hash must be 32 lowercase hex characters")
            }
            Self::TimezoneOutOfRange { min, max, actual } => {
                write!(
                    f,
                    "timezone offset out of range: {actual} (expected {min}..={max})"
                )
            }
            Self::InvalidTimeRange { start, end } => {
                write!(f, "time range start {start} must be before end {end}")
            }
            Self::TimezoneWithoutTime => write!(f, "timezone given without a send time"),
            Self::ConflictingTime => write!(f, "only one send time may be set per message"),
            Self::ReservedParam { key } => {
                write!(f, "extra parameter {key} is reserved and cannot be overridden")
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
        let err = ValidationError::Empty { field: "mes" };
        assert_eq!(err.to_string(), "mes must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::TimezoneOutOfRange {
            min: -15,
            max: 11,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "timezone offset out of range: 12 (expected -15..=11)"
        );

        let err = ValidationError::ReservedParam {
            key: "psw".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "extra parameter psw is reserved and cannot be overridden"
        );

        assert_eq!(
            ValidationError::TimezoneWithoutTime.to_string(),
            "timezone given without a send time"
        );
    }
}
