use std::error;
use std::fmt;

pub type QuatrotResult<T> = Result<T, ConfigError>;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingValue(String),
    InvalidNumber(String, String),
    InvalidSamples(String),
    UnknownFlag(String),
    ZeroAxis,
}
impl error::Error for ConfigError {}
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue(flag) => {
                write!(f, "
                    \rMissing value for {flag}",
                )
            }
            ConfigError::InvalidNumber(flag, arg) => {
                write!(f, "
                    \rInvalid number for {flag}: {arg}",
                )
            }
            ConfigError::InvalidSamples(arg) => {
                write!(f, "
                    \rInvalid sample count: {arg}",
                )
            }
            ConfigError::UnknownFlag(arg) => {
                write!(f, "
                    \rUnknown argument: {arg}",
                )
            }
            ConfigError::ZeroAxis => {
                write!(f, "
                    \rRotation axis must be finite and not zero length",
                )
            }
        }
    }
}
