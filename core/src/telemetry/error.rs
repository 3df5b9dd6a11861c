use std::fmt;

/// A score record that could not be decoded. The whole record is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    FieldCount { found: usize },
    InvalidNumber { field: &'static str, value: String },
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount { found } => write!(
                f,
                "expected {} fields, found {found}",
                super::FIELD_COUNT
            ),
            Self::InvalidNumber { field, value } => {
                write!(f, "field `{field}` is not a valid number: {value:?}")
            }
        }
    }
}

impl std::error::Error for MalformedRecord {}
