use thiserror::Error;

use crate::domain::ProfileField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileFieldError {
    #[error("{} is required", .field.label())]
    Required { field: ProfileField },
}

impl ProfileFieldError {
    pub fn field(&self) -> ProfileField {
        match self {
            ProfileFieldError::Required { field } => *field,
        }
    }
}
