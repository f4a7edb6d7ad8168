use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("group name must not be empty")]
    EmptyGroupName,
    #[error("duplicate group name: {name}")]
    DuplicateGroup { name: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
