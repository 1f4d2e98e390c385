use crate::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid contact submission")]
    Validation(Vec<FieldError>),

    #[error("contact not found")]
    NotFound,

    #[error("{0}")]
    Persistence(#[from] sqlx::Error),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
