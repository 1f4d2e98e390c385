#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),

    #[error("mail task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}
