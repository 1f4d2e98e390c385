mod contact;
mod error;
mod service;

pub use contact::*;
pub use error::*;
pub use service::*;
