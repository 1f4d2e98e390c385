//! Submission client: field validation and a single-flight dispatcher over a
//! configurable transport.

mod dispatcher;
mod transport;
mod validate;

pub use dispatcher::*;
pub use transport::*;
pub use validate::*;
