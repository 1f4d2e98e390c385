mod migrate;
mod server;
mod submit;

pub use migrate::migrate;
pub use server::serve;
pub use submit::{SubmitArgs, submit};
