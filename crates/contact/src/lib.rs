mod types;

pub use types::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod command;
        mod error;
        mod form;
        mod query;

        pub use command::*;
        pub use error::*;
        pub use form::*;
        pub use query::*;
    }
}
