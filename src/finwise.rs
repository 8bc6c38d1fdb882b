mod api;
mod transaction;

pub use self::api::*;
pub use self::transaction::*;
