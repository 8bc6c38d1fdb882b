mod api;
mod budget;

pub use self::api::*;
pub use self::budget::*;
