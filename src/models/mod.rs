pub mod store_result;
pub mod user;

pub use store_result::*;
pub use user::*;
