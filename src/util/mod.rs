pub mod key;
pub mod status;

pub use key::Key;
pub use status::{Result, Status};
