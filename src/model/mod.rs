mod mix;
mod user;

pub use mix::*;
pub use user::*;
