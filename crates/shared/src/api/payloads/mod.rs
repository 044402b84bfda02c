mod field;
pub use field::*;

mod user;
pub use user::*;

mod exercise;
pub use exercise::*;

mod log;
pub use log::*;
