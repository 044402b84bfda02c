mod tracing;
pub use self::tracing::*;

mod date;
pub use date::*;
