pub mod api;
pub mod model;
pub mod types;

mod utils;
pub use utils::*;
