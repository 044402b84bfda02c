pub mod cli;
pub mod db;
pub mod extract;
pub mod routes;

mod state;
pub use state::*;
