pub mod cli;

pub mod db;

mod state;
pub use state::*;

pub mod routes;
