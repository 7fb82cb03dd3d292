mod state;
pub use state::*;

mod pool;
