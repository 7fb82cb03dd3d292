pub mod error;
pub mod payloads;
