pub mod cache;
pub mod csv;
mod error;

pub use error::*;
