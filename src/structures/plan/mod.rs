mod leg;
mod place;
mod plan;

pub use leg::*;
pub use place::*;
pub use plan::*;
