mod error;
mod objective;
mod path;
#[allow(clippy::module_inception)]
pub mod routing;
mod search;

pub use error::*;
pub use objective::*;
pub use path::*;
pub use routing::{WALK_MODE, WALKING_SPEED, route, walking_time};
pub use search::*;
