pub mod constants;
pub mod estimate;
pub mod search;

pub use constants::*;
pub use estimate::{assess, estimate};
pub use search::{FoodMatch, search_foods};
