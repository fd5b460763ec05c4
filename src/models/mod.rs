mod estimate;
mod modifier;
mod rule;

pub use estimate::{Assessment, Estimate, Perishability};
pub use modifier::{Adjustment, Modifier, Notes, SensoryCheck};
pub use rule::{ConditionEstimate, FoodRule, Unit, normalize_key};
