pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_condition, prompt_food, prompt_modifiers, prompt_sensory_checks, prompt_yes_no,
};
pub use render::{
    display_discard, display_disclaimer, display_estimate, display_food_list, display_modifiers,
    display_recommendations, format_duration,
};
