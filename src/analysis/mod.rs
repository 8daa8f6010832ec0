pub mod classify;
pub mod laps;
pub mod prompt;
pub mod types;
pub mod units;

pub use classify::{ClassifierConfig, WorkoutCategory, classify};
pub use laps::{is_interval_shaped, is_speed_jump};
pub use prompt::build_prompt;
pub use types::{Lap, Workout};
pub use units::{humanize_duration, to_kilometers};
