use std::fmt;

use crate::analysis::laps::is_interval_shaped;
use crate::analysis::types::Workout;
use crate::analysis::units::to_kilometers;

/// Distance thresholds driving the classification decision tree. The defaults
/// are fixed values of the design; the struct exists so callers pass them
/// explicitly instead of reaching for module globals.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Below this distance (meters) every run is a short easy run.
    pub easy_run_threshold: f64,
    /// Above this distance (meters) every run is a long run.
    pub long_run_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            easy_run_threshold: 8000.0,
            long_run_threshold: 15000.0,
        }
    }
}

/// Closed set of workout categories derived from distance and lap shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutCategory {
    ShortEasy,
    LongRun,
    Interval,
    Threshold,
    EasyFlow,
}

impl fmt::Display for WorkoutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkoutCategory::ShortEasy => "Short but Sweet 💁🏽‍♂️",
            WorkoutCategory::LongRun => "Long Run ☄️",
            WorkoutCategory::Interval => "Interval training 💪🛤️",
            WorkoutCategory::Threshold => "Threshold Training 🚀🚀🚀",
            WorkoutCategory::EasyFlow => "Easy Flow 🌊🌊",
        };
        f.write_str(label)
    }
}

/// Assign a category to a workout. First match wins:
///
/// 1. distance below the easy threshold → [`WorkoutCategory::ShortEasy`];
/// 2. distance above the long threshold → [`WorkoutCategory::LongRun`];
/// 3. more laps than (ceiled) kilometers is a structured-training signal:
///    interval-shaped laps → [`WorkoutCategory::Interval`], otherwise
///    [`WorkoutCategory::Threshold`];
/// 4. everything else → [`WorkoutCategory::EasyFlow`].
///
/// The mid-band comparison uses the ceiling of the kilometer count, not the
/// rounded value used for display.
pub fn classify(workout: &Workout, config: &ClassifierConfig) -> WorkoutCategory {
    if workout.distance < config.easy_run_threshold {
        return WorkoutCategory::ShortEasy;
    }

    if workout.distance > config.long_run_threshold {
        return WorkoutCategory::LongRun;
    }

    let total_laps = workout.laps.len();
    let total_kms = to_kilometers(workout.distance).ceil() as usize;

    if total_laps > total_kms {
        if is_interval_shaped(&workout.laps) {
            return WorkoutCategory::Interval;
        }
        return WorkoutCategory::Threshold;
    }

    WorkoutCategory::EasyFlow
}
