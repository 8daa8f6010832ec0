use std::fmt::Write;

use crate::analysis::types::Workout;
use crate::analysis::units::humanize_duration;

const PROMPT_HEADER: &str = "Generate a weekly running summary based on the following workouts:\n\n";

/// Closing instructions appended once after all workout lines. Static text so
/// the prompt stays byte-for-byte reproducible for the same input.
const PROMPT_INSTRUCTIONS: &str = "\nWrite the summary in a story-telling, exciting, and motivational way, humble way suitable for \
a Strava post (no need for hashtags). Don't make it cheesy. \
The summary should consider when I was running with people or solo. \
Insights on best times of days for performance.\
- total weekly distance (mention that in context for what’s to come next week)\n- the summary should be \
written in an engaging way for the reader - not a big chunk of text.\n\
- some insights on based last week’s runs you are usually more performant at this time of \
the day based on the average heart rate and effort. \n \
Also the summary, should consider the grand scheme of things which is training for the berlin marathon in September 2024\n\n";

/// Build the summarizer prompt: one line per workout in input order, then the
/// fixed instruction block. An empty slice yields header plus instructions.
pub fn build_prompt(workouts: &[Workout]) -> String {
    let mut prompt = String::from(PROMPT_HEADER);

    for workout in workouts {
        let _ = writeln!(
            prompt,
            "- {} on {}: {:.2} km, duration {}, elevation gain {:.2} meters, average heart rate {:.1} bpm. ",
            workout.name,
            workout.date.format("%A"),
            workout.distance / 1000.0,
            humanize_duration(workout.duration),
            workout.total_elevation_gain,
            workout.heart_rate,
        );
    }

    prompt.push_str(PROMPT_INSTRUCTIONS);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(name: &str, date: &str, distance: f64) -> Workout {
        let raw = format!(
            r#"{{
                "id": 1,
                "name": "{name}",
                "distance": {distance},
                "total_elevation_gain": 35.5,
                "moving_time": 3900,
                "average_speed": 3.3,
                "average_heartrate": 150.25,
                "start_date": "{date}"
            }}"#
        );
        serde_json::from_str(&raw).expect("workout fixture")
    }

    #[test]
    fn empty_input_yields_header_and_instructions_only() {
        let prompt = build_prompt(&[]);
        assert!(prompt.starts_with(PROMPT_HEADER));
        assert!(prompt.ends_with(PROMPT_INSTRUCTIONS));
        assert!(!prompt.contains("bpm"));
    }

    #[test]
    fn one_line_per_workout_in_input_order() {
        // 2024-06-03 is a Monday, 2024-06-05 a Wednesday.
        let workouts = vec![
            workout("Morning Run", "2024-06-03T07:30:00Z", 10000.0),
            workout("Track Night", "2024-06-05T18:00:00Z", 8400.0),
        ];

        let prompt = build_prompt(&workouts);
        let lines: Vec<&str> = prompt
            .lines()
            .filter(|line| line.ends_with("bpm. "))
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "- Morning Run on Monday: 10.00 km, duration 1h 5m, elevation gain 35.50 meters, average heart rate 150.2 bpm. "
        );
        assert_eq!(
            lines[1],
            "- Track Night on Wednesday: 8.40 km, duration 1h 5m, elevation gain 35.50 meters, average heart rate 150.2 bpm. "
        );
    }

    #[test]
    fn same_input_builds_identical_prompts() {
        let workouts = vec![workout("Morning Run", "2024-06-03T07:30:00Z", 10000.0)];
        assert_eq!(build_prompt(&workouts), build_prompt(&workouts));
    }
}
