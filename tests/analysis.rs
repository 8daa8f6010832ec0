use runrecap::analysis::{
    ClassifierConfig, Workout, WorkoutCategory, build_prompt, classify, humanize_duration,
    is_interval_shaped, to_kilometers,
};

fn workout_json(distance: f64, lap_speeds: &[f64]) -> Workout {
    let laps: Vec<String> = lap_speeds
        .iter()
        .map(|speed| format!(r#"{{"average_speed": {speed}}}"#))
        .collect();
    let raw = format!(
        r#"{{
            "id": 1,
            "name": "Evening Run",
            "distance": {distance},
            "total_elevation_gain": 25.0,
            "moving_time": 2712,
            "laps": [{}],
            "average_speed": 3.3,
            "average_heartrate": 148.0,
            "start_date": "2024-06-06T19:15:00Z"
        }}"#,
        laps.join(",")
    );
    serde_json::from_str(&raw).expect("workout fixture")
}

#[test]
fn any_distance_below_eight_km_is_short_easy() {
    let config = ClassifierConfig::default();
    for distance in [0.0, 1234.5, 7999.9] {
        let workout = workout_json(distance, &[3.0, 6.0, 3.0, 6.0, 3.0, 6.0, 3.0, 6.0]);
        assert_eq!(classify(&workout, &config), WorkoutCategory::ShortEasy);
    }
}

#[test]
fn any_distance_above_fifteen_km_is_long_run() {
    let config = ClassifierConfig::default();
    for distance in [15000.1, 21097.5, 42195.0] {
        let workout = workout_json(distance, &vec![3.0; 40]);
        assert_eq!(classify(&workout, &config), WorkoutCategory::LongRun);
    }
}

#[test]
fn mid_band_without_lap_surplus_is_easy_flow() {
    let config = ClassifierConfig::default();
    // 12 km ceils to 12; 12 laps is not a surplus.
    let workout = workout_json(12000.0, &vec![3.0; 12]);
    assert_eq!(classify(&workout, &config), WorkoutCategory::EasyFlow);
}

#[test]
fn lap_surplus_splits_into_interval_or_threshold() {
    let config = ClassifierConfig::default();

    let mut speeds = vec![3.0; 13];
    speeds[7] = 6.0; // straddles the midpoint of 13 laps (index 6 vs 7)
    let interval = workout_json(12000.0, &speeds);
    assert_eq!(classify(&interval, &config), WorkoutCategory::Interval);

    let threshold = workout_json(12000.0, &vec![3.0; 13]);
    assert_eq!(classify(&threshold, &config), WorkoutCategory::Threshold);
}

#[test]
fn reference_interval_scenario() {
    // 10 km, eleven laps, a 3 m/s jump straddling the midpoint pair.
    let speeds = [3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 6.0, 3.0, 3.0, 3.0, 3.0];
    let workout = workout_json(10000.0, &speeds);
    assert_eq!(
        classify(&workout, &ClassifierConfig::default()),
        WorkoutCategory::Interval
    );
}

#[test]
fn interval_shape_is_safe_on_short_lap_sequences() {
    assert!(!is_interval_shaped(&[]));
    assert!(!is_interval_shaped(&workout_json(10000.0, &[3.0]).laps));
    // Two laps put the midpoint on the last lap; no pair to compare.
    assert!(!is_interval_shaped(&workout_json(10000.0, &[3.0, 6.0]).laps));
}

#[test]
fn duration_phrases_match_the_reference_values() {
    assert_eq!(humanize_duration(0), "0m");
    assert_eq!(humanize_duration(59), "0m");
    assert_eq!(humanize_duration(3600), "1h 0m");
    assert_eq!(humanize_duration(3661), "1h 1m");
}

#[test]
fn kilometer_conversion_rounds_to_the_nearest_tenth() {
    assert_eq!(to_kilometers(0.0), 0.0);
    assert_eq!(to_kilometers(10050.0), 10.1);
}

#[test]
fn prompt_for_no_workouts_has_header_and_instructions_only() {
    let prompt = build_prompt(&[]);
    assert!(prompt.starts_with("Generate a weekly running summary"));
    assert!(prompt.contains("story-telling"));
    assert_eq!(prompt.lines().filter(|line| line.ends_with("bpm. ")).count(), 0);
}

#[test]
fn prompt_lines_follow_the_template_in_input_order() {
    let first = workout_json(10000.0, &[]);
    let second = workout_json(8400.0, &[]);
    let prompt = build_prompt(&[first, second]);

    let lines: Vec<&str> = prompt
        .lines()
        .filter(|line| line.ends_with("bpm. "))
        .collect();
    assert_eq!(lines.len(), 2);
    // 2712 s -> 45m; Thursday comes from the fixture's start date.
    assert_eq!(
        lines[0],
        "- Evening Run on Thursday: 10.00 km, duration 45m, elevation gain 25.00 meters, average heart rate 148.0 bpm. "
    );
    assert_eq!(
        lines[1],
        "- Evening Run on Thursday: 8.40 km, duration 45m, elevation gain 25.00 meters, average heart rate 148.0 bpm. "
    );
}
