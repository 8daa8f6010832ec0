/// Convert meters to kilometers rounded to the nearest tenth.
pub fn to_kilometers(meters: f64) -> f64 {
    let kilometers = meters / 1000.0;
    (kilometers * 10.0).round() / 10.0
}

/// Convert a duration in seconds to a human phrase: "1h 5m" or "12m".
pub fn humanize_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilometers_round_to_nearest_tenth() {
        assert_eq!(to_kilometers(0.0), 0.0);
        assert_eq!(to_kilometers(10050.0), 10.1);
        assert_eq!(to_kilometers(10040.0), 10.0);
        assert_eq!(to_kilometers(999.0), 1.0);
    }

    #[test]
    fn durations_humanize() {
        assert_eq!(humanize_duration(0), "0m");
        assert_eq!(humanize_duration(59), "0m");
        assert_eq!(humanize_duration(3600), "1h 0m");
        assert_eq!(humanize_duration(3661), "1h 1m");
        assert_eq!(humanize_duration(3900), "1h 5m");
    }
}
