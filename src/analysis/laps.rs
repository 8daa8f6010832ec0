use crate::analysis::types::Lap;

/// A difference in average speed above this many m/s between two laps is
/// treated as evidence of structured, non-steady pacing.
pub const SPEED_JUMP_THRESHOLD: f64 = 2.0;

/// True when two laps differ in average speed by more than the jump threshold.
pub fn is_speed_jump(first: &Lap, second: &Lap) -> bool {
    (first.average_speed - second.average_speed).abs() > SPEED_JUMP_THRESHOLD
}

/// True when the pair of laps straddling the midpoint of the sequence shows a
/// speed jump. Fewer than two laps, or a midpoint lap that is also the last
/// lap, can never be interval-shaped.
pub fn is_interval_shaped(laps: &[Lap]) -> bool {
    if laps.len() < 2 {
        return false;
    }
    let mid = laps.len() / 2;
    match (laps.get(mid), laps.get(mid + 1)) {
        (Some(first), Some(second)) => is_speed_jump(first, second),
        _ => false,
    }
}
