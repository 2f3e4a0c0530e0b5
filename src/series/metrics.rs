use crate::model::QuakeEvent;

/// Mean quake magnitude rounded to two decimals; 0 when there are no quakes.
pub fn average_magnitude(quakes: &[QuakeEvent]) -> f64 {
    if quakes.is_empty() {
        return 0.0;
    }
    let total: f64 = quakes.iter().map(|q| q.magnitude).sum();
    round_to(total / quakes.len() as f64, 2)
}

/// Commits per quake rounded to one decimal; 0 when there are no quakes.
pub fn chaos_ratio(commit_count: usize, quake_count: usize) -> f64 {
    if quake_count == 0 {
        return 0.0;
    }
    round_to(commit_count as f64 / quake_count as f64, 1)
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn quake(magnitude: f64) -> QuakeEvent {
        QuakeEvent {
            id: "q".to_string(),
            timestamp: Utc::now(),
            magnitude,
            place: "offshore".to_string(),
        }
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average_magnitude(&[]), 0.0);
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        assert_eq!(average_magnitude(&[quake(3.0), quake(5.0)]), 4.0);
        assert_eq!(average_magnitude(&[quake(2.5), quake(2.6), quake(2.6)]), 2.57);
    }

    #[test]
    fn chaos_ratio_guards_division_by_zero() {
        assert_eq!(chaos_ratio(10, 0), 0.0);
    }

    #[test]
    fn chaos_ratio_is_rounded_to_one_decimal() {
        assert_eq!(chaos_ratio(10, 4), 2.5);
        assert_eq!(chaos_ratio(10, 3), 3.3);
    }
}
