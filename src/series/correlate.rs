use crate::model::SeriesPoint;

/// Directional-agreement score over adjacent bucket pairs, 0..=100.
///
/// A pair is synced iff both series moved strictly in the same direction;
/// a flat delta on either side never counts. Magnitudes are irrelevant,
/// only the sign of change is compared, so the two series may live on
/// entirely different scales. Fewer than two points scores 0.
pub fn synchronicity(series: &[SeriesPoint]) -> u32 {
    if series.len() < 2 {
        return 0;
    }

    let mut synced = 0usize;
    for pair in series.windows(2) {
        let commit_delta = pair[1].commit_count as i64 - pair[0].commit_count as i64;
        let quake_delta = pair[1].quake_count as i64 - pair[0].quake_count as i64;
        if (commit_delta > 0 && quake_delta > 0) || (commit_delta < 0 && quake_delta < 0) {
            synced += 1;
        }
    }

    (synced as f64 / (series.len() - 1) as f64 * 100.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(commits: u32, quakes: u32) -> SeriesPoint {
        SeriesPoint {
            key: String::new(),
            commit_count: commits,
            quake_count: quakes,
        }
    }

    #[test]
    fn short_series_scores_zero() {
        assert_eq!(synchronicity(&[]), 0);
        assert_eq!(synchronicity(&[point(5, 5)]), 0);
    }

    #[test]
    fn mixed_directions_score_half() {
        // (+2,+2) synced, (-1,+2) not: floor(1/2 * 100) = 50.
        let series = vec![point(1, 1), point(3, 3), point(2, 5)];
        assert_eq!(synchronicity(&series), 50);
    }

    #[test]
    fn both_falling_counts_as_synced() {
        let series = vec![point(5, 7), point(2, 1)];
        assert_eq!(synchronicity(&series), 100);
    }

    #[test]
    fn flat_deltas_never_sync() {
        let series = vec![point(2, 2), point(2, 2), point(2, 5), point(3, 5)];
        assert_eq!(synchronicity(&series), 0);
    }

    #[test]
    fn score_is_floored() {
        // 1 synced pair out of 3: floor(33.33) = 33.
        let series = vec![point(1, 1), point(2, 2), point(2, 3), point(1, 4)];
        assert_eq!(synchronicity(&series), 33);
    }

    #[test]
    fn perfect_agreement_scores_hundred() {
        let series = vec![point(1, 10), point(2, 30), point(5, 31), point(3, 4)];
        assert_eq!(synchronicity(&series), 100);
    }
}
