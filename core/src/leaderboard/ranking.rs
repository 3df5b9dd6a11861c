//! Ordering of the entries of one session, best first.
//!
//! 1. A failed entry ranks below every entry that has not failed.
//! 2. When the current-max points of two entries are more than
//!    [`DIVERGENCE_THRESHOLD`] apart the players are at different points of
//!    the song and are ranked by completion of the final-max points instead.
//! 3. Otherwise fewer points lost so far ranks first.
//!
//! The threshold makes this relation non-transitive across entries whose
//! current-max points straddle it, so it must not be handed to `slice::sort_by`.
//! Exact ties are left in their input order.

use {crate::telemetry::ScoreSample, std::cmp::Ordering};

pub const DIVERGENCE_THRESHOLD: u64 = 100;

pub fn compare(a: &ScoreSample, b: &ScoreSample) -> Ordering {
    a.failed.cmp(&b.failed).then_with(|| {
        if a.current_max_points.abs_diff(b.current_max_points) > DIVERGENCE_THRESHOLD {
            completion(b).total_cmp(&completion(a))
        } else {
            lost_points(a).cmp(&lost_points(b))
        }
    })
}

pub fn lost_points(sample: &ScoreSample) -> i64 {
    sample
        .current_max_points
        .saturating_sub(sample.actual_points)
}

/// Share of the final-max points already scored, clamped into `[0, 1]`.
/// A song without attainable points counts as no completion.
pub fn completion(sample: &ScoreSample) -> f64 {
    if sample.final_max_points <= 0 {
        return 0.0;
    }
    (sample.actual_points as f64 / sample.final_max_points as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(actual: i64, current_max: i64, final_max: i64, failed: bool) -> ScoreSample {
        ScoreSample::mock("S1", 1, actual, current_max, final_max, failed)
    }

    #[test]
    fn test_close_current_max_ranks_by_lost_points() {
        let a = sample(900, 1000, 2000, false);
        let b = sample(850, 1000, 2000, false);
        assert_eq!(compare(&a, &b), Ordering::Less);
        assert_eq!(compare(&b, &a), Ordering::Greater);

        // Right at the threshold lost points still decide, even though
        // completion would say otherwise.
        let ahead = sample(950, 1100, 2000, false);
        let behind = sample(900, 1000, 2000, false);
        assert_eq!(lost_points(&ahead), 150);
        assert_eq!(lost_points(&behind), 100);
        assert_eq!(compare(&behind, &ahead), Ordering::Less);
    }

    #[test]
    fn test_diverged_current_max_ranks_by_completion() {
        let c = sample(500, 600, 2000, false);
        let d = sample(1400, 1500, 2000, false);
        assert_eq!(completion(&c), 0.25);
        assert_eq!(completion(&d), 0.7);
        assert_eq!(compare(&d, &c), Ordering::Less);
        assert_eq!(compare(&c, &d), Ordering::Greater);

        // One point past the threshold flips to completion.
        let ahead = sample(950, 1101, 2000, false);
        let behind = sample(900, 1000, 2000, false);
        assert_eq!(compare(&ahead, &behind), Ordering::Less);
    }

    #[test]
    fn test_failed_always_ranks_last() {
        let perfect_but_failed = sample(2000, 2000, 2000, true);
        let awful = sample(0, 2000, 2000, false);
        let diverged = sample(-50, 10, 2000, false);

        for alive in [&awful, &diverged] {
            assert_eq!(compare(alive, &perfect_but_failed), Ordering::Less);
            assert_eq!(compare(&perfect_but_failed, alive), Ordering::Greater);
        }

        // Two failed entries are still ranked against each other.
        let failed_better = sample(900, 1000, 2000, true);
        let failed_worse = sample(800, 1000, 2000, true);
        assert_eq!(compare(&failed_better, &failed_worse), Ordering::Less);
    }

    #[test]
    fn test_completion_is_clamped() {
        assert_eq!(completion(&sample(500, 600, 0, false)), 0.0);
        assert_eq!(completion(&sample(500, 600, -20, false)), 0.0);
        assert_eq!(completion(&sample(-100, 600, 2000, false)), 0.0);
        assert_eq!(completion(&sample(2100, 2100, 2000, false)), 1.0);

        // Clamping makes overshooting entries tie.
        let over = sample(2500, 2000, 2000, false);
        let full = sample(2000, 1800, 2000, false);
        assert_eq!(compare(&over, &full), Ordering::Equal);
    }

    #[test]
    fn test_exact_tie() {
        let a = sample(700, 1000, 2000, false);
        let b = sample(700, 1000, 2000, false);
        assert_eq!(compare(&a, &b), Ordering::Equal);
    }
}
