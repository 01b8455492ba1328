use crate::common::model::Score;
use itertools::Itertools;

/// Number of entries returned by every ranking endpoint.
pub const MAX_RESULTS: usize = 20;

/// Keeps entries scoring above zero, sorts them by descending score and truncates to `top_n`.
///
/// The sort is stable: entries with equal scores keep the order the caller passed them in.
pub fn rank<T: Score>(results: Vec<T>, top_n: usize) -> Vec<T> {
    results
        .into_iter()
        .filter(|r| r.score() > 0.0)
        .sorted_by(|a, b| {
            a.score()
                .partial_cmp(&b.score())
                .unwrap_or(std::cmp::Ordering::Equal)
                .reverse()
        })
        .take(top_n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Scored {
        id: i64,
        score: f64,
    }

    impl Score for Scored {
        fn score(&self) -> f64 {
            self.score
        }
    }

    fn scored(values: &[f64]) -> Vec<Scored> {
        values
            .iter()
            .enumerate()
            .map(|(i, &score)| Scored {
                id: i as i64 + 1,
                score,
            })
            .collect()
    }

    fn ids(ranked: &[Scored]) -> Vec<i64> {
        ranked.iter().map(|s| s.id).collect()
    }

    #[test]
    fn drops_zero_scores_and_keeps_tie_order() {
        let ranked = rank(scored(&[5.0, 10.0, 0.0, 10.0]), 2);
        assert_eq!(ids(&ranked), vec![2, 4]);
    }

    #[test]
    fn returns_fewer_than_top_n_when_not_enough_candidates() {
        let ranked = rank(scored(&[5.0, 10.0, 0.0, 10.0]), 20);
        assert_eq!(ids(&ranked), vec![2, 4, 1]);
    }

    #[test]
    fn sorts_descending() {
        let ranked = rank(scored(&[1.0, 3.5, 2.25, 0.5]), MAX_RESULTS);
        assert_eq!(ids(&ranked), vec![2, 3, 1, 4]);
    }

    #[test]
    fn empty_input_gives_empty_ranking() {
        assert!(rank(Vec::<Scored>::new(), MAX_RESULTS).is_empty());
        assert!(rank(scored(&[0.0, 0.0]), MAX_RESULTS).is_empty());
    }

    #[test]
    fn truncates_to_top_n() {
        let values: Vec<f64> = (1..=30).map(f64::from).collect();
        let ranked = rank(scored(&values), MAX_RESULTS);
        assert_eq!(ranked.len(), MAX_RESULTS);
        assert_eq!(ranked[0].id, 30);
        assert_eq!(ranked[MAX_RESULTS - 1].id, 11);
    }
}
