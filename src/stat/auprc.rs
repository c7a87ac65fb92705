//! Pooled precision-recall curve
//!
//! All classes of a node are pooled into a single ranking: a class is scored
//! by its positive mass, and walking down the ranking accumulates true
//! positives (the class's positive mass) and false positives (the remaining
//! weight of the node). Classes with equal scores form one threshold and
//! therefore one curve point.

use std::cmp::Ordering;

/// One point of a precision-recall curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrCurvePoint {
    pub recall: f64,
    pub precision: f64,
}

impl PrCurvePoint {
    fn from_counts(tp: f64, fp: f64, condition_positives: f64) -> Self {
        Self {
            recall: tp / condition_positives,
            precision: tp / (tp + fp),
        }
    }
}

/// Build the pooled curve ranking classes by `scores` (descending)
///
/// `masses[i]` is the positive mass credited when class `i` is passed and
/// `sum_weight` the node weight, so each class adds `sum_weight - masses[i]`
/// false positives. The ranking is stable: equal scores keep index order,
/// and NaN scores rank last as one tied group.
/// A point is emitted before each change of score and once at the end.
/// Recall is NaN when the masses sum to zero and precision is NaN when no
/// weight has been passed; both propagate.
pub fn pooled_pr_curve(scores: &[f64], masses: &[f64], sum_weight: f64) -> Vec<PrCurvePoint> {
    let n = scores.len().min(masses.len());
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| descending(scores[a], scores[b]));

    let condition_positives: f64 = masses[..n].iter().sum();
    let mut curve = Vec::new();
    let mut tp = 0.0;
    let mut fp = 0.0;
    let mut prev: Option<f64> = None;
    for &class in &order {
        let score = scores[class];
        if prev.is_some_and(|prev| !same_score(prev, score)) {
            curve.push(PrCurvePoint::from_counts(tp, fp, condition_positives));
        }
        tp += masses[class];
        fp += sum_weight - masses[class];
        prev = Some(score);
    }
    curve.push(PrCurvePoint::from_counts(tp, fp, condition_positives));
    curve
}

/// Descending order on scores with NaN after every number
///
/// `0.0` and `-0.0` compare equal.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

fn same_score(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Trapezoidal area under `curve`, integrating left to right
///
/// Fewer than two points enclose no area.
pub fn curve_area(curve: &[PrCurvePoint]) -> f64 {
    curve
        .windows(2)
        .map(|pair| {
            0.5 * (pair[1].precision + pair[0].precision) * (pair[1].recall - pair[0].recall)
        })
        .sum()
}

/// Pooled AUPRC ranking classes by their own positive mass
pub fn pooled_auprc(masses: &[f64], sum_weight: f64) -> f64 {
    curve_area(&pooled_pr_curve(masses, masses, sum_weight))
}

/// Pooled AUPRC ranking classes by the mass difference to a reference
///
/// The reference only changes the ranking; true and false positives are
/// still counted from `masses`.
pub fn pooled_auprc_diff(masses: &[f64], reference: &[f64], sum_weight: f64) -> f64 {
    let scores: Vec<f64> = masses
        .iter()
        .zip(reference)
        .map(|(mass, reference)| mass - reference)
        .collect();
    curve_area(&pooled_pr_curve(&scores, masses, sum_weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_class_curve_by_hand() {
        // Class 0 (mass 3) first: TP=3, FP=1 -> point (0.75, 0.75) at the score change
        // Class 1 (mass 1): TP=4, FP=4 -> final point (1.0, 0.5)
        let curve = pooled_pr_curve(&[3.0, 1.0], &[3.0, 1.0], 4.0);
        assert_eq!(curve.len(), 2);
        assert_relative_eq!(curve[0].recall, 0.75);
        assert_relative_eq!(curve[0].precision, 0.75);
        assert_relative_eq!(curve[1].recall, 1.0);
        assert_relative_eq!(curve[1].precision, 0.5);
        assert_relative_eq!(curve_area(&curve), 0.5 * (0.5 + 0.75) * 0.25);
    }

    #[test]
    fn test_descending_order_regardless_of_index() {
        let forward = pooled_auprc(&[3.0, 1.0], 4.0);
        let reversed = pooled_auprc(&[1.0, 3.0], 4.0);
        assert_relative_eq!(forward, reversed);
        let curve = pooled_pr_curve(&[1.0, 3.0], &[1.0, 3.0], 4.0);
        assert_relative_eq!(curve[0].recall, 0.75);
    }

    #[test]
    fn test_ties_collapse_to_one_point() {
        let curve = pooled_pr_curve(&[2.0, 2.0, 1.0], &[2.0, 2.0, 1.0], 4.0);
        // One point after the tied group, one final point
        assert_eq!(curve.len(), 2);
        assert_relative_eq!(curve[0].recall, 0.8);
        assert_relative_eq!(curve[0].precision, 0.5);
    }

    #[test]
    fn test_all_tied_gives_single_point_and_zero_area() {
        let curve = pooled_pr_curve(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0], 2.0);
        assert_eq!(curve.len(), 1);
        assert_relative_eq!(curve[0].recall, 1.0);
        assert_eq!(curve_area(&curve), 0.0);
    }

    #[test]
    fn test_single_class_has_no_area() {
        assert_eq!(pooled_auprc(&[4.0], 4.0), 0.0);
    }

    #[test]
    fn test_zero_mass_recall_is_nan() {
        let curve = pooled_pr_curve(&[0.0, 0.0], &[0.0, 0.0], 0.0);
        assert!(curve.iter().all(|p| p.recall.is_nan()));
        assert!(curve.iter().all(|p| p.precision.is_nan()));
    }

    #[test]
    fn test_empty_curve() {
        assert_eq!(curve_area(&[]), 0.0);
        let curve = pooled_pr_curve(&[], &[], 1.0);
        assert_eq!(curve.len(), 1);
        assert!(curve[0].recall.is_nan());
    }

    #[test]
    fn test_diff_ranks_by_difference_but_counts_own_mass() {
        // Own masses [3, 1] but the reference flips the ranking
        let masses = [3.0, 1.0];
        let reference = [3.0, 0.0];
        let curve = pooled_pr_curve(&[0.0, 1.0], &masses, 4.0);
        // Class 1 first: TP=1, FP=3 -> (0.25, 0.25); then class 0: TP=4, FP=4 -> (1.0, 0.5)
        assert_relative_eq!(curve[0].recall, 0.25);
        assert_relative_eq!(curve[0].precision, 0.25);
        assert_relative_eq!(curve[1].precision, 0.5);
        let expected = 0.5 * (0.5 + 0.25) * 0.75;
        assert_relative_eq!(pooled_auprc_diff(&masses, &reference, 4.0), expected);
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let mut scores = vec![1.0; 21];
        scores[0] = f64::NAN;
        scores[2] = 3.0;
        scores[3] = f64::NAN;
        scores[4] = 2.0;
        scores[20] = f64::NAN;
        let curve = pooled_pr_curve(&scores, &[1.0; 21], 2.0);

        // Groups 3.0, 2.0, the 1.0 run, then the NaN group
        assert_eq!(curve.len(), 4);
        assert_relative_eq!(curve[2].recall, 18.0 / 21.0);
        assert_relative_eq!(curve[3].recall, 1.0);
        assert!(curve_area(&curve).is_finite());
    }

    #[test]
    fn test_nan_mass_propagates_to_area() {
        let masses = [3.0, f64::NAN, 1.0, 2.0];
        let area = pooled_auprc(&masses, 4.0);
        assert!(area.is_nan());
    }

    #[test]
    fn test_infinite_masses_in_diff_do_not_panic() {
        let masses = [f64::INFINITY, 1.0, 2.0];
        let reference = [f64::INFINITY, 0.0, 0.0];
        let area = pooled_auprc_diff(&masses, &reference, 4.0);
        assert!(area.is_nan());
    }

    #[test]
    fn test_signed_zero_scores_tie() {
        let curve = pooled_pr_curve(&[0.0, -0.0, 1.0], &[1.0, 1.0, 1.0], 2.0);
        assert_eq!(curve.len(), 2);
    }

    #[test]
    fn test_recall_non_decreasing() {
        let masses = [5.0, 0.5, 3.0, 3.0, 1.0, 0.0];
        let curve = pooled_pr_curve(&masses, &masses, 6.0);
        for pair in curve.windows(2) {
            assert!(pair[1].recall >= pair[0].recall);
        }
    }
}
