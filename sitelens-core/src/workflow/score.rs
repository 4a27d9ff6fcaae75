//! Weighted scoring over evaluated checklist outcomes.

use sitelens_model::{CheckItemSpec, CheckOutcome, CheckStatus};

/// Weighted score in 0..=100.
///
/// Only items that are scorable by definition (automated, with a
/// provider and an evaluation wired) enter the calculation, and among
/// those an errored outcome drops the item from both the numerator and
/// the denominator rather than dragging the score down. A pass earns
/// the full weight, a warn earns half (rounded), a fail earns nothing.
/// With nothing evaluable the score is 0.
pub fn score_checklist(
    items: &[CheckItemSpec],
    outcomes: &[CheckOutcome],
) -> u8 {
    debug_assert_eq!(items.len(), outcomes.len());

    let mut earned: u64 = 0;
    let mut max: u64 = 0;

    for (item, outcome) in items.iter().zip(outcomes) {
        debug_assert_eq!(item.id, outcome.id);
        if !item.scorable() || outcome.status == CheckStatus::Error {
            continue;
        }
        let weight = u64::from(item.weight);
        max += weight;
        earned += match outcome.status {
            CheckStatus::Pass => weight,
            CheckStatus::Warn => (weight as f64 * 0.5).round() as u64,
            _ => 0,
        };
    }

    if max == 0 {
        return 0;
    }
    ((earned as f64 / max as f64) * 100.0).round() as u8
}
