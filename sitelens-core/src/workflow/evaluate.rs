//! Maps provider results through the checklist into per-item outcomes.

use sitelens_model::{
    CheckItemSpec, CheckOutcome, CheckStatus, ProviderResults,
};

use crate::checklist::evaluate;

/// Evaluate every checklist item against one run's provider results.
///
/// Outcomes come back in checklist declaration order. Evaluation is a
/// pure function of its inputs: no network, no clock, no logging side
/// channel feeding back into statuses.
pub fn evaluate_checklist(
    items: &[CheckItemSpec],
    results: &ProviderResults,
) -> Vec<CheckOutcome> {
    items
        .iter()
        .map(|item| {
            let (status, detail) = outcome_for(item, results);
            CheckOutcome {
                id: item.id.to_string(),
                category: item.category.to_string(),
                label: item.label.to_string(),
                status,
                detail,
            }
        })
        .collect()
}

fn outcome_for(
    item: &CheckItemSpec,
    results: &ProviderResults,
) -> (CheckStatus, Option<String>) {
    if !item.auto {
        return (
            CheckStatus::Manual,
            Some("requires manual review".to_string()),
        );
    }
    let (Some(provider), Some(eval)) = (item.provider, item.eval) else {
        return (
            CheckStatus::Skipped,
            Some("not yet automated".to_string()),
        );
    };
    if !results.scheduled(provider) {
        return (
            CheckStatus::Error,
            Some("provider did not run".to_string()),
        );
    }
    if let Some(failure) = results.failure_of(provider) {
        return (CheckStatus::Error, Some(failure.message.clone()));
    }
    let verdict = evaluate(eval, results);
    (verdict.status, verdict.detail)
}
