//! Sequential provider dispatch under a shared deadline.

use tokio::time::{Instant, timeout};
use tracing::{debug, warn};
use url::Url;

use sitelens_model::{
    CheckItemSpec, EvalKind, FailureKind, ProviderFailure, ProviderKind,
    ProviderOutcome, ProviderResults,
};

use crate::providers::ProviderSet;
use crate::workflow::progress::ProgressReporter;

/// Second provider an evaluation reads beyond the item's own.
///
/// Cross-provider verdicts compare two snapshots; their companion must
/// be scheduled even when no item names it directly, or the verdict
/// degrades to an error on every run.
fn companion_provider(eval: EvalKind) -> Option<ProviderKind> {
    match eval {
        EvalKind::CanonicalMatchesFinalUrl => Some(ProviderKind::Http),
        EvalKind::SitemapListedInRobots => Some(ProviderKind::Robots),
        _ => None,
    }
}

/// Providers an audit's checklist actually needs, in canonical
/// execution order. An item's position in the checklist never changes
/// when its provider runs, and each provider appears at most once no
/// matter how many items reference it.
pub fn scheduled_providers(items: &[CheckItemSpec]) -> Vec<ProviderKind> {
    ProviderKind::PRIORITY
        .into_iter()
        .filter(|kind| {
            items.iter().any(|item| {
                item.auto
                    && (item.provider == Some(*kind)
                        || item.eval.and_then(companion_provider)
                            == Some(*kind))
            })
        })
        .collect()
}

/// Run the scheduled providers one at a time against `target`.
///
/// Every provider call is raced against the remaining deadline budget.
/// A call that outlives the budget is recorded as a timeout failure and
/// every provider after it is recorded as skipped; execution then stops.
/// Provider errors of any kind are captured in the results, never
/// propagated, so dispatch itself is infallible.
pub async fn run_providers(
    providers: &ProviderSet,
    target: &Url,
    scheduled: &[ProviderKind],
    deadline: Instant,
    progress: &ProgressReporter,
) -> ProviderResults {
    let mut results = ProviderResults::default();

    for (index, kind) in scheduled.iter().copied().enumerate() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            skip_remaining(&mut results, &scheduled[index..], index, progress)
                .await;
            break;
        }

        debug!(provider = %kind, remaining_ms = remaining.as_millis() as u64,
            "dispatching provider");

        let failure = match kind {
            ProviderKind::Page => {
                match timeout(remaining, providers.page.probe(target)).await {
                    Ok(Ok(snapshot)) => {
                        results.page = Some(ProviderOutcome::Ok(snapshot));
                        None
                    }
                    Ok(Err(error)) => {
                        Some(ProviderFailure::upstream(error.to_string()))
                    }
                    Err(_) => Some(ProviderFailure::deadline_exceeded()),
                }
            }
            ProviderKind::Http => {
                match timeout(remaining, providers.http.probe(target)).await {
                    Ok(Ok(snapshot)) => {
                        results.http = Some(ProviderOutcome::Ok(snapshot));
                        None
                    }
                    Ok(Err(error)) => {
                        Some(ProviderFailure::upstream(error.to_string()))
                    }
                    Err(_) => Some(ProviderFailure::deadline_exceeded()),
                }
            }
            ProviderKind::Robots => {
                match timeout(remaining, providers.robots.probe(target)).await
                {
                    Ok(Ok(snapshot)) => {
                        results.robots = Some(ProviderOutcome::Ok(snapshot));
                        None
                    }
                    Ok(Err(error)) => {
                        Some(ProviderFailure::upstream(error.to_string()))
                    }
                    Err(_) => Some(ProviderFailure::deadline_exceeded()),
                }
            }
            ProviderKind::Sitemap => {
                match timeout(remaining, providers.sitemap.probe(target))
                    .await
                {
                    Ok(Ok(snapshot)) => {
                        results.sitemap = Some(ProviderOutcome::Ok(snapshot));
                        None
                    }
                    Ok(Err(error)) => {
                        Some(ProviderFailure::upstream(error.to_string()))
                    }
                    Err(_) => Some(ProviderFailure::deadline_exceeded()),
                }
            }
            ProviderKind::Speed => {
                match timeout(remaining, providers.speed.probe(target)).await
                {
                    Ok(Ok(snapshot)) => {
                        results.speed = Some(ProviderOutcome::Ok(snapshot));
                        None
                    }
                    Ok(Err(error)) => {
                        Some(ProviderFailure::upstream(error.to_string()))
                    }
                    Err(_) => Some(ProviderFailure::deadline_exceeded()),
                }
            }
        };

        match failure {
            None => {
                progress
                    .provider_done(index, &format!("{kind} checks complete"))
                    .await;
            }
            Some(failure) => {
                warn!(provider = %kind, %failure, "provider failed");
                let timed_out =
                    failure.kind == FailureKind::DeadlineExceeded;
                results.record_failure(kind, failure);
                progress
                    .provider_done(index, &format!("{kind} checks failed"))
                    .await;
                if timed_out {
                    skip_remaining(
                        &mut results,
                        &scheduled[index + 1..],
                        index + 1,
                        progress,
                    )
                    .await;
                    break;
                }
            }
        }
    }

    results
}

/// Record every provider in `rest` as skipped by the deadline, still
/// emitting its progress event so event counts stay stable.
async fn skip_remaining(
    results: &mut ProviderResults,
    rest: &[ProviderKind],
    first_index: usize,
    progress: &ProgressReporter,
) {
    for (offset, kind) in rest.iter().copied().enumerate() {
        warn!(provider = %kind, "skipping provider, deadline elapsed");
        results.record_failure(kind, ProviderFailure::deadline_skipped());
        progress
            .provider_done(
                first_index + offset,
                &format!("{kind} checks skipped"),
            )
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto_item(id: &'static str, kind: ProviderKind) -> CheckItemSpec {
        CheckItemSpec {
            id,
            category: "test",
            label: "test item",
            weight: 1,
            auto: true,
            provider: Some(kind),
            eval: Some(sitelens_model::EvalKind::TitlePresent),
        }
    }

    #[test]
    fn schedule_deduplicates_and_orders_canonically() {
        // Declaration order is deliberately scrambled and repetitive.
        let items = [
            auto_item("a", ProviderKind::Speed),
            auto_item("b", ProviderKind::Page),
            auto_item("c", ProviderKind::Speed),
            auto_item("d", ProviderKind::Http),
            auto_item("e", ProviderKind::Page),
        ];
        assert_eq!(
            scheduled_providers(&items),
            vec![
                ProviderKind::Page,
                ProviderKind::Http,
                ProviderKind::Speed
            ]
        );
    }

    #[test]
    fn cross_provider_evals_schedule_their_companions() {
        // A canonical comparison needs the response probe's final URL
        // even though the item itself is fed by the page probe.
        let items = [CheckItemSpec {
            id: "canonical-self",
            category: "test",
            label: "canonical matches final URL",
            weight: 5,
            auto: true,
            provider: Some(ProviderKind::Page),
            eval: Some(EvalKind::CanonicalMatchesFinalUrl),
        }];
        assert_eq!(
            scheduled_providers(&items),
            vec![ProviderKind::Page, ProviderKind::Http]
        );

        let items = [CheckItemSpec {
            id: "sitemap-in-robots",
            category: "test",
            label: "robots.txt references the sitemap",
            weight: 5,
            auto: true,
            provider: Some(ProviderKind::Sitemap),
            eval: Some(EvalKind::SitemapListedInRobots),
        }];
        assert_eq!(
            scheduled_providers(&items),
            vec![ProviderKind::Robots, ProviderKind::Sitemap]
        );
    }

    #[test]
    fn manual_items_schedule_nothing() {
        let items = [CheckItemSpec {
            id: "m",
            category: "test",
            label: "manual item",
            weight: 1,
            auto: false,
            provider: None,
            eval: None,
        }];
        assert!(scheduled_providers(&items).is_empty());
    }
}
