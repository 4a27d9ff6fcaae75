//! Assembles the terminal report for one workflow run.

use std::collections::BTreeMap;

use url::Url;

use sitelens_model::{
    AuditReport, AuditType, CheckOutcome, CheckStatus, ChecklistSummary,
    HttpSnapshot, PageSnapshot, ProviderKind, ProviderResults,
    ProviderSummary, RobotsSnapshot, SitemapSnapshot, SpeedSnapshot,
};

fn describe_page(snap: &PageSnapshot) -> String {
    format!(
        "{} words, {} images, {} internal links",
        snap.word_count, snap.images_total, snap.internal_links
    )
}

fn describe_http(snap: &HttpSnapshot) -> String {
    format!(
        "status {} over {}",
        snap.status_code,
        if snap.https { "https" } else { "http" }
    )
}

fn describe_robots(snap: &RobotsSnapshot) -> String {
    if snap.found {
        format!("{} rules, {} sitemap links", snap.rule_count, snap.sitemap_urls.len())
    } else {
        "robots.txt not found".to_string()
    }
}

fn describe_sitemap(snap: &SitemapSnapshot) -> String {
    if snap.found {
        format!(
            "{} entries{}",
            snap.url_count,
            if snap.is_index { " (sitemap index)" } else { "" }
        )
    } else {
        "sitemap not found".to_string()
    }
}

fn describe_speed(snap: &SpeedSnapshot) -> String {
    format!(
        "{} ms, {} bytes{}",
        snap.response_ms,
        snap.body_bytes,
        if snap.compressed { ", compressed" } else { "" }
    )
}

fn provider_summaries(
    results: &ProviderResults,
) -> BTreeMap<String, ProviderSummary> {
    let mut map = BTreeMap::new();
    for kind in ProviderKind::PRIORITY {
        let summary = match kind {
            ProviderKind::Page => results.page.as_ref().map(|outcome| {
                match outcome.data() {
                    Some(snap) => ProviderSummary::ok(describe_page(snap)),
                    None => failed(outcome.failure()),
                }
            }),
            ProviderKind::Http => results.http.as_ref().map(|outcome| {
                match outcome.data() {
                    Some(snap) => ProviderSummary::ok(describe_http(snap)),
                    None => failed(outcome.failure()),
                }
            }),
            ProviderKind::Robots => {
                results.robots.as_ref().map(|outcome| match outcome.data() {
                    Some(snap) => ProviderSummary::ok(describe_robots(snap)),
                    None => failed(outcome.failure()),
                })
            }
            ProviderKind::Sitemap => {
                results.sitemap.as_ref().map(|outcome| match outcome.data()
                {
                    Some(snap) => {
                        ProviderSummary::ok(describe_sitemap(snap))
                    }
                    None => failed(outcome.failure()),
                })
            }
            ProviderKind::Speed => {
                results.speed.as_ref().map(|outcome| match outcome.data() {
                    Some(snap) => ProviderSummary::ok(describe_speed(snap)),
                    None => failed(outcome.failure()),
                })
            }
        };
        if let Some(summary) = summary {
            map.insert(kind.as_str().to_string(), summary);
        }
    }
    map
}

fn failed(
    failure: Option<&sitelens_model::ProviderFailure>,
) -> ProviderSummary {
    // Outcome is Failed here, so the failure is always present.
    let message = failure
        .map(|f| f.message.clone())
        .unwrap_or_else(|| "unknown failure".to_string());
    ProviderSummary::failed(message)
}

fn summarize_checklist(outcomes: Vec<CheckOutcome>) -> ChecklistSummary {
    let mut summary = ChecklistSummary {
        total: outcomes.len(),
        ..Default::default()
    };
    for outcome in &outcomes {
        match outcome.status {
            CheckStatus::Pass => summary.passed += 1,
            CheckStatus::Warn => summary.warned += 1,
            CheckStatus::Fail => summary.failed += 1,
            CheckStatus::Error => summary.errors += 1,
            CheckStatus::Skipped => summary.skipped += 1,
            CheckStatus::Manual => summary.manual += 1,
        }
    }
    summary.items = outcomes;
    summary
}

/// Human-readable rollup line for the top of the report.
fn summary_line(score: u8, checklist: &ChecklistSummary) -> String {
    let evaluated =
        checklist.passed + checklist.warned + checklist.failed;
    let mut parts = vec![format!(
        "Score {score}/100: {}/{evaluated} automated checks passed",
        checklist.passed
    )];

    let top_issues: Vec<String> = checklist
        .items
        .iter()
        .filter(|item| item.status == CheckStatus::Fail)
        .take(3)
        .map(|item| match &item.detail {
            Some(detail) => format!("{} ({detail})", item.label),
            None => item.label.clone(),
        })
        .collect();
    if !top_issues.is_empty() {
        parts.push(format!("Top issues: {}", top_issues.join("; ")));
    }
    if checklist.errors > 0 {
        parts.push(format!(
            "{} checks could not be evaluated",
            checklist.errors
        ));
    }
    if checklist.manual > 0 {
        parts.push(format!(
            "{} items need manual review",
            checklist.manual
        ));
    }
    parts.join(". ")
}

/// Build the final report from one run's evaluated pieces.
pub fn build_report(
    url: &Url,
    audit_type: AuditType,
    results: &ProviderResults,
    outcomes: Vec<CheckOutcome>,
    score: u8,
) -> AuditReport {
    let checklist = summarize_checklist(outcomes);
    let summary = summary_line(score, &checklist);
    AuditReport {
        url: url.to_string(),
        audit_type,
        score,
        summary,
        results: provider_summaries(results),
        checklist,
    }
}
