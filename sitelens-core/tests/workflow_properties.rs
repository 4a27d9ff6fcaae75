//! End-to-end workflow behavior over stub providers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use sitelens_core::error::Result;
use sitelens_core::providers::{
    HttpProbe, PageProbe, ProviderSet, RobotsProbe, SitemapProbe,
    SpeedProbe,
};
use sitelens_core::workflow::progress::{LocalSink, RemoteSink};
use sitelens_core::workflow::{AuditWorkflow, WorkflowConfig};
use sitelens_core::AuditError;
use sitelens_model::{
    AuditType, CheckItemSpec, CheckStatus, EvalKind, HttpSnapshot,
    PageSnapshot, ProviderKind, RobotsSnapshot, SitemapSnapshot,
    SpeedSnapshot,
};

// ---------------------------------------------------------------------
// Stub providers

struct StubPage(PageSnapshot);

#[async_trait]
impl PageProbe for StubPage {
    async fn probe(&self, _target: &Url) -> Result<PageSnapshot> {
        Ok(self.0.clone())
    }
}

struct FailingPage(&'static str);

#[async_trait]
impl PageProbe for FailingPage {
    async fn probe(&self, _target: &Url) -> Result<PageSnapshot> {
        Err(AuditError::Internal(self.0.to_string()))
    }
}

struct StubHttp(HttpSnapshot);

#[async_trait]
impl HttpProbe for StubHttp {
    async fn probe(&self, _target: &Url) -> Result<HttpSnapshot> {
        Ok(self.0.clone())
    }
}

/// Never completes on its own; only the workflow deadline ends it.
struct StalledHttp;

#[async_trait]
impl HttpProbe for StalledHttp {
    async fn probe(&self, _target: &Url) -> Result<HttpSnapshot> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(HttpSnapshot::default())
    }
}

struct StubRobots(RobotsSnapshot);

#[async_trait]
impl RobotsProbe for StubRobots {
    async fn probe(&self, _target: &Url) -> Result<RobotsSnapshot> {
        Ok(self.0.clone())
    }
}

struct StubSitemap(SitemapSnapshot);

#[async_trait]
impl SitemapProbe for StubSitemap {
    async fn probe(&self, _target: &Url) -> Result<SitemapSnapshot> {
        Ok(self.0.clone())
    }
}

struct StubSpeed(SpeedSnapshot);

#[async_trait]
impl SpeedProbe for StubSpeed {
    async fn probe(&self, _target: &Url) -> Result<SpeedSnapshot> {
        Ok(self.0.clone())
    }
}

fn healthy_page() -> PageSnapshot {
    PageSnapshot {
        // 45 characters, inside the preferred title band.
        title: Some("Forty five character title for the test page!".to_string()),
        ..Default::default()
    }
}

fn stub_set() -> ProviderSet {
    ProviderSet::new(
        Arc::new(StubPage(healthy_page())),
        Arc::new(StubHttp(HttpSnapshot {
            status_code: 200,
            https: true,
            final_url: "https://example.com/".to_string(),
            ..Default::default()
        })),
        Arc::new(StubRobots(RobotsSnapshot {
            found: true,
            rule_count: 2,
            ..Default::default()
        })),
        Arc::new(StubSitemap(SitemapSnapshot {
            found: true,
            location: "https://example.com/sitemap.xml".to_string(),
            url_count: 10,
            is_index: false,
        })),
        Arc::new(StubSpeed(SpeedSnapshot {
            response_ms: 120,
            body_bytes: 40_000,
            compressed: true,
        })),
    )
}

// ---------------------------------------------------------------------
// Progress recording sinks

#[derive(Default)]
struct RecordingLocal(Mutex<Vec<String>>);

impl LocalSink for RecordingLocal {
    fn notify(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
struct RecordingRemote(Mutex<Vec<(usize, usize)>>);

#[async_trait]
impl RemoteSink for RecordingRemote {
    async fn notify(
        &self,
        progress: usize,
        total: usize,
        _message: &str,
    ) -> Result<()> {
        self.0.lock().unwrap().push((progress, total));
        Ok(())
    }
}

struct BrokenRemote;

#[async_trait]
impl RemoteSink for BrokenRemote {
    async fn notify(
        &self,
        _progress: usize,
        _total: usize,
        _message: &str,
    ) -> Result<()> {
        Err(AuditError::Internal("progress endpoint down".to_string()))
    }
}

// ---------------------------------------------------------------------
// Checklists

fn title_item() -> CheckItemSpec {
    CheckItemSpec {
        id: "title-length",
        category: "on-page",
        label: "Title length in preferred range",
        weight: 10,
        auto: true,
        provider: Some(ProviderKind::Page),
        eval: Some(EvalKind::TitleLength),
    }
}

fn manual_item() -> CheckItemSpec {
    CheckItemSpec {
        id: "keyword-targeting",
        category: "strategy",
        label: "Keyword targeting reviewed",
        weight: 10,
        auto: false,
        provider: None,
        eval: None,
    }
}

fn five_provider_checklist() -> Vec<CheckItemSpec> {
    let wired = [
        ("page-title", ProviderKind::Page, EvalKind::TitlePresent),
        ("https-scheme", ProviderKind::Http, EvalKind::HttpsScheme),
        ("robots-found", ProviderKind::Robots, EvalKind::RobotsFound),
        ("sitemap-found", ProviderKind::Sitemap, EvalKind::SitemapFound),
        ("response-time", ProviderKind::Speed, EvalKind::ResponseTime),
    ];
    wired
        .into_iter()
        .map(|(id, provider, eval)| CheckItemSpec {
            id,
            category: "test",
            label: id,
            weight: 10,
            auto: true,
            provider: Some(provider),
            eval: Some(eval),
        })
        .collect()
}

fn target() -> Url {
    Url::parse("https://example.com/").unwrap()
}

fn status_of<'a>(
    report: &'a sitelens_model::AuditReport,
    id: &str,
) -> &'a sitelens_model::CheckOutcome {
    report
        .checklist
        .items
        .iter()
        .find(|item| item.id == id)
        .unwrap_or_else(|| panic!("item {id} missing from report"))
}

// ---------------------------------------------------------------------
// Tests

#[tokio::test]
async fn healthy_single_item_audit_scores_perfect() {
    let workflow = AuditWorkflow::new(stub_set());
    let report = workflow
        .run(&target(), AuditType::Seo, &[title_item()], None, None)
        .await
        .unwrap();

    assert_eq!(report.score, 100);
    assert_eq!(status_of(&report, "title-length").status, CheckStatus::Pass);
    assert_eq!(report.results["page"].status, "ok");
    assert!(report.summary.starts_with("Score 100/100"));
}

#[tokio::test]
async fn provider_rejection_becomes_errors_not_failure() {
    let mut set = stub_set();
    set.page = Arc::new(FailingPage("network error"));
    let workflow = AuditWorkflow::new(set);

    let report = workflow
        .run(&target(), AuditType::Seo, &[title_item()], None, None)
        .await
        .unwrap();

    assert_eq!(report.score, 0);
    let item = status_of(&report, "title-length");
    assert_eq!(item.status, CheckStatus::Error);
    // The captured failure message is the error's full display form.
    assert_eq!(
        item.detail.as_deref(),
        Some("Internal error: network error")
    );
    assert_eq!(report.results["page"].status, "failed");
    assert!(report.summary.contains("1 checks could not be evaluated"));
}

#[tokio::test]
async fn manual_items_ride_along_without_costing_score() {
    let workflow = AuditWorkflow::new(stub_set());
    let report = workflow
        .run(
            &target(),
            AuditType::Seo,
            &[title_item(), manual_item()],
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(report.score, 100);
    assert_eq!(report.checklist.manual, 1);
    assert_eq!(
        status_of(&report, "keyword-targeting").status,
        CheckStatus::Manual
    );
    assert!(report.summary.contains("1 items need manual review"));
}

#[tokio::test]
async fn seo_canonical_comparison_gets_its_companion_provider() {
    // No SEO item is fed by the response probe directly; the canonical
    // comparison still needs its final URL.
    let mut set = stub_set();
    set.page = Arc::new(StubPage(PageSnapshot {
        canonical: Some("https://example.com/".to_string()),
        ..healthy_page()
    }));
    let workflow = AuditWorkflow::new(set);

    let report = workflow
        .run_audit(&target(), AuditType::Seo, None, None)
        .await
        .unwrap();

    assert_eq!(
        status_of(&report, "canonical-self").status,
        CheckStatus::Pass
    );
    assert_eq!(report.checklist.errors, 0);
    assert!(!report.summary.contains("could not be evaluated"));
    assert_eq!(report.results["http"].status, "ok");
}

#[tokio::test]
async fn repeated_runs_are_deterministic() {
    let workflow = AuditWorkflow::new(stub_set());
    let items = five_provider_checklist();

    let first = workflow
        .run(&target(), AuditType::Full, &items, None, None)
        .await
        .unwrap();
    let second = workflow
        .run(&target(), AuditType::Full, &items, None, None)
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn dedup_calls_each_provider_once() {
    mockall::mock! {
        Page {}

        #[async_trait]
        impl PageProbe for Page {
            async fn probe(&self, target: &Url) -> Result<PageSnapshot>;
        }
    }

    let mut page = MockPage::new();
    page.expect_probe()
        .times(1)
        .returning(|_| Ok(healthy_page()));

    let mut set = stub_set();
    set.page = Arc::new(page);
    let workflow = AuditWorkflow::new(set);

    // Three items, all fed by the page provider.
    let items = [
        title_item(),
        CheckItemSpec {
            id: "title-present",
            eval: Some(EvalKind::TitlePresent),
            ..title_item()
        },
        CheckItemSpec {
            id: "single-h1",
            eval: Some(EvalKind::SingleH1),
            ..title_item()
        },
    ];

    let report = workflow
        .run(&target(), AuditType::Seo, &items, None, None)
        .await
        .unwrap();
    assert_eq!(report.checklist.total, 3);
}

#[tokio::test(start_paused = true)]
async fn deadline_cuts_off_inflight_and_remaining_providers() {
    let mut set = stub_set();
    set.http = Arc::new(StalledHttp);
    let workflow = AuditWorkflow::with_config(
        set,
        WorkflowConfig {
            timeout: Duration::from_secs(5),
        },
    );

    let local = Arc::new(RecordingLocal::default());
    let report = workflow
        .run(
            &target(),
            AuditType::Full,
            &five_provider_checklist(),
            Some(local.clone()),
            None,
        )
        .await
        .unwrap();

    // Page ran before the stall and keeps its result.
    assert_eq!(status_of(&report, "page-title").status, CheckStatus::Pass);

    let http = status_of(&report, "https-scheme");
    assert_eq!(http.status, CheckStatus::Error);
    assert_eq!(
        http.detail.as_deref(),
        Some("workflow timeout: exceeded during execution")
    );

    for id in ["robots-found", "sitemap-found", "response-time"] {
        let item = status_of(&report, id);
        assert_eq!(item.status, CheckStatus::Error);
        assert_eq!(
            item.detail.as_deref(),
            Some("workflow timeout: execution skipped")
        );
    }

    // The page item alone is evaluable, so the score ignores the rest.
    assert_eq!(report.score, 100);

    // Event count stays providers + 2 even when providers are skipped.
    assert_eq!(local.0.lock().unwrap().len(), 7);
}

#[tokio::test]
async fn progress_events_are_ordered_and_totalled() {
    let workflow = AuditWorkflow::new(stub_set());
    let local = Arc::new(RecordingLocal::default());
    let remote = Arc::new(RecordingRemote::default());

    workflow
        .run(
            &target(),
            AuditType::Seo,
            &[title_item()],
            Some(local.clone()),
            Some(remote.clone()),
        )
        .await
        .unwrap();

    let messages = local.0.lock().unwrap();
    assert_eq!(messages.len(), 3);
    assert!(messages[0].contains("starting"));
    assert!(messages[1].contains("page"));
    assert!(messages[2].contains("complete"));

    let events = remote.0.lock().unwrap();
    assert_eq!(*events, vec![(0, 1), (1, 1), (2, 1)]);
}

#[tokio::test]
async fn broken_remote_sink_never_fails_the_audit() {
    let workflow = AuditWorkflow::new(stub_set());
    let report = workflow
        .run(
            &target(),
            AuditType::Seo,
            &[title_item()],
            None,
            Some(Arc::new(BrokenRemote)),
        )
        .await
        .unwrap();
    assert_eq!(report.score, 100);
}

#[tokio::test]
async fn pass_and_warn_weights_combine() {
    // Title passes at full weight; a 200-word body earns a warn.
    let mut set = stub_set();
    set.page = Arc::new(StubPage(PageSnapshot {
        word_count: 200,
        ..healthy_page()
    }));
    let workflow = AuditWorkflow::new(set);

    let items = [
        title_item(),
        CheckItemSpec {
            id: "word-count",
            eval: Some(EvalKind::WordCount),
            weight: 10,
            ..title_item()
        },
    ];
    let report = workflow
        .run(&target(), AuditType::Seo, &items, None, None)
        .await
        .unwrap();

    // 10 + 5 of 20 possible.
    assert_eq!(report.score, 75);
    assert_eq!(report.checklist.warned, 1);
}

#[tokio::test]
async fn built_in_checklists_run_end_to_end() {
    let workflow = AuditWorkflow::new(stub_set());
    for audit_type in AuditType::ALL {
        let report = workflow
            .run_audit(&target(), audit_type, None, None)
            .await
            .unwrap();
        assert!(report.score <= 100);
        assert_eq!(
            report.checklist.total,
            report.checklist.passed
                + report.checklist.warned
                + report.checklist.failed
                + report.checklist.errors
                + report.checklist.skipped
                + report.checklist.manual
        );
    }
}

#[tokio::test]
async fn malformed_checklist_is_rejected_up_front() {
    let workflow = AuditWorkflow::new(stub_set());
    let duplicate = [title_item(), title_item()];
    let error = workflow
        .run(&target(), AuditType::Seo, &duplicate, None, None)
        .await
        .unwrap_err();
    assert!(matches!(error, AuditError::InvalidChecklist(_)));
}
