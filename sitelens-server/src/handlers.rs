//! Request handlers for the v1 API.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use url::Url;
use uuid::Uuid;

use sitelens_core::checklist::checklist_for;
use sitelens_core::generators::{
    MetaTagSpec, RobotsTxtSpec, SitemapEntry, render_meta_tags,
    render_robots_txt, render_sitemap,
};
use sitelens_core::safety::ensure_safe_target;
use sitelens_core::workflow::progress::TracingLocalSink;
use sitelens_model::{AuditReport, AuditType};

use crate::errors::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    pub url: String,
    #[serde(default)]
    pub audit_type: Option<String>,
}

/// An [`AuditReport`] stamped with a request id and timestamp.
#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: AuditReport,
}

pub async fn run_audit(
    State(state): State<AppState>,
    Json(request): Json<AuditRequest>,
) -> AppResult<Json<AuditResponse>> {
    let audit_type = match &request.audit_type {
        Some(raw) => raw.parse::<AuditType>().map_err(|err| {
            AppError::bad_request(err.to_string())
        })?,
        None => AuditType::Full,
    };

    let url = Url::parse(&request.url)
        .map_err(|err| AppError::bad_request(format!("invalid url: {err}")))?;
    ensure_safe_target(&url)?;

    info!(%url, %audit_type, "audit requested");
    let report = state
        .workflow
        .run_audit(&url, audit_type, Some(Arc::new(TracingLocalSink)), None)
        .await?;

    Ok(Json(AuditResponse {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        report,
    }))
}

pub async fn list_audit_types() -> Json<serde_json::Value> {
    let types: Vec<_> = AuditType::ALL
        .iter()
        .map(|audit_type| {
            let items = checklist_for(*audit_type);
            json!({
                "type": audit_type.as_str(),
                "checks": items.len(),
                "automated": items.iter().filter(|item| item.scorable()).count(),
            })
        })
        .collect();
    Json(json!({ "audit_types": types }))
}

fn text_response(content_type: &'static str, body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        body,
    )
        .into_response()
}

pub async fn generate_robots(
    Json(spec): Json<RobotsTxtSpec>,
) -> Response {
    text_response("text/plain; charset=utf-8", render_robots_txt(&spec))
}

#[derive(Debug, Deserialize)]
pub struct SitemapRequest {
    pub entries: Vec<SitemapEntry>,
}

pub async fn generate_sitemap(
    Json(request): Json<SitemapRequest>,
) -> Response {
    text_response(
        "application/xml; charset=utf-8",
        render_sitemap(&request.entries),
    )
}

pub async fn generate_meta(Json(spec): Json<MetaTagSpec>) -> Response {
    text_response("text/plain; charset=utf-8", render_meta_tags(&spec))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "time": Utc::now(),
    }))
}
