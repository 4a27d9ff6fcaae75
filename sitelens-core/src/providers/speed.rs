//! Speed probe: times one full page download and records delivery cost.

use std::time::Instant;

use async_trait::async_trait;
use url::Url;

use sitelens_model::SpeedSnapshot;

use crate::error::{AuditError, Result};
use crate::providers::traits::SpeedProbe;

#[derive(Debug, Clone)]
pub struct WebSpeedProbe {
    client: reqwest::Client,
}

impl WebSpeedProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpeedProbe for WebSpeedProbe {
    async fn probe(&self, target: &Url) -> Result<SpeedSnapshot> {
        let started = Instant::now();
        // Setting Accept-Encoding by hand turns off the client's
        // transparent decompression, so Content-Encoding survives and
        // the byte count reflects what actually crossed the wire.
        let response = self
            .client
            .get(target.clone())
            .header(reqwest::header::ACCEPT_ENCODING, "gzip")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::HttpStatus {
                status: status.as_u16(),
                url: target.to_string(),
            });
        }

        let compressed = response
            .headers()
            .contains_key(reqwest::header::CONTENT_ENCODING);
        let body = response.bytes().await?;
        let elapsed = started.elapsed();

        Ok(SpeedSnapshot {
            response_ms: elapsed.as_millis() as u64,
            body_bytes: body.len() as u64,
            compressed,
        })
    }
}
