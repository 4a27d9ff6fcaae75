//! Response-level probe: status line, redirect destination, and the
//! security/delivery headers the technical checklist inspects.

use async_trait::async_trait;
use url::Url;

use sitelens_model::HttpSnapshot;

use crate::error::Result;
use crate::providers::traits::HttpProbe;

#[derive(Debug, Clone)]
pub struct WebHttpProbe {
    client: reqwest::Client,
}

impl WebHttpProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn header_string(
    headers: &reqwest::header::HeaderMap,
    name: reqwest::header::HeaderName,
) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[async_trait]
impl HttpProbe for WebHttpProbe {
    /// A non-2xx status is data for the checklist, not a probe failure.
    async fn probe(&self, target: &Url) -> Result<HttpSnapshot> {
        let response = self.client.get(target.clone()).send().await?;
        let headers = response.headers();
        let final_url = response.url().clone();

        Ok(HttpSnapshot {
            status_code: response.status().as_u16(),
            https: final_url.scheme() == "https",
            final_url: final_url.to_string(),
            hsts: headers
                .contains_key(reqwest::header::STRICT_TRANSPORT_SECURITY),
            x_content_type_options: headers
                .contains_key(reqwest::header::X_CONTENT_TYPE_OPTIONS),
            cache_control: header_string(
                headers,
                reqwest::header::CACHE_CONTROL,
            ),
            content_type: header_string(
                headers,
                reqwest::header::CONTENT_TYPE,
            ),
        })
    }
}
