//! Check providers: the network-facing half of an audit.
//!
//! Each provider is a small trait with one `probe` call returning a
//! typed snapshot; [`ProviderSet`] bundles one implementation of each
//! behind trait objects so the workflow never names a concrete probe.
//! [`build_provider_set`] wires the live reqwest-backed set over a
//! single shared client.

mod client;
pub mod http;
pub mod page;
pub mod robots;
pub mod sitemap;
pub mod speed;
mod traits;

use std::sync::Arc;

pub use client::ProbeConfig;
pub use traits::{
    HttpProbe, PageProbe, ProviderSet, RobotsProbe, SitemapProbe,
    SpeedProbe,
};

use crate::error::Result;

/// Build the live provider set. All probes share one HTTP client.
pub fn build_provider_set(config: &ProbeConfig) -> Result<ProviderSet> {
    let client = client::build_client(config)?;
    Ok(ProviderSet::new(
        Arc::new(page::WebPageProbe::new(client.clone())),
        Arc::new(http::WebHttpProbe::new(client.clone())),
        Arc::new(robots::WebRobotsProbe::new(client.clone())),
        Arc::new(sitemap::WebSitemapProbe::new(client.clone())),
        Arc::new(speed::WebSpeedProbe::new(client)),
    ))
}
