//! Target vetting for audit requests.
//!
//! Audits fetch arbitrary user-supplied URLs, so anything that would
//! point the probes at loopback, private ranges, or link-local
//! metadata endpoints is rejected before a single request goes out.
//! Hostname checks are literal only; no DNS resolution happens here.

use std::net::IpAddr;

use url::{Host, Url};

use crate::error::{AuditError, Result};

const BLOCKED_HOSTS: &[&str] = &["localhost", "0.0.0.0"];
const BLOCKED_SUFFIXES: &[&str] = &[".localhost", ".local", ".internal"];

fn blocked_ip(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => {
            v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
        }
        IpAddr::V6(v6) => {
            let segments = v6.segments();
            v6.is_loopback()
                || v6.is_unspecified()
                // fc00::/7 unique-local
                || (segments[0] & 0xfe00) == 0xfc00
                // fe80::/10 link-local
                || (segments[0] & 0xffc0) == 0xfe80
        }
    }
}

/// Reject targets an audit must never fetch.
pub fn ensure_safe_target(url: &Url) -> Result<()> {
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AuditError::UnsafeUrl(format!(
                "unsupported scheme '{other}'"
            )));
        }
    }

    let Some(host) = url.host() else {
        return Err(AuditError::UnsafeUrl("missing host".to_string()));
    };

    match host {
        Host::Domain(domain) => {
            let domain = domain.to_ascii_lowercase();
            if BLOCKED_HOSTS.contains(&domain.as_str())
                || BLOCKED_SUFFIXES
                    .iter()
                    .any(|suffix| domain.ends_with(suffix))
            {
                return Err(AuditError::UnsafeUrl(format!(
                    "host '{domain}' is not publicly routable"
                )));
            }
        }
        Host::Ipv4(addr) => {
            if blocked_ip(IpAddr::V4(addr)) {
                return Err(AuditError::UnsafeUrl(format!(
                    "address {addr} is not publicly routable"
                )));
            }
        }
        Host::Ipv6(addr) => {
            if blocked_ip(IpAddr::V6(addr)) {
                return Err(AuditError::UnsafeUrl(format!(
                    "address {addr} is not publicly routable"
                )));
            }
        }
    }

    Ok(())
}
