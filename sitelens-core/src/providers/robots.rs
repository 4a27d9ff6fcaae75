//! Robots probe: fetches `/robots.txt` at the site root and extracts
//! the few facts the checklist needs from it.

use async_trait::async_trait;
use url::Url;

use sitelens_model::RobotsSnapshot;

use crate::error::{AuditError, Result};
use crate::providers::traits::RobotsProbe;

/// Line-oriented robots.txt reduction.
///
/// Tracks whether the current agent group applies to everyone so that a
/// bare `Disallow: /` under `User-agent: *` is recognized as a full
/// block. `Sitemap:` lines are global and collected regardless of group.
pub fn parse_robots(body: &str) -> RobotsSnapshot {
    let mut snapshot = RobotsSnapshot {
        found: true,
        ..Default::default()
    };
    let mut in_wildcard_group = false;

    for raw_line in body.lines() {
        let line = raw_line
            .split('#')
            .next()
            .unwrap_or_default()
            .trim();
        if line.is_empty() {
            continue;
        }
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let field = field.trim().to_ascii_lowercase();
        let value = value.trim();

        match field.as_str() {
            "user-agent" => in_wildcard_group = value == "*",
            "disallow" => {
                if !value.is_empty() {
                    snapshot.rule_count += 1;
                    if in_wildcard_group && value == "/" {
                        snapshot.disallow_all = true;
                    }
                }
            }
            "allow" => {
                if !value.is_empty() {
                    snapshot.rule_count += 1;
                }
            }
            "sitemap" => {
                if !value.is_empty() {
                    snapshot.sitemap_urls.push(value.to_string());
                }
            }
            _ => {}
        }
    }

    snapshot
}

#[derive(Debug, Clone)]
pub struct WebRobotsProbe {
    client: reqwest::Client,
}

impl WebRobotsProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RobotsProbe for WebRobotsProbe {
    async fn probe(&self, target: &Url) -> Result<RobotsSnapshot> {
        let robots_url = target.join("/robots.txt")?;
        let response = self.client.get(robots_url.clone()).send().await?;
        let status = response.status();

        // A missing file is an answer, not an upstream fault.
        if status == reqwest::StatusCode::NOT_FOUND
            || status == reqwest::StatusCode::GONE
        {
            return Ok(RobotsSnapshot::default());
        }
        if !status.is_success() {
            return Err(AuditError::HttpStatus {
                status: status.as_u16(),
                url: robots_url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(parse_robots(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_rules_and_sitemaps() {
        let snap = parse_robots(
            "User-agent: *\n\
             Disallow: /admin\n\
             Allow: /admin/public\n\
             \n\
             User-agent: badbot\n\
             Disallow: /\n\
             \n\
             Sitemap: https://example.com/sitemap.xml\n",
        );
        assert!(snap.found);
        assert_eq!(snap.rule_count, 3);
        assert_eq!(
            snap.sitemap_urls,
            vec!["https://example.com/sitemap.xml"]
        );
        // The full block targets badbot only, not everyone.
        assert!(!snap.disallow_all);
    }

    #[test]
    fn wildcard_full_block_is_flagged() {
        let snap = parse_robots("User-agent: *\nDisallow: /\n");
        assert!(snap.disallow_all);
        assert_eq!(snap.rule_count, 1);
    }

    #[test]
    fn empty_disallow_is_not_a_rule() {
        let snap = parse_robots("User-agent: *\nDisallow:\n");
        assert!(!snap.disallow_all);
        assert_eq!(snap.rule_count, 0);
    }

    #[test]
    fn comments_and_casing_are_tolerated() {
        let snap = parse_robots(
            "# generated\nUSER-AGENT: *\nDISALLOW: /tmp # scratch\n",
        );
        assert_eq!(snap.rule_count, 1);
        assert!(!snap.disallow_all);
    }
}
