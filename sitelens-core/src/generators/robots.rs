//! robots.txt generation.

use serde::Deserialize;

/// One `User-agent` group.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotsDirectives {
    /// Agent the group applies to; `*` for everyone.
    #[serde(default = "default_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub disallow: Vec<String>,
    /// Non-standard but widely honored.
    #[serde(default)]
    pub crawl_delay: Option<u32>,
}

fn default_agent() -> String {
    "*".to_string()
}

impl Default for RobotsDirectives {
    fn default() -> Self {
        Self {
            user_agent: default_agent(),
            allow: Vec::new(),
            disallow: Vec::new(),
            crawl_delay: None,
        }
    }
}

/// Full robots.txt description: agent groups plus global sitemap links.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RobotsTxtSpec {
    #[serde(default)]
    pub groups: Vec<RobotsDirectives>,
    #[serde(default)]
    pub sitemaps: Vec<String>,
}

/// Render a robots.txt document.
///
/// A spec with no groups still produces a valid file: a permissive
/// wildcard group so crawlers get an explicit answer.
pub fn render_robots_txt(spec: &RobotsTxtSpec) -> String {
    let mut out = String::new();

    if spec.groups.is_empty() {
        out.push_str("User-agent: *\nDisallow:\n");
    }

    for (index, group) in spec.groups.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str("User-agent: ");
        out.push_str(&group.user_agent);
        out.push('\n');
        for path in &group.allow {
            out.push_str("Allow: ");
            out.push_str(path);
            out.push('\n');
        }
        if group.disallow.is_empty() && group.allow.is_empty() {
            out.push_str("Disallow:\n");
        }
        for path in &group.disallow {
            out.push_str("Disallow: ");
            out.push_str(path);
            out.push('\n');
        }
        if let Some(delay) = group.crawl_delay {
            out.push_str(&format!("Crawl-delay: {delay}\n"));
        }
    }

    if !spec.sitemaps.is_empty() {
        out.push('\n');
        for sitemap in &spec.sitemaps {
            out.push_str("Sitemap: ");
            out.push_str(sitemap);
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_is_permissive() {
        let out = render_robots_txt(&RobotsTxtSpec::default());
        assert_eq!(out, "User-agent: *\nDisallow:\n");
    }

    #[test]
    fn groups_and_sitemaps_render_in_order() {
        let spec = RobotsTxtSpec {
            groups: vec![
                RobotsDirectives {
                    user_agent: "*".to_string(),
                    allow: vec!["/public".to_string()],
                    disallow: vec!["/admin".to_string()],
                    crawl_delay: Some(5),
                },
                RobotsDirectives {
                    user_agent: "badbot".to_string(),
                    disallow: vec!["/".to_string()],
                    ..Default::default()
                },
            ],
            sitemaps: vec!["https://example.com/sitemap.xml".to_string()],
        };
        let out = render_robots_txt(&spec);
        assert_eq!(
            out,
            "User-agent: *\n\
             Allow: /public\n\
             Disallow: /admin\n\
             Crawl-delay: 5\n\
             \n\
             User-agent: badbot\n\
             Disallow: /\n\
             \n\
             Sitemap: https://example.com/sitemap.xml\n"
        );
    }

    #[test]
    fn group_without_paths_gets_empty_disallow() {
        let spec = RobotsTxtSpec {
            groups: vec![RobotsDirectives::default()],
            sitemaps: Vec::new(),
        };
        assert_eq!(
            render_robots_txt(&spec),
            "User-agent: *\nDisallow:\n"
        );
    }

    #[test]
    fn output_round_trips_through_the_audit_parser() {
        let spec = RobotsTxtSpec {
            groups: vec![RobotsDirectives {
                disallow: vec!["/".to_string()],
                ..Default::default()
            }],
            sitemaps: vec!["https://example.com/sitemap.xml".to_string()],
        };
        let parsed =
            crate::providers::robots::parse_robots(&render_robots_txt(&spec));
        assert!(parsed.disallow_all);
        assert_eq!(parsed.sitemap_urls.len(), 1);
    }
}
