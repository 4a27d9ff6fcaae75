//! XML sitemap generation.

use serde::Deserialize;

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

/// One `<url>` entry. Only `loc` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct SitemapEntry {
    pub loc: String,
    /// `YYYY-MM-DD`, caller-supplied.
    #[serde(default)]
    pub lastmod: Option<String>,
    #[serde(default)]
    pub changefreq: Option<ChangeFreq>,
    /// Clamped to the 0.0..=1.0 range the format allows.
    #[serde(default)]
    pub priority: Option<f32>,
}

/// Render a urlset sitemap document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in entries {
        out.push_str("  <url>\n");
        out.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&entry.loc)
        ));
        if let Some(lastmod) = &entry.lastmod {
            out.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                escape_xml(lastmod)
            ));
        }
        if let Some(changefreq) = entry.changefreq {
            out.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                changefreq.as_str()
            ));
        }
        if let Some(priority) = entry.priority {
            let priority = priority.clamp(0.0, 1.0);
            out.push_str(&format!(
                "    <priority>{priority:.1}</priority>\n"
            ));
        }
        out.push_str("  </url>\n");
    }

    out.push_str("</urlset>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_entry_renders_loc_only() {
        let out = render_sitemap(&[SitemapEntry {
            loc: "https://example.com/".to_string(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }]);
        assert!(out.contains("<loc>https://example.com/</loc>"));
        assert!(!out.contains("<lastmod>"));
        assert!(!out.contains("<priority>"));
    }

    #[test]
    fn full_entry_renders_all_fields() {
        let out = render_sitemap(&[SitemapEntry {
            loc: "https://example.com/page".to_string(),
            lastmod: Some("2026-01-15".to_string()),
            changefreq: Some(ChangeFreq::Weekly),
            priority: Some(0.8),
        }]);
        assert!(out.contains("<lastmod>2026-01-15</lastmod>"));
        assert!(out.contains("<changefreq>weekly</changefreq>"));
        assert!(out.contains("<priority>0.8</priority>"));
    }

    #[test]
    fn special_characters_are_escaped() {
        let out = render_sitemap(&[SitemapEntry {
            loc: "https://example.com/search?q=a&b=<c>".to_string(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }]);
        assert!(out.contains("q=a&amp;b=&lt;c&gt;"));
        assert!(!out.contains("q=a&b"));
    }

    #[test]
    fn priority_is_clamped() {
        let out = render_sitemap(&[SitemapEntry {
            loc: "https://example.com/".to_string(),
            lastmod: None,
            changefreq: None,
            priority: Some(3.5),
        }]);
        assert!(out.contains("<priority>1.0</priority>"));
    }

    #[test]
    fn output_round_trips_through_the_audit_parser() {
        let entries = vec![
            SitemapEntry {
                loc: "https://example.com/".to_string(),
                lastmod: None,
                changefreq: None,
                priority: None,
            },
            SitemapEntry {
                loc: "https://example.com/about".to_string(),
                lastmod: None,
                changefreq: None,
                priority: None,
            },
        ];
        let parsed = crate::providers::sitemap::parse_sitemap(
            &render_sitemap(&entries),
            "https://example.com/sitemap.xml",
        );
        assert_eq!(parsed.url_count, 2);
        assert!(!parsed.is_index);
    }
}
