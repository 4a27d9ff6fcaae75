//! Head meta-tag snippet generation.

use serde::Deserialize;

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Inputs for a head snippet. Only the title is required.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaTagSpec {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub canonical: Option<String>,
    /// Page URL for `og:url`; also enables the Open Graph block.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub site_name: Option<String>,
    /// Emit `twitter:` card tags alongside the Open Graph block.
    #[serde(default)]
    pub twitter_card: bool,
}

/// Render a head snippet: title, description, canonical, then the
/// social blocks. Tag order is fixed so output is diffable.
pub fn render_meta_tags(spec: &MetaTagSpec) -> String {
    let mut lines = vec![
        format!("<title>{}</title>", escape_html(&spec.title)),
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
            .to_string(),
    ];

    if let Some(description) = &spec.description {
        lines.push(format!(
            "<meta name=\"description\" content=\"{}\">",
            escape_html(description)
        ));
    }
    if let Some(canonical) = &spec.canonical {
        lines.push(format!(
            "<link rel=\"canonical\" href=\"{}\">",
            escape_html(canonical)
        ));
    }

    lines.push(format!(
        "<meta property=\"og:title\" content=\"{}\">",
        escape_html(&spec.title)
    ));
    lines.push("<meta property=\"og:type\" content=\"website\">".to_string());
    if let Some(description) = &spec.description {
        lines.push(format!(
            "<meta property=\"og:description\" content=\"{}\">",
            escape_html(description)
        ));
    }
    if let Some(url) = &spec.url {
        lines.push(format!(
            "<meta property=\"og:url\" content=\"{}\">",
            escape_html(url)
        ));
    }
    if let Some(image) = &spec.image {
        lines.push(format!(
            "<meta property=\"og:image\" content=\"{}\">",
            escape_html(image)
        ));
    }
    if let Some(site_name) = &spec.site_name {
        lines.push(format!(
            "<meta property=\"og:site_name\" content=\"{}\">",
            escape_html(site_name)
        ));
    }

    if spec.twitter_card {
        lines.push(
            "<meta name=\"twitter:card\" content=\"summary_large_image\">"
                .to_string(),
        );
        lines.push(format!(
            "<meta name=\"twitter:title\" content=\"{}\">",
            escape_html(&spec.title)
        ));
        if let Some(description) = &spec.description {
            lines.push(format!(
                "<meta name=\"twitter:description\" content=\"{}\">",
                escape_html(description)
            ));
        }
        if let Some(image) = &spec.image {
            lines.push(format!(
                "<meta name=\"twitter:image\" content=\"{}\">",
                escape_html(image)
            ));
        }
    }

    lines.join("\n") + "\n"
}
