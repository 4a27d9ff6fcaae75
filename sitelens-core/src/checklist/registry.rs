//! Static checklist tables, one per audit type.
//!
//! Lookups are O(n) over small fixed lists; no mutation API exists at
//! runtime. Evaluation kinds are shared across audit types under
//! different ids and weights.

use std::collections::HashSet;

use sitelens_model::{
    AuditType, CheckItemSpec, EvalKind, ProviderKind,
};

use crate::error::{AuditError, Result};

const fn item(
    id: &'static str,
    category: &'static str,
    label: &'static str,
    weight: u32,
    provider: ProviderKind,
    eval: EvalKind,
) -> CheckItemSpec {
    CheckItemSpec {
        id,
        category,
        label,
        weight,
        auto: true,
        provider: Some(provider),
        eval: Some(eval),
    }
}

const fn manual_item(
    id: &'static str,
    category: &'static str,
    label: &'static str,
) -> CheckItemSpec {
    CheckItemSpec {
        id,
        category,
        label,
        weight: 0,
        auto: false,
        provider: None,
        eval: None,
    }
}

/// An auto item with no evaluation wired up yet; always `skipped`.
const fn pending_item(
    id: &'static str,
    category: &'static str,
    label: &'static str,
) -> CheckItemSpec {
    CheckItemSpec {
        id,
        category,
        label,
        weight: 0,
        auto: true,
        provider: None,
        eval: None,
    }
}

static SEO_CHECKLIST: &[CheckItemSpec] = &[
    item(
        "title-present",
        "meta",
        "Page has a <title> element",
        5,
        ProviderKind::Page,
        EvalKind::TitlePresent,
    ),
    item(
        "title-length",
        "meta",
        "Title length is within 30-60 characters",
        10,
        ProviderKind::Page,
        EvalKind::TitleLength,
    ),
    item(
        "description-present",
        "meta",
        "Page has a meta description",
        5,
        ProviderKind::Page,
        EvalKind::MetaDescriptionPresent,
    ),
    item(
        "description-length",
        "meta",
        "Meta description length is within 70-160 characters",
        10,
        ProviderKind::Page,
        EvalKind::MetaDescriptionLength,
    ),
    item(
        "single-h1",
        "structure",
        "Page has exactly one <h1>",
        10,
        ProviderKind::Page,
        EvalKind::SingleH1,
    ),
    item(
        "heading-order",
        "structure",
        "Heading levels descend without gaps",
        5,
        ProviderKind::Page,
        EvalKind::HeadingOrder,
    ),
    item(
        "image-alt",
        "structure",
        "Images carry alt text",
        10,
        ProviderKind::Page,
        EvalKind::ImageAltCoverage,
    ),
    item(
        "canonical-present",
        "indexing",
        "Page declares a canonical URL",
        5,
        ProviderKind::Page,
        EvalKind::CanonicalPresent,
    ),
    item(
        "canonical-self",
        "indexing",
        "Canonical URL matches the final URL",
        5,
        ProviderKind::Page,
        EvalKind::CanonicalMatchesFinalUrl,
    ),
    item(
        "not-noindex",
        "indexing",
        "Page is not blocked by a noindex directive",
        10,
        ProviderKind::Page,
        EvalKind::NotNoindex,
    ),
    item(
        "internal-links",
        "links",
        "Page links to other pages on the site",
        5,
        ProviderKind::Page,
        EvalKind::InternalLinkCount,
    ),
    item(
        "robots-txt",
        "crawl",
        "Site serves a robots.txt",
        5,
        ProviderKind::Robots,
        EvalKind::RobotsFound,
    ),
    item(
        "crawl-allowed",
        "crawl",
        "robots.txt does not block the whole site",
        10,
        ProviderKind::Robots,
        EvalKind::RobotsNotBlockingAll,
    ),
    item(
        "sitemap-present",
        "crawl",
        "Site serves an XML sitemap",
        5,
        ProviderKind::Sitemap,
        EvalKind::SitemapFound,
    ),
    item(
        "sitemap-in-robots",
        "crawl",
        "robots.txt references the sitemap",
        5,
        ProviderKind::Sitemap,
        EvalKind::SitemapListedInRobots,
    ),
    manual_item(
        "keyword-targeting",
        "content",
        "Title and copy target the intended search terms",
    ),
    manual_item(
        "backlink-profile",
        "offsite",
        "Inbound link profile is healthy",
    ),
];

static CONTENT_CHECKLIST: &[CheckItemSpec] = &[
    item(
        "word-count",
        "body",
        "Page has substantial textual content",
        10,
        ProviderKind::Page,
        EvalKind::WordCount,
    ),
    item(
        "open-graph",
        "social",
        "Open Graph title, description, and image are set",
        10,
        ProviderKind::Page,
        EvalKind::OpenGraphBasics,
    ),
    item(
        "twitter-card",
        "social",
        "Twitter card markup is present",
        5,
        ProviderKind::Page,
        EvalKind::TwitterCard,
    ),
    item(
        "structured-data",
        "markup",
        "Page embeds JSON-LD structured data",
        10,
        ProviderKind::Page,
        EvalKind::StructuredData,
    ),
    item(
        "html-lang",
        "markup",
        "Document declares its language",
        5,
        ProviderKind::Page,
        EvalKind::HtmlLang,
    ),
    item(
        "charset",
        "markup",
        "Document declares its character encoding",
        5,
        ProviderKind::Page,
        EvalKind::CharsetDeclared,
    ),
    item(
        "viewport",
        "mobile",
        "Viewport meta tag is mobile-ready",
        10,
        ProviderKind::Page,
        EvalKind::ViewportMeta,
    ),
    item(
        "favicon",
        "branding",
        "Site declares a favicon",
        3,
        ProviderKind::Page,
        EvalKind::Favicon,
    ),
    pending_item(
        "duplicate-content",
        "body",
        "Copy is not duplicated across the site",
    ),
    manual_item(
        "readability",
        "body",
        "Copy reads well for the target audience",
    ),
    manual_item(
        "media-quality",
        "body",
        "Images and embeds are appropriate and licensed",
    ),
];

static TECHNICAL_CHECKLIST: &[CheckItemSpec] = &[
    item(
        "https",
        "transport",
        "Page is served over HTTPS",
        15,
        ProviderKind::Http,
        EvalKind::HttpsScheme,
    ),
    item(
        "hsts",
        "transport",
        "Strict-Transport-Security header is set",
        5,
        ProviderKind::Http,
        EvalKind::Hsts,
    ),
    item(
        "nosniff",
        "transport",
        "X-Content-Type-Options header is set",
        5,
        ProviderKind::Http,
        EvalKind::ContentTypeOptions,
    ),
    item(
        "cache-control",
        "delivery",
        "Response declares a caching policy",
        5,
        ProviderKind::Http,
        EvalKind::CacheControl,
    ),
    item(
        "compression",
        "delivery",
        "Body is served compressed",
        10,
        ProviderKind::Speed,
        EvalKind::Compression,
    ),
    item(
        "response-time",
        "delivery",
        "Full download completes quickly",
        15,
        ProviderKind::Speed,
        EvalKind::ResponseTime,
    ),
    item(
        "page-weight",
        "delivery",
        "Page weight is reasonable",
        10,
        ProviderKind::Speed,
        EvalKind::PageWeight,
    ),
    item(
        "robots-served",
        "crawl",
        "Site serves a robots.txt",
        3,
        ProviderKind::Robots,
        EvalKind::RobotsFound,
    ),
    item(
        "sitemap-populated",
        "crawl",
        "Sitemap exists and lists URLs",
        5,
        ProviderKind::Sitemap,
        EvalKind::SitemapNotEmpty,
    ),
    manual_item(
        "cdn-usage",
        "delivery",
        "Static assets are served from a CDN",
    ),
];

static FULL_CHECKLIST: &[CheckItemSpec] = &[
    // seo
    item(
        "title-present",
        "meta",
        "Page has a <title> element",
        5,
        ProviderKind::Page,
        EvalKind::TitlePresent,
    ),
    item(
        "title-length",
        "meta",
        "Title length is within 30-60 characters",
        10,
        ProviderKind::Page,
        EvalKind::TitleLength,
    ),
    item(
        "description-present",
        "meta",
        "Page has a meta description",
        5,
        ProviderKind::Page,
        EvalKind::MetaDescriptionPresent,
    ),
    item(
        "description-length",
        "meta",
        "Meta description length is within 70-160 characters",
        10,
        ProviderKind::Page,
        EvalKind::MetaDescriptionLength,
    ),
    item(
        "single-h1",
        "structure",
        "Page has exactly one <h1>",
        10,
        ProviderKind::Page,
        EvalKind::SingleH1,
    ),
    item(
        "heading-order",
        "structure",
        "Heading levels descend without gaps",
        5,
        ProviderKind::Page,
        EvalKind::HeadingOrder,
    ),
    item(
        "image-alt",
        "structure",
        "Images carry alt text",
        10,
        ProviderKind::Page,
        EvalKind::ImageAltCoverage,
    ),
    item(
        "canonical-present",
        "indexing",
        "Page declares a canonical URL",
        5,
        ProviderKind::Page,
        EvalKind::CanonicalPresent,
    ),
    item(
        "canonical-self",
        "indexing",
        "Canonical URL matches the final URL",
        5,
        ProviderKind::Page,
        EvalKind::CanonicalMatchesFinalUrl,
    ),
    item(
        "not-noindex",
        "indexing",
        "Page is not blocked by a noindex directive",
        10,
        ProviderKind::Page,
        EvalKind::NotNoindex,
    ),
    item(
        "internal-links",
        "links",
        "Page links to other pages on the site",
        5,
        ProviderKind::Page,
        EvalKind::InternalLinkCount,
    ),
    // content
    item(
        "word-count",
        "body",
        "Page has substantial textual content",
        10,
        ProviderKind::Page,
        EvalKind::WordCount,
    ),
    item(
        "open-graph",
        "social",
        "Open Graph title, description, and image are set",
        10,
        ProviderKind::Page,
        EvalKind::OpenGraphBasics,
    ),
    item(
        "twitter-card",
        "social",
        "Twitter card markup is present",
        5,
        ProviderKind::Page,
        EvalKind::TwitterCard,
    ),
    item(
        "structured-data",
        "markup",
        "Page embeds JSON-LD structured data",
        10,
        ProviderKind::Page,
        EvalKind::StructuredData,
    ),
    item(
        "html-lang",
        "markup",
        "Document declares its language",
        5,
        ProviderKind::Page,
        EvalKind::HtmlLang,
    ),
    item(
        "charset",
        "markup",
        "Document declares its character encoding",
        5,
        ProviderKind::Page,
        EvalKind::CharsetDeclared,
    ),
    item(
        "viewport",
        "mobile",
        "Viewport meta tag is mobile-ready",
        10,
        ProviderKind::Page,
        EvalKind::ViewportMeta,
    ),
    item(
        "favicon",
        "branding",
        "Site declares a favicon",
        3,
        ProviderKind::Page,
        EvalKind::Favicon,
    ),
    // technical
    item(
        "https",
        "transport",
        "Page is served over HTTPS",
        15,
        ProviderKind::Http,
        EvalKind::HttpsScheme,
    ),
    item(
        "hsts",
        "transport",
        "Strict-Transport-Security header is set",
        5,
        ProviderKind::Http,
        EvalKind::Hsts,
    ),
    item(
        "nosniff",
        "transport",
        "X-Content-Type-Options header is set",
        5,
        ProviderKind::Http,
        EvalKind::ContentTypeOptions,
    ),
    item(
        "cache-control",
        "delivery",
        "Response declares a caching policy",
        5,
        ProviderKind::Http,
        EvalKind::CacheControl,
    ),
    item(
        "compression",
        "delivery",
        "Body is served compressed",
        10,
        ProviderKind::Speed,
        EvalKind::Compression,
    ),
    item(
        "response-time",
        "delivery",
        "Full download completes quickly",
        15,
        ProviderKind::Speed,
        EvalKind::ResponseTime,
    ),
    item(
        "page-weight",
        "delivery",
        "Page weight is reasonable",
        10,
        ProviderKind::Speed,
        EvalKind::PageWeight,
    ),
    item(
        "robots-txt",
        "crawl",
        "Site serves a robots.txt",
        5,
        ProviderKind::Robots,
        EvalKind::RobotsFound,
    ),
    item(
        "crawl-allowed",
        "crawl",
        "robots.txt does not block the whole site",
        10,
        ProviderKind::Robots,
        EvalKind::RobotsNotBlockingAll,
    ),
    item(
        "sitemap-present",
        "crawl",
        "Site serves an XML sitemap",
        5,
        ProviderKind::Sitemap,
        EvalKind::SitemapFound,
    ),
    item(
        "sitemap-in-robots",
        "crawl",
        "robots.txt references the sitemap",
        5,
        ProviderKind::Sitemap,
        EvalKind::SitemapListedInRobots,
    ),
    manual_item(
        "keyword-targeting",
        "content",
        "Title and copy target the intended search terms",
    ),
    manual_item(
        "cdn-usage",
        "delivery",
        "Static assets are served from a CDN",
    ),
];

/// Ordered checklist for an audit type.
pub fn checklist_for(audit_type: AuditType) -> &'static [CheckItemSpec] {
    match audit_type {
        AuditType::Seo => SEO_CHECKLIST,
        AuditType::Content => CONTENT_CHECKLIST,
        AuditType::Technical => TECHNICAL_CHECKLIST,
        AuditType::Full => FULL_CHECKLIST,
    }
}

/// Reject structurally broken checklists before any provider runs.
///
/// Duplicate ids and half-wired auto items are configuration errors, not
/// runtime conditions; a duplicate id is never silently overwritten.
pub fn validate_checklist(items: &[CheckItemSpec]) -> Result<()> {
    if items.is_empty() {
        return Err(AuditError::InvalidChecklist(
            "checklist is empty".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(items.len());
    for spec in items {
        if !seen.insert(spec.id) {
            return Err(AuditError::InvalidChecklist(format!(
                "duplicate item id: {}",
                spec.id
            )));
        }
        if spec.auto && (spec.provider.is_some() != spec.eval.is_some()) {
            return Err(AuditError::InvalidChecklist(format!(
                "item {} must set provider and eval together",
                spec.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_checklists_are_valid() {
        for audit_type in AuditType::ALL {
            validate_checklist(checklist_for(audit_type))
                .unwrap_or_else(|err| {
                    panic!("{audit_type} checklist invalid: {err}")
                });
        }
    }

    #[test]
    fn builtin_auto_items_have_provider_and_eval_or_neither() {
        for audit_type in AuditType::ALL {
            for spec in checklist_for(audit_type) {
                if spec.auto {
                    assert_eq!(
                        spec.provider.is_some(),
                        spec.eval.is_some(),
                        "item {} half-wired",
                        spec.id
                    );
                } else {
                    assert!(spec.provider.is_none() && spec.eval.is_none());
                }
            }
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dup = CheckItemSpec {
            id: "twice",
            category: "x",
            label: "x",
            weight: 1,
            auto: true,
            provider: Some(ProviderKind::Page),
            eval: Some(EvalKind::TitlePresent),
        };
        let err = validate_checklist(&[dup, dup]).unwrap_err();
        assert!(matches!(err, AuditError::InvalidChecklist(_)));
    }

    #[test]
    fn half_wired_auto_item_is_rejected() {
        let broken = CheckItemSpec {
            id: "broken",
            category: "x",
            label: "x",
            weight: 1,
            auto: true,
            provider: Some(ProviderKind::Page),
            eval: None,
        };
        let err = validate_checklist(&[broken]).unwrap_err();
        assert!(matches!(err, AuditError::InvalidChecklist(_)));
    }

    #[test]
    fn empty_checklist_is_rejected() {
        assert!(validate_checklist(&[]).is_err());
    }
}
