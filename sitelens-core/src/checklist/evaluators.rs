//! Evaluation function table: one pure function per [`EvalKind`].
//!
//! Every function is total. It receives the full results of the run,
//! not just its own provider's snapshot, because some verdicts derive
//! from two providers' outputs. A function that cannot compute a
//! verdict from partial data returns an `error` verdict instead of
//! panicking or propagating.

use sitelens_model::{
    EvalKind, HttpSnapshot, PageSnapshot, ProviderOutcome, ProviderResults,
    RobotsSnapshot, SitemapSnapshot, SpeedSnapshot, Verdict,
};

fn page(results: &ProviderResults) -> Option<&PageSnapshot> {
    results.page.as_ref().and_then(ProviderOutcome::data)
}

fn http(results: &ProviderResults) -> Option<&HttpSnapshot> {
    results.http.as_ref().and_then(ProviderOutcome::data)
}

fn robots(results: &ProviderResults) -> Option<&RobotsSnapshot> {
    results.robots.as_ref().and_then(ProviderOutcome::data)
}

fn sitemap(results: &ProviderResults) -> Option<&SitemapSnapshot> {
    results.sitemap.as_ref().and_then(ProviderOutcome::data)
}

fn speed(results: &ProviderResults) -> Option<&SpeedSnapshot> {
    results.speed.as_ref().and_then(ProviderOutcome::data)
}

/// Normalize a URL for canonical comparison: scheme+host+path, no
/// trailing slash, no fragment or query.
fn normalize_for_compare(raw: &str) -> String {
    let trimmed = raw
        .split(['#', '?'])
        .next()
        .unwrap_or(raw)
        .trim_end_matches('/');
    trimmed.to_ascii_lowercase()
}

/// Apply the evaluation function for `kind` to a run's results.
///
/// Pure: identical results always produce identical verdicts.
pub fn evaluate(kind: EvalKind, results: &ProviderResults) -> Verdict {
    match kind {
        EvalKind::TitlePresent => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => match &snap.title {
                Some(title) if !title.trim().is_empty() => Verdict::pass(),
                _ => Verdict::fail("no <title> element found"),
            },
        },
        EvalKind::TitleLength => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => match &snap.title {
                None => Verdict::fail("no <title> element found"),
                Some(title) => {
                    let len = title.chars().count();
                    if (30..=60).contains(&len) {
                        Verdict::pass_with(format!("{len} characters"))
                    } else if (10..=70).contains(&len) {
                        Verdict::warn(format!(
                            "{len} characters, recommended 30-60"
                        ))
                    } else {
                        Verdict::fail(format!(
                            "{len} characters, recommended 30-60"
                        ))
                    }
                }
            },
        },
        EvalKind::MetaDescriptionPresent => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => match &snap.meta_description {
                Some(desc) if !desc.trim().is_empty() => Verdict::pass(),
                _ => Verdict::fail("no meta description found"),
            },
        },
        EvalKind::MetaDescriptionLength => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => match &snap.meta_description {
                None => Verdict::fail("no meta description found"),
                Some(desc) => {
                    let len = desc.chars().count();
                    if (70..=160).contains(&len) {
                        Verdict::pass_with(format!("{len} characters"))
                    } else if len > 0 {
                        Verdict::warn(format!(
                            "{len} characters, recommended 70-160"
                        ))
                    } else {
                        Verdict::fail("meta description is empty")
                    }
                }
            },
        },
        EvalKind::SingleH1 => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => match snap.h1_count {
                1 => Verdict::pass(),
                0 => Verdict::fail("no <h1> found"),
                n => Verdict::warn(format!("{n} <h1> elements found")),
            },
        },
        EvalKind::HeadingOrder => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => {
                if snap.heading_levels.is_empty() {
                    return Verdict::warn("no headings found");
                }
                let mut prev = snap.heading_levels[0];
                for &level in &snap.heading_levels[1..] {
                    if level > prev + 1 {
                        return Verdict::warn(format!(
                            "heading jumps from h{prev} to h{level}"
                        ));
                    }
                    prev = level;
                }
                Verdict::pass()
            }
        },
        EvalKind::ImageAltCoverage => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => {
                if snap.images_total == 0 {
                    Verdict::pass_with("no images on page")
                } else if snap.images_missing_alt == 0 {
                    Verdict::pass_with(format!(
                        "{} images, all with alt text",
                        snap.images_total
                    ))
                } else {
                    let ratio = snap.images_missing_alt as f64
                        / snap.images_total as f64;
                    let detail = format!(
                        "{} of {} images missing alt text",
                        snap.images_missing_alt, snap.images_total
                    );
                    if ratio <= 0.2 {
                        Verdict::warn(detail)
                    } else {
                        Verdict::fail(detail)
                    }
                }
            }
        },
        EvalKind::CanonicalPresent => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => match &snap.canonical {
                Some(_) => Verdict::pass(),
                None => Verdict::warn("no canonical link declared"),
            },
        },
        EvalKind::CanonicalMatchesFinalUrl => {
            // Derived from two providers: the page's canonical link and
            // the HTTP probe's post-redirect URL.
            let Some(page_snap) = page(results) else {
                return Verdict::error("page data unavailable");
            };
            let Some(canonical) = &page_snap.canonical else {
                return Verdict::warn("no canonical link to compare");
            };
            let Some(http_snap) = http(results) else {
                return Verdict::error(
                    "response data unavailable for canonical comparison",
                );
            };
            if normalize_for_compare(canonical)
                == normalize_for_compare(&http_snap.final_url)
            {
                Verdict::pass()
            } else {
                Verdict::warn(format!(
                    "canonical {} differs from final URL {}",
                    canonical, http_snap.final_url
                ))
            }
        }
        EvalKind::ViewportMeta => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => match &snap.viewport {
                Some(viewport) if viewport.contains("width") => {
                    Verdict::pass()
                }
                Some(_) => {
                    Verdict::warn("viewport meta does not set a width")
                }
                None => Verdict::fail("no viewport meta tag"),
            },
        },
        EvalKind::NotNoindex => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => match &snap.meta_robots {
                Some(directives)
                    if directives.to_ascii_lowercase().contains("noindex") =>
                {
                    Verdict::fail("meta robots contains noindex")
                }
                _ => Verdict::pass(),
            },
        },
        EvalKind::HtmlLang => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => match &snap.lang {
                Some(lang) if !lang.is_empty() => {
                    Verdict::pass_with(format!("lang=\"{lang}\""))
                }
                _ => Verdict::fail("<html> has no lang attribute"),
            },
        },
        EvalKind::CharsetDeclared => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => match &snap.charset {
                Some(_) => Verdict::pass(),
                None => Verdict::fail("no charset declaration"),
            },
        },
        EvalKind::OpenGraphBasics => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => {
                let wanted = ["og:title", "og:description", "og:image"];
                let present = wanted
                    .iter()
                    .filter(|name| {
                        snap.og_properties.iter().any(|p| p == *name)
                    })
                    .count();
                match present {
                    3 => Verdict::pass(),
                    0 => Verdict::fail("no Open Graph tags found"),
                    n => Verdict::warn(format!(
                        "{n} of 3 core Open Graph tags present"
                    )),
                }
            }
        },
        EvalKind::TwitterCard => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => {
                if snap.twitter_card {
                    Verdict::pass()
                } else {
                    Verdict::warn("no twitter:card meta tag")
                }
            }
        },
        EvalKind::StructuredData => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => {
                if snap.json_ld_blocks > 0 {
                    Verdict::pass_with(format!(
                        "{} JSON-LD block(s)",
                        snap.json_ld_blocks
                    ))
                } else {
                    Verdict::warn("no JSON-LD structured data")
                }
            }
        },
        EvalKind::Favicon => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => {
                if snap.favicon {
                    Verdict::pass()
                } else {
                    Verdict::warn("no favicon link declared")
                }
            }
        },
        EvalKind::WordCount => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => {
                let words = snap.word_count;
                if words >= 300 {
                    Verdict::pass_with(format!("{words} words"))
                } else if words >= 100 {
                    Verdict::warn(format!(
                        "{words} words, thin content below 300"
                    ))
                } else {
                    Verdict::fail(format!("only {words} words of content"))
                }
            }
        },
        EvalKind::InternalLinkCount => match page(results) {
            None => Verdict::error("page data unavailable"),
            Some(snap) => {
                let links = snap.internal_links;
                if links >= 5 {
                    Verdict::pass_with(format!("{links} internal links"))
                } else if links >= 1 {
                    Verdict::warn(format!("only {links} internal link(s)"))
                } else {
                    Verdict::fail("no internal links found")
                }
            }
        },
        EvalKind::HttpsScheme => match http(results) {
            None => Verdict::error("response data unavailable"),
            Some(snap) => {
                if snap.https {
                    Verdict::pass()
                } else {
                    Verdict::fail("page is served over plain HTTP")
                }
            }
        },
        EvalKind::Hsts => match http(results) {
            None => Verdict::error("response data unavailable"),
            Some(snap) => {
                if snap.hsts {
                    Verdict::pass()
                } else {
                    Verdict::warn("no Strict-Transport-Security header")
                }
            }
        },
        EvalKind::ContentTypeOptions => match http(results) {
            None => Verdict::error("response data unavailable"),
            Some(snap) => {
                if snap.x_content_type_options {
                    Verdict::pass()
                } else {
                    Verdict::warn("no X-Content-Type-Options header")
                }
            }
        },
        EvalKind::CacheControl => match http(results) {
            None => Verdict::error("response data unavailable"),
            Some(snap) => match &snap.cache_control {
                Some(policy) => Verdict::pass_with(policy.clone()),
                None => Verdict::warn("no Cache-Control header"),
            },
        },
        EvalKind::Compression => match speed(results) {
            None => Verdict::error("download data unavailable"),
            Some(snap) => {
                if snap.compressed {
                    Verdict::pass()
                } else if snap.body_bytes < 50_000 {
                    Verdict::pass_with("body too small to benefit")
                } else {
                    Verdict::warn("body served uncompressed")
                }
            }
        },
        EvalKind::RobotsFound => match robots(results) {
            None => Verdict::error("robots.txt data unavailable"),
            Some(snap) => {
                if snap.found {
                    Verdict::pass_with(format!("{} rule(s)", snap.rule_count))
                } else {
                    Verdict::warn("no robots.txt served")
                }
            }
        },
        EvalKind::RobotsNotBlockingAll => match robots(results) {
            None => Verdict::error("robots.txt data unavailable"),
            Some(snap) => {
                if !snap.found {
                    Verdict::warn("no robots.txt served")
                } else if snap.disallow_all {
                    Verdict::fail("robots.txt disallows the whole site")
                } else {
                    Verdict::pass()
                }
            }
        },
        EvalKind::SitemapFound => match sitemap(results) {
            None => Verdict::error("sitemap data unavailable"),
            Some(snap) => {
                if snap.found {
                    Verdict::pass()
                } else {
                    Verdict::warn("no XML sitemap found")
                }
            }
        },
        EvalKind::SitemapNotEmpty => match sitemap(results) {
            None => Verdict::error("sitemap data unavailable"),
            Some(snap) => {
                if !snap.found {
                    Verdict::warn("no XML sitemap found")
                } else if snap.is_index || snap.url_count > 0 {
                    Verdict::pass_with(format!("{} URL(s)", snap.url_count))
                } else {
                    Verdict::fail("sitemap lists no URLs")
                }
            }
        },
        EvalKind::SitemapListedInRobots => {
            // Derived from two providers: robots.txt Sitemap lines and
            // the sitemap probe's discovered location.
            let Some(sitemap_snap) = sitemap(results) else {
                return Verdict::error("sitemap data unavailable");
            };
            if !sitemap_snap.found {
                return Verdict::warn("no XML sitemap to reference");
            }
            let Some(robots_snap) = robots(results) else {
                return Verdict::error(
                    "robots.txt data unavailable for sitemap comparison",
                );
            };
            if !robots_snap.found {
                return Verdict::warn("no robots.txt served");
            }
            let listed = robots_snap.sitemap_urls.iter().any(|listed| {
                normalize_for_compare(listed)
                    == normalize_for_compare(&sitemap_snap.location)
            });
            if listed {
                Verdict::pass()
            } else if robots_snap.sitemap_urls.is_empty() {
                Verdict::warn("robots.txt has no Sitemap line")
            } else {
                Verdict::warn("robots.txt lists a different sitemap")
            }
        }
        EvalKind::ResponseTime => match speed(results) {
            None => Verdict::error("download data unavailable"),
            Some(snap) => {
                let ms = snap.response_ms;
                if ms <= 800 {
                    Verdict::pass_with(format!("{ms}ms"))
                } else if ms <= 2_000 {
                    Verdict::warn(format!("{ms}ms, slower than 800ms"))
                } else {
                    Verdict::fail(format!("{ms}ms, slower than 2000ms"))
                }
            }
        },
        EvalKind::PageWeight => match speed(results) {
            None => Verdict::error("download data unavailable"),
            Some(snap) => {
                let kib = snap.body_bytes / 1024;
                if snap.body_bytes <= 1_500_000 {
                    Verdict::pass_with(format!("{kib} KiB"))
                } else if snap.body_bytes <= 3_000_000 {
                    Verdict::warn(format!("{kib} KiB, heavier than 1.5 MB"))
                } else {
                    Verdict::fail(format!("{kib} KiB, heavier than 3 MB"))
                }
            }
        },
    }
}
