//! Deterministic file-format generators.
//!
//! Pure functions from a typed spec to text output; same input, same
//! bytes. These share the model vocabulary with the audit side but
//! never touch the network.

pub mod meta;
pub mod robots;
pub mod sitemap;

pub use meta::{MetaTagSpec, render_meta_tags};
pub use robots::{RobotsDirectives, RobotsTxtSpec, render_robots_txt};
pub use sitemap::{ChangeFreq, SitemapEntry, render_sitemap};
