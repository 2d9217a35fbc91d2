//! Build statistics extracted from Hugo's console output.
//!
//! Hugo ends a build with a table such as:
//!
//! ```text
//!                    | EN
//! -------------------+-----
//!   Pages            |  2
//!   Paginator pages  |  0
//!   Non-page files   |  1
//!   ...
//! Total in 30 ms
//! ```
//!
//! Parsing is optional for callers; the runner returns the raw text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static ROW: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z][A-Za-z -]*?)\s*\|\s*(\d+)").ok());

static DURATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?:Total|Built) in (\d+) ms").ok());

/// Counts reported by a Hugo build, first language column only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    pub pages: u64,
    pub paginator_pages: u64,
    pub non_page_files: u64,
    pub static_files: u64,
    pub processed_images: u64,
    pub aliases: u64,
    pub sitemaps: u64,
    pub cleaned: u64,
    /// Wall-clock build time when Hugo reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl BuildStats {
    /// Parse the statistics table from `output`.
    ///
    /// Returns `None` when the output carries no `Pages` row, which is the
    /// case for subcommands other than a build.
    pub fn parse(output: &str) -> Option<Self> {
        let (row, duration) = (ROW.as_ref()?, DURATION.as_ref()?);
        let mut stats = Self::default();
        let mut saw_pages = false;

        for line in output.lines() {
            if let Some(caps) = row.captures(line) {
                let Ok(value) = caps[2].parse::<u64>() else {
                    continue;
                };
                match caps[1].trim() {
                    "Pages" => {
                        stats.pages = value;
                        saw_pages = true;
                    }
                    "Paginator pages" => stats.paginator_pages = value,
                    "Non-page files" => stats.non_page_files = value,
                    "Static files" => stats.static_files = value,
                    "Processed images" => stats.processed_images = value,
                    "Aliases" => stats.aliases = value,
                    "Sitemaps" => stats.sitemaps = value,
                    "Cleaned" => stats.cleaned = value,
                    _ => {}
                }
            } else if let Some(caps) = duration.captures(line) {
                stats.duration_ms = caps[1].parse().ok();
            }
        }

        saw_pages.then_some(stats)
    }
}
