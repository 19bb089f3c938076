//! # Resolution Extractor
//!
//! Finds the first resolution signal in a title: an explicit label
//! (`1080p`, `4K`) or a pixel dimension (`1920x1080`).

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::parser::tokenizer::Tokens;
use crate::types::Resolution;

static RESOLUTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z0-9])(?:(?P<label>\d{3,4})[pi]|(?P<k>[24])k|(?P<name>uhd|qhd|fhd)|(?P<width>\d{3,4})\s*[x×*]\s*(?P<height>\d{3,4})[pi]?)(?:[^a-z0-9]|$)",
    )
    .expect("Invalid resolution pattern")
});

/// Scans segments in order; the leftmost signal of the first segment that
/// has one wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionExtractor;

impl ResolutionExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, tokens: &Tokens) -> Option<Resolution> {
        tokens.segments().find_map(|segment| {
            let caps = RESOLUTION_PATTERN.captures(&segment.text)?;
            let resolution = Self::from_captures(&caps)?;
            trace!(segment = %segment.text, %resolution, "resolution signal");
            Some(resolution)
        })
    }

    fn from_captures(caps: &Captures<'_>) -> Option<Resolution> {
        if let Some(height) = caps.name("label").or_else(|| caps.name("height")) {
            let height: u32 = height.as_str().parse().ok()?;
            return Some(Resolution::from_height(height));
        }
        if let Some(k) = caps.name("k") {
            return match k.as_str() {
                "4" => Some(Resolution::UHD2160),
                _ => Some(Resolution::QHD1440),
            };
        }
        caps.name("name")
            .and_then(|name| name.as_str().parse().ok())
    }
}
