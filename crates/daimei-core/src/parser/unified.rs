//! # Unified Parser Interface
//!
//! Tokenizes a title once, runs the three independent extractors over the
//! shared segments and composes the result.

use std::sync::LazyLock;

use rayon::prelude::*;
use tracing::trace;

use crate::error::{DaimeiError, Result};
use crate::parser::episode::EpisodeResolver;
use crate::parser::resolution::ResolutionExtractor;
use crate::parser::subtitle::SubtitleExtractor;
use crate::parser::tokenizer::Tokenizer;
use crate::types::ParsedTitle;

static DEFAULT_PARSER: LazyLock<TitleParser> = LazyLock::new(TitleParser::default);

/// Configuration for the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Extra markers that put bare bracketed numbers into a specials context
    pub special_markers: Vec<String>,
    /// Run the three extractors on the rayon pool instead of sequentially
    pub parallel_extractors: bool,
}

impl ParserConfig {
    /// Create a new parser configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a specials-context marker.
    pub fn with_special_marker(mut self, marker: impl Into<String>) -> Self {
        self.special_markers.push(marker.into());
        self
    }

    /// Enable or disable parallel extractor evaluation.
    pub fn with_parallel_extractors(mut self, enabled: bool) -> Self {
        self.parallel_extractors = enabled;
        self
    }

    /// Checks every configured value.
    ///
    /// # Errors
    ///
    /// Returns `DaimeiError::InvalidConfig` for an empty or whitespace-only
    /// special marker.
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self
            .special_markers
            .iter()
            .position(|marker| marker.trim().is_empty())
        {
            return Err(DaimeiError::InvalidConfig(format!(
                "special marker #{index} is empty"
            )));
        }
        Ok(())
    }
}

/// Release-title parser.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads without locking.
#[derive(Debug, Clone)]
pub struct TitleParser {
    config: ParserConfig,
    tokenizer: Tokenizer,
    resolution: ResolutionExtractor,
    subtitles: SubtitleExtractor,
    episodes: EpisodeResolver,
}

impl Default for TitleParser {
    fn default() -> Self {
        Self::build(ParserConfig::default())
    }
}

impl TitleParser {
    /// Create a new parser with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `DaimeiError::InvalidConfig` if the configuration is rejected
    /// by [`ParserConfig::validate`].
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ParserConfig) -> Self {
        let episodes = EpisodeResolver::with_special_markers(&config.special_markers);
        Self {
            config,
            tokenizer: Tokenizer::new(),
            resolution: ResolutionExtractor::new(),
            subtitles: SubtitleExtractor::new(),
            episodes,
        }
    }

    /// Parse a release title.
    ///
    /// Never fails: missing signals degrade to an unknown episode range, an
    /// empty language set and no resolution.
    ///
    /// # Examples
    /// ```
    /// use daimei_core::parser::TitleParser;
    ///
    /// let parser = TitleParser::default();
    /// let result = parser.parse("[Group] Show - 03 [1080p][CHS]");
    ///
    /// assert_eq!(result.episode_range.to_string(), "03..03");
    /// assert_eq!(result.subtitle_languages.to_string(), "CHS");
    /// assert_eq!(result.resolution.unwrap().to_string(), "1080P");
    /// ```
    pub fn parse(&self, title: &str) -> ParsedTitle {
        let tokens = self.tokenizer.tokenize(title);

        let (episode_range, (subtitle_languages, resolution)) = if self.config.parallel_extractors
        {
            rayon::join(
                || self.episodes.resolve(&tokens),
                || {
                    rayon::join(
                        || self.subtitles.extract(&tokens),
                        || self.resolution.extract(&tokens),
                    )
                },
            )
        } else {
            (
                self.episodes.resolve(&tokens),
                (
                    self.subtitles.extract(&tokens),
                    self.resolution.extract(&tokens),
                ),
            )
        };

        let result = ParsedTitle {
            input: title.to_string(),
            episode_range,
            subtitle_languages,
            resolution,
        };
        trace!(title, %result, "parsed title");
        result
    }

    /// Parse many titles on the rayon pool. Output order matches input order.
    pub fn parse_batch<S>(&self, titles: &[S]) -> Vec<ParsedTitle>
    where
        S: AsRef<str> + Sync,
    {
        titles
            .par_iter()
            .map(|title| self.parse(title.as_ref()))
            .collect()
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

/// Convenience function to parse a title with default settings.
pub fn parse(title: &str) -> ParsedTitle {
    DEFAULT_PARSER.parse(title)
}

/// Parse with a specific configuration.
///
/// # Errors
///
/// Returns `DaimeiError::InvalidConfig` if the configuration is invalid.
pub fn parse_with_config(title: &str, config: ParserConfig) -> Result<ParsedTitle> {
    let parser = TitleParser::new(config)?;
    Ok(parser.parse(title))
}
