use serde::{Deserialize, Serialize};

use super::episode::EpisodeRange;
use super::language::SubtitleLanguages;
use super::resolution::Resolution;

/// The output of the Daimei title parser.
///
/// Always fully populated: signals that could not be found degrade to
/// [`EpisodeRange::Unknown`], an empty language set and no resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedTitle {
    /// Original input string.
    pub input: String,

    /// Episode identity.
    pub episode_range: EpisodeRange,

    /// Subtitle languages announced by the title.
    pub subtitle_languages: SubtitleLanguages,

    /// Video resolution class.
    pub resolution: Option<Resolution>,
}

impl ParsedTitle {
    /// Creates a result carrying only defaults for the given input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            episode_range: EpisodeRange::Unknown,
            subtitle_languages: SubtitleLanguages::new(),
            resolution: None,
        }
    }

    /// Returns `true` if any signal beyond the defaults was extracted.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        !self.episode_range.is_unknown()
            || !self.subtitle_languages.is_empty()
            || self.resolution.is_some()
    }
}

impl std::fmt::Display for ParsedTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParsedTitle(ep={}", self.episode_range)?;
        write!(f, ", subs=[{}]", self.subtitle_languages)?;
        if let Some(res) = self.resolution {
            write!(f, ", res={res}")?;
        }
        write!(f, ")")
    }
}
