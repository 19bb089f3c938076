use std::fmt;

use serde::{Deserialize, Serialize};

/// An episode number together with the digit width it was written with.
///
/// Fansub releases usually zero-pad episode numbers (`05`), and downstream
/// consumers compare the rendered form, so the width is part of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EpisodeNumber {
    /// Numeric episode value.
    pub value: u32,
    /// Minimum number of digits to render.
    pub width: u8,
}

impl EpisodeNumber {
    /// Creates an episode number rendered without padding.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self { value, width: 0 }
    }

    /// Creates an episode number rendered with at least `width` digits.
    #[must_use]
    pub const fn with_width(value: u32, width: u8) -> Self {
        Self { value, width }
    }

    /// Parses a run of ASCII digits, remembering its width.
    pub(crate) fn from_digits(digits: &str) -> Option<Self> {
        let value = digits.parse().ok()?;
        let width = u8::try_from(digits.len()).unwrap_or(u8::MAX);
        Some(Self { value, width })
    }
}

impl fmt::Display for EpisodeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = usize::from(self.width))
    }
}

/// The episode identity of a release title.
///
/// Every parse yields exactly one variant; titles without a usable episode
/// signal resolve to [`EpisodeRange::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodeRange {
    /// One episode: `05..05`.
    Single(EpisodeNumber),

    /// Contiguous episodes: `01..12`.
    Range(EpisodeNumber, EpisodeNumber),

    /// A whole season: `S1`.
    Season(u32),

    /// Several whole seasons, always stored expanded: `S1+S2+S3`.
    SeasonSet(Vec<u32>),

    /// A special or extra episode: `SP01..SP01`.
    Special(EpisodeNumber),

    /// No determinable episode identity: `S?`.
    Unknown,
}

impl EpisodeRange {
    /// Expands an inclusive season range into its members.
    ///
    /// Returns `None` unless `first < last`.
    #[must_use]
    pub fn season_range(first: u32, last: u32) -> Option<Self> {
        (first < last).then(|| Self::SeasonSet((first..=last).collect()))
    }

    /// Returns `true` for [`EpisodeRange::Unknown`].
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for EpisodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(ep) => write!(f, "{ep}..{ep}"),
            Self::Range(start, end) => write!(f, "{start}..{end}"),
            Self::Season(season) => write!(f, "S{season}"),
            Self::SeasonSet(seasons) => {
                let formatted: Vec<String> = seasons.iter().map(|s| format!("S{s}")).collect();
                write!(f, "{}", formatted.join("+"))
            }
            Self::Special(ep) => write!(f, "SP{ep}..SP{ep}"),
            Self::Unknown => write!(f, "S?"),
        }
    }
}
