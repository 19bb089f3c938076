use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DaimeiError;

/// Subtitle language, ordered by its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubtitleLanguage {
    /// Simplified Chinese
    Chs,
    /// Traditional Chinese
    Cht,
    /// English
    Eng,
    /// Japanese
    Jpn,
}

impl SubtitleLanguage {
    /// Stable short code used for sorting and display.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Chs => "CHS",
            Self::Cht => "CHT",
            Self::Eng => "ENG",
            Self::Jpn => "JPN",
        }
    }

    /// Returns `true` for either Chinese script.
    #[must_use]
    pub const fn is_chinese(self) -> bool {
        matches!(self, Self::Chs | Self::Cht)
    }
}

impl fmt::Display for SubtitleLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SubtitleLanguage {
    type Err = DaimeiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CHS" => Ok(Self::Chs),
            "CHT" => Ok(Self::Cht),
            "ENG" => Ok(Self::Eng),
            "JPN" => Ok(Self::Jpn),
            _ => Err(DaimeiError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Deduplicated set of subtitle languages, always iterated in code order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtitleLanguages(BTreeSet<SubtitleLanguage>);

impl SubtitleLanguages {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a language; returns `false` if it was already present.
    pub fn insert(&mut self, language: SubtitleLanguage) -> bool {
        self.0.insert(language)
    }

    /// Removes both Chinese scripts.
    pub fn remove_chinese(&mut self) {
        self.0.retain(|lang| !lang.is_chinese());
    }

    #[must_use]
    pub fn contains(&self, language: SubtitleLanguage) -> bool {
        self.0.contains(&language)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = SubtitleLanguage> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<SubtitleLanguage> for SubtitleLanguages {
    fn from_iter<I: IntoIterator<Item = SubtitleLanguage>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<SubtitleLanguage> for SubtitleLanguages {
    fn extend<I: IntoIterator<Item = SubtitleLanguage>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl fmt::Display for SubtitleLanguages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.iter().map(SubtitleLanguage::code).collect();
        f.write_str(&codes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_sort_alphabetically() {
        let mut langs = vec![
            SubtitleLanguage::Jpn,
            SubtitleLanguage::Eng,
            SubtitleLanguage::Cht,
            SubtitleLanguage::Chs,
        ];
        langs.sort();
        let codes: Vec<_> = langs.iter().map(|l| l.code()).collect();
        assert_eq!(codes, ["CHS", "CHT", "ENG", "JPN"]);
    }

    #[test]
    fn set_renders_deduplicated_in_code_order() {
        let set: SubtitleLanguages = [
            SubtitleLanguage::Jpn,
            SubtitleLanguage::Chs,
            SubtitleLanguage::Jpn,
            SubtitleLanguage::Cht,
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "CHS, CHT, JPN");
    }

    #[test]
    fn empty_set_renders_empty_string() {
        assert_eq!(SubtitleLanguages::new().to_string(), "");
    }

    #[test]
    fn remove_chinese_keeps_other_languages() {
        let mut set: SubtitleLanguages = [
            SubtitleLanguage::Chs,
            SubtitleLanguage::Cht,
            SubtitleLanguage::Jpn,
        ]
        .into_iter()
        .collect();
        set.remove_chinese();
        assert_eq!(set.to_string(), "JPN");
    }

    #[test]
    fn parse_codes() {
        assert_eq!("chs".parse::<SubtitleLanguage>().unwrap(), SubtitleLanguage::Chs);
        assert_eq!(" JPN ".parse::<SubtitleLanguage>().unwrap(), SubtitleLanguage::Jpn);
        assert!(matches!(
            "KOR".parse::<SubtitleLanguage>(),
            Err(DaimeiError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn serializes_as_code_list() {
        let set: SubtitleLanguages = [SubtitleLanguage::Cht, SubtitleLanguage::Chs]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["CHS","CHT"]"#);
    }
}
