//! # Subtitle-Language Extractor
//!
//! Two-phase extraction: positive tags are collected from every segment,
//! then a negative tag ("no Chinese subtitles") suppresses both Chinese
//! scripts no matter where the positive tags appeared. A compound tag
//! (`简繁日内封`) describes one subtitle package, so the negative tag
//! discards every language it contributed; languages named by their own
//! single-language tag (`[JPN]`, `日语`) survive.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::parser::tokenizer::Tokens;
use crate::types::{SubtitleLanguage, SubtitleLanguages};

/// Runs of language characters, optionally followed by a subtitle suffix.
static CJK_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<run>[简繁中日英]+)(?P<suffix>字幕|内封|內封|内嵌|內嵌|外挂|外掛|双语|雙語|双字|雙字|体|體|文|语|語)?",
    )
    .expect("Invalid CJK subtitle tag pattern")
});

/// Tags announcing that a release carries no Chinese subtitles.
const NEGATIVE_TAGS: &[&str] = &["无中文字幕", "無中文字幕", "无中字", "無中字", "不含中文"];

/// Positive matches, split by the kind of tag that produced them.
#[derive(Debug, Default)]
struct PositiveTags {
    single: SubtitleLanguages,
    compound: SubtitleLanguages,
    generic_chinese: bool,
}

impl PositiveTags {
    fn merge(self) -> SubtitleLanguages {
        let mut languages = self.single;
        languages.extend(self.compound.iter());

        // A bare 中 means Chinese without naming the script; groups default
        // to simplified unless a script was named elsewhere (繁中, 繁體中文).
        let has_script = languages.iter().any(SubtitleLanguage::is_chinese);
        if self.generic_chinese && !has_script {
            languages.insert(SubtitleLanguage::Chs);
        }
        languages
    }
}

/// Extracts the set of subtitle languages a title announces.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtitleExtractor;

impl SubtitleExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, tokens: &Tokens) -> SubtitleLanguages {
        let tags = self.collect_positive(tokens);

        if self.has_negative_tag(tokens) {
            trace!(compound = %tags.compound, "negative subtitle tag suppresses Chinese");
            let mut languages = tags.single;
            languages.remove_chinese();
            return languages;
        }

        tags.merge()
    }

    /// Phase one: every positive tag in every segment.
    fn collect_positive(&self, tokens: &Tokens) -> PositiveTags {
        let mut tags = PositiveTags::default();

        for segment in tokens.segments() {
            for word in segment
                .text
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|w| !w.is_empty())
            {
                let tagged = latin_tag(word);
                match tagged.len() {
                    0 => continue,
                    1 => tags.single.extend(tagged.iter().copied()),
                    _ => tags.compound.extend(tagged.iter().copied()),
                }
                trace!(word, "latin subtitle tag");
            }

            for caps in CJK_TAG_PATTERN.captures_iter(&segment.text) {
                let run = &caps["run"];
                let is_compound = run.chars().count() > 1;
                // Without a suffix, only a bracketed run reads as a tag;
                // in free text it is part of the show name.
                if caps.name("suffix").is_none() && !(is_compound && segment.is_bracketed()) {
                    continue;
                }
                trace!(tag = &caps[0], "CJK subtitle tag");

                let target = if is_compound {
                    &mut tags.compound
                } else {
                    &mut tags.single
                };
                for c in run.chars() {
                    match c {
                        '简' => {
                            target.insert(SubtitleLanguage::Chs);
                        }
                        '繁' => {
                            target.insert(SubtitleLanguage::Cht);
                        }
                        '日' => {
                            target.insert(SubtitleLanguage::Jpn);
                        }
                        '英' => {
                            target.insert(SubtitleLanguage::Eng);
                        }
                        '中' => tags.generic_chinese = true,
                        _ => {}
                    }
                }
            }
        }

        tags
    }

    /// Phase two trigger.
    fn has_negative_tag(&self, tokens: &Tokens) -> bool {
        tokens
            .segments()
            .any(|segment| NEGATIVE_TAGS.iter().any(|tag| segment.text.contains(tag)))
    }
}

/// Languages announced by a single Latin word.
fn latin_tag(word: &str) -> &'static [SubtitleLanguage] {
    use SubtitleLanguage::*;

    match word.to_ascii_uppercase().as_str() {
        "CHS" | "SC" | "GB" | "GBK" => &[Chs],
        "CHT" | "TC" | "BIG5" => &[Cht],
        "JPN" | "JP" | "JAP" => &[Jpn],
        "ENG" => &[Eng],
        "JPSC" | "CHSJP" => &[Chs, Jpn],
        "JPTC" | "CHTJP" => &[Cht, Jpn],
        // Bahamut Anime Crazy rips carry its Traditional Chinese subtitles.
        "BAHA" => &[Cht],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenizer::Tokenizer;

    fn extract(input: &str) -> String {
        SubtitleExtractor::new()
            .extract(&Tokenizer::new().tokenize(input))
            .to_string()
    }

    #[test]
    fn compound_cjk_tag_expands() {
        assert_eq!(
            extract("[北宇治字幕组] 蓦然回首 / Look Back [Movie v2][WebRip][HEVC_AAC×2][简繁日内封]"),
            "CHS, CHT, JPN"
        );
        assert_eq!(extract("[Group] Show - 01 [简日双语][1080P]"), "CHS, JPN");
        assert_eq!(extract("[Group] Show - 01 [繁日内嵌]"), "CHT, JPN");
        assert_eq!(extract("[Group] Show - 01 [简体]"), "CHS");
        assert_eq!(extract("[Group] Show - 01 [英文字幕]"), "ENG");
    }

    #[test]
    fn negative_tag_overrides_positive() {
        assert_eq!(
            extract("[北宇治字幕组] 蓦然回首 / Look Back [Movie][WebRip][HEVC_AAC×2][简繁日内封][无中文字幕]"),
            ""
        );
        assert_eq!(extract("[无中文字幕][Group] Show [CHS][CHT]"), "");
        assert_eq!(extract("[Group] Show [繁日内嵌][無中字]"), "");
        assert_eq!(extract("[Group] Show [JPSC][无中字]"), "");
    }

    #[test]
    fn negative_tag_keeps_independent_languages() {
        assert_eq!(extract("[Group] Show [简繁日内封][日语][无中文字幕]"), "JPN");
        assert_eq!(extract("[Group] Show [JPN][ENG][CHS][无中字]"), "ENG, JPN");
    }

    #[test]
    fn latin_tags() {
        assert_eq!(extract("[Group] Show - 10 (Baha 1920x1080 AVC AAC MP4)"), "CHT");
        assert_eq!(extract("[Group] Show - 01 [CHS_JPN][1080p]"), "CHS, JPN");
        assert_eq!(extract("[Group] Show - 01 [BIG5]"), "CHT");
        assert_eq!(extract("[Group] Show - 01 [JPTC]"), "CHT, JPN");
        assert_eq!(extract("Show.S01E01.ENG.1080p"), "ENG");
    }

    #[test]
    fn generic_chinese_defaults_to_simplified() {
        assert_eq!(extract("[Group] Show [中日双语]"), "CHS, JPN");
        assert_eq!(extract("[Group] Show [繁中]"), "CHT");
        assert_eq!(extract("[Group] Show [繁體中文]"), "CHT");
    }

    #[test]
    fn language_characters_inside_titles_are_ignored() {
        assert_eq!(extract("[Group] 日常 - 01 [1080p]"), "");
        assert_eq!(extract("[Group] 英雄 - 01"), "");
        assert_eq!(extract("[北宇治字幕组] Show"), "");
        assert_eq!(extract("[Group] Show [1.5GB]"), "");
    }

    #[test]
    fn compound_runs_in_free_text_need_a_suffix() {
        assert_eq!(extract("[Group] 中日友好 - 01 [1080p]"), "");
        assert_eq!(extract("[Group] 中日友好 - 01 [中日双语]"), "CHS, JPN");
        assert_eq!(extract("Show - 01 简繁内封"), "CHS, CHT");
    }

    #[test]
    fn no_tags_is_empty_set() {
        assert_eq!(extract(""), "");
        assert_eq!(
            extract("特典映像/[DBD-Raws] [龙猫] [特典映像] [01][1080P][BDRip][HEVC-10bit][AC3].mkv"),
            ""
        );
    }
}
