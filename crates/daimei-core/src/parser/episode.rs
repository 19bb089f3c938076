//! # Episode-Range Resolver
//!
//! An ordered list of independent matchers evaluated first-match-wins.
//! Keeping each rule separate makes precedence explicit and lets every
//! rule be tested on its own.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::parser::tokenizer::Tokens;
use crate::types::{EpisodeNumber, EpisodeRange};

// S01E05, S1E05-E08, S01EP05
static SEASON_EPISODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z0-9])S(?P<season>\d{1,2})\s?EP?(?P<ep>\d{1,4})(?:\s*-\s*(?:EP?)?(?P<end>\d{1,4}))?(?:v\d{1,2})?(?:[^a-z0-9]|$)",
    )
    .expect("Invalid season/episode pattern")
});

// S2 - 05, S2 05, Season 2 - 05, 2nd Season - 05
static SEASON_MARKER_EPISODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z0-9])(?:(?:S|Season\s*)(?P<season>\d{1,2})|(?P<ordinal>\d{1,2})(?:st|nd|rd|th)\s+Season)(?:\s+-\s+|\s+)(?:EP?\.?\s?)?(?P<ep>\d{1,4})(?:\s*[-~]\s*(?P<end>\d{1,4}))?(?:v\d{1,2})?(?:\s*(?:end|完))?(?:[^a-z0-9]|$)",
    )
    .expect("Invalid season-marker episode pattern")
});

// 第二季 第05话, 第二季 - 05, 第二季 05
static CJK_SEASON_EPISODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)第(?P<season>\d{1,2}|[一二三四五六七八九十]{1,3})[季期](?:\s*-\s*|\s+)?第?(?P<ep>\d{1,4})(?:\s*[-~]\s*(?P<end>\d{1,4}))?(?:v\d{1,2})?(?:[话話集]|\s*(?:end|完))?(?:[^a-z0-9]|$)",
    )
    .expect("Invalid CJK season/episode pattern")
});

// S1-S3, S1 - S3, S1-3
static SEASON_RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z0-9])S(?P<first>\d{1,2})(?:\s*-\s*S|-)(?P<last>\d{1,2})(?:[^a-z0-9]|$)",
    )
    .expect("Invalid season range pattern")
});

// S01, Season 2
static SEASON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])(?:S|Season\s*)(?P<season>\d{1,2})(?:[^a-z0-9]|$)")
        .expect("Invalid season pattern")
});

// 2nd Season
static ORDINAL_SEASON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])(?P<season>\d{1,2})(?:st|nd|rd|th)\s+Season(?:[^a-z0-9]|$)")
        .expect("Invalid ordinal season pattern")
});

// 第2季, 第十一季
static CJK_SEASON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"第(?P<season>\d{1,2}|[一二三四五六七八九十]{1,3})[季期]")
        .expect("Invalid CJK season pattern")
});

// Show.Name.E05.1080p, Show EP12
static EPISODE_MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])EP?\.?(?P<ep>\d{1,4})(?:v\d{1,2})?(?:[^a-z0-9]|$)")
        .expect("Invalid episode marker pattern")
});

// 第05话, 第01-12集
static CJK_EPISODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"第(?P<ep>\d{1,4})(?:\s*[-~]\s*(?P<end>\d{1,4}))?[话話集]")
        .expect("Invalid CJK episode pattern")
});

// "- 10", "01-12", "24v2", "12 END" at the end of free text
static TRAILING_EPISODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[\s\-_.#]|ep?\.?)(?P<ep>\d{1,4})(?:(?:-|\s*~\s*)(?P<end>\d{1,4}))?(?:v\d{1,2})?\s*(?:end|完)?$",
    )
    .expect("Invalid trailing episode pattern")
});

static FILE_EXTENSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:mkv|mp4|avi|m2ts|ts|rmvb|flv|webm|wmv|mov)$")
        .expect("Invalid file extension pattern")
});

// SP01, OVA 2, 特典03
static SPECIAL_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z0-9])(?:SP|OVA|OAD|特典)\s?(?P<ep>\d{1,3})(?:v\d{1,2})?(?:[^a-z0-9]|$)",
    )
    .expect("Invalid special number pattern")
});

// [01] under a specials context
static BARE_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<ep>\d{1,3})(?:v\d{1,2})?$").expect("Invalid bare number pattern")
});

// [01], [01v2], [12END], [第12话], [01-12]
static BRACKETED_EPISODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:第|ep?\.?\s?)?(?P<ep>\d{1,4})(?:\s*[-~]\s*(?P<end>\d{1,4}))?(?:v\d{1,2})?\s*(?:end|完|[话話集])?$",
    )
    .expect("Invalid bracketed episode pattern")
});

static MOVIE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])movie(?:\s?v\d{1,2})?(?:[^a-z0-9]|$)|剧场版|劇場版")
        .expect("Invalid movie pattern")
});

/// Latin words that put bare bracketed numbers into a specials context.
const SPECIAL_WORDS: &[&str] = &[
    "sp", "sps", "special", "specials", "ova", "oad", "extra", "extras",
];

/// CJK phrases that put bare bracketed numbers into a specials context.
const SPECIAL_PHRASES: &[&str] = &["特典映像", "映像特典", "特典", "特别篇", "特別篇", "番外"];

/// Words directly before a trailing number that make it something other
/// than an episode ("Movie 2", "Vol 3", "H.264").
const NON_EPISODE_WORDS: &[&str] = &[
    "movie", "vol", "part", "season", "ver", "version", "h", "x", "aac", "ddp", "dd", "dts",
];

const TRAILING_SEPARATORS: &[char] = &['-', '_', '.', '~', '/', '|', '–', '—'];

/// The rule that produced an episode range, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EpisodeRule {
    /// `S01E05`: the episode wins, the season is informational.
    SeasonEpisode,
    /// `S1-S3`: expanded to every season in the range.
    SeasonRange,
    /// `S01`, `Season 2`, `第二季`.
    Season,
    /// A number ending the free text, e.g. `Title - 10`.
    TrailingEpisode,
    /// `SP01`, or a bracketed number under a specials context.
    Special,
    /// A free-standing bracketed number such as `[01]`.
    BracketedEpisode,
    /// `Movie`, `Movie v2`, `剧场版`.
    Movie,
}

impl EpisodeRule {
    /// All rules in evaluation order.
    pub const ORDER: [Self; 7] = [
        Self::SeasonEpisode,
        Self::SeasonRange,
        Self::Season,
        Self::TrailingEpisode,
        Self::Special,
        Self::BracketedEpisode,
        Self::Movie,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SeasonEpisode => "season-episode",
            Self::SeasonRange => "season-range",
            Self::Season => "season",
            Self::TrailingEpisode => "trailing-episode",
            Self::Special => "special",
            Self::BracketedEpisode => "bracketed-episode",
            Self::Movie => "movie",
        }
    }
}

impl fmt::Display for EpisodeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Matcher = fn(&EpisodeResolver, &Tokens) -> Option<EpisodeRange>;

/// Resolves the episode identity of a tokenized title.
#[derive(Debug, Clone)]
pub struct EpisodeResolver {
    special_words: Vec<String>,
    special_phrases: Vec<String>,
}

impl Default for EpisodeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeResolver {
    const RULES: [(EpisodeRule, Matcher); 7] = [
        (EpisodeRule::SeasonEpisode, Self::season_episode),
        (EpisodeRule::SeasonRange, Self::season_range),
        (EpisodeRule::Season, Self::season),
        (EpisodeRule::TrailingEpisode, Self::trailing_episode),
        (EpisodeRule::Special, Self::special),
        (EpisodeRule::BracketedEpisode, Self::bracketed_episode),
        (EpisodeRule::Movie, Self::movie),
    ];

    /// Resolver with the built-in specials markers.
    pub fn new() -> Self {
        Self::with_special_markers(std::iter::empty::<&str>())
    }

    /// Resolver with extra specials markers on top of the built-in ones.
    ///
    /// ASCII alphanumeric markers match whole words case-insensitively;
    /// anything else matches as a substring.
    pub fn with_special_markers<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut special_words: Vec<String> = SPECIAL_WORDS.iter().map(|w| w.to_string()).collect();
        let mut special_phrases: Vec<String> =
            SPECIAL_PHRASES.iter().map(|p| p.to_string()).collect();

        for marker in extra {
            let marker = marker.as_ref().trim();
            if marker.is_empty() {
                continue;
            }
            if marker.chars().all(|c| c.is_ascii_alphanumeric()) {
                special_words.push(marker.to_ascii_lowercase());
            } else {
                special_phrases.push(marker.to_string());
            }
        }

        Self {
            special_words,
            special_phrases,
        }
    }

    /// Returns the episode range of the first matching rule, or
    /// [`EpisodeRange::Unknown`].
    pub fn resolve(&self, tokens: &Tokens) -> EpisodeRange {
        self.resolve_with_rule(tokens).0
    }

    /// Like [`resolve`](Self::resolve), also reporting which rule matched.
    /// The fallback reports `None`.
    pub fn resolve_with_rule(&self, tokens: &Tokens) -> (EpisodeRange, Option<EpisodeRule>) {
        for (rule, matcher) in Self::RULES {
            if let Some(range) = matcher(self, tokens) {
                debug!(%rule, episode = %range, "episode rule matched");
                return (range, Some(rule));
            }
        }

        trace!("no episode rule matched");
        (EpisodeRange::Unknown, None)
    }

    fn season_episode(&self, tokens: &Tokens) -> Option<EpisodeRange> {
        tokens.segments().find_map(|segment| {
            let text = segment.text.as_str();
            let caps = SEASON_EPISODE_PATTERN
                .captures(text)
                .or_else(|| SEASON_MARKER_EPISODE_PATTERN.captures(text))
                .or_else(|| CJK_SEASON_EPISODE_PATTERN.captures(text))?;
            let end = caps.name("end").map(|m| m.as_str());
            if end.is_none() && looks_like_year(&caps["ep"]) {
                return None;
            }
            trace!(matched = &caps[0], "season component discarded");
            episode_span(&caps["ep"], end)
        })
    }

    fn season_range(&self, tokens: &Tokens) -> Option<EpisodeRange> {
        tokens.segments().find_map(|segment| {
            SEASON_RANGE_PATTERN
                .captures_iter(&segment.text)
                .find_map(|caps| {
                    let first = caps["first"].parse().ok()?;
                    let last = caps["last"].parse().ok()?;
                    EpisodeRange::season_range(first, last)
                })
        })
    }

    fn season(&self, tokens: &Tokens) -> Option<EpisodeRange> {
        tokens.segments().find_map(|segment| {
            let text = segment.text.as_str();
            let caps = SEASON_PATTERN
                .captures(text)
                .or_else(|| ORDINAL_SEASON_PATTERN.captures(text))
                .or_else(|| CJK_SEASON_PATTERN.captures(text))?;
            parse_season_number(&caps["season"]).map(EpisodeRange::Season)
        })
    }

    fn trailing_episode(&self, tokens: &Tokens) -> Option<EpisodeRange> {
        tokens.free().find_map(|segment| {
            if let Some(caps) = CJK_EPISODE_PATTERN.captures(&segment.text) {
                return episode_span(&caps["ep"], caps.name("end").map(|m| m.as_str()));
            }
            if let Some(caps) = EPISODE_MARKER_PATTERN.captures(&segment.text) {
                return episode_span(&caps["ep"], None);
            }

            let text = FILE_EXTENSION_PATTERN.replace(&segment.text, "");
            let text = text
                .trim_end_matches(|c: char| c.is_whitespace() || TRAILING_SEPARATORS.contains(&c));

            let caps = TRAILING_EPISODE_PATTERN.captures(text)?;
            let ep = caps.name("ep")?;
            let end = caps.name("end").map(|m| m.as_str());

            if end.is_none() && looks_like_year(ep.as_str()) {
                return None;
            }
            let before = &text[..ep.start()];
            if follows_non_episode_word(before) || is_decimal_fraction(before) {
                return None;
            }
            episode_span(ep.as_str(), end)
        })
    }

    fn special(&self, tokens: &Tokens) -> Option<EpisodeRange> {
        let explicit = tokens.segments().find_map(|segment| {
            let caps = SPECIAL_NUMBER_PATTERN.captures(&segment.text)?;
            EpisodeNumber::from_digits(&caps["ep"])
        });
        if let Some(ep) = explicit {
            return Some(EpisodeRange::Special(ep));
        }

        if !self.has_special_context(tokens) {
            return None;
        }

        tokens.bracketed().find_map(|segment| {
            let caps = BARE_NUMBER_PATTERN.captures(&segment.text)?;
            EpisodeNumber::from_digits(&caps["ep"]).map(EpisodeRange::Special)
        })
    }

    fn bracketed_episode(&self, tokens: &Tokens) -> Option<EpisodeRange> {
        tokens.bracketed().find_map(|segment| {
            let caps = BRACKETED_EPISODE_PATTERN.captures(&segment.text)?;
            let end = caps.name("end").map(|m| m.as_str());
            if end.is_none() && looks_like_year(&caps["ep"]) {
                return None;
            }
            episode_span(&caps["ep"], end)
        })
    }

    fn movie(&self, tokens: &Tokens) -> Option<EpisodeRange> {
        tokens
            .segments()
            .any(|segment| MOVIE_PATTERN.is_match(&segment.text))
            .then_some(EpisodeRange::Unknown)
    }

    fn has_special_context(&self, tokens: &Tokens) -> bool {
        tokens.segments().any(|segment| {
            let text = segment.text.as_str();
            self.special_phrases.iter().any(|p| text.contains(p.as_str()))
                || text
                    .split(|c: char| !c.is_ascii_alphanumeric())
                    .filter(|w| !w.is_empty())
                    .any(|word| {
                        self.special_words
                            .iter()
                            .any(|marker| marker.eq_ignore_ascii_case(word))
                    })
        })
    }
}

/// `Single(start)` or, with a larger closing number, `Range(start, end)`.
fn episode_span(start: &str, end: Option<&str>) -> Option<EpisodeRange> {
    let first = EpisodeNumber::from_digits(start)?;
    match end.and_then(EpisodeNumber::from_digits) {
        Some(last) if first.value < last.value => Some(EpisodeRange::Range(first, last)),
        _ => Some(EpisodeRange::Single(first)),
    }
}

fn looks_like_year(digits: &str) -> bool {
    digits.len() == 4 && matches!(digits.parse::<u32>(), Ok(1950..=2099))
}

fn follows_non_episode_word(before: &str) -> bool {
    let before = before
        .trim_end_matches(|c: char| c.is_whitespace() || TRAILING_SEPARATORS.contains(&c))
        .to_ascii_lowercase();
    NON_EPISODE_WORDS.iter().any(|word| {
        before
            .strip_suffix(word)
            .is_some_and(|rest| !rest.ends_with(|c: char| c.is_ascii_alphanumeric()))
    })
}

/// `AAC2.0`, `5.1`: the number after the dot is a fraction.
fn is_decimal_fraction(before: &str) -> bool {
    before
        .strip_suffix('.')
        .is_some_and(|rest| rest.ends_with(|c: char| c.is_ascii_digit()))
}

fn parse_season_number(text: &str) -> Option<u32> {
    text.parse().ok().or_else(|| parse_chinese_numeral(text))
}

/// Chinese numerals from 一 to 九十九.
fn parse_chinese_numeral(text: &str) -> Option<u32> {
    fn digit(c: char) -> Option<u32> {
        match c {
            '一' => Some(1),
            '二' => Some(2),
            '三' => Some(3),
            '四' => Some(4),
            '五' => Some(5),
            '六' => Some(6),
            '七' => Some(7),
            '八' => Some(8),
            '九' => Some(9),
            _ => None,
        }
    }

    let chars: Vec<char> = text.chars().collect();
    match chars.as_slice() {
        ['十'] => Some(10),
        [unit] => digit(*unit),
        ['十', unit] => Some(10 + digit(*unit)?),
        [tens, '十'] => Some(digit(*tens)? * 10),
        [tens, '十', unit] => Some(digit(*tens)? * 10 + digit(*unit)?),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenizer::Tokenizer;

    fn resolve(input: &str) -> (String, Option<EpisodeRule>) {
        let tokens = Tokenizer::new().tokenize(input);
        let (range, rule) = EpisodeResolver::new().resolve_with_rule(&tokens);
        (range.to_string(), rule)
    }

    fn render(input: &str) -> String {
        resolve(input).0
    }

    #[test]
    fn season_episode_keeps_only_episode() {
        assert_eq!(
            resolve("Show - S01E05 (Baha 1920x1080 AVC AAC MP4)"),
            ("05..05".into(), Some(EpisodeRule::SeasonEpisode))
        );
        assert_eq!(render("Show.S2E7.1080p.WEB"), "7..7");
        assert_eq!(render("[Group] Show [S01EP03][1080p]"), "03..03");
        assert_eq!(render("[Group] Show S2 - 05 [1080p]"), "05..05");
        assert_eq!(render("[Group] 某动画 第二季 第05话 [1080p]"), "05..05");
    }

    #[test]
    fn season_marker_followed_by_episode() {
        assert_eq!(
            resolve("[ANi] 某动画 第二季 - 05 [1080P][Baha][WEB-DL][AAC AVC][CHT]"),
            ("05..05".into(), Some(EpisodeRule::SeasonEpisode))
        );
        assert_eq!(render("[Group] 某动画 第二季 05 [1080p]"), "05..05");
        assert_eq!(render("[Group] Show Season 2 - 05 [1080p]"), "05..05");
        assert_eq!(render("[Group] Show 2nd Season - 05 [1080p]"), "05..05");
        assert_eq!(render("[Group] Show S2 05 [1080p]"), "05..05");
        assert_eq!(render("[Group] Show S2 - 01-12 [Batch]"), "01..12");
        // Not an episode: resolution, bit depth, year.
        assert_eq!(render("[Group] Show S2 720p"), "S2");
        assert_eq!(render("[Group] Show S2 10bit"), "S2");
        assert_eq!(render("[Group] Show Season 2 2024"), "S2");
    }

    #[test]
    fn season_episode_ranges_and_dangling_markers() {
        assert_eq!(render("Show S01E01-E12 [Batch]"), "01..12");
        assert_eq!(render("Show S01E01-12 [Batch]"), "01..12");
        assert_eq!(render("Show S01E05- [1080p]"), "05..05");
        assert_eq!(render("Show S01E05-10bit"), "05..05");
    }

    #[test]
    fn season_episode_beats_separate_signals() {
        // S01 alone would be a season, 05 alone a trailing episode.
        assert_eq!(
            resolve("[Group] Show [S01E05][1080p]").1,
            Some(EpisodeRule::SeasonEpisode)
        );
    }

    #[test]
    fn season_range_expands() {
        assert_eq!(
            resolve("[H-Enc] 我心里危险的东西 / Boku no Kokoro no Yabai Yatsu S1-S3 (BDRip 1080p HEVC AAC)"),
            ("S1+S2+S3".into(), Some(EpisodeRule::SeasonRange))
        );
        assert_eq!(render("Show S01 - S04 [BDRip]"), "S1+S2+S3+S4");
        assert_eq!(render("Show S1-3 [BDRip]"), "S1+S2+S3");
    }

    #[test]
    fn non_increasing_season_range_falls_through() {
        assert_eq!(render("Show S3-S1 [BDRip]"), "S3");
    }

    #[test]
    fn single_season_strips_leading_zero() {
        assert_eq!(
            resolve("Show - S01 (Baha 1920x1080 AVC AAC MP4)"),
            ("S1".into(), Some(EpisodeRule::Season))
        );
        assert_eq!(render("Show S1 [1080p]"), "S1");
        assert_eq!(render("[Group] Show Season 2 [BDRip]"), "S2");
        assert_eq!(render("[Group] Show 3rd Season [BDRip]"), "S3");
        assert_eq!(render("[Group] 某动画 第二季 [BDRip]"), "S2");
        assert_eq!(render("[Group] 某动画 第十一季"), "S11");
    }

    #[test]
    fn trailing_episode_in_free_text() {
        assert_eq!(
            resolve("[Up to 21℃] 怪人的沙拉碗 / Henjin no Salad Bowl - 10 (Baha 1920x1080 AVC AAC MP4)"),
            ("10..10".into(), Some(EpisodeRule::TrailingEpisode))
        );
        assert_eq!(render("[SubsPlease] Jujutsu Kaisen - 24 (1080p) [A1B2C3D4].mkv"), "24..24");
        assert_eq!(render("[Group] Show - 05 - [1080p]"), "05..05");
        assert_eq!(render("[Group] Show - 28v2 [1080p]"), "28..28");
        assert_eq!(render("[Group] Show - 12 END [1080p]"), "12..12");
        assert_eq!(render("Show - 07.mkv"), "07..07");
        assert_eq!(render("[Group] Show 第08话 [简体]"), "08..08");
        assert_eq!(render("Show.Name.E05.1080p.WEB.H.264"), "05..05");
    }

    #[test]
    fn trailing_episode_ranges() {
        assert_eq!(render("[Judas] Golden Kamuy - 01-12 (1080p) [Batch]"), "01..12");
        assert_eq!(render("[Group] Show 01 ~ 13 [BDRip]"), "01..13");
        // Spaced dash separates title from episode.
        assert_eq!(render("[Group] Kaguya-sama 2 - 05 [1080p]"), "05..05");
    }

    #[test]
    fn trailing_numbers_that_are_not_episodes() {
        assert_eq!(render("[Group] Show 2024 [1080p]"), "S?");
        assert_eq!(render("[Group] Show x264 [1080p]"), "S?");
        assert_eq!(render("Show Name 1080p WEB-DL AAC2.0 H.264"), "S?");
        assert_eq!(render("Show Name 1080p WEB-DL DDP5.1 H.265"), "S?");
        assert_eq!(render("Show Name 1080p WEB-DL AAC 2.0"), "S?");
        assert_eq!(resolve("[Group] Show Movie 2 [1080p]").1, Some(EpisodeRule::Movie));
    }

    #[test]
    fn special_under_context() {
        assert_eq!(
            resolve("特典映像/[DBD-Raws] [龙猫] [特典映像] [01][1080P][BDRip][HEVC-10bit][AC3].mkv"),
            ("SP01..SP01".into(), Some(EpisodeRule::Special))
        );
        assert_eq!(render("SPs/[Group] Show [03][1080p]"), "SP03..SP03");
        assert_eq!(render("[Group] Show [OVA][02][1080p]"), "SP02..SP02");
    }

    #[test]
    fn special_explicit_marker() {
        assert_eq!(render("[Group] Show [SP01][1080p]"), "SP01..SP01");
        assert_eq!(render("[Group] Show [OVA 2][720p]"), "SP2..SP2");
        assert_eq!(render("[Group] Show [特典03]"), "SP03..SP03");
    }

    #[test]
    fn configured_special_markers() {
        let tokens = Tokenizer::new().tokenize("NCOP/[Group] Show [02][1080p]");
        let plain = EpisodeResolver::new().resolve(&tokens);
        assert_eq!(plain.to_string(), "02..02");

        let resolver = EpisodeResolver::with_special_markers(["NCOP", " ", "映像"]);
        assert_eq!(resolver.resolve(&tokens).to_string(), "SP02..SP02");
    }

    #[test]
    fn bracketed_episode_without_context() {
        assert_eq!(
            resolve("[Group] Show [01][1080p]"),
            ("01..01".into(), Some(EpisodeRule::BracketedEpisode))
        );
        assert_eq!(render("[Group] Show [12v2][1080p]"), "12..12");
        assert_eq!(render("[Group] Show [第12话][1080p]"), "12..12");
        assert_eq!(render("[Group] Show [01-12][BDRip]"), "01..12");
        assert_eq!(render("[Group] Show [2023][1080p]"), "S?");
    }

    #[test]
    fn movie_marker_is_unknown() {
        assert_eq!(
            resolve("[北宇治字幕组] 蓦然回首 / Look Back [Movie v2][WebRip][HEVC_AAC×2][简繁日内封]"),
            ("S?".into(), Some(EpisodeRule::Movie))
        );
        assert_eq!(resolve("[Group] Look Back [movie][WebRip]").1, Some(EpisodeRule::Movie));
        assert_eq!(resolve("[Group] 某动画 剧场版 [1080p]").1, Some(EpisodeRule::Movie));
    }

    #[test]
    fn fallback_is_unknown() {
        assert_eq!(resolve(""), ("S?".into(), None));
        assert_eq!(resolve("[Group] Some Title [WebRip]"), ("S?".into(), None));
    }

    #[test]
    fn rules_are_listed_in_precedence_order() {
        let listed: Vec<_> = EpisodeResolver::RULES.iter().map(|(rule, _)| *rule).collect();
        assert_eq!(listed, EpisodeRule::ORDER);
        let mut sorted = listed.clone();
        sorted.sort();
        assert_eq!(listed, sorted);
    }

    #[test]
    fn chinese_numerals() {
        assert_eq!(parse_chinese_numeral("一"), Some(1));
        assert_eq!(parse_chinese_numeral("十"), Some(10));
        assert_eq!(parse_chinese_numeral("十二"), Some(12));
        assert_eq!(parse_chinese_numeral("二十"), Some(20));
        assert_eq!(parse_chinese_numeral("二十三"), Some(23));
        assert_eq!(parse_chinese_numeral("百"), None);
    }
}
