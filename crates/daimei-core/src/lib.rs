//! # Daimei Core
//!
//! Metadata extraction for anime release titles. A title is split into
//! bracketed and free segments once, then three independent extractors read
//! the episode range, the subtitle languages and the video resolution.
//!
//! ## Quick Start
//!
//! ```rust
//! use daimei_core::parse;
//!
//! let result = parse("[Up to 21℃] 怪人的沙拉碗 / Henjin no Salad Bowl - 10 (Baha 1920x1080 AVC AAC MP4)");
//!
//! assert_eq!(result.episode_range.to_string(), "10..10");
//! assert_eq!(result.subtitle_languages.to_string(), "CHT");
//! assert_eq!(result.resolution.unwrap().to_string(), "1080P");
//! ```
pub mod error;
pub mod parser;
pub mod types;

// Re-export primary API
pub use error::{DaimeiError, Result};
pub use parser::{
    parse, parse_with_config, EpisodeResolver, EpisodeRule, ParserConfig, TitleParser, Tokenizer,
};
pub use types::{
    EpisodeNumber, EpisodeRange, ParsedTitle, Resolution, SubtitleLanguage, SubtitleLanguages,
};
