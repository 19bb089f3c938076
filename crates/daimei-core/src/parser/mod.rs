pub mod episode;
pub mod resolution;
pub mod subtitle;
pub mod tokenizer;
pub mod unified;

pub use episode::{EpisodeResolver, EpisodeRule};
pub use resolution::ResolutionExtractor;
pub use subtitle::SubtitleExtractor;
pub use tokenizer::{Segment, SegmentKind, Tokenizer, Tokens};
pub use unified::{parse, parse_with_config, ParserConfig, TitleParser};
