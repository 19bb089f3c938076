pub mod episode;
pub mod language;
pub mod resolution;
pub mod result;

pub use episode::{EpisodeNumber, EpisodeRange};
pub use language::{SubtitleLanguage, SubtitleLanguages};
pub use resolution::Resolution;
pub use result::ParsedTitle;
