//! # Title Tokenizer
//!
//! Splits release titles into bracketed groups and the free text between
//! them. Every extractor re-scans the same segment list independently.

/// Where a segment came from in the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Contents of a `[...]` or `(...)` group, delimiters stripped.
    Bracketed,
    /// Text outside any group.
    Free,
}

/// A segment extracted from a title with positional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Whitespace-collapsed segment text
    pub text: String,
    /// Bracketed group or free text
    pub kind: SegmentKind,
    /// Start position in the normalized title
    pub start: usize,
    /// End position in the normalized title
    pub end: usize,
    /// Segment index in the sequence
    pub index: usize,
}

impl Segment {
    #[must_use]
    pub fn is_bracketed(&self) -> bool {
        self.kind == SegmentKind::Bracketed
    }
}

/// Ordered segments of one title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    normalized: String,
    segments: Vec<Segment>,
}

impl Tokens {
    /// The title after full-width folding.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// All segments in title order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter()
    }

    /// Bracketed segments in title order.
    pub fn bracketed(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(|s| s.kind == SegmentKind::Bracketed)
    }

    /// Free-text segments in title order.
    pub fn free(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(|s| s.kind == SegmentKind::Free)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Tokenizer for release titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a title into bracketed and free segments.
    ///
    /// Groups do not nest: inside `[` only `]` closes, inside `(` only `)`.
    /// An opener without a closer leaves the rest of the title as free text.
    ///
    /// # Examples
    /// ```
    /// use daimei_core::parser::tokenizer::Tokenizer;
    ///
    /// let tokens = Tokenizer::new().tokenize("[Group] Show - 01 [1080p]");
    /// let texts: Vec<_> = tokens.segments().map(|s| s.text.as_str()).collect();
    /// assert_eq!(texts, ["Group", "Show - 01", "1080p"]);
    /// ```
    pub fn tokenize(&self, input: &str) -> Tokens {
        let normalized = self.normalize(input);
        let mut segments = Vec::new();
        let mut cursor = 0;
        let mut free_start = 0;

        while let Some(offset) = normalized[cursor..].find(['[', '(']) {
            let open = cursor + offset;
            let closer = if normalized[open..].starts_with('[') { ']' } else { ')' };

            let Some(len) = normalized[open + 1..].find(closer) else {
                break;
            };
            let close = open + 1 + len;

            Self::push(&mut segments, &normalized, free_start, open, SegmentKind::Free);
            Self::push(&mut segments, &normalized, open + 1, close, SegmentKind::Bracketed);

            cursor = close + closer.len_utf8();
            free_start = cursor;
        }

        Self::push(
            &mut segments,
            &normalized,
            free_start,
            normalized.len(),
            SegmentKind::Free,
        );

        Tokens {
            normalized,
            segments,
        }
    }

    fn push(
        segments: &mut Vec<Segment>,
        normalized: &str,
        start: usize,
        end: usize,
        kind: SegmentKind,
    ) {
        if start >= end {
            return;
        }

        let raw = &normalized[start..end];
        let raw = match kind {
            // Stray closers in free text carry no meaning.
            SegmentKind::Free => raw.replace([']', ')'], " "),
            SegmentKind::Bracketed => raw.to_string(),
        };

        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return;
        }

        segments.push(Segment {
            text,
            kind,
            start,
            end,
            index: segments.len(),
        });
    }

    /// Folds full-width punctuation, letters and digits to ASCII and
    /// CJK lenticular brackets to square brackets.
    fn normalize(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{3000}' => ' ',
                '【' | '〔' => '[',
                '】' | '〕' => ']',
                '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
                _ => c,
            })
            .collect()
    }
}
