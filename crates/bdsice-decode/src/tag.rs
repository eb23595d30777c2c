//! Line tags of the `.xer` record format.

use std::fmt;

/// First character of the line that closes a record block (and free text).
pub const BLOCK_END: char = '#';

/// First character of the line that closes a notes section.
pub const SECTION_END: char = '@';

/// Keyword at the start of a record line, written as `TAG:` followed by
/// the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Code,
    Title,
    Units,
    Source,
    Notes,
    Decimals,
    Frequency,
    Start,
    End,
    ObservationCount,
    Public,
    Private,
    Active,
    FreeText,
}

impl Tag {
    pub const ALL: [Tag; 14] = [
        Tag::Code,
        Tag::Title,
        Tag::Units,
        Tag::Source,
        Tag::Notes,
        Tag::Decimals,
        Tag::Frequency,
        Tag::Start,
        Tag::End,
        Tag::ObservationCount,
        Tag::Public,
        Tag::Private,
        Tag::Active,
        Tag::FreeText,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Tag::Code => "COD",
            Tag::Title => "TIT",
            Tag::Units => "UNI",
            Tag::Source => "FUE",
            Tag::Notes => "NOT",
            Tag::Decimals => "DEC",
            Tag::Frequency => "FRE",
            Tag::Start => "INI",
            Tag::End => "FIN",
            Tag::ObservationCount => "NOB",
            Tag::Public => "PUB",
            Tag::Private => "PRI",
            Tag::Active => "DET",
            Tag::FreeText => "TEX",
        }
    }

    /// Flag tags close a run of value rows.
    pub fn is_flag(self) -> bool {
        matches!(self, Tag::Public | Tag::Private | Tag::Active)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// What a raw line is, before any mode-specific interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A tagged line with its trimmed payload.
    Tagged(Tag, &'a str),
    BlockEnd,
    Other,
}

/// Classify a line by its leading tag.
///
/// ```
/// use bdsice_decode::tag::{LineKind, Tag, classify};
///
/// assert_eq!(classify("TIT: PRODUCTO INTERIOR BRUTO\r"), LineKind::Tagged(Tag::Title, "PRODUCTO INTERIOR BRUTO"));
/// assert_eq!(classify("#"), LineKind::BlockEnd);
/// assert_eq!(classify("XYZ: 1"), LineKind::Other);
/// ```
pub fn classify(line: &str) -> LineKind<'_> {
    if line.starts_with(BLOCK_END) {
        return LineKind::BlockEnd;
    }
    for tag in Tag::ALL {
        if let Some(payload) = line
            .strip_prefix(tag.keyword())
            .and_then(|rest| rest.strip_prefix(':'))
        {
            return LineKind::Tagged(tag, payload.trim());
        }
    }
    LineKind::Other
}
