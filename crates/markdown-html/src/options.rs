use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What to do with a line that opens with seven or more `#` followed by a space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeadingOverflow {
    /// Treat the whole line as paragraph text.
    #[default]
    Paragraph,
    /// Render it as a level-6 heading.
    Clamp,
}

impl HeadingOverflow {
    pub const ALL: &'static [HeadingOverflow] =
        &[HeadingOverflow::Paragraph, HeadingOverflow::Clamp];

    pub fn as_str(self) -> &'static str {
        match self {
            HeadingOverflow::Paragraph => "paragraph",
            HeadingOverflow::Clamp => "clamp",
        }
    }
}

impl fmt::Display for HeadingOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown heading overflow policy '{0}' (expected 'paragraph' or 'clamp')")]
pub struct UnknownHeadingOverflow(pub String);

impl FromStr for HeadingOverflow {
    type Err = UnknownHeadingOverflow;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "paragraph" => Ok(HeadingOverflow::Paragraph),
            "clamp" => Ok(HeadingOverflow::Clamp),
            _ => Err(UnknownHeadingOverflow(value.to_string())),
        }
    }
}

/// Knobs for [`crate::parse_with`]. The default matches [`crate::parse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub heading_overflow: HeadingOverflow,
}

impl ParseOptions {
    pub fn with_heading_overflow(mut self, overflow: HeadingOverflow) -> Self {
        self.heading_overflow = overflow;
        self
    }
}
