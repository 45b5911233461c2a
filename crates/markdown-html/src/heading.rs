use crate::options::HeadingOverflow;
use std::fmt;

/// Heading depth, guaranteed to be within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: HeadingLevel = HeadingLevel(1);
    pub const MAX: HeadingLevel = HeadingLevel(6);

    pub fn new(depth: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&depth)
            .then_some(HeadingLevel(depth))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recognises `#{1,6} text`. The text is everything after the single
/// separating space; a run of `#` without a following space is not a heading.
pub fn detect_heading(text: &str, overflow: HeadingOverflow) -> Option<(HeadingLevel, &str)> {
    let pound_count = text.bytes().take_while(|&byte| byte == b'#').count();
    if pound_count == 0 {
        return None;
    }

    let content = text[pound_count..].strip_prefix(' ')?;

    let level = match u8::try_from(pound_count).ok().and_then(HeadingLevel::new) {
        Some(level) => level,
        None => match overflow {
            HeadingOverflow::Paragraph => return None,
            HeadingOverflow::Clamp => HeadingLevel::MAX,
        },
    };

    Some((level, content))
}
