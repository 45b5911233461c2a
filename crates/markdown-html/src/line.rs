use crate::heading::{detect_heading, HeadingLevel};
use crate::options::ParseOptions;
use tracing::trace;

/// One physical line of input, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord<'a> {
    pub text: &'a str,
    /// 1-based.
    pub number: usize,
}

/// Splits input on `\n`. Line text is kept byte for byte (a `\r` before the
/// newline stays part of the line); only empty lines at the very end of the
/// input are dropped.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    remaining: Option<&'a str>,
    number: usize,
}

impl<'a> Lines<'a> {
    pub fn new(input: &'a str) -> Self {
        let body = input.trim_end_matches('\n');
        Self {
            remaining: (!body.is_empty()).then_some(body),
            number: 0,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = LineRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.remaining?;
        let line = match rest.find('\n') {
            Some(idx) => {
                self.remaining = Some(&rest[idx + 1..]);
                &rest[..idx]
            }
            None => {
                self.remaining = None;
                rest
            }
        };

        self.number += 1;
        Some(LineRecord {
            text: line,
            number: self.number,
        })
    }
}

/// Structural role of a single line, decided by its leading characters only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifiedLine<'a> {
    Heading { level: HeadingLevel, text: &'a str },
    ListItem { text: &'a str },
    Paragraph { text: &'a str },
}

impl<'a> ClassifiedLine<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            ClassifiedLine::Heading { text, .. }
            | ClassifiedLine::ListItem { text }
            | ClassifiedLine::Paragraph { text } => text,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ClassifiedLine::Heading { .. } => "heading",
            ClassifiedLine::ListItem { .. } => "list_item",
            ClassifiedLine::Paragraph { .. } => "paragraph",
        }
    }
}

pub fn classify_line<'a>(line: &LineRecord<'a>, options: &ParseOptions) -> ClassifiedLine<'a> {
    if let Some((level, text)) = detect_heading(line.text, options.heading_overflow) {
        return ClassifiedLine::Heading { level, text };
    }

    match line.text.strip_prefix("* ") {
        Some(text) => ClassifiedLine::ListItem { text },
        None => ClassifiedLine::Paragraph { text: line.text },
    }
}

/// Lazy line-by-line classification of a whole document.
#[derive(Debug, Clone)]
pub struct ClassifiedLines<'a> {
    lines: Lines<'a>,
    options: ParseOptions,
}

impl<'a> ClassifiedLines<'a> {
    pub fn new(input: &'a str, options: ParseOptions) -> Self {
        Self {
            lines: Lines::new(input),
            options,
        }
    }
}

impl<'a> Iterator for ClassifiedLines<'a> {
    type Item = ClassifiedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.lines.next()?;
        let classified = classify_line(&record, &self.options);
        trace!(
            line = record.number,
            kind = classified.kind_name(),
            "classified line"
        );
        Some(classified)
    }
}
