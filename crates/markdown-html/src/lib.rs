//! Converts a small markdown subset to HTML: `#` to `######` headings,
//! `* ` bullet lists, `__bold__` and `_italic_` spans. Everything else is
//! paragraph text, and input is not HTML-escaped.

mod block;
mod heading;
mod inline;
mod line;
mod options;
mod state;

pub use block::{write_blocks, Block};
pub use heading::{detect_heading, HeadingLevel};
pub use inline::render_inline;
pub use line::{classify_line, ClassifiedLine, ClassifiedLines, LineRecord, Lines};
pub use options::{HeadingOverflow, ParseOptions, UnknownHeadingOverflow};
pub use state::{render_blocks, BlockState};

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};
use tracing::debug;

/// Renders `input` with the default options. Never fails; empty input gives
/// an empty string.
pub fn parse(input: &str) -> String {
    parse_with(input, &ParseOptions::default())
}

pub fn parse_with(input: &str, options: &ParseOptions) -> String {
    let blocks = render_blocks(classify_lines_with(input, options));
    debug!(bytes = input.len(), blocks = blocks.len(), "rendered markdown");
    write_blocks(&blocks)
}

pub fn classify_lines(input: &str) -> ClassifiedLines<'_> {
    classify_lines_with(input, &ParseOptions::default())
}

pub fn classify_lines_with<'a>(input: &'a str, options: &ParseOptions) -> ClassifiedLines<'a> {
    ClassifiedLines::new(input, *options)
}

pub fn render_from_reader<R: BufRead>(reader: &mut R, options: &ParseOptions) -> io::Result<String> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(parse_with(&input, options))
}

pub fn render_from_path(path: &Path, options: &ParseOptions) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    render_from_reader(&mut reader, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_default_options() {
        let input = "####### deep\n* item";
        assert_eq!(parse(input), parse_with(input, &ParseOptions::default()));
    }

    #[test]
    fn classify_lines_is_lazy_and_ordered() {
        let mut lines = classify_lines("# a\n* b\nc");
        assert_eq!(lines.next().map(|line| line.kind_name()), Some("heading"));
        assert_eq!(lines.next().map(|line| line.kind_name()), Some("list_item"));
        assert_eq!(lines.next().map(|line| line.kind_name()), Some("paragraph"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn renders_from_in_memory_reader() {
        let mut reader = BufReader::new("* a\n* b\n".as_bytes());
        let html = render_from_reader(&mut reader, &ParseOptions::default()).unwrap();
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn core_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParseOptions>();
        assert_send_sync::<Block>();
        assert_send_sync::<ClassifiedLine<'static>>();
        assert_send_sync::<BlockState>();
    }
}
