//! Bold (`__text__`) and italic (`_text_`) spans.
//!
//! Bold pairs are found first. Italic pairs are then matched separately in
//! every stretch of plain text and inside every bold interior, so an italic
//! pair never straddles a bold marker. In both passes the leftmost marker
//! opens a span and the nearest marker that leaves a non-empty interior
//! closes it; a marker with no partner stays literal, and the underscores of
//! an unmatched `__` are never reused as italic markers.

const BOLD_MARKER: &str = "__";
const ITALIC_MARKER: &str = "_";

pub fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;

    while let Some((before, inner, after)) = next_pair(rest, BOLD_MARKER) {
        render_italic(before, &mut out);
        out.push_str("<strong>");
        render_italic(inner, &mut out);
        out.push_str("</strong>");
        rest = after;
    }

    // no bold pair is left; every remaining `__` is literal
    while let Some(open) = rest.find(BOLD_MARKER) {
        render_italic(&rest[..open], &mut out);
        out.push_str(BOLD_MARKER);
        rest = &rest[open + BOLD_MARKER.len()..];
    }

    render_italic(rest, &mut out);
    out
}

fn render_italic(text: &str, out: &mut String) {
    let mut rest = text;

    while let Some((before, inner, after)) = next_pair(rest, ITALIC_MARKER) {
        out.push_str(before);
        out.push_str("<em>");
        out.push_str(inner);
        out.push_str("</em>");
        rest = after;
    }

    out.push_str(rest);
}

/// Splits `text` around the leftmost complete `marker` pair into
/// `(before, interior, after)`.
fn next_pair<'a>(text: &'a str, marker: &str) -> Option<(&'a str, &'a str, &'a str)> {
    let open = text.find(marker)?;
    let body_start = open + marker.len();

    // interior must hold at least one character
    let first = text[body_start..].chars().next()?;
    let search_from = body_start + first.len_utf8();
    let close = search_from + text[search_from..].find(marker)?;

    Some((
        &text[..open],
        &text[body_start..close],
        &text[close + marker.len()..],
    ))
}
