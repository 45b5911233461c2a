//! Property-based checks for line classification, list grouping and inline spans.

use markdown_html::parse;
use proptest::prelude::*;

fn plain_text_strategy() -> impl Strategy<Value = String> {
    "[^#*_\n]{1,40}"
}

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,12}"
}

proptest! {
    #[test]
    fn plain_line_becomes_paragraph(text in plain_text_strategy()) {
        prop_assert_eq!(parse(&text), format!("<p>{text}</p>"));
    }

    #[test]
    fn heading_levels_round_trip(level in 1usize..=6, text in "[a-zA-Z0-9 ]{0,20}") {
        let input = format!("{} {}", "#".repeat(level), text);
        prop_assert_eq!(parse(&input), format!("<h{level}>{text}</h{level}>"));
    }

    #[test]
    fn consecutive_items_share_one_list(items in prop::collection::vec(word_strategy(), 1..12)) {
        let input = items
            .iter()
            .map(|item| format!("* {item}"))
            .collect::<Vec<_>>()
            .join("\n");
        let html = parse(&input);

        prop_assert_eq!(html.matches("<ul>").count(), 1);
        prop_assert_eq!(html.matches("<li>").count(), items.len());
        prop_assert!(html.starts_with("<ul>"));
        prop_assert!(html.ends_with("</ul>"));
    }

    #[test]
    fn separated_items_form_two_lists(
        first in word_strategy(),
        between in word_strategy(),
        second in word_strategy(),
    ) {
        let html = parse(&format!("* {first}\n{between}\n* {second}"));
        prop_assert_eq!(
            html,
            format!("<ul><li>{first}</li></ul><p>{between}</p><ul><li>{second}</li></ul>")
        );
    }

    #[test]
    fn spans_wrap_their_interior(bold in word_strategy(), italic in word_strategy()) {
        prop_assert_eq!(
            parse(&format!("__{bold}__ _{italic}_")),
            format!("<p><strong>{bold}</strong> <em>{italic}</em></p>")
        );
        prop_assert_eq!(
            parse(&format!("_{italic}_ __{bold}__")),
            format!("<p><em>{italic}</em> <strong>{bold}</strong></p>")
        );
    }

    #[test]
    fn mid_line_symbols_stay_inert(prefix in "[a-zA-Z0-9]{1,10}", suffix in word_strategy()) {
        let input = format!("{prefix} # and * {suffix}");
        prop_assert_eq!(parse(&input), format!("<p>{input}</p>"));
    }

    #[test]
    fn any_input_renders_balanced_tags(input in "[a-z #*_\\r\\n]{0,200}") {
        let html = parse(&input);
        prop_assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
        prop_assert_eq!(html.matches("<strong>").count(), html.matches("</strong>").count());
        prop_assert_eq!(html.matches("<em>").count(), html.matches("</em>").count());
    }
}
