use crate::heading::HeadingLevel;

/// Top-level HTML unit whose text has already been through inline rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: HeadingLevel, html: String },
    ListGroup { items: Vec<String> },
    Paragraph { html: String },
}

impl Block {
    pub fn write_html(&self, out: &mut String) {
        match self {
            Block::Heading { level, html } => {
                let digit = char::from(b'0' + level.get());
                out.push_str("<h");
                out.push(digit);
                out.push('>');
                out.push_str(html);
                out.push_str("</h");
                out.push(digit);
                out.push('>');
            }
            Block::ListGroup { items } => {
                out.push_str("<ul>");
                for item in items {
                    out.push_str("<li>");
                    out.push_str(item);
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
            }
            Block::Paragraph { html } => {
                out.push_str("<p>");
                out.push_str(html);
                out.push_str("</p>");
            }
        }
    }
}

/// Concatenates the markup of every block with no separators.
pub fn write_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        block.write_html(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(block: Block) -> String {
        let mut out = String::new();
        block.write_html(&mut out);
        out
    }

    #[test]
    fn writes_heading_with_level_tag() {
        let level = HeadingLevel::new(4).unwrap();
        let block = Block::Heading {
            level,
            html: "Title".into(),
        };
        assert_eq!(html(block), "<h4>Title</h4>");
    }

    #[test]
    fn writes_list_group_items_in_order() {
        let block = Block::ListGroup {
            items: vec!["one".into(), "two".into()],
        };
        assert_eq!(html(block), "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn joins_blocks_without_separators() {
        let blocks = vec![
            Block::Paragraph { html: "a".into() },
            Block::Paragraph { html: "b".into() },
        ];
        assert_eq!(write_blocks(&blocks), "<p>a</p><p>b</p>");
        assert_eq!(write_blocks(&[]), "");
    }
}
