use crate::block::Block;
use crate::inline::render_inline;
use crate::line::ClassifiedLine;
use tracing::trace;

/// Accumulator for folding classified lines into blocks. The only state that
/// survives between lines is the list group currently being filled.
#[derive(Debug, Default)]
pub struct BlockState {
    blocks: Vec<Block>,
    open_list: Option<Vec<String>>,
}

impl BlockState {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            open_list: None,
        }
    }

    #[cfg(test)]
    fn is_within_list(&self) -> bool {
        self.open_list.is_some()
    }

    pub fn push(mut self, line: ClassifiedLine<'_>) -> Self {
        match line {
            ClassifiedLine::Heading { level, text } => {
                self.close_list();
                self.blocks.push(Block::Heading {
                    level,
                    html: render_inline(text),
                });
            }
            ClassifiedLine::ListItem { text } => {
                let items = self.open_list.get_or_insert_with(|| {
                    trace!("opening list group");
                    Vec::new()
                });
                items.push(render_inline(text));
            }
            ClassifiedLine::Paragraph { text } => {
                self.close_list();
                self.blocks.push(Block::Paragraph {
                    html: render_inline(text),
                });
            }
        }
        self
    }

    pub fn finish(mut self) -> Vec<Block> {
        self.close_list();
        self.blocks
    }

    fn close_list(&mut self) {
        if let Some(items) = self.open_list.take() {
            trace!(items = items.len(), "closing list group");
            self.blocks.push(Block::ListGroup { items });
        }
    }
}

pub fn render_blocks<'a, I>(lines: I) -> Vec<Block>
where
    I: IntoIterator<Item = ClassifiedLine<'a>>,
{
    lines
        .into_iter()
        .fold(BlockState::new(), BlockState::push)
        .finish()
}
