//! YAML reader that keeps every scalar exactly as written.
//!
//! The tree is assembled from the parser's event stream, so no YAML type
//! resolution happens: `True`, `100.0` or `1e2` reach the schema as text and
//! are judged by the field they land in.

use crate::document::Node;
use crate::error::ConfigError;
use std::collections::HashMap;
use yaml_rust2::parser::{Event, EventReceiver, Parser};
use yaml_rust2::scanner::TScalarStyle;

/// Parse the first YAML document of `source` into a tree.
pub(crate) fn parse_yaml(source: &str) -> Result<Node, ConfigError> {
    let mut builder = TreeBuilder::default();
    Parser::new(source.chars()).load(&mut builder, false)?;
    builder.finish()
}

enum Frame {
    Sequence {
        anchor: usize,
        items: Vec<Node>,
    },
    Mapping {
        anchor: usize,
        children: Vec<(String, Node)>,
        key: Option<String>,
    },
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    root: Option<Node>,
    error: Option<String>,
}

impl TreeBuilder {
    fn finish(self) -> Result<Node, ConfigError> {
        if let Some(message) = self.error {
            return Err(ConfigError::InvalidDocument(message));
        }
        self.root
            .ok_or_else(|| ConfigError::InvalidArgument("document has no content".to_string()))
    }

    fn fail(&mut self, message: String) {
        self.error.get_or_insert(message);
    }

    /// Attach a completed node to the enclosing collection, or make it the root.
    fn push(&mut self, anchor: usize, node: Node) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
        let Some(frame) = self.stack.last_mut() else {
            self.root.get_or_insert(node);
            return;
        };
        let error = match frame {
            Frame::Sequence { items, .. } => {
                items.push(node);
                None
            }
            Frame::Mapping { children, key, .. } => match key.take() {
                Some(name) => {
                    children.push((name, node));
                    None
                }
                None => match node {
                    Node::Scalar(name) if children.iter().any(|(existing, _)| *existing == name) => {
                        Some(format!("duplicate key `{name}`"))
                    }
                    Node::Scalar(name) => {
                        *key = Some(name);
                        None
                    }
                    Node::Mapping(_) | Node::Sequence(_) => {
                        Some("mapping keys must be scalars".to_string())
                    }
                },
            },
        };
        if let Some(message) = error {
            self.fail(message);
        }
    }
}

impl EventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event) {
        if self.error.is_some() {
            return;
        }
        match event {
            Event::Scalar(text, style, anchor, ..) => {
                // `key:` with no value arrives as a plain `~`.
                let text = if matches!(style, TScalarStyle::Plain) && text == "~" {
                    String::new()
                } else {
                    text
                };
                self.push(anchor, Node::Scalar(text));
            }
            Event::SequenceStart(anchor, ..) => self.stack.push(Frame::Sequence {
                anchor,
                items: Vec::new(),
            }),
            Event::MappingStart(anchor, ..) => self.stack.push(Frame::Mapping {
                anchor,
                children: Vec::new(),
                key: None,
            }),
            Event::SequenceEnd | Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Sequence { anchor, items }) => {
                    self.push(anchor, Node::Sequence(items));
                }
                Some(Frame::Mapping {
                    anchor, children, ..
                }) => self.push(anchor, Node::Mapping(children)),
                None => self.fail("unbalanced collection end".to_string()),
            },
            Event::Alias(anchor) => match self.anchors.get(&anchor).cloned() {
                Some(node) => self.push(0, node),
                None => self.fail(format!("unknown alias {anchor}")),
            },
            _ => {}
        }
    }
}
