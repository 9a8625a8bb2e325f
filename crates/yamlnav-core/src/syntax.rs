//! Mapping a click offset onto the YAML structure around it.
//!
//! The default [`TreeSitterLocator`] works on a concrete syntax tree, so it
//! copes with documents a YAML loader would reject: aliases whose anchors
//! live in another file, or text that is half-typed.

use std::ops::Range as ByteRange;

use tree_sitter::{Node, Parser};

/// The key/value pair enclosing an offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueAt {
    /// Key text with surrounding quotes removed.
    pub key: String,
    /// Raw value text, `None` when the pair has no value.
    pub value: Option<String>,
    /// Byte span of the whole pair.
    pub span: ByteRange<usize>,
    /// Raw text of the innermost scalar or alias containing the offset.
    pub token: Option<String>,
}

/// Finds the key/value pair enclosing a byte offset.
pub trait SyntaxLocator {
    /// The nearest pair whose span contains `offset`, if any.
    fn key_value_at(&self, text: &str, offset: usize) -> Option<KeyValueAt>;
}

impl<T: SyntaxLocator + ?Sized> SyntaxLocator for &T {
    fn key_value_at(&self, text: &str, offset: usize) -> Option<KeyValueAt> {
        (**self).key_value_at(text, offset)
    }
}

const PAIR_KINDS: &[&str] = &["block_mapping_pair", "flow_pair"];

const TOKEN_KINDS: &[&str] = &[
    "alias",
    "string_scalar",
    "integer_scalar",
    "float_scalar",
    "boolean_scalar",
    "null_scalar",
    "plain_scalar",
    "double_quote_scalar",
    "single_quote_scalar",
    "block_scalar",
];

/// [`SyntaxLocator`] backed by the tree-sitter YAML grammar.
///
/// A fresh tree is parsed for every query.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterLocator;

impl TreeSitterLocator {
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxLocator for TreeSitterLocator {
    fn key_value_at(&self, text: &str, offset: usize) -> Option<KeyValueAt> {
        let mut parser = Parser::new();
        if let Err(error) = parser.set_language(&tree_sitter_yaml::LANGUAGE.into()) {
            tracing::warn!(%error, "Could not load the YAML grammar");
            return None;
        }
        let tree = parser.parse(text, None)?;

        let leaf = innermost_node(tree.root_node(), offset);
        let pair = ancestors(leaf).find(|node| PAIR_KINDS.contains(&node.kind()))?;

        let key = pair
            .child_by_field_name("key")
            .and_then(|node| node_text(text, node))
            .map(unquote)
            .unwrap_or_default()
            .to_string();
        let value = pair
            .child_by_field_name("value")
            .and_then(|node| node_text(text, node))
            .map(str::to_string);
        let token = ancestors(leaf)
            .take_while(|node| node.id() != pair.id())
            .find(|node| TOKEN_KINDS.contains(&node.kind()))
            .and_then(|node| node_text(text, node))
            .map(str::to_string);

        Some(KeyValueAt {
            key,
            value,
            span: pair.byte_range(),
            token,
        })
    }
}

/// Deepest node with `start <= offset < end`.
fn innermost_node(root: Node<'_>, offset: usize) -> Node<'_> {
    let mut node = root;
    loop {
        let next = {
            let mut cursor = node.walk();
            node.children(&mut cursor)
                .find(|child| child.start_byte() <= offset && offset < child.end_byte())
        };
        match next {
            Some(child) => node = child,
            None => return node,
        }
    }
}

/// `node` followed by each of its parents.
fn ancestors(node: Node<'_>) -> impl Iterator<Item = Node<'_>> {
    std::iter::successors(Some(node), Node::parent)
}

fn node_text<'t>(text: &'t str, node: Node<'_>) -> Option<&'t str> {
    text.get(node.byte_range())
}

fn unquote(key: &str) -> &str {
    let key = key.trim();
    for quote in ['"', '\''] {
        if key.len() >= 2 && key.starts_with(quote) && key.ends_with(quote) {
            return &key[1..key.len() - 1];
        }
    }
    key
}
