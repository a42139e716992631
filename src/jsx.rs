//! Structural view over JSX nodes in a parsed TSX tree.
//!
//! Read-only helpers for the kinds the rewriter cares about: element names
//! (simple or qualified), opening/closing tags, and attribute lists. All
//! text is extracted verbatim from the source span so untouched syntax
//! survives a rewrite byte-for-byte.

use tree_sitter::Node;

pub const JSX_ELEMENT: &str = "jsx_element";
pub const JSX_SELF_CLOSING_ELEMENT: &str = "jsx_self_closing_element";
const JSX_OPENING_ELEMENT: &str = "jsx_opening_element";
const JSX_CLOSING_ELEMENT: &str = "jsx_closing_element";

/// A single attribute as it appears in source.
///
/// `name` is `None` for spread attributes (`{...rest}`), which have no name
/// but must be preserved verbatim. `text` is the full source text of the
/// attribute, value included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: Option<String>,
    pub text: String,
}

impl Attr {
    pub fn named(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            text: text.into(),
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// Whether a node is a JSX element (paired or self-closing).
pub fn is_element(node: Node<'_>) -> bool {
    matches!(node.kind(), JSX_ELEMENT | JSX_SELF_CLOSING_ELEMENT)
}

/// The tag node holding name + attributes: the opening element for a paired
/// element, or the element itself when self-closing.
pub fn tag_node<'t>(node: Node<'t>) -> Option<Node<'t>> {
    match node.kind() {
        JSX_ELEMENT => node.child_by_field_name("open_tag"),
        JSX_SELF_CLOSING_ELEMENT => Some(node),
        _ => None,
    }
}

/// The closing tag node, if the element has one.
pub fn closing_tag<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.kind() == JSX_ELEMENT {
        node.child_by_field_name("close_tag")
    } else {
        None
    }
}

/// Element name text with whitespace stripped, so qualified names that span
/// lines still compare structurally (`DatePickerExt.RangePicker`).
pub fn element_name(node: Node<'_>, source: &str) -> Option<String> {
    let tag = tag_node(node)?;
    let name = tag.child_by_field_name("name")?;
    let text = &source[name.byte_range()];
    Some(text.chars().filter(|c| !c.is_whitespace()).collect())
}

/// Attributes of an element in document order, spreads included.
pub fn attributes(node: Node<'_>, source: &str) -> Vec<Attr> {
    let Some(tag) = tag_node(node) else {
        return Vec::new();
    };

    let mut cursor = tag.walk();
    tag.children_by_field_name("attribute", &mut cursor)
        .map(|attr| {
            let text = source[attr.byte_range()].to_string();
            let name = if attr.kind() == "jsx_attribute" {
                attr.named_child(0)
                    .map(|n| source[n.byte_range()].to_string())
            } else {
                // jsx_expression spread attribute
                None
            };
            Attr { name, text }
        })
        .collect()
}

/// Direct element children of a paired JSX element, in document order.
///
/// Text, expressions, and the open/close tags themselves are skipped; they
/// are irrelevant to matching and preserved verbatim in output.
pub fn element_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    if node.kind() != JSX_ELEMENT {
        return Vec::new();
    }

    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !matches!(child.kind(), JSX_OPENING_ELEMENT | JSX_CLOSING_ELEMENT))
        .filter(|child| is_element(*child))
        .collect()
}

/// Render an opening tag (or whole self-closing element) from a name and an
/// attribute list. The single deterministic output shape the rewriter uses.
pub fn render_tag(name: &str, attrs: &[Attr], self_closing: bool) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('<');
    out.push_str(name);
    for attr in attrs {
        out.push(' ');
        out.push_str(&attr.text);
    }
    if self_closing {
        out.push('/');
    }
    out.push('>');
    out
}

/// Render a closing tag.
pub fn render_closing_tag(name: &str) -> String {
    format!("</{name}>")
}
