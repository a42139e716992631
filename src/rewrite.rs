//! Turns a matched candidate into byte-span edits.
//!
//! The rewrite never mutates a tree: every rename and attribute swap is a
//! span replacement over the original source, applied later in one atomic
//! batch. Intelligence lives in span acquisition, not application.

use crate::edit::Edit;
use crate::jsx;
use crate::matcher::WrapperCandidate;
use crate::migrate::Migration;
use crate::rules::RuleTable;
use crate::tsx::ParsedSource;
use tree_sitter::Node;

/// Build the edits for one candidate, in this order:
/// child rename (open + close), child attribute swap, wrapper rename
/// (open + close), wrapper attribute swap. Tag and attribute replacement
/// collapse into one edit per tag since both live in the same span.
pub fn rewrite_candidate(
    parsed: &ParsedSource<'_>,
    candidate: &WrapperCandidate<'_, '_>,
    migration: &Migration,
    rules: &RuleTable,
) -> Vec<Edit> {
    let mut edits = Vec::with_capacity(4);

    rewrite_element(
        parsed,
        candidate.child,
        &candidate.rule.replacement_name,
        &migration.child_attrs,
        &mut edits,
    );

    rewrite_element(
        parsed,
        candidate.wrapper,
        &rules.wrapper_replacement,
        &migration.wrapper_attrs,
        &mut edits,
    );

    edits
}

/// Replace an element's opening tag (name + attributes) and, when present,
/// rename its closing tag identically so the open/close identities agree.
fn rewrite_element(
    parsed: &ParsedSource<'_>,
    element: Node<'_>,
    new_name: &str,
    new_attrs: &[jsx::Attr],
    edits: &mut Vec<Edit>,
) {
    let self_closing = element.kind() == jsx::JSX_SELF_CLOSING_ELEMENT;

    if let Some(tag) = jsx::tag_node(element) {
        edits.push(Edit::new(
            tag.start_byte(),
            tag.end_byte(),
            jsx::render_tag(new_name, new_attrs, self_closing),
            parsed.node_text(tag),
        ));
    }

    if let Some(close) = jsx::closing_tag(element) {
        edits.push(Edit::new(
            close.start_byte(),
            close.end_byte(),
            jsx::render_closing_tag(new_name),
            parsed.node_text(close),
        ));
    }
}
