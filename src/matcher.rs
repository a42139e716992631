//! Structural discovery of wrapper candidates in a parsed tree.

use crate::jsx;
use crate::rules::{RewriteRule, RuleTable};
use crate::tsx::ParsedSource;
use tracing::debug;
use tree_sitter::Node;

/// A wrapper element matched against the rule table: the wrapper node, the
/// first element child whose identity resolved, and the rule it resolved to.
#[derive(Debug, Clone, Copy)]
pub struct WrapperCandidate<'t, 'r> {
    pub wrapper: Node<'t>,
    pub child: Node<'t>,
    pub rule: &'r RewriteRule,
}

/// Find all wrapper candidates in document (pre-order) order.
///
/// A candidate is a paired JSX element whose tag equals the table's wrapper
/// sentinel and which has at least one element child resolving via the rule
/// table. Only the first resolving child is the pattern child; a wrapper with
/// no resolving children is a non-match and stays untouched. Traversal does
/// not stop at a match, so nested wrappers are all found.
pub fn find_wrapper_candidates<'t, 'r>(
    parsed: &'t ParsedSource<'t>,
    rules: &'r RuleTable,
) -> Vec<WrapperCandidate<'t, 'r>> {
    let mut candidates = Vec::new();
    visit(parsed.root_node(), parsed.source, rules, &mut candidates);
    candidates
}

fn visit<'t, 'r>(
    node: Node<'t>,
    source: &str,
    rules: &'r RuleTable,
    out: &mut Vec<WrapperCandidate<'t, 'r>>,
) {
    if let Some(candidate) = match_wrapper(node, source, rules) {
        out.push(candidate);
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    for child in children {
        visit(child, source, rules, out);
    }
}

fn match_wrapper<'t, 'r>(
    node: Node<'t>,
    source: &str,
    rules: &'r RuleTable,
) -> Option<WrapperCandidate<'t, 'r>> {
    // Self-closing wrappers have no children and can never match.
    if node.kind() != jsx::JSX_ELEMENT {
        return None;
    }

    let name = jsx::element_name(node, source)?;
    if !rules.is_wrapper(&name) {
        return None;
    }

    for child in jsx::element_children(node) {
        let Some(child_name) = jsx::element_name(child, source) else {
            continue;
        };
        if let Some(rule) = rules.lookup(&child_name) {
            return Some(WrapperCandidate {
                wrapper: node,
                child,
                rule,
            });
        }
        debug!(child = %child_name, "wrapper child has no rule, skipping");
    }

    debug!("wrapper has no resolving child; passing through");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsx::TsxParser;

    fn candidates_in(source: &str) -> usize {
        let rules = RuleTable::default();
        let mut parser = TsxParser::new().unwrap();
        let parsed = parser.parse_with_source(source).unwrap();
        find_wrapper_candidates(&parsed, &rules).len()
    }

    #[test]
    fn matches_wrapper_with_recognized_child() {
        let source = r#"<FormItemExt name="age" label="Age"><Input placeholder="x"/></FormItemExt>"#;
        assert_eq!(candidates_in(source), 1);
    }

    #[test]
    fn unrecognized_child_is_non_match() {
        let source = r#"<FormItemExt name="a"><Unknown/></FormItemExt>"#;
        assert_eq!(candidates_in(source), 0);
    }

    #[test]
    fn childless_wrapper_is_non_match() {
        assert_eq!(candidates_in(r#"<FormItemExt name="a"></FormItemExt>"#), 0);
        assert_eq!(candidates_in(r#"<FormItemExt name="a"/>"#), 0);
    }

    #[test]
    fn non_wrapper_elements_are_ignored() {
        let source = r#"<Other name="a"><Input/></Other>"#;
        assert_eq!(candidates_in(source), 0);
    }

    #[test]
    fn first_resolving_child_wins() {
        let source = r#"<FormItemExt name="a"><Unknown/><Select/><Input/></FormItemExt>"#;
        let rules = RuleTable::default();
        let mut parser = TsxParser::new().unwrap();
        let parsed = parser.parse_with_source(source).unwrap();
        let found = find_wrapper_candidates(&parsed, &rules);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule.replacement_name, "SelectOutLineExt");
    }

    #[test]
    fn finds_candidates_in_document_order() {
        let source = r#"
const view = (
  <div>
    <FormItemExt name="a"><Input/></FormItemExt>
    <FormItemExt name="b"><Select/></FormItemExt>
  </div>
);
"#;
        let rules = RuleTable::default();
        let mut parser = TsxParser::new().unwrap();
        let parsed = parser.parse_with_source(source).unwrap();
        let found = find_wrapper_candidates(&parsed, &rules);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].rule.replacement_name, "InputOutLineExt");
        assert_eq!(found[1].rule.replacement_name, "SelectOutLineExt");
    }

    #[test]
    fn nested_wrappers_all_found() {
        let source = r#"<FormItemExt name="outer"><FormItemExt name="inner"><Input/></FormItemExt></FormItemExt>"#;
        let rules = RuleTable::default();
        let mut parser = TsxParser::new().unwrap();
        let parsed = parser.parse_with_source(source).unwrap();
        let found = find_wrapper_candidates(&parsed, &rules);

        // The outer wrapper's only element child is FormItemExt (no rule),
        // so only the inner wrapper matches.
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule.replacement_name, "InputOutLineExt");
    }

    #[test]
    fn qualified_child_identity_resolves() {
        let toml = r#"
[[rules]]
match = "DatePickerExt.RangePicker"
replacement = "RangePickerOutLineExt"
from = "lib-ext"
"#;
        let rules = RuleTable::from_toml_str(toml).unwrap();
        let source = r#"<FormItemExt name="range"><DatePickerExt.RangePicker/></FormItemExt>"#;
        let mut parser = TsxParser::new().unwrap();
        let parsed = parser.parse_with_source(source).unwrap();
        let found = find_wrapper_candidates(&parsed, &rules);

        assert_eq!(found.len(), 1);
    }
}
