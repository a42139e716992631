//! The transform pipeline: parse, match, migrate, rewrite, reconcile, apply.
//!
//! All edits are collected first and applied in one atomic batch, so a
//! failing input never produces partial output.

use crate::edit::{apply_all, EditError};
use crate::imports::{reconcile, FiredRule};
use crate::jsx;
use crate::matcher::find_wrapper_candidates;
use crate::migrate::compute_migration;
use crate::rewrite::rewrite_candidate;
use crate::rules::RuleTable;
use crate::tsx::{TsxError, TsxParser};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("parse error: {0}")]
    Parse(#[from] TsxError),

    #[error("edit application failed: {0}")]
    Edit(#[from] EditError),
}

/// Outcome of one transform run.
#[derive(Debug)]
pub struct TransformReport {
    pub output: String,
    /// Wrapper/child pairs rewritten.
    pub rewrites: usize,
    /// Import statements merged into or synthesized.
    pub import_edits: usize,
    /// Non-fatal ambiguities encountered (duplicate labels etc.).
    pub warnings: Vec<String>,
}

impl TransformReport {
    pub fn changed(&self, original: &str) -> bool {
        self.output != original
    }
}

/// Transform one source unit with the given rule table.
///
/// Returns the rewritten text, or the input unchanged (byte-identical) when
/// nothing matches. Malformed input fails before any rewriting.
pub fn transform(source: &str, rules: &RuleTable) -> Result<String, TransformError> {
    transform_with_report(source, rules).map(|report| report.output)
}

/// Like [`transform`], but also reports what happened.
pub fn transform_with_report(
    source: &str,
    rules: &RuleTable,
) -> Result<TransformReport, TransformError> {
    let mut parser = TsxParser::new()?;
    let parsed = parser.parse_with_source(source)?;
    parsed.check_syntax()?;

    let mut edits = Vec::new();
    let mut fired: Vec<FiredRule> = Vec::new();
    let mut warnings = Vec::new();

    let candidates = find_wrapper_candidates(&parsed, rules);
    let rewrites = candidates.len();

    for candidate in &candidates {
        let wrapper_attrs = jsx::attributes(candidate.wrapper, source);
        let child_attrs = jsx::attributes(candidate.child, source);
        let migration = compute_migration(&wrapper_attrs, &child_attrs);
        warnings.extend(migration.warnings.iter().cloned());

        edits.extend(rewrite_candidate(&parsed, candidate, &migration, rules));

        let fired_rule = FiredRule {
            replacement_name: candidate.rule.replacement_name.clone(),
            declared_local: candidate.rule.declared_local().to_string(),
            declared_from: candidate.rule.declared_from.clone(),
        };
        if !fired.contains(&fired_rule) {
            fired.push(fired_rule);
        }
    }

    let import_edits = reconcile(&parsed, &fired);
    let import_count = import_edits.len();
    edits.extend(import_edits);

    let output = apply_all(source, edits)?;

    Ok(TransformReport {
        output,
        rewrites,
        import_edits: import_count,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_returns_input_byte_identical() {
        let source = "const x = <div>\n  <Unknown/>\n</div>;\n";
        let report = transform_with_report(source, &RuleTable::default()).unwrap();
        assert_eq!(report.output, source);
        assert_eq!(report.rewrites, 0);
        assert_eq!(report.import_edits, 0);
    }

    #[test]
    fn parse_error_fails_before_output() {
        let source = "const v = <FormItemExt name=\"a\"><Input/>;";
        let result = transform(source, &RuleTable::default());
        assert!(matches!(
            result,
            Err(TransformError::Parse(TsxError::SyntaxError { .. }))
        ));
    }

    #[test]
    fn fired_rules_deduplicate_across_candidates() {
        let source = concat!(
            "<div>\n",
            "  <FormItemExt name=\"a\"><Input/></FormItemExt>\n",
            "  <FormItemExt name=\"b\"><Input/></FormItemExt>\n",
            "</div>"
        );
        let report = transform_with_report(source, &RuleTable::default()).unwrap();
        assert_eq!(report.rewrites, 2);
        // Both rewrites need the same import; one synthesized statement.
        assert_eq!(report.import_edits, 1);
        assert_eq!(
            report.output.matches("import { InputOutLineExt }").count(),
            1
        );
    }

    #[test]
    fn empty_rule_table_is_a_no_op() {
        let table = RuleTable {
            rules: Vec::new(),
            ..RuleTable::default()
        };
        let source = "<FormItemExt name=\"a\"><Input/></FormItemExt>";
        assert_eq!(transform(source, &table).unwrap(), source);
    }
}
