//! Formlift: rule-driven TSX codemod for form-item wrapper components
//!
//! Rewrites `FormItemExt` wrappers that contain one recognized input-control
//! child into the normalized `Form.Item` pattern: the child is renamed per a
//! rule table, the wrapper's `label` attribute migrates onto the child, and
//! imports are reconciled so every renamed component resolves.
//!
//! # Architecture
//!
//! Matching is structural over a tree-sitter TSX parse, never textual. All
//! rewrite operations compile down to a single primitive: [`Edit`], a
//! verified byte-span replacement applied in one atomic batch. Intelligence
//! lives in span acquisition (matcher, migrator, reconciler), not in the
//! application logic.
//!
//! # Example
//!
//! ```
//! use formlift::{transform, RuleTable};
//!
//! let source = r#"<FormItemExt name="age" label="Age"><Input placeholder="x"/></FormItemExt>"#;
//! let output = transform(source, &RuleTable::default()).unwrap();
//!
//! assert!(output.contains(r#"<Form.Item name="age">"#));
//! assert!(output.contains(r#"<InputOutLineExt placeholder="x" label="Age"/>"#));
//! assert!(output.starts_with("import { InputOutLineExt } from 'lib-ext';"));
//! ```

pub mod edit;
pub mod imports;
pub mod jsx;
pub mod matcher;
pub mod migrate;
pub mod rewrite;
pub mod rules;
pub mod transform;
pub mod tsx;

// Re-exports
pub use edit::{apply_all, Edit, EditError, EditVerification};
pub use imports::{reconcile, FiredRule};
pub use jsx::Attr;
pub use matcher::{find_wrapper_candidates, WrapperCandidate};
pub use migrate::{compute_migration, Migration};
pub use rules::{ComponentIdentity, RewriteRule, RuleError, RuleTable};
pub use transform::{transform, transform_with_report, TransformError, TransformReport};
pub use tsx::{ParsedSource, TsxError, TsxParser};
