//! Attribute migration between a matched wrapper and its child.
//!
//! Pure computation: never touches the tree. The wrapper's `label` attribute
//! is dropped from the wrapper and, when the wrapper also carries a `name`
//! attribute, relocated verbatim to the end of the child's attribute list.

use crate::jsx::Attr;
use tracing::warn;

const LABEL_ATTR: &str = "label";
const NAME_ATTR: &str = "name";

/// The computed attribute sets for one wrapper/child rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub wrapper_attrs: Vec<Attr>,
    pub child_attrs: Vec<Attr>,
    /// Non-fatal ambiguities encountered (first-wins / duplicate policies).
    pub warnings: Vec<String>,
}

/// Compute the post-rewrite attribute sets for wrapper and child.
///
/// Semantics:
/// - every wrapper attribute other than `label` keeps its position and text;
/// - the first wrapper `label` is the relocation source, further `label`s
///   are dropped (first wins);
/// - relocation only happens when the wrapper also has a `name` attribute,
///   and appends the label at the END of the child's attributes;
/// - a `label` already present on the child is not deduplicated.
pub fn compute_migration(wrapper_attrs: &[Attr], child_attrs: &[Attr]) -> Migration {
    let mut warnings = Vec::new();

    let mut relocated_label: Option<Attr> = None;
    let mut rest: Vec<Attr> = Vec::with_capacity(wrapper_attrs.len());
    let mut dropped_labels = 0usize;

    for attr in wrapper_attrs {
        if attr.is_named(LABEL_ATTR) {
            if relocated_label.is_none() {
                relocated_label = Some(attr.clone());
            } else {
                dropped_labels += 1;
            }
        } else {
            rest.push(attr.clone());
        }
    }

    if dropped_labels > 0 {
        let msg = format!(
            "wrapper has {} extra 'label' attribute(s); first wins, rest dropped",
            dropped_labels
        );
        warn!("{msg}");
        warnings.push(msg);
    }

    let has_name = rest.iter().any(|a| a.is_named(NAME_ATTR));

    let mut child_out = child_attrs.to_vec();
    if has_name {
        if let Some(label) = relocated_label {
            if child_attrs.iter().any(|a| a.is_named(LABEL_ATTR)) {
                let msg =
                    "child already has a 'label' attribute; relocated label appended anyway"
                        .to_string();
                warn!("{msg}");
                warnings.push(msg);
            }
            child_out.push(label);
        }
    }

    Migration {
        wrapper_attrs: rest,
        child_attrs: child_out,
        warnings,
    }
}
