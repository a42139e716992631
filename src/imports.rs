//! Import reconciliation: after rewriting, every renamed component must be
//! declared by an import from its rule's module.
//!
//! Existing imports for a module are merged into (names appended to the
//! brace group, never duplicated); modules with no mergeable import get a
//! fresh statement synthesized at the very top of the unit, in the order the
//! modules were first needed.

use crate::edit::Edit;
use crate::tsx::ParsedSource;
use tracing::debug;
use tree_sitter::Node;

/// A rule whose rename actually fired during the rewrite phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredRule {
    /// Replacement tag name as written into the tree.
    pub replacement_name: String,
    /// Local name an import must bind (root segment of the replacement).
    pub declared_local: String,
    /// Module the local must come from.
    pub declared_from: String,
}

/// One import statement as scanned from the unit's declaration area.
#[derive(Debug)]
struct ImportStatement<'t> {
    module: String,
    /// Every local name this statement binds (default, namespace, named).
    locals: Vec<String>,
    /// The `{ ... }` group node, if the statement has one.
    named_imports: Option<Node<'t>>,
    /// Verbatim specifier texts inside the brace group, in order.
    specifier_texts: Vec<String>,
    /// Default-import identifier node, if any.
    default_ident: Option<Node<'t>>,
    has_namespace: bool,
}

/// Compute the edits that make every fired rule's local resolve.
pub fn reconcile(parsed: &ParsedSource<'_>, fired: &[FiredRule]) -> Vec<Edit> {
    if fired.is_empty() {
        return Vec::new();
    }

    let statements = scan_imports(parsed);

    // Needed locals grouped per module, preserving first-encounter order of
    // modules and of locals within a module.
    let mut needed: Vec<(String, Vec<String>)> = Vec::new();
    for rule in fired {
        let already_bound = statements
            .iter()
            .filter(|s| s.module == rule.declared_from)
            .any(|s| s.locals.iter().any(|l| l == &rule.declared_local));
        if already_bound {
            debug!(local = %rule.declared_local, module = %rule.declared_from, "already declared");
            continue;
        }

        match needed.iter().position(|(m, _)| m == &rule.declared_from) {
            Some(idx) => {
                let names = &mut needed[idx].1;
                if !names.contains(&rule.declared_local) {
                    names.push(rule.declared_local.clone());
                }
            }
            None => needed.push((rule.declared_from.clone(), vec![rule.declared_local.clone()])),
        }
    }

    let mut edits = Vec::new();
    let mut synthesized = String::new();

    for (module, names) in needed {
        // Merge before synthesize: prefer a statement with a brace group,
        // then a default-only import that can legally grow one. Namespace
        // imports cannot host named specifiers.
        let braced = statements
            .iter()
            .find(|s| s.module == module && s.named_imports.is_some());
        let default_only = statements.iter().find(|s| {
            s.module == module
                && s.named_imports.is_none()
                && !s.has_namespace
                && s.default_ident.is_some()
        });

        if let Some(stmt) = braced {
            let group = stmt.named_imports.expect("braced statement has group");
            let mut specs = stmt.specifier_texts.clone();
            specs.extend(names);
            edits.push(Edit::new(
                group.start_byte(),
                group.end_byte(),
                format!("{{ {} }}", specs.join(", ")),
                parsed.node_text(group),
            ));
        } else if let Some(stmt) = default_only {
            let ident = stmt.default_ident.expect("default import has identifier");
            let ident_text = parsed.node_text(ident);
            edits.push(Edit::new(
                ident.start_byte(),
                ident.end_byte(),
                format!("{ident_text}, {{ {} }}", names.join(", ")),
                ident_text,
            ));
        } else {
            synthesized.push_str(&format!(
                "import {{ {} }} from '{}';\n",
                names.join(", "),
                module
            ));
        }
    }

    if !synthesized.is_empty() {
        edits.push(Edit::insert(0, synthesized));
    }

    edits
}

/// Scan top-level import statements, skipping type-only imports.
fn scan_imports<'t>(parsed: &'t ParsedSource<'t>) -> Vec<ImportStatement<'t>> {
    let root = parsed.root_node();
    let mut cursor = root.walk();
    let mut statements = Vec::new();

    for stmt in root.named_children(&mut cursor) {
        if stmt.kind() != "import_statement" {
            continue;
        }
        // `import type { ... }` binds no runtime names.
        if stmt.child(1).is_some_and(|c| c.kind() == "type") {
            continue;
        }
        let Some(source_node) = stmt.child_by_field_name("source") else {
            continue;
        };
        let module = parsed
            .node_text(source_node)
            .trim_matches(|c| c == '\'' || c == '"')
            .to_string();

        let mut entry = ImportStatement {
            module,
            locals: Vec::new(),
            named_imports: None,
            specifier_texts: Vec::new(),
            default_ident: None,
            has_namespace: false,
        };

        let mut stmt_cursor = stmt.walk();
        let clause = stmt
            .named_children(&mut stmt_cursor)
            .find(|c| c.kind() == "import_clause");

        if let Some(clause) = clause {
            let mut clause_cursor = clause.walk();
            let clause_children: Vec<Node<'t>> =
                clause.named_children(&mut clause_cursor).collect();
            for part in clause_children {
                match part.kind() {
                    "identifier" => {
                        entry.locals.push(parsed.node_text(part).to_string());
                        entry.default_ident = Some(part);
                    }
                    "namespace_import" => {
                        entry.has_namespace = true;
                        let mut ns_cursor = part.walk();
                        let alias = part
                            .named_children(&mut ns_cursor)
                            .find(|c| c.kind() == "identifier");
                        if let Some(alias) = alias {
                            entry.locals.push(parsed.node_text(alias).to_string());
                        }
                    }
                    "named_imports" => {
                        entry.named_imports = Some(part);
                        let mut group_cursor = part.walk();
                        let specifiers: Vec<Node<'t>> = part
                            .named_children(&mut group_cursor)
                            .filter(|c| c.kind() == "import_specifier")
                            .collect();
                        for spec in specifiers {
                            entry.specifier_texts.push(parsed.node_text(spec).to_string());
                            let local = spec
                                .child_by_field_name("alias")
                                .or_else(|| spec.child_by_field_name("name"));
                            if let Some(local) = local {
                                entry.locals.push(parsed.node_text(local).to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        statements.push(entry);
    }

    statements
}
