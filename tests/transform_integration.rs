//! End-to-end transform tests covering the wrapper rewrite, attribute
//! migration, and import reconciliation working together.

use formlift::{transform, transform_with_report, RuleTable, TransformError};

#[test]
fn rewrites_wrapper_and_reconciles_import() {
    let source = r#"<FormItemExt name="age" label="Age"><Input placeholder="x"/></FormItemExt>"#;
    let output = transform(source, &RuleTable::default()).unwrap();

    assert_eq!(
        output,
        "import { InputOutLineExt } from 'lib-ext';\n\
         <Form.Item name=\"age\"><InputOutLineExt placeholder=\"x\" label=\"Age\"/></Form.Item>"
    );
}

#[test]
fn transform_is_idempotent() {
    let source = r#"<FormItemExt name="age" label="Age"><Input placeholder="x"/></FormItemExt>"#;
    let rules = RuleTable::default();

    let first = transform(source, &rules).unwrap();
    let second = transform(&first, &rules).unwrap();

    assert_eq!(first, second);
}

#[test]
fn unrecognized_child_passes_through_byte_for_byte() {
    let source = "<FormItemExt   name=\"a\"\n  label=\"L\"><Unknown foo={bar}/></FormItemExt>";
    let report = transform_with_report(source, &RuleTable::default()).unwrap();

    assert_eq!(report.output, source);
    assert_eq!(report.rewrites, 0);
    assert_eq!(report.import_edits, 0);
}

#[test]
fn existing_declaration_is_not_duplicated() {
    let source = "import { InputOutLineExt } from 'lib-ext';\n\
                  <FormItemExt name=\"age\"><Input/></FormItemExt>;\n";
    let output = transform(source, &RuleTable::default()).unwrap();

    assert_eq!(
        output,
        "import { InputOutLineExt } from 'lib-ext';\n\
         <Form.Item name=\"age\"><InputOutLineExt/></Form.Item>;\n"
    );
}

#[test]
fn label_without_name_is_dropped_not_relocated() {
    let source = r#"<FormItemExt label="Age"><Input placeholder="x"/></FormItemExt>"#;
    let output = transform(source, &RuleTable::default()).unwrap();

    assert_eq!(
        output,
        "import { InputOutLineExt } from 'lib-ext';\n\
         <Form.Item><InputOutLineExt placeholder=\"x\"/></Form.Item>"
    );
}

#[test]
fn full_component_file() {
    let source = r#"import React from 'react';
import { Form } from 'antd';

export function Profile() {
  return (
    <Form>
      <FormItemExt name="age" label="Age" style={{ width: 200 }}>
        <Input placeholder="x"/>
      </FormItemExt>
      <FormItemExt name="role">
        <Select mode="multiple"/>
      </FormItemExt>
    </Form>
  );
}
"#;
    let report = transform_with_report(source, &RuleTable::default()).unwrap();

    assert_eq!(report.rewrites, 2);
    assert_eq!(
        report.output,
        r#"import { InputOutLineExt, SelectOutLineExt } from 'lib-ext';
import React from 'react';
import { Form } from 'antd';

export function Profile() {
  return (
    <Form>
      <Form.Item name="age" style={{ width: 200 }}>
        <InputOutLineExt placeholder="x" label="Age"/>
      </Form.Item>
      <Form.Item name="role">
        <SelectOutLineExt mode="multiple"/>
      </Form.Item>
    </Form>
  );
}
"#
    );

    // Second pass leaves the file alone.
    let second = transform(&report.output, &RuleTable::default()).unwrap();
    assert_eq!(second, report.output);
}

#[test]
fn wrapper_attributes_preserve_order_except_label() {
    let source = r#"<FormItemExt rules={req} name="a" label="L" style={{ width: 1 }} extra="e"><Input/></FormItemExt>"#;
    let output = transform(source, &RuleTable::default()).unwrap();

    assert!(output.contains(
        r#"<Form.Item rules={req} name="a" style={{ width: 1 }} extra="e">"#
    ));
}

#[test]
fn paired_child_closing_tag_renamed_to_match() {
    let source = r#"<FormItemExt name="a"><Select>opts</Select></FormItemExt>"#;
    let output = transform(source, &RuleTable::default()).unwrap();

    assert!(output.contains("<SelectOutLineExt>opts</SelectOutLineExt>"));
    assert!(!output.contains("</Select>"));
}

#[test]
fn duplicate_labels_are_reported_not_fatal() {
    let source = r#"<FormItemExt name="a" label="First" label="Second"><Input/></FormItemExt>"#;
    let report = transform_with_report(source, &RuleTable::default()).unwrap();

    assert!(report.output.contains(r#"label="First""#));
    assert!(!report.output.contains(r#"label="Second""#));
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn child_with_existing_label_gets_duplicate() {
    let source = r#"<FormItemExt name="a" label="W"><Input label="C"/></FormItemExt>"#;
    let report = transform_with_report(source, &RuleTable::default()).unwrap();

    assert!(report
        .output
        .contains(r#"<InputOutLineExt label="C" label="W"/>"#));
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn malformed_input_fails_without_partial_output() {
    let source = "<FormItemExt name=\"a\"><Input/>";
    let result = transform(source, &RuleTable::default());
    assert!(matches!(result, Err(TransformError::Parse(_))));
}

#[test]
fn custom_rule_table_with_qualified_identity() {
    let toml = r#"
[[rules]]
match = "DatePickerExt.RangePicker"
replacement = "RangePickerOutLineExt"
from = "@scope/pickers"
"#;
    let rules = RuleTable::from_toml_str(toml).unwrap();
    let source = r#"<FormItemExt name="range" label="Range"><DatePickerExt.RangePicker showTime/></FormItemExt>"#;
    let output = transform(source, &rules).unwrap();

    assert_eq!(
        output,
        "import { RangePickerOutLineExt } from '@scope/pickers';\n\
         <Form.Item name=\"range\"><RangePickerOutLineExt showTime label=\"Range\"/></Form.Item>"
    );
}

#[test]
fn only_first_resolving_child_is_rewritten() {
    let source = r#"<FormItemExt name="a"><Input/><Select/></FormItemExt>"#;
    let output = transform(source, &RuleTable::default()).unwrap();

    assert!(output.contains("<InputOutLineExt/>"));
    // The second recognized child passes through untouched.
    assert!(output.contains("<Select/>"));
    assert!(!output.contains("SelectOutLineExt"));
}

#[test]
fn shorter_table_means_fewer_matches_same_algorithm() {
    let toml = r#"
[[rules]]
match = "Input"
replacement = "InputOutLineExt"
from = "lib-ext"
"#;
    let rules = RuleTable::from_toml_str(toml).unwrap();
    let source = concat!(
        "<div>",
        "<FormItemExt name=\"a\"><Input/></FormItemExt>",
        "<FormItemExt name=\"b\"><Select/></FormItemExt>",
        "</div>"
    );
    let report = transform_with_report(source, &rules).unwrap();

    assert_eq!(report.rewrites, 1);
    assert!(report.output.contains("<FormItemExt name=\"b\"><Select/></FormItemExt>"));
}
