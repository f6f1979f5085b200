//! End-to-end compilation scenarios.
//!
//! Each test feeds the compiler the kind of bundles the domain agents return
//! and checks the reviewer-facing output.

use apqr_compiler::{
    testing::{dms_bundle, erp_bundle, lims_bundle, sample_responses, SAMPLE_QUERY},
    CompilationResult, CompileRequest, Compiler, CompilerConfig, DetailContent, ResponseBundle,
    ResultRecord,
};
use serde_json::json;

#[test]
fn test_lims_and_erp_status_fields_collide() {
    let request = CompileRequest::from_value(&json!({
        "query": "What are the test results for LOT-12345?",
        "responses": [
            {"agent": "LIMS", "results": [{"lot_number": "LOT-12345", "test": "Assay", "result": "98.5%", "status": "PASS"}]},
            {"agent": "ERP", "results": [{"batch_number": "BATCH-12345", "status": "Released"}]},
        ],
    }))
    .unwrap();

    let result = Compiler::default().compile(&request.query, &request.responses);

    assert_eq!(
        result.citations,
        vec!["LIMS Agent (1 result(s))", "ERP Agent (1 result(s))"]
    );
    // Unrelated records, same field name: still flagged
    assert_eq!(result.metadata.contradictions_found, 1);
    let contradiction = &result.contradictions()[0];
    assert_eq!(contradiction.field, "status");
    assert_eq!(contradiction.agents(), vec!["LIMS", "ERP"]);
    assert!(result
        .summary
        .contains("⚠️ Note: 1 potential contradiction(s) detected."));
}

#[test]
fn test_scoped_detection_ignores_unrelated_records() {
    let compiler = Compiler::new(CompilerConfig::new().with_contradiction_scope("lot_number"));

    let result = compiler.compile(SAMPLE_QUERY, &[lims_bundle(), erp_bundle()]);

    // The ERP batch record carries no lot number, so its status is never
    // compared. The two LIMS tests on the same lot still differ.
    let contradictions = result.contradictions();
    let fields: Vec<_> = contradictions.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["test", "result", "specification"]);
    assert!(contradictions
        .iter()
        .all(|c| c.scope.as_deref() == Some("LOT-12345")));
}

#[test]
fn test_identical_results_from_two_sources_collapse() {
    let fact = ResultRecord::fields([("lot", json!("X")), ("value", json!("10"))]);
    let responses = vec![
        ResponseBundle::new("LIMS", vec![fact.clone()]),
        ResponseBundle::new("ERP", vec![fact.clone()]),
    ];

    let result = Compiler::default().compile("lot X", &responses);

    assert_eq!(result.details.len(), 1);
    assert_eq!(result.details[0].source_agent, "LIMS");
    assert_eq!(result.details[0].content, DetailContent::Result(fact));
    assert_eq!(result.citations, vec!["LIMS Agent (1 result(s))"]);
    assert_eq!(result.metadata.total_results, 2);
    assert_eq!(result.metadata.agents_consulted, 2);
}

#[test]
fn test_no_responses() {
    let result = Compiler::default().compile("anything", &[]);

    assert!(result.summary.starts_with("Based on information from "));
    assert_eq!(result.summary, "Based on information from  systems:");
    assert!(result.citations.is_empty());
    assert!(result.details.is_empty());
    assert_eq!(result.metadata.total_results, 0);
    assert_eq!(result.metadata.contradictions_found, 0);
}

#[test]
fn test_result_without_fields() {
    let responses = vec![ResponseBundle::new(
        "DMS",
        vec![ResultRecord::Fields(Default::default())],
    )];

    let result = Compiler::default().compile("sop", &responses);

    assert!(result.summary.contains("• DMS: No details available"));
    assert_eq!(result.citations, vec!["DMS Agent (1 result(s))"]);
}

#[test]
fn test_summary_truncated_to_budget() {
    let compiler = Compiler::new(CompilerConfig::new().with_max_summary_length(20));

    let result = compiler.compile(SAMPLE_QUERY, &sample_responses());

    assert_eq!(result.summary.chars().count(), 20);
    assert!(result.summary.ends_with("..."));
}

#[test]
fn test_sample_review() {
    let result = Compiler::default().compile(SAMPLE_QUERY, &sample_responses());

    // No record shares a whole word with the query ("LOT-12345?" keeps its
    // question mark), so the input order holds.
    assert_eq!(
        result.citations,
        vec![
            "LIMS Agent (2 result(s))",
            "ERP Agent (1 result(s))",
            "DMS Agent (1 result(s))",
        ]
    );
    assert!(result.summary.starts_with(
        "Based on information from LIMS, ERP, DMS systems:\n• LIMS: PASS\n• ERP: Released\n• DMS: Quality Control Testing Procedure"
    ));

    // four fields differ between the records
    let fields: Vec<_> = result
        .contradictions()
        .iter()
        .map(|c| c.field.as_str())
        .collect();
    assert_eq!(fields, vec!["test", "result", "specification", "status"]);
    assert_eq!(result.details.len(), 5);
    assert_eq!(result.result_details().count(), 4);
    assert_eq!(result.details[4].source_agent, "Compiler");
    assert_eq!(result.details[4].relevance_score, 1.0);
}

#[test]
fn test_empty_bundle_is_counted_but_not_cited() {
    let responses = vec![ResponseBundle::empty("DMS"), erp_bundle()];

    let result = Compiler::default().compile("batch", &responses);

    assert_eq!(result.metadata.agents_consulted, 2);
    assert_eq!(result.citations, vec!["ERP Agent (1 result(s))"]);
    assert!(result.summary.starts_with("Based on information from ERP systems:"));
}

#[test]
fn test_result_serializes_to_expected_shape() {
    let result = Compiler::default().compile(SAMPLE_QUERY, &[dms_bundle()]);

    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["citations"], json!(["DMS Agent (1 result(s))"]));
    assert_eq!(value["details"][0]["source_agent"], json!("DMS"));
    assert_eq!(value["details"][0]["content"]["document_id"], json!("SOP-QC-001"));
    assert_eq!(
        value["metadata"],
        json!({
            "query": SAMPLE_QUERY,
            "agents_consulted": 1,
            "total_results": 1,
            "contradictions_found": 0,
        })
    );
}

#[test]
fn test_result_survives_json_round_trip() {
    let result = Compiler::default().compile(SAMPLE_QUERY, &sample_responses());

    let text = serde_json::to_string(&result).unwrap();
    let back: CompilationResult = serde_json::from_str(&text).unwrap();

    assert_eq!(back, result);
    assert_eq!(back.contradictions().len(), 4);
}
