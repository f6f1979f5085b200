//! Sample responses for tests and demos.
//!
//! Mirrors what the LIMS, ERP and DMS domain agents return for a lot
//! review, so applications can exercise the compiler without live sources.

use serde_json::json;

use crate::types::response::{ResponseBundle, ResultRecord};

/// Query the sample responses were gathered for.
pub const SAMPLE_QUERY: &str = "What are the test results for LOT-12345?";

/// LIMS certificate-of-analysis results for LOT-12345.
pub fn lims_bundle() -> ResponseBundle {
    ResponseBundle::empty("LIMS")
        .with_result(ResultRecord::fields([
            ("lot_number", json!("LOT-12345")),
            ("test", json!("Assay")),
            ("result", json!("98.5%")),
            ("specification", json!("95.0-105.0%")),
            ("status", json!("PASS")),
        ]))
        .with_result(ResultRecord::fields([
            ("lot_number", json!("LOT-12345")),
            ("test", json!("Dissolution")),
            ("result", json!("92%")),
            ("specification", json!("≥85%")),
            ("status", json!("PASS")),
        ]))
}

/// ERP batch record for the same product.
pub fn erp_bundle() -> ResponseBundle {
    ResponseBundle::new(
        "ERP",
        vec![ResultRecord::fields([
            ("batch_number", json!("BATCH-12345")),
            ("manufacturing_date", json!("2024-01-15")),
            ("status", json!("Released")),
            ("grn_number", json!("GRN-2024-001")),
        ])],
    )
}

/// DMS controlled-document reference.
pub fn dms_bundle() -> ResponseBundle {
    ResponseBundle::new(
        "DMS",
        vec![ResultRecord::fields([
            ("document_id", json!("SOP-QC-001")),
            ("title", json!("Quality Control Testing Procedure")),
            ("version", json!("2.0")),
            ("status", json!("Active")),
        ])],
    )
}

/// All three sample bundles in LIMS, ERP, DMS order.
pub fn sample_responses() -> Vec<ResponseBundle> {
    vec![lims_bundle(), erp_bundle(), dms_bundle()]
}
