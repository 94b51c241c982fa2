use anyhow::Result;
use serde_json::json;

use crate::models::{PipelineDocument, ProductSummary, UploadRequest, UploadStatus};

#[test]
fn ep_document_deserializes_and_tolerates_extra_fields() -> Result<()> {
    let doc: PipelineDocument = serde_json::from_value(json!({
        "code": 0,
        "data": {
            "pipeline_name": "nightly",
            "action_task_list": [
                {
                    "proc_act_name": "ST3 DEV SOP",
                    "action_type": "harz_package_and_upload",
                    "result": {"shadow_obs_path": "obs://bucket/a", "irrelevant": "x"},
                    "extra": true,
                },
                {"proc_act_name": "bare action"},
            ],
        },
    }))?;

    assert_eq!(doc.data.action_task_list.len(), 2);
    let first = &doc.data.action_task_list[0];
    assert_eq!(first.proc_act_name, "ST3 DEV SOP");
    assert_eq!(first.action_type, "harz_package_and_upload");
    assert_eq!(first.result.get("shadow_obs_path").map(String::as_str), Some("obs://bucket/a"));
    // Missing fields default rather than failing the whole document.
    let second = &doc.data.action_task_list[1];
    assert!(second.action_type.is_empty());
    assert!(second.result.is_empty());
    Ok(())
}

#[test]
fn upload_request_defaults_optional_fields() -> Result<()> {
    let request: UploadRequest = serde_json::from_value(json!({
        "products": ["ST3_DEV"],
    }))?;
    assert!(request.pipeline_url.is_empty());
    assert!(request.date_version.is_empty());
    assert!(request.custom_token.is_none());
    assert_eq!(request.products, vec!["ST3_DEV".to_string()]);
    Ok(())
}

#[test]
fn product_summary_serializes_without_absent_optional_lists() -> Result<()> {
    let summary = ProductSummary {
        product: "ST3_DEV".into(),
        status: UploadStatus::Error,
        message: "no upload tasks could be built for this product".into(),
        uploaded_paths: None,
        failed_files: None,
    };
    let value = serde_json::to_value(&summary)?;
    assert_eq!(value["status"], json!("error"), "status must serialize lowercase, got {}", value);
    assert!(value.get("uploaded_paths").is_none(), "absent uploaded_paths must be omitted, got {}", value);
    assert!(value.get("failed_files").is_none(), "absent failed_files must be omitted, got {}", value);
    Ok(())
}
