//! Per-product aggregation of upload outcomes.

use crate::models::{FailedFile, ProductSummary, UploadStatus};
use crate::uploader::UploadOutcome;

/// Reduce per-file outcomes to one summary per requested product, in request order.
pub fn aggregate_results(outcomes: &[UploadOutcome], requested_products: &[String]) -> Vec<ProductSummary> {
    let mut summaries = Vec::with_capacity(requested_products.len());

    for product_key in requested_products {
        let product_outcomes: Vec<&UploadOutcome> = outcomes.iter().filter(|outcome| &outcome.product_key == product_key).collect();

        // No tasks were ever built for this product.
        if product_outcomes.is_empty() {
            summaries.push(ProductSummary {
                product: product_key.clone(),
                status: UploadStatus::Error,
                message: "no upload tasks could be built for this product, check the service logs and configuration".into(),
                uploaded_paths: None,
                failed_files: None,
            });
            continue;
        }

        let (successes, failures): (Vec<&UploadOutcome>, Vec<&UploadOutcome>) =
            product_outcomes.into_iter().partition(|outcome| outcome.status == UploadStatus::Success);
        let uploaded_paths: Vec<String> = successes.iter().map(|outcome| full_uploaded_path(&outcome.target_path, &outcome.obs_path)).collect();

        if !failures.is_empty() {
            let failed_files = failures
                .iter()
                .map(|outcome| FailedFile {
                    obs_path: outcome.obs_path.clone(),
                    reason: outcome.message.clone(),
                })
                .collect();
            summaries.push(ProductSummary {
                product: product_key.clone(),
                status: UploadStatus::Error,
                message: format!("some files failed to upload (succeeded: {}, failed: {})", successes.len(), failures.len()),
                uploaded_paths: Some(uploaded_paths),
                failed_files: Some(failed_files),
            });
            continue;
        }

        summaries.push(ProductSummary {
            product: product_key.clone(),
            status: UploadStatus::Success,
            message: format!("all files uploaded successfully ({} files)", successes.len()),
            uploaded_paths: Some(uploaded_paths),
            failed_files: None,
        });
    }

    summaries
}

/// Join the destination folder with the source file's basename, with forward slashes.
///
/// This is the caller-facing path showing exactly where the artifact landed.
fn full_uploaded_path(target_path: &str, obs_path: &str) -> String {
    let source = obs_path.replace('\\', "/");
    let basename = source.rsplit('/').next().unwrap_or(&source);
    format!("{}/{}", target_path.replace('\\', "/").trim_end_matches('/'), basename)
}
