//! Upload task building.

use crate::catalog::ProductCatalog;
use crate::extract::extract_paths;
use crate::models::PipelineDocument;
use crate::target::resolve_target_path;

/// One (product, source, destination) upload unit. Built once, uploaded once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTask {
    /// The product key this task belongs to.
    pub product_key: String,
    /// The source OBS path to upload.
    pub obs_path: String,
    /// The destination folder to upload into.
    pub target_path: String,
}

/// Turn the requested products and the fetched EP document into a flat task list.
///
/// Pure function of its inputs. Every failure mode here degrades to "this
/// product contributes no tasks": unresolvable targets and unconfigured
/// products are skipped with a diagnostic, and the aggregator later reports
/// them as "no tasks built". Duplicate source paths across matching actions
/// are preserved as-is.
pub fn build_upload_tasks(catalog: &ProductCatalog, document: &PipelineDocument, requested_products: &[String], date_version: &str) -> Vec<UploadTask> {
    let mut tasks = Vec::new();
    let action_list = &document.data.action_task_list;

    for product_key in requested_products {
        let target_path = match resolve_target_path(catalog, product_key, date_version) {
            Some(target_path) => target_path,
            None => {
                tracing::warn!(product = %product_key, "skipping product, no destination folder could be resolved");
                continue;
            }
        };

        // Fixed-path products never consult the EP document.
        if let Some(obs_path) = catalog.fixed_path(product_key) {
            tasks.push(UploadTask {
                product_key: product_key.clone(),
                obs_path: obs_path.to_string(),
                target_path,
            });
            continue;
        }

        let action_names = match catalog.action_names(product_key) {
            Some(action_names) if !action_names.is_empty() => action_names,
            _ => {
                tracing::warn!(product = %product_key, "skipping product, no recognized action names configured");
                continue;
            }
        };

        let mut found_paths = Vec::new();
        for action in action_list {
            if action_names.iter().any(|name| name == &action.proc_act_name) {
                found_paths.extend(extract_paths(action, product_key));
            }
        }

        tracing::debug!(product = %product_key, count = found_paths.len(), "accumulated source paths for product");
        for obs_path in found_paths {
            tasks.push(UploadTask {
                product_key: product_key.clone(),
                obs_path,
                target_path: target_path.clone(),
            });
        }
    }

    tasks
}
