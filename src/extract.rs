//! Source path extraction from EP action records.
//!
//! Extraction is an ordered list of (predicate, extractor) rules evaluated
//! top to bottom, first match wins. The precedence between the rules is part
//! of the contract: an action whose name carries "SOP" but whose type is not
//! `harz_package_and_upload` falls through to the later rules.

use crate::models::ActionRecord;

/// The action type tag of packaged SOP uploads.
const ACTION_TYPE_HARZ_PACKAGE: &str = "harz_package_and_upload";

/// One extraction rule: a predicate over (action, product key) and the
/// extractor applied when the predicate matches.
struct ExtractionRule {
    name: &'static str,
    applies: fn(&ActionRecord, &str) -> bool,
    extract: fn(&ActionRecord, &str) -> Vec<String>,
}

/// The extraction rules in precedence order.
static RULES: &[ExtractionRule] = &[
    ExtractionRule {
        name: "sop_package",
        applies: |action, _product| action.proc_act_name.to_uppercase().contains("SOP") && action.action_type == ACTION_TYPE_HARZ_PACKAGE,
        extract: |action, _product| collect_fields(action, &["shadow_obs_path", "package_obs_path"]),
    },
    ExtractionRule {
        name: "ifs",
        applies: |action, _product| action.proc_act_name.to_uppercase().contains("IFS"),
        extract: |action, product| {
            // PROD products additionally carry their config alongside the lib.
            if product.ends_with("_PROD") {
                collect_fields(action, &["lib_obs_path", "config_obs_path"])
            } else {
                collect_fields(action, &["lib_obs_path"])
            }
        },
    },
    ExtractionRule {
        name: "spaced_sop",
        applies: |action, _product| action.proc_act_name.to_lowercase().contains(" sop "),
        extract: |action, _product| collect_fields(action, &["rvc_obs_path", "config_obs_path"]),
    },
];

/// Extract the source OBS paths which the given action contributes to the given product.
///
/// Pure function of its inputs; an unmatched action yields no paths and is
/// only a diagnostic, never an error.
pub fn extract_paths(action: &ActionRecord, product_key: &str) -> Vec<String> {
    for rule in RULES {
        if (rule.applies)(action, product_key) {
            let paths = (rule.extract)(action, product_key);
            tracing::debug!(
                action = %action.proc_act_name,
                product = %product_key,
                rule = rule.name,
                count = paths.len(),
                "extracted source paths from action",
            );
            return paths;
        }
    }
    tracing::debug!(action = %action.proc_act_name, product = %product_key, "no extraction rule matched action");
    Vec::new()
}

/// Collect the given result fields in order, treating empty values as absent.
fn collect_fields(action: &ActionRecord, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .filter_map(|field| action.result.get(*field))
        .filter(|val| !val.is_empty())
        .cloned()
        .collect()
}
