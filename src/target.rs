//! Destination folder resolution.

use crate::catalog::ProductCatalog;

/// Compute the destination folder for the given product key and date version.
///
/// The folder is derived from the product's family base path, its DEV/PROD
/// environment segment and the trimmed date version, always ending with a
/// slash. `None` means the product is unresolvable with the current catalog
/// and must be skipped; it never fails the request.
pub fn resolve_target_path(catalog: &ProductCatalog, product_key: &str, date_version: &str) -> Option<String> {
    // ST35 must be checked before ST3, every ST35 key also starts with ST3.
    let family = if product_key.starts_with("ST35") {
        "ST35"
    } else if product_key.starts_with("ST3") {
        "ST3"
    } else {
        tracing::warn!(product = %product_key, "unable to determine a product family (ST3/ST35)");
        return None;
    };

    let base_path = match catalog.base_path_for_family(family) {
        Some(base_path) => base_path,
        None => {
            tracing::warn!(product = %product_key, family, "no base path configured for product family");
            return None;
        }
    };

    let env_segment = if product_key.contains("DEV") {
        "dev/"
    } else if product_key.contains("PROD") {
        "prod/"
    } else {
        tracing::warn!(product = %product_key, "unable to determine an environment segment (DEV/PROD)");
        return None;
    };

    let target = format!("{}{}{}/", base_path, env_segment, date_version.trim_matches('/'));
    tracing::debug!(product = %product_key, target = %target, "resolved destination folder");
    Some(target)
}
