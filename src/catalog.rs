//! Static product configuration tables.
//!
//! The catalog is built once at startup and passed by reference into the task
//! builder and target path resolver, which keeps the core testable against
//! fabricated tables.

use std::collections::HashMap;

/// The immutable per-product configuration tables.
#[derive(Clone, Debug)]
pub struct ProductCatalog {
    /// Product family name to the base OBS folder for that family.
    family_base_paths: HashMap<String, String>,
    /// Product key to the EP action names its source paths are extracted from.
    product_actions: HashMap<String, Vec<String>>,
    /// Fixed-path products and their hardcoded source OBS path.
    fixed_paths: HashMap<String, String>,
}

impl ProductCatalog {
    /// Create a catalog from explicit tables.
    pub fn new(
        family_base_paths: HashMap<String, String>, product_actions: HashMap<String, Vec<String>>, fixed_paths: HashMap<String, String>,
    ) -> Self {
        Self {
            family_base_paths,
            product_actions,
            fixed_paths,
        }
    }

    /// The base OBS folder configured for the given product family, if any.
    pub fn base_path_for_family(&self, family: &str) -> Option<&str> {
        self.family_base_paths.get(family).map(String::as_str)
    }

    /// The EP action names recognized for the given product key, if configured.
    pub fn action_names(&self, product_key: &str) -> Option<&[String]> {
        self.product_actions.get(product_key).map(Vec::as_slice)
    }

    /// The hardcoded source path of the given product key, if it is a fixed-path product.
    pub fn fixed_path(&self, product_key: &str) -> Option<&str> {
        self.fixed_paths.get(product_key).map(String::as_str)
    }

    /// Check if the given product key is a fixed-path product.
    pub fn is_fixed(&self, product_key: &str) -> bool {
        self.fixed_paths.contains_key(product_key)
    }
}

impl Default for ProductCatalog {
    /// The production tables.
    fn default() -> Self {
        let family_base_paths = HashMap::from([
            ("ST3".to_string(), "panguprodmmt/Momenta/167/NCD2442/test/".to_string()),
            ("ST35".to_string(), "panguprodmmt/Momenta/174/NCD2442/test/".to_string()),
        ]);
        let product_actions = HashMap::from([
            (
                "ST35_DEV".to_string(),
                vec!["ST35 DEV SOP".to_string(), "ST35 IFS".to_string(), "st35 sop dev".to_string()],
            ),
            (
                "ST35_PROD".to_string(),
                vec!["ST35 PROD SOP".to_string(), "ST35 IFS".to_string(), "st35 sop prod".to_string()],
            ),
            (
                "ST3_DEV".to_string(),
                vec!["ST3 DEV SOP".to_string(), "ST3 IFS".to_string(), "st3 sop dev".to_string()],
            ),
            (
                // The double space in the SOP entry matches the action name as recorded by EP.
                "ST3_PROD".to_string(),
                vec!["ST3  PROD SOP".to_string(), "ST3 IFS".to_string(), "st3 sop prod".to_string()],
            ),
        ]);
        let fixed_paths = HashMap::from([
            (
                "ST3_DEV_json".to_string(),
                "obs://harz-data-obs/vertical_version/vertical_package_config/ST3_dev/test.json".to_string(),
            ),
            (
                "ST3_PROD_json".to_string(),
                "obs://harz-data-obs/vertical_version/vertical_package_config/ST3_prod/test.json".to_string(),
            ),
            (
                "ST35_DEV_json".to_string(),
                "obs://harz-data-obs/vertical_version/vertical_package_config/ST35_dev/test.json".to_string(),
            ),
            (
                "ST35_PROD_json".to_string(),
                "obs://harz-data-obs/vertical_version/vertical_package_config/ST35_prod/test.json".to_string(),
            ),
        ]);
        Self::new(family_base_paths, product_actions, fixed_paths)
    }
}
