//! # Catalog File I/O
//!
//! Loads and saves style catalogs:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent a half-written catalog
//! - **Validation**: Version and table invariants are checked on every load
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::file_io::{load_catalog, save_catalog};
//! use estimate_core::materials::{DesignStyle, Material};
//! use std::path::Path;
//!
//! let path = Path::new("catalog.json");
//!
//! let mut catalog = load_catalog(path).unwrap();
//! catalog.set_unit_price(DesignStyle::Modern, Material::Cement, 265.0).unwrap();
//! save_catalog(&catalog, path).unwrap();
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::catalog::StyleCatalog;
use crate::errors::{EstimateError, EstimateResult};

fn read_text(path: &Path, operation: &str) -> EstimateResult<String> {
    let mut file = File::open(path).map_err(|e| {
        EstimateError::file_error(operation, path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        EstimateError::file_error(operation, path.display().to_string(), e.to_string())
    })?;
    Ok(contents)
}

/// Save a catalog with atomic write semantics.
///
/// 1. Validate and serialize the catalog
/// 2. Write to `<path>.tmp` and fsync
/// 3. Rename over the target
pub fn save_catalog(catalog: &StyleCatalog, path: &Path) -> EstimateResult<()> {
    catalog.validate()?;
    let json = catalog.to_json_pretty()?;

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        EstimateError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        EstimateError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        EstimateError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        EstimateError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load and validate a catalog file.
///
/// # Returns
///
/// * `Err(EstimateError::FileError)` - I/O error
/// * `Err(EstimateError::SerializationError)` - Invalid JSON or unknown style/material
/// * `Err(EstimateError::VersionMismatch)` - Incompatible schema version
/// * `Err(EstimateError::CatalogDefect)` - Price and quantity tables disagree
pub fn load_catalog(path: &Path) -> EstimateResult<StyleCatalog> {
    let contents = read_text(path, "read")?;
    StyleCatalog::from_json(&contents).map_err(|e| match e {
        EstimateError::SerializationError { reason } => EstimateError::SerializationError {
            reason: format!("Invalid catalog in {}: {}", path.display(), reason),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{DesignStyle, Material};
    use std::env::temp_dir;

    fn temp_catalog_path(name: &str) -> PathBuf {
        temp_dir().join(format!("estimate_core_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_catalog_path("roundtrip");

        let mut catalog = StyleCatalog::builtin().unwrap().clone();
        catalog
            .set_unit_price(DesignStyle::Classic, Material::Tiles, 395.5)
            .unwrap();
        save_catalog(&catalog, &path).unwrap();

        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, catalog);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_catalog_path("atomic");
        let tmp_path = PathBuf::from(format!("{}.tmp", path.display()));

        save_catalog(StyleCatalog::builtin().unwrap(), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_defective_catalog() {
        let path = temp_catalog_path("defect");
        fs::write(
            &path,
            r#"{
                "version": "0.1.0",
                "styles": {
                    "Modern": {
                        "unit_prices": { "Cement": 259.0, "Steel": 150.0 },
                        "quantities_per_area": { "Cement": 3.0 }
                    }
                }
            }"#,
        )
        .unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_DEFECT");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_reports_bad_json_with_path() {
        let path = temp_catalog_path("bad_json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().contains(&path.display().to_string()));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_catalog(&temp_catalog_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_catalog_path("newer");
        let json = StyleCatalog::builtin()
            .unwrap()
            .to_json_pretty()
            .unwrap()
            .replace("\"version\": \"0.1.0\"", "\"version\": \"0.9.0\"");
        fs::write(&path, json).unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let path = temp_catalog_path("replace");
        fs::write(&path, "stale contents").unwrap();

        save_catalog(StyleCatalog::builtin().unwrap(), &path).unwrap();
        let loaded = load_catalog(&path).unwrap();
        assert_eq!(&loaded, StyleCatalog::builtin().unwrap());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_rejects_invalid_catalog() {
        let path = temp_catalog_path("invalid_save");
        let mut catalog = StyleCatalog::builtin().unwrap().clone();
        catalog.version = "not-a-version".to_string();

        assert!(save_catalog(&catalog, &path).is_err());
        assert!(!path.exists());
    }
}
