//! # Style Catalog
//!
//! The catalog is the estimator's only configuration: for every design style,
//! a unit price table and a quantity-per-area table keyed by material.
//!
//! Catalogs are plain JSON documents. A reference catalog is embedded in the
//! crate and served by [`StyleCatalog::builtin`]; operators can point the
//! binaries at their own file to update prices without a rebuild.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "currency": "PHP",
//!   "styles": {
//!     "Modern": {
//!       "unit_prices":         { "Cement": 259.0, "Sand": 1435.0 },
//!       "quantities_per_area": { "Cement": 3.0,   "Sand": 0.14 }
//!     }
//!   }
//! }
//! ```
//!
//! The order of the materials in `unit_prices` is the order of the line items
//! in every estimate for that style.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::catalog::StyleCatalog;
//! use estimate_core::materials::{DesignStyle, Material};
//!
//! let catalog = StyleCatalog::builtin().unwrap();
//! let modern = catalog.tables(DesignStyle::Modern).unwrap();
//! assert_eq!(modern.unit_prices.get(&Material::Cement), Some(&259.0));
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::materials::{deserialize_unique, DesignStyle, Material, MaterialMap};
use crate::money::CURRENCY_CODE;

/// Current schema version for catalog files
pub const CATALOG_SCHEMA_VERSION: &str = "0.1.0";

/// Embedded reference catalog.
const REFERENCE_CATALOG_JSON: &str = include_str!("../data/catalog.json");

static REFERENCE_CATALOG: Lazy<EstimateResult<StyleCatalog>> =
    Lazy::new(|| StyleCatalog::from_json(REFERENCE_CATALOG_JSON));

/// Per-material values of one catalog table, in document order
pub type MaterialTable = MaterialMap<f64>;

// ============================================================================
// Style Catalog
// ============================================================================

/// Price and consumption tables for one design style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleTables {
    /// Monetary value per unit of material
    #[serde(deserialize_with = "deserialize_unique")]
    pub unit_prices: MaterialTable,
    /// Units of material consumed per unit of floor area
    #[serde(deserialize_with = "deserialize_unique")]
    pub quantities_per_area: MaterialTable,
}

impl StyleTables {
    /// Check the table invariants for one style.
    ///
    /// Both tables must name exactly the same materials, and every value must
    /// be finite and strictly positive.
    pub fn validate(&self, style: DesignStyle) -> EstimateResult<()> {
        if self.unit_prices.is_empty() {
            return Err(EstimateError::catalog_defect(style.name(), "No materials listed"));
        }

        for (table_name, table) in [
            ("unit price", &self.unit_prices),
            ("quantity per area", &self.quantities_per_area),
        ] {
            for (material, &value) in table.iter() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(EstimateError::catalog_defect(
                        style.name(),
                        format!("{} of {} must be positive, got {}", table_name, material, value),
                    ));
                }
            }
        }

        if let Some(material) = self
            .unit_prices
            .keys()
            .find(|m| !self.quantities_per_area.contains_key(*m))
        {
            return Err(EstimateError::catalog_defect(
                style.name(),
                format!("{} has a unit price but no quantity per area", material),
            ));
        }

        if let Some(material) = self
            .quantities_per_area
            .keys()
            .find(|m| !self.unit_prices.contains_key(*m))
        {
            return Err(EstimateError::catalog_defect(
                style.name(),
                format!("{} has a quantity per area but no unit price", material),
            ));
        }

        Ok(())
    }
}

fn default_currency() -> String {
    CURRENCY_CODE.to_string()
}

/// Immutable mapping from design style to its pricing tables.
///
/// Construct one at process start ([`StyleCatalog::builtin`] or
/// [`crate::file_io::load_catalog`]) and pass it to the estimator by
/// reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleCatalog {
    /// Schema version of the catalog document
    pub version: String,

    /// Currency of every unit price
    #[serde(default = "default_currency")]
    pub currency: String,

    styles: BTreeMap<DesignStyle, StyleTables>,
}

impl StyleCatalog {
    /// The embedded reference catalog, parsed on first use.
    pub fn builtin() -> EstimateResult<&'static StyleCatalog> {
        REFERENCE_CATALOG.as_ref().map_err(Clone::clone)
    }

    /// Build a catalog from tables, validating every style.
    pub fn from_styles(
        styles: impl IntoIterator<Item = (DesignStyle, StyleTables)>,
    ) -> EstimateResult<Self> {
        let catalog = StyleCatalog {
            version: CATALOG_SCHEMA_VERSION.to_string(),
            currency: default_currency(),
            styles: styles.into_iter().collect(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog document and check its version and invariants.
    pub fn from_json(json: &str) -> EstimateResult<Self> {
        let catalog: StyleCatalog = serde_json::from_str(json)?;
        validate_version(&catalog.version)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> EstimateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the table invariants of every style.
    pub fn validate(&self) -> EstimateResult<()> {
        if self.styles.is_empty() {
            return Err(EstimateError::catalog_defect("*", "Catalog has no styles"));
        }
        for (style, tables) in &self.styles {
            tables.validate(*style)?;
        }
        Ok(())
    }

    /// Tables for a style, or `InvalidStyle` if the catalog has none.
    pub fn tables(&self, style: DesignStyle) -> EstimateResult<&StyleTables> {
        self.styles
            .get(&style)
            .ok_or_else(|| EstimateError::invalid_style(style.name()))
    }

    /// Styles present in this catalog
    pub fn styles(&self) -> impl Iterator<Item = DesignStyle> + '_ {
        self.styles.keys().copied()
    }

    /// Change the unit price of a material the style already lists.
    ///
    /// Returns the previous price.
    pub fn set_unit_price(&mut self, style: DesignStyle, material: Material, price: f64) -> EstimateResult<f64> {
        if !price.is_finite() || price <= 0.0 {
            return Err(EstimateError::invalid_input(
                "price",
                price.to_string(),
                "Unit price must be positive",
            ));
        }

        let tables = self
            .styles
            .get_mut(&style)
            .ok_or_else(|| EstimateError::invalid_style(style.name()))?;

        let slot = tables.unit_prices.get_mut(&material).ok_or_else(|| {
            EstimateError::invalid_input(
                "material",
                material.name(),
                format!("{} is not priced for the {} style", material, style),
            )
        })?;

        Ok(std::mem::replace(slot, price))
    }
}

/// Validate that a catalog version is compatible with the current schema.
///
/// The major version must match; on 0.x a newer minor version is rejected.
pub fn validate_version(file_version: &str) -> EstimateResult<()> {
    let mismatch = || EstimateError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: CATALOG_SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(CATALOG_SCHEMA_VERSION).map_err(|_| mismatch())?;

    if file.major != current.major {
        return Err(mismatch());
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }

    Ok(())
}
