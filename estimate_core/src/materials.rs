//! # Design Styles and Materials
//!
//! The two closed vocabularies of the estimator: the architectural presets a
//! client can pick ([`DesignStyle`]) and the construction inputs each preset
//! prices ([`Material`]).
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::materials::{DesignStyle, Material};
//!
//! let style: DesignStyle = "Modern".parse().unwrap();
//! assert_eq!(style, DesignStyle::Modern);
//!
//! // Style names are matched exactly
//! assert!("modern".parse::<DesignStyle>().is_err());
//!
//! assert_eq!(Material::Cement.name(), "Cement");
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// Architectural preset determining unit prices and consumption coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DesignStyle {
    Modern,
    Classic,
    Rustic,
}

impl DesignStyle {
    /// All design styles, in the order they are offered to clients
    pub const ALL: [DesignStyle; 3] = [DesignStyle::Modern, DesignStyle::Classic, DesignStyle::Rustic];

    /// Catalog key for this style
    pub fn name(&self) -> &'static str {
        match self {
            DesignStyle::Modern => "Modern",
            DesignStyle::Classic => "Classic",
            DesignStyle::Rustic => "Rustic",
        }
    }

    /// Floor-to-roof height of a single storey, in meters.
    ///
    /// Used only for the placeholder box model.
    pub fn storey_height_m(&self) -> f64 {
        match self {
            DesignStyle::Modern => 3.0,
            DesignStyle::Classic => 3.5,
            DesignStyle::Rustic => 2.8,
        }
    }
}

impl FromStr for DesignStyle {
    type Err = EstimateError;

    /// Case-sensitive exact match against the catalog keys.
    fn from_str(s: &str) -> EstimateResult<Self> {
        DesignStyle::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| EstimateError::invalid_style(s))
    }
}

impl std::fmt::Display for DesignStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Construction material priced by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Material {
    Cement,
    Sand,
    Gravel,
    Bricks,
    Steel,
    Wood,
    Tiles,
    Paint,
    Roofing,
}

impl Material {
    /// All materials, in reference catalog order
    pub const ALL: [Material; 9] = [
        Material::Cement,
        Material::Sand,
        Material::Gravel,
        Material::Bricks,
        Material::Steel,
        Material::Wood,
        Material::Tiles,
        Material::Paint,
        Material::Roofing,
    ];

    /// Catalog key for this material
    pub fn name(&self) -> &'static str {
        match self {
            Material::Cement => "Cement",
            Material::Sand => "Sand",
            Material::Gravel => "Gravel",
            Material::Bricks => "Bricks",
            Material::Steel => "Steel",
            Material::Wood => "Wood",
            Material::Tiles => "Tiles",
            Material::Paint => "Paint",
            Material::Roofing => "Roofing",
        }
    }

    /// Parse from common spellings ("cement", " STEEL ", "roof")
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "cement" => Ok(Material::Cement),
            "sand" => Ok(Material::Sand),
            "gravel" => Ok(Material::Gravel),
            "bricks" | "brick" => Ok(Material::Bricks),
            "steel" | "rebar" => Ok(Material::Steel),
            "wood" | "lumber" => Ok(Material::Wood),
            "tiles" | "tile" => Ok(Material::Tiles),
            "paint" => Ok(Material::Paint),
            "roofing" | "roof" => Ok(Material::Roofing),
            _ => Err(EstimateError::invalid_input(
                "material",
                s,
                "Unknown material",
            )),
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Map keyed by material in insertion (document) order
pub type MaterialMap<V> = IndexMap<Material, V>;

/// `deserialize_with` helper for catalog tables: keeps document order and
/// rejects a material listed twice.
pub fn deserialize_unique<'de, D, V>(deserializer: D) -> Result<MaterialMap<V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueVisitor<V> {
        type Value = MaterialMap<V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map keyed by material name")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = MaterialMap::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((material, value)) = access.next_entry::<Material, V>()? {
                if map.insert(material, value).is_some() {
                    return Err(de::Error::custom(format!(
                        "material '{}' listed more than once",
                        material
                    )));
                }
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueVisitor(PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_exact_match() {
        assert_eq!("Modern".parse::<DesignStyle>().unwrap(), DesignStyle::Modern);
        assert_eq!("Classic".parse::<DesignStyle>().unwrap(), DesignStyle::Classic);
        assert_eq!("Rustic".parse::<DesignStyle>().unwrap(), DesignStyle::Rustic);

        for bad in ["modern", "MODERN", " Modern", "Gothic", ""] {
            let err = bad.parse::<DesignStyle>().unwrap_err();
            assert_eq!(err, EstimateError::invalid_style(bad));
        }
    }

    #[test]
    fn test_style_serialization_uses_catalog_key() {
        let json = serde_json::to_string(&DesignStyle::Rustic).unwrap();
        assert_eq!(json, "\"Rustic\"");
        for style in DesignStyle::ALL {
            assert_eq!(style.to_string(), style.name());
        }
    }

    #[test]
    fn test_material_names_round_trip_through_serde() {
        for material in Material::ALL {
            let json = serde_json::to_string(&material).unwrap();
            assert_eq!(json, format!("\"{}\"", material.name()));
        }
    }

    #[test]
    fn test_material_flexible_parse() {
        assert_eq!(Material::from_str_flexible("cement").unwrap(), Material::Cement);
        assert_eq!(Material::from_str_flexible(" ROOF ").unwrap(), Material::Roofing);
        assert!(Material::from_str_flexible("glass").is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Table {
        #[serde(deserialize_with = "deserialize_unique")]
        prices: MaterialMap<u32>,
    }

    #[test]
    fn test_material_map_keeps_document_order() {
        let table: Table =
            serde_json::from_str(r#"{"prices":{"Wood":1,"Cement":2,"Paint":4}}"#).unwrap();
        let order: Vec<Material> = table.prices.keys().copied().collect();
        assert_eq!(order, vec![Material::Wood, Material::Cement, Material::Paint]);

        let json = serde_json::to_string(&table.prices).unwrap();
        assert_eq!(json, r#"{"Wood":1,"Cement":2,"Paint":4}"#);
    }

    #[test]
    fn test_material_map_rejects_duplicates() {
        let result: Result<Table, _> = serde_json::from_str(r#"{"prices":{"Sand":1,"Sand":2}}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("listed more than once"));

        let result: Result<Table, _> = serde_json::from_str(r#"{"prices":{"Glass":1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_storey_heights_positive() {
        for style in DesignStyle::ALL {
            assert!(style.storey_height_m() > 0.0);
        }
    }
}
