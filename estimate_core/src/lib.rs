//! # estimate_core - Construction Material Cost Estimation Engine
//!
//! `estimate_core` is the computational heart of Tantya. Given a floor area,
//! a design style and a budget, it prices the construction materials from a
//! style catalog and tells whether the budget covers them. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over an injected, read-only catalog
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Ordered Output**: Line items follow catalog order
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::catalog::StyleCatalog;
//! use estimate_core::estimator::estimate;
//!
//! let catalog = StyleCatalog::builtin().unwrap();
//! let result = estimate(catalog, 500_000, 30, "Modern").unwrap();
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"Cement\""));
//! ```
//!
//! ## Modules
//!
//! - [`estimator`] - The estimate calculation
//! - [`catalog`] - Style catalog: unit prices and quantities per area
//! - [`materials`] - Design styles, materials, ordered material maps
//! - [`request`] - Validation and coercion of untrusted request fields
//! - [`money`] - Rounding and peso formatting
//! - [`model`] - Placeholder 3D box model (OBJ export)
//! - [`pdf`] - PDF estimate reports
//! - [`errors`] - Structured error types
//! - [`file_io`] - Catalog files with validated loads and atomic saves

pub mod catalog;
pub mod errors;
pub mod estimator;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod materials;
pub mod model;
pub mod money;
pub mod pdf;
pub mod request;

// Re-export commonly used types at crate root for convenience
pub use catalog::{StyleCatalog, StyleTables};
pub use errors::{EstimateError, EstimateResult};
pub use estimator::{estimate, estimate_request, Estimate, MaterialLineItem};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_catalog, save_catalog};
pub use materials::{DesignStyle, Material};
pub use request::{EstimateRequest, RawEstimateRequest};
