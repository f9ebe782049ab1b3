//! # Material Cost Estimator
//!
//! Prices a structure of a given floor area in a given design style and checks
//! the total against a budget.
//!
//! ## Algorithm
//!
//! For every material in the style's unit price table, in catalog order:
//!
//! ```text
//! quantity   = quantity_per_area[material] * size
//! line_total = quantity * unit_price[material]
//! total_cost = total_cost + line_total
//! ```
//!
//! Rounding to 2 decimal places happens only when a value is written to the
//! result. `total_cost` is the unrounded sum, rounded once at the end.
//!
//! If `total_cost > budget` the call fails with
//! [`EstimateError::BudgetExceeded`] and no breakdown is returned.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::catalog::StyleCatalog;
//! use estimate_core::estimator::estimate;
//!
//! let catalog = StyleCatalog::builtin().unwrap();
//! let result = estimate(catalog, 500_000, 30, "Modern").unwrap();
//!
//! assert_eq!(result.total_cost, 141_777.0);
//! assert!(result.budget_status.contains("Within Budget"));
//!
//! // Too small a budget
//! assert!(estimate(catalog, 1_000, 30, "Modern").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::StyleCatalog;
use crate::errors::{EstimateError, EstimateResult};
use crate::materials::{DesignStyle, Material, MaterialMap};
use crate::money::{round2, Pesos};
use crate::request::EstimateRequest;

/// Verdict phrase of a successful estimate
pub const WITHIN_BUDGET: &str = "Within Budget";

/// Cost of one material in an estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialLineItem {
    /// Units required, rounded to 2 decimal places
    pub quantity: f64,
    /// Catalog price per unit
    pub unit_price: f64,
    /// quantity × unit_price, rounded to 2 decimal places
    pub total_price: f64,
}

/// A successful estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "materials": {
///     "Cement": { "quantity": 90.0, "unit_price": 259.0, "total_price": 23310.0 },
///     "Sand":   { "quantity": 4.2,  "unit_price": 1435.0, "total_price": 6027.0 }
///   },
///   "total_cost": 141777.0,
///   "budget_status": "Total Cost: ₱141,777.00. Status: Within Budget."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Line items keyed by material, in catalog order
    pub materials: MaterialMap<MaterialLineItem>,
    /// Sum of the unrounded line totals, rounded to 2 decimal places
    pub total_cost: f64,
    /// Human-readable total and affordability verdict
    pub budget_status: String,
}

impl Estimate {
    /// Number of line items
    pub fn line_count(&self) -> usize {
        self.materials.len()
    }

    /// Line item for one material
    pub fn line(&self, material: Material) -> Option<&MaterialLineItem> {
        self.materials.get(&material)
    }
}

/// Format the budget status line for a total cost.
pub fn budget_status(total_cost: f64) -> String {
    format!("Total Cost: {}. Status: {}.", Pesos(total_cost), WITHIN_BUDGET)
}

/// Estimate material costs for a style name as received from a client.
///
/// The style name is matched exactly ("Modern", not "modern"); an unknown
/// name fails with [`EstimateError::InvalidStyle`] before any arithmetic.
pub fn estimate(
    catalog: &StyleCatalog,
    budget: u64,
    size: u64,
    design_style: &str,
) -> EstimateResult<Estimate> {
    let style: DesignStyle = design_style.parse()?;
    estimate_style(catalog, budget, size, style)
}

/// Estimate material costs for a validated request.
pub fn estimate_request(catalog: &StyleCatalog, request: &EstimateRequest) -> EstimateResult<Estimate> {
    estimate_style(catalog, request.budget, request.size, request.design_style)
}

/// Estimate material costs for a typed design style.
pub fn estimate_style(
    catalog: &StyleCatalog,
    budget: u64,
    size: u64,
    style: DesignStyle,
) -> EstimateResult<Estimate> {
    let tables = catalog.tables(style)?;
    let size = size as f64;

    let mut materials = MaterialMap::new();
    let mut total_cost = 0.0;

    for (material, &unit_price) in tables.unit_prices.iter() {
        // Key sets are checked when the catalog is built
        let coefficient = tables.quantities_per_area.get(material).copied().ok_or_else(|| {
            EstimateError::catalog_defect(
                style.name(),
                format!("{} has a unit price but no quantity per area", material),
            )
        })?;

        let quantity = coefficient * size;
        let line_total = quantity * unit_price;
        total_cost += line_total;

        materials.insert(
            *material,
            MaterialLineItem {
                quantity: round2(quantity),
                unit_price,
                total_price: round2(line_total),
            },
        );
    }

    if total_cost > budget as f64 {
        return Err(EstimateError::BudgetExceeded);
    }

    Ok(Estimate {
        materials,
        total_cost: round2(total_cost),
        budget_status: budget_status(total_cost),
    })
}
