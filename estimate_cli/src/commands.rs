//! Command handlers. Each returns `anyhow::Result` and prints its own output.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use estimate_core::estimator::{estimate_request, Estimate};
use estimate_core::file_io::{load_catalog, save_catalog};
use estimate_core::materials::{DesignStyle, Material};
use estimate_core::model::BoxModel;
use estimate_core::money::Pesos;
use estimate_core::pdf::render_estimate_pdf;
use estimate_core::request::{coerce_positive_integer, EstimateRequest, RawEstimateRequest};
use estimate_core::StyleCatalog;
use serde_json::Value;
use tracing::{debug, info};

/// Load the catalog named on the command line, or the embedded one.
pub fn load_active_catalog(path: Option<&Path>) -> Result<StyleCatalog> {
    match path {
        Some(path) => {
            let catalog = load_catalog(path)
                .with_context(|| format!("loading catalog {}", path.display()))?;
            info!("Loaded catalog {} (version {})", path.display(), catalog.version);
            Ok(catalog)
        }
        None => {
            debug!("Using embedded reference catalog");
            Ok(StyleCatalog::builtin()?.clone())
        }
    }
}

fn parse_request(budget: &str, size: &str, style: &str) -> Result<EstimateRequest> {
    Ok(RawEstimateRequest::from_strings(budget, size, style).validate()?)
}

pub fn estimate(catalog: &StyleCatalog, budget: &str, size: &str, style: &str, json: bool) -> Result<()> {
    let request = parse_request(budget, size, style)?;
    let result = estimate_request(catalog, &request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", format_estimate_table(&request, &result));
    }
    Ok(())
}

/// Plain-text rendering of an estimate for the terminal
pub fn format_estimate_table(request: &EstimateRequest, result: &Estimate) -> String {
    let rule = "═".repeat(62);
    let mut out = String::new();

    out.push_str(&format!("{rule}\n"));
    out.push_str("  MATERIAL COST ESTIMATE\n");
    out.push_str(&format!("{rule}\n\n"));
    out.push_str(&format!("  Style:  {}\n", request.design_style));
    out.push_str(&format!("  Size:   {} m²\n", request.size));
    out.push_str(&format!("  Budget: {}\n\n", Pesos(request.budget as f64)));

    out.push_str(&format!(
        "  {:<10} {:>12} {:>14} {:>18}\n",
        "Material", "Quantity", "Unit Price", "Total"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(57)));
    for (material, line) in result.materials.iter() {
        out.push_str(&format!(
            "  {:<10} {:>12.2} {:>14} {:>18}\n",
            material.name(),
            line.quantity,
            Pesos(line.unit_price).format_amount(),
            Pesos(line.total_price).format_amount(),
        ));
    }
    out.push_str(&format!("  {}\n", "─".repeat(57)));
    out.push_str(&format!(
        "  {:<10} {:>46}\n\n",
        "TOTAL",
        Pesos(result.total_cost).format_amount()
    ));

    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("  {}\n", result.budget_status));
    out.push_str(&format!("{rule}\n"));
    out
}

pub fn model(size: &str, style: &str, output: Option<&Path>) -> Result<()> {
    let size = coerce_positive_integer("size", Some(&Value::String(size.to_string())))?;
    let style: DesignStyle = style.parse()?;
    let obj = BoxModel::placeholder(size, style)?.to_obj();

    match output {
        Some(path) => {
            fs::write(path, obj).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote placeholder model to {}", path.display());
            println!("Model written to {}", path.display());
        }
        None => {
            io::stdout().write_all(obj.as_bytes())?;
        }
    }
    Ok(())
}

pub fn report(
    catalog: &StyleCatalog,
    budget: &str,
    size: &str,
    style: &str,
    output: &Path,
    prepared_for: &str,
) -> Result<()> {
    let request = parse_request(budget, size, style)?;
    let result = estimate_request(catalog, &request)?;

    info!("Rendering PDF report for {} m² {}", request.size, request.design_style);
    let pdf = render_estimate_pdf(&request, &result, prepared_for)?;
    fs::write(output, pdf).with_context(|| format!("writing {}", output.display()))?;

    println!("Report written to {}", output.display());
    Ok(())
}

pub fn catalog_show(catalog: &StyleCatalog) -> Result<()> {
    println!("{}", catalog.to_json_pretty()?);
    Ok(())
}

pub fn catalog_init(output: &Path) -> Result<()> {
    if output.exists() {
        bail!("{} already exists; refusing to overwrite", output.display());
    }
    save_catalog(StyleCatalog::builtin()?, output)?;
    println!("Reference catalog written to {}", output.display());
    Ok(())
}

pub fn catalog_set_price(
    path: Option<&Path>,
    style: &str,
    material: &str,
    price: f64,
) -> Result<()> {
    let Some(path) = path else {
        bail!("set-price needs a catalog file (--catalog PATH)");
    };
    let style: DesignStyle = style.parse()?;
    let material = Material::from_str_flexible(material)?;

    let mut catalog = load_catalog(path)?;
    let previous = catalog.set_unit_price(style, material, price)?;
    save_catalog(&catalog, path)?;

    info!(
        "{} {} price changed from {} to {} in {}",
        style,
        material,
        previous,
        price,
        path.display()
    );
    println!(
        "{} {}: {} -> {}",
        style,
        material,
        Pesos(previous),
        Pesos(price)
    );
    Ok(())
}
