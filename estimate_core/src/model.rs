//! # Placeholder Structure Model
//!
//! A box standing in for the building until real geometry exists: a square
//! footprint with the requested floor area and a single storey whose height
//! depends on the design style. Exported as Wavefront OBJ (Y-up, meters).
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::materials::DesignStyle;
//! use estimate_core::model::BoxModel;
//!
//! let model = BoxModel::placeholder(36, DesignStyle::Modern).unwrap();
//! assert_eq!(model.width_m, 6.0);
//! assert_eq!(model.height_m, 3.0);
//!
//! let obj = model.to_obj();
//! assert!(obj.contains("\nf 1 2 3 4\n"));
//! ```

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::materials::DesignStyle;

/// MIME type of the OBJ export
pub const OBJ_CONTENT_TYPE: &str = "model/obj";

/// Quad faces of the box, 1-based OBJ vertex indices, counter-clockwise seen
/// from outside.
const FACES: [[usize; 4]; 6] = [
    [1, 2, 3, 4], // bottom
    [5, 8, 7, 6], // top
    [1, 5, 6, 2], // front
    [2, 6, 7, 3], // right
    [3, 7, 8, 4], // back
    [4, 8, 5, 1], // left
];

/// Axis-aligned box with one corner at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxModel {
    /// Design style the box was generated for
    pub style: DesignStyle,
    /// Footprint extent along X (m)
    pub width_m: f64,
    /// Footprint extent along Z (m)
    pub depth_m: f64,
    /// Extent along Y (m)
    pub height_m: f64,
}

impl BoxModel {
    /// Placeholder for a floor area in square meters.
    pub fn placeholder(size: u64, style: DesignStyle) -> EstimateResult<Self> {
        if size == 0 {
            return Err(EstimateError::invalid_input(
                "size",
                "0",
                "Size must be positive",
            ));
        }

        let side = (size as f64).sqrt();
        Ok(BoxModel {
            style,
            width_m: side,
            depth_m: side,
            height_m: style.storey_height_m(),
        })
    }

    /// Footprint area (m²)
    pub fn footprint_m2(&self) -> f64 {
        self.width_m * self.depth_m
    }

    /// Enclosed volume (m³)
    pub fn volume_m3(&self) -> f64 {
        self.footprint_m2() * self.height_m
    }

    /// The 8 corners: bottom ring first, then the top ring, both
    /// counter-clockwise seen from above.
    pub fn vertices(&self) -> [[f64; 3]; 8] {
        let (w, h, d) = (self.width_m, self.height_m, self.depth_m);
        [
            [0.0, 0.0, 0.0],
            [w, 0.0, 0.0],
            [w, 0.0, -d],
            [0.0, 0.0, -d],
            [0.0, h, 0.0],
            [w, h, 0.0],
            [w, h, -d],
            [0.0, h, -d],
        ]
    }

    /// Quad faces as 1-based vertex indices
    pub fn faces(&self) -> [[usize; 4]; 6] {
        FACES
    }

    /// Render as Wavefront OBJ text.
    pub fn to_obj(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(out, "# Placeholder {} structure", self.style);
        let _ = writeln!(
            out,
            "# {:.2} m x {:.2} m footprint, {:.2} m tall",
            self.width_m, self.depth_m, self.height_m
        );
        let _ = writeln!(out, "o {}_box", self.style.name().to_lowercase());

        for [x, y, z] in self.vertices() {
            let _ = writeln!(out, "v {:.4} {:.4} {:.4}", x, y, z);
        }
        for [a, b, c, d] in self.faces() {
            let _ = writeln!(out, "f {} {} {} {}", a, b, c, d);
        }
        out
    }

    /// File name the HTTP service and CLI use for this model
    pub fn file_name(size: u64) -> String {
        format!("{}.obj", size)
    }
}
