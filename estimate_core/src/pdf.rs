//! # PDF Estimate Reports
//!
//! Renders an estimate as a one-page PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via placeholder replacement before compilation
//! - Fonts come from `typst-assets`, so no system fonts are needed
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::catalog::StyleCatalog;
//! use estimate_core::estimator::estimate_request;
//! use estimate_core::materials::DesignStyle;
//! use estimate_core::pdf::render_estimate_pdf;
//! use estimate_core::request::EstimateRequest;
//!
//! let catalog = StyleCatalog::builtin().unwrap();
//! let request = EstimateRequest { budget: 500_000, size: 30, design_style: DesignStyle::Modern };
//! let estimate = estimate_request(catalog, &request).unwrap();
//!
//! let pdf_bytes = render_estimate_pdf(&request, &estimate, "Dela Cruz Residence").unwrap();
//! std::fs::write("estimate.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{EstimateError, EstimateResult};
use crate::estimator::Estimate;
use crate::money::Pesos;
use crate::request::EstimateRequest;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

const ESTIMATE_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2.5cm, bottom: 2.5cm, left: 2cm, right: 2cm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Tantya Material Cost Estimate]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[{{PREPARED_FOR}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 11pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Material Cost Estimate]
    #v(4pt)
    #text(size: 14pt)[{{STYLE}} style, {{SIZE}} m#super[2]]
  ]
]

#v(12pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [Prepared for:], [{{PREPARED_FOR}}],
  [Design style:], [{{STYLE}}],
  [Floor area:], [{{SIZE}} m#super[2]],
  [Budget:], [PHP {{BUDGET}}],
)

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Materials

#table(
  columns: (1fr, auto, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, right, right),
  table.header([*Material*], [*Quantity*], [*Unit Price (PHP)*], [*Total (PHP)*]),
{{MATERIAL_ROWS}}
  table.cell(colspan: 3, align: right)[*Total Cost*], [*{{TOTAL_COST}}*],
)

#v(16pt)

#align(center)[
  #block(width: auto, fill: rgb("#d4edda"), inset: 16pt, radius: 4pt)[
    #text(size: 12pt)[{{BUDGET_STATUS}}]
  ]
]

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Quantities are derived from per-square-meter consumption rates for the selected style. \
  Prices are catalog prices at the time of the estimate and exclude labor.
]
"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render an estimate to PDF.
///
/// # Arguments
///
/// * `request` - The request the estimate answers
/// * `estimate` - A successful estimate for that request
/// * `prepared_for` - Client or project name for the header block
pub fn render_estimate_pdf(
    request: &EstimateRequest,
    estimate: &Estimate,
    prepared_for: &str,
) -> EstimateResult<Vec<u8>> {
    let source = ESTIMATE_TEMPLATE
        .replace("{{PREPARED_FOR}}", &escape_typst(prepared_for))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{STYLE}}", request.design_style.name())
        .replace("{{SIZE}}", &request.size.to_string())
        .replace("{{BUDGET}}", &Pesos(request.budget as f64).format_amount())
        .replace("{{MATERIAL_ROWS}}", &build_material_rows(estimate))
        .replace("{{TOTAL_COST}}", &Pesos(estimate.total_cost).format_amount())
        .replace("{{BUDGET_STATUS}}", &escape_typst(&estimate.budget_status));

    compile_pdf(source)
}

fn compile_pdf(source: String) -> EstimateResult<Vec<u8>> {
    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        EstimateError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        EstimateError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            // `//` and `/*` open comments
            '/' => "\\/".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

fn build_material_rows(estimate: &Estimate) -> String {
    estimate
        .materials
        .iter()
        .map(|(material, line)| {
            format!(
                "  [{}], [{:.2}], [{}], [{}],",
                material,
                line.quantity,
                Pesos(line.unit_price).format_amount(),
                Pesos(line.total_price).format_amount(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
