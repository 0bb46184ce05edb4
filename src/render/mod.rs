//! Document surface for generator output
//!
//! Generators draw polylines and text spans onto a [`Document`]; closing the
//! document serializes everything drawn into the selected output format.
//! The writers here are deliberately small: they emit well-formed files, not
//! a general vector-graphics backend.

mod dxf;
mod svg;

use std::fmt;
use std::path::Path;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Margin added around the drawing's bounding box, in mm
pub const DOCUMENT_MARGIN: f64 = 10.0;

/// Stroke width used by the SVG writer, in mm
pub const STROKE_WIDTH: f64 = 0.1;

// ============================================================
// Error Types
// ============================================================

/// Document serialization errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document is empty, nothing was drawn")]
    EmptyDocument,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

// ============================================================
// Output Format
// ============================================================

/// Output formats a generator instance can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Scalable Vector Graphics
    #[default]
    Svg,
    /// ASCII DXF (R12 subset, LINE and TEXT entities)
    Dxf,
}

impl OutputFormat {
    /// All format identifiers, as offered in the `format` form field
    pub const CHOICES: &'static [&'static str] = &["svg", "dxf"];

    /// Parse a format identifier
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "svg" => Some(OutputFormat::Svg),
            "dxf" => Some(OutputFormat::Dxf),
            _ => None,
        }
    }

    /// Identifier used in the form and the query string
    pub fn id(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Dxf => "dxf",
        }
    }

    /// MIME content type for HTTP responses
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Dxf => "image/vnd.dxf",
        }
    }

    /// Filename extension without the dot
    pub fn extension(&self) -> &'static str {
        self.id()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ============================================================
// Drawing Primitives
// ============================================================

/// A point in document space, mm, y pointing down
pub type Point = (f64, f64);

/// An open polyline
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
}

/// A text span anchored at its baseline start
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub position: Point,
    /// Font size in mm
    pub size: f64,
    pub content: String,
}

// ============================================================
// Document
// ============================================================

/// An in-progress drawing; one per generator invocation
#[derive(Debug, Clone)]
pub struct Document {
    format: OutputFormat,
    polylines: Vec<Polyline>,
    texts: Vec<TextSpan>,
}

impl Document {
    /// Open a fresh document for the given format
    pub fn open(format: OutputFormat) -> Self {
        Self {
            format,
            polylines: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// The format this document will serialize to
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Draw an open polyline; segments with fewer than two points are dropped
    pub fn poly(&mut self, points: Vec<Point>) {
        if points.len() >= 2 {
            self.polylines.push(Polyline { points });
        }
    }

    /// Draw an axis-aligned rectangle outline
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.poly(vec![
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
            (x, y),
        ]);
    }

    /// Draw a text label
    pub fn text(&mut self, position: Point, size: f64, content: impl Into<String>) {
        self.texts.push(TextSpan {
            position,
            size,
            content: content.into(),
        });
    }

    /// Whether anything has been drawn yet
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty() && self.texts.is_empty()
    }

    /// Bounding box of everything drawn: (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        let mut include = |x: f64, y: f64| {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        };

        for line in &self.polylines {
            for &(x, y) in &line.points {
                include(x, y);
            }
        }
        for span in &self.texts {
            let (x, y) = span.position;
            include(x, y - span.size);
            // crude advance estimate, enough to keep labels inside the sheet
            include(x + span.content.chars().count() as f64 * span.size * 0.6, y);
        }
        bounds
    }

    pub(crate) fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub(crate) fn texts(&self) -> &[TextSpan] {
        &self.texts
    }

    /// Finish the document and serialize it
    pub fn close(self) -> Result<RenderedDocument> {
        if self.is_empty() {
            return Err(RenderError::EmptyDocument);
        }
        let bytes = match self.format {
            OutputFormat::Svg => svg::write(&self).into_bytes(),
            OutputFormat::Dxf => dxf::write(&self).into_bytes(),
        };
        Ok(RenderedDocument {
            format: self.format,
            bytes,
        })
    }
}

/// A finished, serialized document
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    format: OutputFormat,
    bytes: Vec<u8>,
}

impl RenderedDocument {
    /// The serialized file contents
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take ownership of the serialized file contents
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The format the document was serialized as
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write the document to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}
