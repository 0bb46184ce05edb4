//! Built-in generators
//!
//! The parts shipped with boxforge. Each submodule holds one family of
//! generators; [`registry`] assembles them into the shared lookup table the
//! web front end and the CLI both use.
//!
//! # Layout model
//!
//! Builtins lay their panels out flat on a virtual sheet, row by row, with
//! a fixed gap between parts. Panel outlines are inflated by the `burn`
//! value so cut parts come out at the requested size, and `labels` puts the
//! panel name in the middle of each outline.

mod boxes;
mod calibration;
mod trays;

pub use boxes::{ClosedBox, OpenBox};
pub use calibration::BurnTest;
pub use trays::DividerTray;

use crate::args::ParsedArgs;
use crate::generator::{GeneratorError, Registry, Result};
use crate::render::Document;

// ============================================================
// Constants
// ============================================================

/// Gap between panels on the sheet, in mm
pub(crate) const PANEL_GAP: f64 = 10.0;

/// Font size for panel labels, in mm
pub(crate) const LABEL_SIZE: f64 = 6.0;

// ============================================================
// Registry Assembly
// ============================================================

/// Build the registry of all built-in generators
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.register("BurnTest", || Box::new(BurnTest::new()));
    registry.register("ClosedBox", || Box::new(ClosedBox::new()));
    registry.register("DividerTray", || Box::new(DividerTray::new()));
    registry.register("OpenBox", || Box::new(OpenBox::new()));
    registry
}

// ============================================================
// Shared Helpers
// ============================================================

/// Validate that a dimension argument is strictly positive
pub(crate) fn positive(name: &str, value: f64) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(GeneratorError::value(format!(
            "`{name}` must be positive, got {value}"
        )))
    }
}

/// Row-based panel layout over a document.
///
/// Panels are placed left to right; `next_row` moves below the tallest
/// panel of the finished row. Outlines are inflated by the burn value.
pub(crate) struct Sheet<'a> {
    doc: &'a mut Document,
    burn: f64,
    labels: bool,
    x: f64,
    y: f64,
    row_height: f64,
}

impl<'a> Sheet<'a> {
    /// Start a sheet, reading `burn` and `labels` from the shared arguments
    pub(crate) fn new(doc: &'a mut Document, args: &ParsedArgs) -> Result<Self> {
        Ok(Self {
            burn: args.f64("burn")?,
            labels: args.bool("labels")?,
            doc,
            x: 0.0,
            y: 0.0,
            row_height: 0.0,
        })
    }

    /// Draw one `width` x `height` panel and advance the cursor
    pub(crate) fn panel(&mut self, width: f64, height: f64, label: &str) {
        self.doc.rect(
            self.x - self.burn,
            self.y - self.burn,
            width + 2.0 * self.burn,
            height + 2.0 * self.burn,
        );
        if self.labels {
            self.doc
                .text((self.x + width / 2.0, self.y + height / 2.0), LABEL_SIZE, label);
        }
        self.x += width + PANEL_GAP;
        self.row_height = self.row_height.max(height);
    }

    /// Finish the current row and start a new one below it
    pub(crate) fn next_row(&mut self) {
        self.x = 0.0;
        self.y += self.row_height + PANEL_GAP;
        self.row_height = 0.0;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ParsedArgs;
    use crate::generator::{run_generator, UiGroup};

    #[test]
    fn test_registry_contains_builtins() {
        let registry = registry();
        for name in ["ClosedBox", "OpenBox", "DividerTray", "BurnTest"] {
            assert!(registry.get(name).is_some(), "{name} missing");
        }
    }

    #[test]
    fn test_burn_test_hidden_from_menu() {
        let registry = registry();
        assert!(registry.get("BurnTest").unwrap().hidden());
        assert!(registry.visible().all(|e| e.name() != "BurnTest"));
    }

    #[test]
    fn test_menu_groups() {
        let registry = registry();
        let grouped = registry.by_group();
        let sections: Vec<UiGroup> = grouped.iter().map(|(g, _)| *g).collect();
        assert_eq!(sections, [UiGroup::Boxes, UiGroup::Trays]);
    }

    #[test]
    fn test_every_builtin_renders_with_defaults() {
        let registry = registry();
        for entry in registry.entries() {
            let gen = entry.instantiate();
            let args = ParsedArgs::defaults(gen.arg_groups());
            let rendered = run_generator(gen.as_ref(), &args)
                .unwrap_or_else(|e| panic!("{} failed with defaults: {e}", entry.name()));
            assert!(!rendered.bytes().is_empty());
        }
    }

    #[test]
    fn test_positive_rejects_zero_and_negative() {
        assert!(positive("x", 1.0).is_ok());
        assert!(positive("x", 0.0).is_err());
        assert!(positive("x", -3.0).is_err());
    }
}
