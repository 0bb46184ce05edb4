//! Machine calibration parts
//!
//! Not shown in the menu; reachable by name for people who know they
//! need one.

use super::{positive, LABEL_SIZE, PANEL_GAP};
use crate::args::{ArgGroup, ArgSpec, ParsedArgs};
use crate::generator::{default_group, Generator, GeneratorError, Result, UiGroup};
use crate::render::Document;

const MAX_SQUARES: i64 = 24;

/// Row of test squares with increasing burn correction
pub struct BurnTest {
    groups: Vec<ArgGroup>,
}

impl BurnTest {
    pub fn new() -> Self {
        Self {
            groups: vec![
                default_group(),
                ArgGroup::new("Test Pattern")
                    .arg(ArgSpec::float("size", 50.0, "edge length of one test square in mm"))
                    .arg(ArgSpec::float("step", 0.02, "burn increase from one square to the next"))
                    .arg(ArgSpec::int("count", 5, "number of test squares")),
            ],
        }
    }
}

impl Default for BurnTest {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for BurnTest {
    fn summary(&self) -> &'static str {
        "Test pattern to find the right burn value"
    }

    fn description(&self) -> Option<&'static str> {
        Some(
            "Cuts a row of squares, each compensated with a slightly larger \
             burn value than the one before. Measure the squares and keep \
             the burn value of the one that comes out at the requested size.",
        )
    }

    fn ui_group(&self) -> UiGroup {
        UiGroup::Unstable
    }

    fn hidden(&self) -> bool {
        true
    }

    fn arg_groups(&self) -> &[ArgGroup] {
        &self.groups
    }

    fn render(&self, args: &ParsedArgs, doc: &mut Document) -> Result<()> {
        let size = positive("size", args.f64("size")?)?;
        let step = args.f64("step")?;
        if step < 0.0 {
            return Err(GeneratorError::value(format!(
                "`step` must not be negative, got {step}"
            )));
        }
        let count = args.i64("count")?;
        if !(1..=MAX_SQUARES).contains(&count) {
            return Err(GeneratorError::value(format!(
                "`count` must be between 1 and {MAX_SQUARES}, got {count}"
            )));
        }
        let base = args.f64("burn")?;
        let labels = args.bool("labels")?;

        let mut x = 0.0;
        for i in 0..count {
            let burn = base + i as f64 * step;
            doc.rect(x - burn, -burn, size + 2.0 * burn, size + 2.0 * burn);
            if labels {
                doc.text((x + size / 4.0, size / 2.0), LABEL_SIZE, format!("{burn:.2}"));
            }
            x += size + PANEL_GAP;
        }
        Ok(())
    }
}
