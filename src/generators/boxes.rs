//! Simple rectangular boxes

use super::{positive, Sheet};
use crate::args::{ArgGroup, ArgSpec, ParsedArgs};
use crate::generator::{default_group, Generator, GeneratorError, Result, UiGroup};
use crate::render::Document;

/// Edge lengths of the box interior, after the outside correction
struct BoxDims {
    x: f64,
    y: f64,
    h: f64,
}

impl BoxDims {
    fn from_args(args: &ParsedArgs) -> Result<Self> {
        let thickness = positive("thickness", args.f64("thickness")?)?;
        let mut x = positive("x", args.f64("x")?)?;
        let mut y = positive("y", args.f64("y")?)?;
        let mut h = positive("h", args.f64("h")?)?;

        if args.bool("outside")? {
            let walls = 2.0 * thickness;
            for (name, dim) in [("x", &mut x), ("y", &mut y), ("h", &mut h)] {
                if *dim <= walls {
                    return Err(GeneratorError::value(format!(
                        "`{name}` = {dim} mm leaves no room between two {thickness} mm walls"
                    )));
                }
                *dim -= walls;
            }
        }
        Ok(Self { x, y, h })
    }
}

fn dimension_group() -> ArgGroup {
    ArgGroup::new("Dimensions")
        .arg(ArgSpec::float("x", 100.0, "inner width in mm"))
        .arg(ArgSpec::float("y", 100.0, "inner depth in mm"))
        .arg(ArgSpec::float("h", 100.0, "inner height in mm"))
        .arg(ArgSpec::boolean(
            "outside",
            false,
            "treat x, y and h as outside measurements",
        ))
}

/// Box closed on all six sides
pub struct ClosedBox {
    groups: Vec<ArgGroup>,
}

impl ClosedBox {
    pub fn new() -> Self {
        Self {
            groups: vec![default_group(), dimension_group()],
        }
    }
}

impl Default for ClosedBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for ClosedBox {
    fn summary(&self) -> &'static str {
        "Fully closed box"
    }

    fn description(&self) -> Option<&'static str> {
        Some(
            "Six flat panels forming a closed box. Cut the top panel loose \
             or skip it at assembly time if the box needs to open.",
        )
    }

    fn ui_group(&self) -> UiGroup {
        UiGroup::Boxes
    }

    fn arg_groups(&self) -> &[ArgGroup] {
        &self.groups
    }

    fn render(&self, args: &ParsedArgs, doc: &mut Document) -> Result<()> {
        let dims = BoxDims::from_args(args)?;
        let mut sheet = Sheet::new(doc, args)?;
        sheet.panel(dims.x, dims.y, "bottom");
        sheet.panel(dims.x, dims.y, "top");
        sheet.next_row();
        sheet.panel(dims.x, dims.h, "front");
        sheet.panel(dims.x, dims.h, "back");
        sheet.next_row();
        sheet.panel(dims.y, dims.h, "left");
        sheet.panel(dims.y, dims.h, "right");
        Ok(())
    }
}

/// Box with an open top
pub struct OpenBox {
    groups: Vec<ArgGroup>,
}

impl OpenBox {
    pub fn new() -> Self {
        Self {
            groups: vec![default_group(), dimension_group()],
        }
    }
}

impl Default for OpenBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for OpenBox {
    fn summary(&self) -> &'static str {
        "Box with an open top"
    }

    fn ui_group(&self) -> UiGroup {
        UiGroup::Boxes
    }

    fn arg_groups(&self) -> &[ArgGroup] {
        &self.groups
    }

    fn render(&self, args: &ParsedArgs, doc: &mut Document) -> Result<()> {
        let dims = BoxDims::from_args(args)?;
        let mut sheet = Sheet::new(doc, args)?;
        sheet.panel(dims.x, dims.y, "bottom");
        sheet.next_row();
        sheet.panel(dims.x, dims.h, "front");
        sheet.panel(dims.x, dims.h, "back");
        sheet.next_row();
        sheet.panel(dims.y, dims.h, "left");
        sheet.panel(dims.y, dims.h, "right");
        Ok(())
    }
}
