//! Trays with compartments

use super::{positive, Sheet};
use crate::args::{ArgGroup, ArgSpec, ParsedArgs};
use crate::generator::{default_group, Generator, Result, UiGroup};
use crate::render::Document;

/// Open tray split into compartments by sliding dividers
pub struct DividerTray {
    groups: Vec<ArgGroup>,
}

impl DividerTray {
    pub fn new() -> Self {
        Self {
            groups: vec![
                default_group(),
                ArgGroup::new("Compartments")
                    .arg(ArgSpec::sections(
                        "sx",
                        "50*3",
                        "compartment widths from left to right, e.g. 50*3:60",
                    ))
                    .arg(ArgSpec::float("y", 100.0, "inner depth in mm"))
                    .arg(ArgSpec::float("h", 50.0, "inner height in mm")),
            ],
        }
    }
}

impl Default for DividerTray {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for DividerTray {
    fn summary(&self) -> &'static str {
        "Open tray with dividers between compartments"
    }

    fn description(&self) -> Option<&'static str> {
        Some(
            "An open tray whose interior is split along the width into \
             compartments. One divider wall is cut per boundary between \
             two compartments.",
        )
    }

    fn ui_group(&self) -> UiGroup {
        UiGroup::Trays
    }

    fn arg_groups(&self) -> &[ArgGroup] {
        &self.groups
    }

    fn render(&self, args: &ParsedArgs, doc: &mut Document) -> Result<()> {
        let thickness = positive("thickness", args.f64("thickness")?)?;
        let y = positive("y", args.f64("y")?)?;
        let h = positive("h", args.f64("h")?)?;
        let sx = args.sections("sx")?;

        // inner width: compartments plus one divider wall per boundary
        let dividers = sx.len() - 1;
        let width = sx.iter().sum::<f64>() + dividers as f64 * thickness;

        let mut sheet = Sheet::new(doc, args)?;
        sheet.panel(width, y, "bottom");
        sheet.next_row();
        sheet.panel(width, h, "front");
        sheet.panel(width, h, "back");
        sheet.next_row();
        sheet.panel(y, h, "left");
        sheet.panel(y, h, "right");
        if dividers > 0 {
            sheet.next_row();
            for i in 1..=dividers {
                sheet.panel(y, h, &format!("divider {i}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{count_panels, render_svg};

    #[test]
    fn test_default_tray_has_two_dividers() {
        // 50*3 -> three compartments, two dividers, five walls and a bottom
        let svg = render_svg(&DividerTray::new(), &[]);
        assert_eq!(count_panels(&svg), 7);
        assert!(svg.contains("divider 1"));
        assert!(svg.contains("divider 2"));
    }

    #[test]
    fn test_single_compartment_has_no_dividers() {
        let svg = render_svg(&DividerTray::new(), &[("sx", "80")]);
        assert_eq!(count_panels(&svg), 5);
        assert!(!svg.contains("divider"));
    }

    #[test]
    fn test_compartments_and_walls_add_up() {
        // 40:30:20 plus two 3 mm dividers = 96 mm inner width. The widest
        // row is front and back side by side: 96*2 + 10 gap + 20 margin.
        let svg = render_svg(
            &DividerTray::new(),
            &[("sx", "40:30:20"), ("burn", "0"), ("thickness", "3"), ("y", "30")],
        );
        assert!(svg.contains("width=\"222mm\""));
    }

    #[test]
    fn test_repeat_syntax_expands() {
        let svg = render_svg(&DividerTray::new(), &[("sx", "25*4")]);
        assert!(svg.contains("divider 3"));
        assert!(!svg.contains("divider 4"));
    }
}
