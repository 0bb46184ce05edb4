//! SVG writer
//!
//! Serializes a finished [`Document`] as a standalone SVG file sized in mm,
//! with the drawing shifted so the margin surrounds the bounding box.

use super::{Document, DOCUMENT_MARGIN, STROKE_WIDTH};

pub(crate) fn write(doc: &Document) -> String {
    let (min_x, min_y, max_x, max_y) = doc.bounds().unwrap_or((0.0, 0.0, 0.0, 0.0));
    let width = max_x - min_x + 2.0 * DOCUMENT_MARGIN;
    let height = max_y - min_y + 2.0 * DOCUMENT_MARGIN;
    let dx = DOCUMENT_MARGIN - min_x;
    let dy = DOCUMENT_MARGIN - min_y;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}mm\" height=\"{h}mm\" \
         viewBox=\"0 0 {w} {h}\">\n",
        w = coord(width),
        h = coord(height),
    ));

    out.push_str(&format!(
        "  <g fill=\"none\" stroke=\"#000000\" stroke-width=\"{}\">\n",
        coord(STROKE_WIDTH)
    ));
    for line in doc.polylines() {
        let points: Vec<String> = line
            .points
            .iter()
            .map(|&(x, y)| format!("{},{}", coord(x + dx), coord(y + dy)))
            .collect();
        out.push_str(&format!(
            "    <polyline points=\"{}\" />\n",
            points.join(" ")
        ));
    }
    out.push_str("  </g>\n");

    for span in doc.texts() {
        let (x, y) = span.position;
        out.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"sans-serif\">{}</text>\n",
            coord(x + dx),
            coord(y + dy),
            coord(span.size),
            escape_xml(&span.content),
        ));
    }

    out.push_str("</svg>\n");
    out
}

/// Format a coordinate with up to three decimals, no trailing zeros
fn coord(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;

    #[test]
    fn test_coord_formatting() {
        assert_eq!(coord(10.0), "10");
        assert_eq!(coord(10.5), "10.5");
        assert_eq!(coord(0.125), "0.125");
        assert_eq!(coord(0.1234), "0.123");
        assert_eq!(coord(0.0), "0");
        assert_eq!(coord(-0.0), "0");
        assert_eq!(coord(-0.0004), "0");
    }

    #[test]
    fn test_drawing_shifted_into_margin() {
        let mut doc = Document::open(OutputFormat::Svg);
        doc.rect(100.0, 200.0, 50.0, 20.0);
        let svg = write(&doc);

        // 50x20 drawing plus 10mm margin on each side
        assert!(svg.contains("width=\"70mm\""));
        assert!(svg.contains("height=\"40mm\""));
        // top-left corner lands on the margin, not at 100,200
        assert!(svg.contains("10,10"));
    }

    #[test]
    fn test_text_escaped() {
        let mut doc = Document::open(OutputFormat::Svg);
        doc.rect(0.0, 0.0, 10.0, 10.0);
        doc.text((0.0, 5.0), 3.0, "a<b & \"c\"");
        let svg = write(&doc);
        assert!(svg.contains("a&lt;b &amp; &quot;c&quot;"));
        assert!(!svg.contains("a<b"));
    }
}
