//! ASCII DXF writer
//!
//! Emits an R12-compatible ENTITIES section with LINE and TEXT entities.
//! Coordinates are flipped to y-up, which is what DXF consumers expect.

use super::{Document, DOCUMENT_MARGIN};

pub(crate) fn write(doc: &Document) -> String {
    let (min_x, _, _, max_y) = doc.bounds().unwrap_or((0.0, 0.0, 0.0, 0.0));
    let dx = DOCUMENT_MARGIN - min_x;
    // flip around the drawing's vertical extent
    let flip = |y: f64| (max_y - y) + DOCUMENT_MARGIN;

    let mut out = String::new();
    push_pair(&mut out, 0, "SECTION");
    push_pair(&mut out, 2, "ENTITIES");

    for line in doc.polylines() {
        for pair in line.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            push_pair(&mut out, 0, "LINE");
            push_pair(&mut out, 8, "0");
            push_pair(&mut out, 10, &num(x0 + dx));
            push_pair(&mut out, 20, &num(flip(y0)));
            push_pair(&mut out, 11, &num(x1 + dx));
            push_pair(&mut out, 21, &num(flip(y1)));
        }
    }

    for span in doc.texts() {
        let (x, y) = span.position;
        push_pair(&mut out, 0, "TEXT");
        push_pair(&mut out, 8, "0");
        push_pair(&mut out, 10, &num(x + dx));
        push_pair(&mut out, 20, &num(flip(y)));
        push_pair(&mut out, 40, &num(span.size));
        push_pair(&mut out, 1, &span.content);
    }

    push_pair(&mut out, 0, "ENDSEC");
    push_pair(&mut out, 0, "EOF");
    out
}

fn push_pair(out: &mut String, code: u32, value: &str) {
    out.push_str(&format!("{}\n{}\n", code, value));
}

fn num(v: f64) -> String {
    format!("{:.3}", v)
}
