//! Section-list syntax
//!
//! Compartmented generators take their inner dimensions as a compact string:
//! `:` separates sections and `v*n` repeats the width `v` n times, so
//! `50*3:60` expands to `[50, 50, 50, 60]`.

/// Upper bound on the expanded section count for one argument
pub const MAX_SECTIONS: usize = 1000;

/// Expand a section string into individual widths.
///
/// Returns a human-readable reason on failure; callers wrap it into the
/// argument error naming the field.
pub fn parse_sections(input: &str) -> Result<Vec<f64>, String> {
    let mut result = Vec::new();

    for term in input.split(':') {
        let term = term.trim();
        if term.is_empty() {
            return Err("empty section".to_string());
        }

        let (value, count) = match term.split_once('*') {
            None => (term, 1usize),
            Some((value, count)) => {
                let count: usize = count
                    .trim()
                    .parse()
                    .map_err(|_| format!("bad repeat count {:?}", count.trim()))?;
                (value.trim(), count)
            }
        };

        let width: f64 = value
            .parse()
            .map_err(|_| format!("bad section width {:?}", value))?;
        if !width.is_finite() || width <= 0.0 {
            return Err(format!("section width must be positive, got {:?}", value));
        }
        if count == 0 {
            return Err("repeat count must be at least 1".to_string());
        }

        // bound count on its own first so the sum cannot overflow
        if count > MAX_SECTIONS || result.len() + count > MAX_SECTIONS {
            return Err(format!("more than {} sections", MAX_SECTIONS));
        }
        result.extend(std::iter::repeat(width).take(count));
    }

    if result.is_empty() {
        return Err("need at least one section".to_string());
    }
    Ok(result)
}
