use std::convert::Infallible;

/// One caption line after greedy wrapping, with its nominal drawing position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WrappedLine {
    /// Line text, words joined by single spaces (trailing space kept).
    pub text: String,
    /// Left edge of the line.
    pub x: f64,
    /// Nominal baseline before bottom anchoring.
    pub y: f64,
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Words are split on single spaces. A word that does not fit starts a new line, except the
/// first word of the caption, which always stays. Empty input yields no lines.
pub fn wrap_text(
    mut measure: impl FnMut(&str) -> f64,
    text: &str,
    origin_x: f64,
    origin_y: f64,
    max_width: f64,
    line_height: f64,
) -> Vec<WrappedLine> {
    let out: Result<_, Infallible> = try_wrap_text(
        |s| Ok(measure(s)),
        text,
        origin_x,
        origin_y,
        max_width,
        line_height,
    );
    match out {
        Ok(lines) => lines,
        Err(never) => match never {},
    }
}

/// [`wrap_text`] with a fallible measurement function.
pub fn try_wrap_text<E>(
    mut measure: impl FnMut(&str) -> Result<f64, E>,
    text: &str,
    origin_x: f64,
    origin_y: f64,
    max_width: f64,
    line_height: f64,
) -> Result<Vec<WrappedLine>, E> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let words: Vec<&str> = text.split(' ').collect();
    let last = words.len() - 1;

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut candidate = String::new();
    let mut y = origin_y;

    for (n, word) in words.iter().enumerate() {
        candidate.push_str(word);
        candidate.push(' ');

        if measure(&candidate)? > max_width && n > 0 {
            lines.push(WrappedLine {
                text: std::mem::take(&mut line),
                x: origin_x,
                y,
            });
            y += line_height;

            candidate.clear();
            candidate.push_str(word);
            candidate.push(' ');
            line.push_str(&candidate);
        } else {
            line.push_str(word);
            line.push(' ');
        }

        if n == last {
            lines.push(WrappedLine {
                text: std::mem::take(&mut line),
                x: origin_x,
                y,
            });
        }
    }

    Ok(lines)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
