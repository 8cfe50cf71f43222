/// Serialize a closed outline polygon as an SVG path.
///
/// Consecutive outline points become quadratic curves through their
/// midpoints (wrapping from the last point back to the first), which keeps
/// the rendered edge smooth without fitting splines. Empty input yields an
/// empty string.
pub fn outline_to_svg_path(outline: &[[f32; 2]]) -> String {
    if outline.is_empty() {
        return String::new();
    }

    let mut d = String::with_capacity(outline.len() * 24);
    let [x0, y0] = outline[0];
    d.push_str(&format!("M {x0} {y0} Q"));

    for (i, &[x, y]) in outline.iter().enumerate() {
        let [nx, ny] = outline[(i + 1) % outline.len()];
        let mx = (x + nx) / 2.0;
        let my = (y + ny) / 2.0;
        d.push_str(&format!(" {x} {y} {mx} {my}"));
    }

    d.push_str(" Z");
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_outline_yields_empty_path() {
        assert_eq!(outline_to_svg_path(&[]), "");
    }

    #[test]
    fn path_is_closed_and_starts_at_first_point() {
        let path = outline_to_svg_path(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
        assert!(path.starts_with("M 0 0 Q"));
        assert!(path.ends_with("Z"));
        // One control pair per outline point, wrapping to the start.
        assert!(path.contains("5 5"), "midpoint of last->first missing: {path}");
    }
}
