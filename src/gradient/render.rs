//! CSS text generation and color sampling.
//!
//! `render` is the derived gradient string; it is recomputed on demand and
//! never stored. `sample` evaluates the same gradient at a point so the
//! preview can paint it without a browser.

use super::{ColorStop, GradientKind, GradientState};

/// The CSS gradient function text.
///
/// ```text
/// linear-gradient(<angle>deg, <c0>, ..., <cN>)
/// radial-gradient(circle, <c0>, ..., <cN>)
/// ```
pub fn render(state: &GradientState) -> String {
    let colors = state
        .stops()
        .iter()
        .map(ColorStop::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    match state.kind() {
        GradientKind::Linear => format!("linear-gradient({}deg, {colors})", state.angle()),
        GradientKind::Radial => format!("radial-gradient(circle, {colors})"),
    }
}

/// The full declaration shown to the user and copied to the clipboard.
pub fn css_declaration(state: &GradientState) -> String {
    format!("background: {};", render(state))
}

/// Color of the evenly spaced stop ramp at `t` in [0, 1].
pub fn color_at(stops: &[ColorStop], t: f32) -> (u8, u8, u8) {
    match stops {
        [] => (0, 0, 0),
        [only] => (only.r(), only.g(), only.b()),
        _ => {
            let t = t.clamp(0.0, 1.0);
            let segments = (stops.len() - 1) as f32;
            let scaled = t * segments;
            let i = (scaled.floor() as usize).min(stops.len() - 2);
            stops[i].lerp(stops[i + 1], scaled - i as f32)
        }
    }
}

/// Sample the gradient at pixel `(x, y)` of a `width` × `height` box.
///
/// Geometry follows CSS: for linear gradients 0deg points up and angles
/// turn clockwise, with the gradient line sized so the corners hit the
/// first and last stops. Radial `circle` uses the farthest-corner radius.
pub fn sample(state: &GradientState, x: f32, y: f32, width: f32, height: f32) -> (u8, u8, u8) {
    if width <= 0.0 || height <= 0.0 {
        return color_at(state.stops(), 0.0);
    }
    let dx = x - width / 2.0;
    let dy = y - height / 2.0;
    let t = match state.kind() {
        GradientKind::Linear => {
            let rad = (state.angle() as f32).to_radians();
            let (sin, cos) = rad.sin_cos();
            let line = (width * sin).abs() + (height * cos).abs();
            if line == 0.0 {
                0.0
            } else {
                (dx * sin - dy * cos) / line + 0.5
            }
        }
        GradientKind::Radial => {
            let radius = (width / 2.0).hypot(height / 2.0);
            dx.hypot(dy) / radius
        }
    };
    color_at(state.stops(), t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(kind: GradientKind, angle: i64, stops: &[&str]) -> GradientState {
        let stops = stops.iter().map(|s| ColorStop::parse(s).unwrap()).collect();
        GradientState::new(stops, kind, angle).unwrap()
    }

    #[test]
    fn linear_example() {
        let s = state(GradientKind::Linear, 90, &["#ff8c00", "#ff0080"]);
        assert_eq!(render(&s), "linear-gradient(90deg, #ff8c00, #ff0080)");
    }

    #[test]
    fn radial_ignores_angle() {
        let s = state(GradientKind::Radial, 45, &["#000000", "#ffffff", "#ff0000"]);
        assert_eq!(render(&s), "radial-gradient(circle, #000000, #ffffff, #ff0000)");
    }

    #[test]
    fn render_is_idempotent() {
        let s = state(GradientKind::Linear, 0, &["#010203", "#a0b0c0"]);
        assert_eq!(render(&s), render(&s));
    }

    #[test]
    fn appended_stop_in_order() {
        let mut s = GradientState::default();
        s.add_stop(ColorStop::parse("#123456").unwrap()).unwrap();
        assert_eq!(
            render(&s),
            "linear-gradient(90deg, #ff8c00, #ff0080, #123456)"
        );
    }

    #[test]
    fn declaration_wraps_render() {
        let s = GradientState::default();
        assert_eq!(
            css_declaration(&s),
            "background: linear-gradient(90deg, #ff8c00, #ff0080);"
        );
    }

    #[test]
    fn color_at_hits_stops() {
        let s = state(GradientKind::Linear, 0, &["#000000", "#ff0000", "#ffffff"]);
        assert_eq!(color_at(s.stops(), 0.0), (0, 0, 0));
        assert_eq!(color_at(s.stops(), 0.5), (255, 0, 0));
        assert_eq!(color_at(s.stops(), 1.0), (255, 255, 255));
    }

    #[test]
    fn linear_90_runs_left_to_right() {
        let s = state(GradientKind::Linear, 90, &["#000000", "#ffffff"]);
        assert_eq!(sample(&s, 0.0, 5.0, 10.0, 10.0), (0, 0, 0));
        assert_eq!(sample(&s, 10.0, 5.0, 10.0, 10.0), (255, 255, 255));
    }

    #[test]
    fn linear_0_runs_bottom_to_top() {
        let s = state(GradientKind::Linear, 0, &["#000000", "#ffffff"]);
        assert_eq!(sample(&s, 5.0, 10.0, 10.0, 10.0), (0, 0, 0));
        assert_eq!(sample(&s, 5.0, 0.0, 10.0, 10.0), (255, 255, 255));
    }

    #[test]
    fn radial_center_is_first_stop() {
        let s = state(GradientKind::Radial, 0, &["#ff0000", "#0000ff"]);
        assert_eq!(sample(&s, 5.0, 5.0, 10.0, 10.0), (255, 0, 0));
        assert_eq!(sample(&s, 0.0, 0.0, 10.0, 10.0), (0, 0, 255));
    }
}
