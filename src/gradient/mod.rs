//! Gradient model: the single source of truth.
//!
//! `GradientState` owns the ordered color stops, the gradient kind and the
//! angle. Every mutation either succeeds or leaves the state untouched;
//! the stop count never leaves `MIN_STOPS..=MAX_STOPS`.

pub mod color;
pub mod error;
pub mod render;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use color::{random_color, ColorStop};
pub use error::{GradientError, GradientResult};
pub use render::{css_declaration, render};

/// Fewest stops a gradient may have.
pub const MIN_STOPS: usize = 2;

/// Most stops a gradient may have.
pub const MAX_STOPS: usize = 10;

/// Largest accepted angle, in degrees.
pub const MAX_ANGLE: u16 = 360;

/// Stops a fresh session starts with.
pub const DEFAULT_STOPS: [ColorStop; 2] = [
    ColorStop::from_rgb(0xff8c00),
    ColorStop::from_rgb(0xff0080),
];

/// Angle a fresh session starts with.
pub const DEFAULT_ANGLE: u16 = 90;

/// Gradient shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

impl GradientKind {
    pub fn toggled(self) -> Self {
        match self {
            GradientKind::Linear => GradientKind::Radial,
            GradientKind::Radial => GradientKind::Linear,
        }
    }

    /// Whether the angle contributes to output for this kind.
    pub fn uses_angle(self) -> bool {
        self == GradientKind::Linear
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradientKind::Linear => f.write_str("linear"),
            GradientKind::Radial => f.write_str("radial"),
        }
    }
}

/// Ordered stops + kind + angle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientState {
    stops: Vec<ColorStop>,
    kind: GradientKind,
    angle: u16,
}

impl Default for GradientState {
    fn default() -> Self {
        Self {
            stops: DEFAULT_STOPS.to_vec(),
            kind: GradientKind::Linear,
            angle: DEFAULT_ANGLE,
        }
    }
}

impl GradientState {
    /// Build a state from parts, validating every invariant.
    pub fn new(stops: Vec<ColorStop>, kind: GradientKind, angle: i64) -> GradientResult<Self> {
        if stops.len() < MIN_STOPS {
            return Err(GradientError::CapacityUnderflow { min: MIN_STOPS });
        }
        if stops.len() > MAX_STOPS {
            return Err(GradientError::CapacityExceeded { max: MAX_STOPS });
        }
        let angle = check_angle(angle)?;
        Ok(Self { stops, kind, angle })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    pub fn angle(&self) -> u16 {
        self.angle
    }

    pub fn can_add(&self) -> bool {
        self.stops.len() < MAX_STOPS
    }

    pub fn can_remove(&self) -> bool {
        self.stops.len() > MIN_STOPS
    }

    /// Set the kind. The angle is kept so switching back restores it.
    pub fn set_kind(&mut self, kind: GradientKind) {
        self.kind = kind;
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
    }

    /// Set the angle; anything outside `0..=360` is rejected.
    pub fn set_angle(&mut self, angle: i64) -> GradientResult<()> {
        self.angle = check_angle(angle)?;
        Ok(())
    }

    /// Move the angle by `delta`, clamping into range (keyboard slider).
    pub fn nudge_angle(&mut self, delta: i64) {
        let next = (self.angle as i64)
            .saturating_add(delta)
            .clamp(0, MAX_ANGLE as i64);
        self.angle = next as u16;
    }

    /// Append a stop. No-op with `CapacityExceeded` when full.
    pub fn add_stop(&mut self, color: ColorStop) -> GradientResult<()> {
        if !self.can_add() {
            return Err(GradientError::CapacityExceeded { max: MAX_STOPS });
        }
        self.stops.push(color);
        Ok(())
    }

    /// Append a randomly colored stop. Returns the new color.
    pub fn add_random_stop<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GradientResult<ColorStop> {
        if !self.can_add() {
            return Err(GradientError::CapacityExceeded { max: MAX_STOPS });
        }
        let color = random_color(rng);
        self.stops.push(color);
        Ok(color)
    }

    /// Remove the stop at `index`. No-op at the floor or out of bounds.
    pub fn remove_stop(&mut self, index: usize) -> GradientResult<ColorStop> {
        if !self.can_remove() {
            return Err(GradientError::CapacityUnderflow { min: MIN_STOPS });
        }
        self.check_index(index)?;
        Ok(self.stops.remove(index))
    }

    /// Replace the color at `index`.
    pub fn set_stop_color(&mut self, index: usize, color: ColorStop) -> GradientResult<()> {
        self.check_index(index)?;
        self.stops[index] = color;
        Ok(())
    }

    /// Parse `#rrggbb` and replace the color at `index`.
    pub fn set_stop_hex(&mut self, index: usize, hex: &str) -> GradientResult<()> {
        self.check_index(index)?;
        let color = ColorStop::parse(hex)?;
        self.stops[index] = color;
        Ok(())
    }

    /// Fresh random colors for every stop and a fresh angle in `0..=360`.
    ///
    /// With `preserve_count` the stop count is unchanged; otherwise it is
    /// redrawn uniformly in `MIN_STOPS..=MAX_STOPS`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, preserve_count: bool) {
        let count = if preserve_count {
            self.stops.len()
        } else {
            rng.gen_range(MIN_STOPS..=MAX_STOPS)
        };
        self.stops = (0..count).map(|_| random_color(&mut *rng)).collect();
        self.angle = rng.gen_range(0..=MAX_ANGLE);
    }

    fn check_index(&self, index: usize) -> GradientResult<()> {
        if index >= self.stops.len() {
            return Err(GradientError::IndexOutOfBounds {
                index,
                len: self.stops.len(),
            });
        }
        Ok(())
    }
}

fn check_angle(angle: i64) -> GradientResult<u16> {
    if (0..=MAX_ANGLE as i64).contains(&angle) {
        Ok(angle as u16)
    } else {
        Err(GradientError::AngleOutOfRange(angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hex(s: &str) -> ColorStop {
        ColorStop::parse(s).unwrap()
    }

    #[test]
    fn default_state() {
        let s = GradientState::default();
        assert_eq!(s.stops(), &[hex("#ff8c00"), hex("#ff0080")]);
        assert_eq!(s.kind(), GradientKind::Linear);
        assert_eq!(s.angle(), 90);
    }

    #[test]
    fn new_rejects_bad_parts() {
        let one = vec![hex("#000000")];
        assert_eq!(
            GradientState::new(one, GradientKind::Linear, 0),
            Err(GradientError::CapacityUnderflow { min: 2 })
        );
        let eleven = vec![hex("#000000"); 11];
        assert_eq!(
            GradientState::new(eleven, GradientKind::Linear, 0),
            Err(GradientError::CapacityExceeded { max: 10 })
        );
        let two = vec![hex("#000000"); 2];
        assert_eq!(
            GradientState::new(two, GradientKind::Linear, 361),
            Err(GradientError::AngleOutOfRange(361))
        );
    }

    #[test]
    fn nine_adds_reach_ten_and_further_adds_are_noops() {
        let mut s = GradientState::default();
        let results: Vec<_> = (0..9).map(|i| s.add_stop(ColorStop::from_rgb(i))).collect();
        assert!(results[..8].iter().all(Result::is_ok));
        assert_eq!(results[8], Err(GradientError::CapacityExceeded { max: 10 }));
        assert_eq!(s.len(), 10);

        let before = s.clone();
        assert_eq!(
            s.add_stop(hex("#123456")),
            Err(GradientError::CapacityExceeded { max: 10 })
        );
        assert_eq!(s, before);
    }

    #[test]
    fn add_random_stop_respects_capacity() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = GradientState::default();
        while s.can_add() {
            s.add_random_stop(&mut rng).unwrap();
        }
        assert_eq!(s.len(), MAX_STOPS);
        assert!(s.add_random_stop(&mut rng).is_err());
        assert_eq!(s.len(), MAX_STOPS);
    }

    #[test]
    fn remove_at_floor_is_noop() {
        let mut s = GradientState::default();
        let before = s.clone();
        for _ in 0..5 {
            assert_eq!(s.remove_stop(0), Err(GradientError::CapacityUnderflow { min: 2 }));
        }
        assert_eq!(s, before);
    }

    #[test]
    fn remove_out_of_bounds_is_noop() {
        let mut s = GradientState::default();
        s.add_stop(hex("#111111")).unwrap();
        let before = s.clone();
        assert_eq!(
            s.remove_stop(3),
            Err(GradientError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(s, before);
    }

    #[test]
    fn remove_middle_keeps_order() {
        let mut s = GradientState::default();
        s.add_stop(hex("#111111")).unwrap();
        let removed = s.remove_stop(1).unwrap();
        assert_eq!(removed, hex("#ff0080"));
        assert_eq!(s.stops(), &[hex("#ff8c00"), hex("#111111")]);
    }

    #[test]
    fn invariant_holds_under_mixed_sequences() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut s = GradientState::default();
        for _ in 0..500 {
            if rng.gen_bool(0.5) {
                let _ = s.add_random_stop(&mut rng);
            } else {
                let idx = rng.gen_range(0..12);
                let _ = s.remove_stop(idx);
            }
            assert!((MIN_STOPS..=MAX_STOPS).contains(&s.len()));
        }
    }

    #[test]
    fn set_stop_color_touches_only_target() {
        let mut s = GradientState::default();
        s.add_stop(hex("#111111")).unwrap();
        s.set_angle(33).unwrap();
        let before = s.clone();
        s.set_stop_hex(1, "#abcdef").unwrap();
        assert_eq!(s.stops()[0], before.stops()[0]);
        assert_eq!(s.stops()[1], hex("#abcdef"));
        assert_eq!(s.stops()[2], before.stops()[2]);
        assert_eq!(s.kind(), before.kind());
        assert_eq!(s.angle(), 33);
    }

    #[test]
    fn set_stop_color_rejects_bad_input() {
        let mut s = GradientState::default();
        let before = s.clone();
        assert!(matches!(s.set_stop_hex(0, "#xyz"), Err(GradientError::InvalidColor(_))));
        assert!(matches!(
            s.set_stop_color(2, hex("#000000")),
            Err(GradientError::IndexOutOfBounds { index: 2, len: 2 })
        ));
        assert_eq!(s, before);
    }

    #[test]
    fn set_angle_bounds() {
        let mut s = GradientState::default();
        s.set_angle(0).unwrap();
        s.set_angle(360).unwrap();
        assert_eq!(s.set_angle(-1), Err(GradientError::AngleOutOfRange(-1)));
        assert_eq!(s.set_angle(361), Err(GradientError::AngleOutOfRange(361)));
        assert_eq!(s.angle(), 360);
    }

    #[test]
    fn nudge_angle_clamps() {
        let mut s = GradientState::default();
        s.nudge_angle(-500);
        assert_eq!(s.angle(), 0);
        s.nudge_angle(15);
        assert_eq!(s.angle(), 15);
        s.nudge_angle(1000);
        assert_eq!(s.angle(), 360);
    }

    #[test]
    fn nudge_angle_saturates_on_extreme_deltas() {
        let mut s = GradientState::default();
        s.nudge_angle(i64::MAX);
        assert_eq!(s.angle(), MAX_ANGLE);
        s.nudge_angle(i64::MIN);
        assert_eq!(s.angle(), 0);
        s.nudge_angle(i64::MIN);
        assert_eq!(s.angle(), 0);
    }

    #[test]
    fn kind_toggle_retains_angle() {
        let mut s = GradientState::default();
        s.set_angle(200).unwrap();
        s.set_kind(GradientKind::Radial);
        assert!(!s.kind().uses_angle());
        s.toggle_kind();
        assert_eq!(s.kind(), GradientKind::Linear);
        assert_eq!(s.angle(), 200);
    }

    #[test]
    fn randomize_preserves_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = GradientState::default();
        for _ in 0..3 {
            s.add_stop(hex("#000000")).unwrap();
        }
        let before = s.clone();
        s.randomize(&mut rng, true);
        assert_eq!(s.len(), 5);
        assert_ne!(s.stops(), before.stops());
        assert!(s.angle() <= MAX_ANGLE);
    }

    #[test]
    fn randomize_without_preserve_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = GradientState::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            s.randomize(&mut rng, false);
            assert!((MIN_STOPS..=MAX_STOPS).contains(&s.len()));
            seen.insert(s.len());
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn kind_serde_lowercase() {
        let k: GradientKind = serde_yaml::from_str("radial").unwrap();
        assert_eq!(k, GradientKind::Radial);
        assert_eq!(GradientKind::Linear.to_string(), "linear");
    }
}
