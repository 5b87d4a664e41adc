//! Bounded numeric control that snaps to a recommended default.
//!
//! # Invariants
//! - Committed values always lie within `[min, max]`.
//! - Any input closer than [`SNAP_THRESHOLD`] to the default commits the
//!   default itself.

/// Distance from the default under which input snaps to it.
pub const SNAP_THRESHOLD: f64 = 0.5;
/// Distance from the default above which a value counts as modified.
pub const MODIFIED_EPSILON: f64 = 0.05;
/// Ranges with a maximum above this value are displayed as integers.
pub const INTEGER_DISPLAY_ABOVE: f64 = 100.0;

/// One snap step: returns `(committed_value, snapped)`.
///
/// Within tolerance the default is committed whether or not the control was
/// already snapped, so the previous snap state does not affect the result.
/// Outside it the raw value is committed and the snap clears.
pub fn snap(raw: f64, default_value: f64) -> (f64, bool) {
    if (raw - default_value).abs() < SNAP_THRESHOLD {
        (default_value, true)
    } else {
        (raw, false)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Display state shown under the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderHint {
    Default,
    Modified,
}

impl SliderHint {
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default value",
            Self::Modified => "Adjusted",
        }
    }
}

/// Slider state for one stat.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapSlider {
    value: f64,
    default_value: f64,
    min: f64,
    max: f64,
    step: f64,
    snapped: bool,
}

impl SnapSlider {
    /// Creates a slider resting on its default value.
    ///
    /// Reversed bounds are swapped; the default is clamped into range.
    /// Non-finite bounds collapse onto the default, a non-finite default
    /// falls back to the first finite bound (or `0.0`).
    pub fn new(default_value: f64, min: f64, max: f64, step: f64) -> Self {
        let default_value = finite_or(default_value, finite_or(min, finite_or(max, 0.0)));
        let min = finite_or(min, default_value);
        let max = finite_or(max, default_value);
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let default_value = default_value.clamp(min, max);
        Self {
            value: default_value,
            default_value,
            min,
            max,
            step: finite_or(step, 0.0),
            snapped: false,
        }
    }

    /// Starts the slider at a previously chosen value instead of the default.
    pub fn with_value(mut self, value: f64) -> Self {
        if value.is_finite() {
            self.value = value.clamp(self.min, self.max);
        }
        self
    }

    /// Applies one raw input change and returns the committed value.
    ///
    /// Non-finite input is ignored.
    pub fn input(&mut self, raw: f64) -> f64 {
        if !raw.is_finite() {
            return self.value;
        }
        let raw = raw.clamp(self.min, self.max);
        let (committed, snapped) = snap(raw, self.default_value);
        self.value = committed;
        self.snapped = snapped;
        committed
    }

    /// Returns to the default value.
    pub fn reset(&mut self) {
        self.value = self.default_value;
        self.snapped = true;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Increment the host widget quantizes raw input to.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_snapped(&self) -> bool {
        self.snapped
    }

    pub fn is_modified(&self) -> bool {
        (self.value - self.default_value).abs() > MODIFIED_EPSILON
    }

    pub fn hint(&self) -> SliderHint {
        if self.is_modified() {
            SliderHint::Modified
        } else {
            SliderHint::Default
        }
    }

    /// Position of the default marker along the track, in percent.
    pub fn default_marker_percent(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (self.default_value - self.min) / span * 100.0
    }

    /// Formats any value with this slider's display precision.
    pub fn format_value(&self, value: f64) -> String {
        if self.max > INTEGER_DISPLAY_ABOVE {
            format!("{}", value.round() as i64)
        } else {
            format!("{value:.1}")
        }
    }

    /// Current value for display.
    pub fn display(&self) -> String {
        self.format_value(self.value)
    }

    /// Value label with unit, followed by `/ <default>` once modified.
    pub fn display_with_default(&self, unit: &str) -> String {
        let mut label = self.display();
        if !unit.is_empty() {
            label.push(' ');
            label.push_str(unit);
        }
        if self.is_modified() {
            label.push_str(" / ");
            label.push_str(&self.format_value(self.default_value));
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::{snap, SliderHint, SnapSlider};

    #[test]
    fn input_near_default_snaps() {
        let mut slider = SnapSlider::new(7.0, 0.0, 21.0, 0.5);
        assert_eq!(slider.input(7.3), 7.0);
        assert!(slider.is_snapped());
        assert_eq!(slider.display(), "7.0");
        assert_eq!(slider.hint(), SliderHint::Default);
    }

    #[test]
    fn input_outside_tolerance_commits_raw_value() {
        let mut slider = SnapSlider::new(7.0, 0.0, 21.0, 0.5);
        slider.input(7.3);
        assert_eq!(slider.input(5.0), 5.0);
        assert!(!slider.is_snapped());
        assert_eq!(slider.display(), "5.0");
        assert_eq!(slider.display_with_default(""), "5.0 / 7.0");
    }

    #[test]
    fn stays_on_default_while_within_tolerance() {
        let mut slider = SnapSlider::new(7.0, 0.0, 21.0, 0.5);
        slider.input(7.4);
        assert_eq!(slider.input(6.6), 7.0);
        assert!(slider.is_snapped());
    }

    #[test]
    fn boundary_distance_does_not_snap() {
        assert_eq!(snap(7.5, 7.0), (7.5, false));
        assert_eq!(snap(6.6, 7.0), (7.0, true));
    }

    #[test]
    fn large_ranges_display_integers() {
        let mut slider = SnapSlider::new(1561.0, 1.0, 3122.0, 10.0);
        slider.input(1700.4);
        assert_eq!(slider.display(), "1700");
        assert_eq!(slider.display_with_default("uses"), "1700 uses / 1561");
    }

    #[test]
    fn input_is_clamped_and_non_finite_ignored() {
        let mut slider = SnapSlider::new(1.6, 0.1, 4.0, 0.1);
        assert_eq!(slider.input(9.0), 4.0);
        assert_eq!(slider.input(f64::NAN), 4.0);
        slider.reset();
        assert_eq!(slider.value(), 1.6);
    }

    #[test]
    fn nan_bounds_collapse_onto_default() {
        let mut low_nan = SnapSlider::new(1.0, f64::NAN, 5.0, 0.1);
        assert_eq!((low_nan.min(), low_nan.max()), (1.0, 5.0));
        assert_eq!(low_nan.input(2.0), 2.0);

        let mut high_nan = SnapSlider::new(1.0, 0.0, f64::NAN, 0.1);
        assert_eq!((high_nan.min(), high_nan.max()), (0.0, 1.0));
        assert_eq!(high_nan.input(3.0), 1.0);
        assert!(high_nan.is_snapped());
    }

    #[test]
    fn infinite_bounds_and_default_stay_usable() {
        let mut slider = SnapSlider::new(f64::INFINITY, f64::NEG_INFINITY, 10.0, f64::NAN);
        assert_eq!(slider.default_value(), 10.0);
        assert_eq!((slider.min(), slider.max()), (10.0, 10.0));
        assert_eq!(slider.step(), 0.0);
        assert_eq!(slider.input(-4.0), 10.0);
        assert_eq!(slider.with_value(f64::NAN).value(), 10.0);

        let all_nan = SnapSlider::new(f64::NAN, f64::NAN, f64::NAN, 0.5);
        assert_eq!(all_nan.value(), 0.0);
        assert_eq!(all_nan.display(), "0.0");
    }

    #[test]
    fn marker_position_handles_degenerate_range() {
        let slider = SnapSlider::new(5.0, 0.0, 20.0, 0.5);
        assert!((slider.default_marker_percent() - 25.0).abs() < f64::EPSILON);
        let flat = SnapSlider::new(0.0, 0.0, 0.0, 0.5);
        assert_eq!(flat.default_marker_percent(), 0.0);
    }
}
