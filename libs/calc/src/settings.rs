//! Evaluation settings carried by the session instead of process globals.

/// Interpretation of bare (unitless) angle values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Angle {
    #[default]
    Degrees,
    Radians,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Unit assumed for angle values that carry none.
    pub angle: Angle,
    /// Fractional digits printed for floating point results before trailing
    /// zeros are stripped.
    pub precision: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            angle: Angle::Degrees,
            precision: 9,
        }
    }
}

impl Settings {
    pub fn is_default_rad(&self) -> bool {
        self.angle == Angle::Radians
    }
}
