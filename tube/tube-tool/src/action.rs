//! Interactive actions a tube responds to.

use std::fmt;

use crate::curve::BakedMesh;
use crate::settings::TubeSettings;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A scalar setting with a "reset to default" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResettableProperty {
    /// Handle length at the first anchor.
    HandleExt1,
    /// Handle length at the second anchor.
    HandleExt2,
    /// Radius multiplier at the first anchor.
    Point1Scale,
    /// Radius multiplier at the second anchor.
    Point2Scale,
    /// Global radius multiplier.
    MainScale,
}

impl ResettableProperty {
    /// Every resettable property.
    pub const ALL: [Self; 5] = [
        Self::HandleExt1,
        Self::HandleExt2,
        Self::Point1Scale,
        Self::Point2Scale,
        Self::MainScale,
    ];

    /// Properties restored together by [`TubeAction::ResetRadii`].
    pub const RADII: [Self; 3] = [Self::MainScale, Self::Point1Scale, Self::Point2Scale];

    /// Declared default.
    #[must_use]
    pub const fn default_value(self) -> f64 {
        match self {
            Self::HandleExt1 | Self::HandleExt2 => 2.0,
            Self::Point1Scale | Self::Point2Scale | Self::MainScale => 1.0,
        }
    }

    /// Current value in `settings`.
    #[must_use]
    pub fn value(self, settings: &TubeSettings) -> f64 {
        match self {
            Self::HandleExt1 => settings.handle_ext_1,
            Self::HandleExt2 => settings.handle_ext_2,
            Self::Point1Scale => settings.point1_scale,
            Self::Point2Scale => settings.point2_scale,
            Self::MainScale => settings.main_scale,
        }
    }

    fn field_mut(self, settings: &mut TubeSettings) -> &mut f64 {
        match self {
            Self::HandleExt1 => &mut settings.handle_ext_1,
            Self::HandleExt2 => &mut settings.handle_ext_2,
            Self::Point1Scale => &mut settings.point1_scale,
            Self::Point2Scale => &mut settings.point2_scale,
            Self::MainScale => &mut settings.main_scale,
        }
    }

    /// Restore the declared default in `settings`.
    pub fn apply_default(self, settings: &mut TubeSettings) {
        *self.field_mut(settings) = self.default_value();
    }
}

impl fmt::Display for ResettableProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HandleExt1 => "handle_ext_1",
            Self::HandleExt2 => "handle_ext_2",
            Self::Point1Scale => "point1_scale",
            Self::Point2Scale => "point2_scale",
            Self::MainScale => "main_scale",
        })
    }
}

/// A request from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TubeAction {
    /// Re-derive the tube from the live selection and settings.
    Recompute,
    /// Restore one property, then recompute.
    Reset(ResettableProperty),
    /// Restore all three radius scales, then recompute.
    ResetRadii,
    /// Bake the curve into a mesh and hide the curve.
    Finalize,
}

/// What a dispatched action produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The curve was rewritten.
    Updated,
    /// The curve was baked.
    Finalized(BakedMesh),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_agree_with_settings() {
        let defaults = TubeSettings::default();
        for prop in ResettableProperty::ALL {
            assert_relative_eq!(prop.value(&defaults), prop.default_value());
        }
    }

    #[test]
    fn apply_default_touches_one_field() {
        let mut s = TubeSettings::new().with_handle_ext(5.0, -3.0).with_scales(2.0, 3.0, 4.0);
        ResettableProperty::Point1Scale.apply_default(&mut s);
        assert_relative_eq!(s.point1_scale, 1.0);
        assert_relative_eq!(s.point2_scale, 4.0);
        assert_relative_eq!(s.main_scale, 2.0);
        assert_relative_eq!(s.handle_ext_1, 5.0);

        ResettableProperty::HandleExt2.apply_default(&mut s);
        assert_relative_eq!(s.handle_ext_2, 2.0);
        assert_eq!(ResettableProperty::HandleExt2.to_string(), "handle_ext_2");
    }
}
