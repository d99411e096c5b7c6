//! Environment lighting evaluated for rays that leave the scene.

use glint_math::Vec3;

use crate::material::Color;

/// Radiance arriving from infinitely far away.
#[derive(Clone, Debug, PartialEq)]
pub enum Environment {
    /// Same radiance from every direction.
    Constant(Color),
    /// Vertical blend from `horizon` (pointing down) to `zenith` (pointing up).
    Gradient { horizon: Color, zenith: Color },
}

impl Environment {
    /// The classic white-to-blue sky.
    pub fn sky() -> Self {
        Environment::Gradient {
            horizon: Color::new(1.0, 1.0, 1.0),
            zenith: Color::new(0.5, 0.7, 1.0),
        }
    }

    /// Radiance arriving along the reversed unit `direction`.
    pub fn eval(&self, direction: Vec3) -> Color {
        match self {
            Environment::Constant(emission) => *emission,
            Environment::Gradient { horizon, zenith } => {
                let a = 0.5 * (direction.y + 1.0);
                *horizon * (1.0 - a) + *zenith * a
            }
        }
    }
}
