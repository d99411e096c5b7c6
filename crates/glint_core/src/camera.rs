//! Pinhole camera description.

use glint_math::{look_at_frame, Mat4, Vec3};

/// A pinhole camera.
///
/// Distances are in scene units; the defaults describe a 50mm lens on a
/// 36mm-wide film.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera-to-world frame; the camera looks down its local -Z axis.
    pub frame: Mat4,

    /// Distance from the eye to the film plane
    pub lens: f32,

    /// Size of the film's longer side
    pub film: f32,

    /// Width over height
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            frame: Mat4::IDENTITY,
            lens: 0.050,
            film: 0.036,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    /// Camera at `eye` looking at `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            frame: look_at_frame(eye, target, up),
            ..Default::default()
        }
    }

    /// Set lens distance and film size.
    pub fn with_lens(mut self, lens: f32, film: f32) -> Self {
        self.lens = lens;
        self.film = film;
        self
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Image size whose longer side is `resolution` pixels, matching the aspect.
    pub fn image_size(&self, resolution: u32) -> (u32, u32) {
        if self.aspect >= 1.0 {
            let height = (resolution as f32 / self.aspect).round() as u32;
            (resolution, height.max(1))
        } else {
            let width = (resolution as f32 * self.aspect).round() as u32;
            (width.max(1), resolution)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_size_landscape() {
        let camera = Camera::default();
        assert_eq!(camera.image_size(1280), (1280, 720));
    }

    #[test]
    fn test_image_size_portrait() {
        let camera = Camera::default().with_aspect(0.5);
        assert_eq!(camera.image_size(100), (50, 100));
    }

    #[test]
    fn test_image_size_square() {
        let camera = Camera::default().with_aspect(1.0);
        assert_eq!(camera.image_size(64), (64, 64));
    }
}
