//! Primary ray generation for a pinhole camera.

use glint_core::Camera;
use glint_math::{Mat4Ext, Ray, Vec2, Vec3};

/// Generate the ray through image-plane coordinate `uv` in [0,1)².
///
/// `uv = (0, 0)` is the top-left corner of the image. The film is fit to the
/// camera aspect by shrinking its shorter side.
pub fn eval_camera(camera: &Camera, uv: Vec2) -> Ray {
    let film = if camera.aspect >= 1.0 {
        Vec2::new(camera.film, camera.film / camera.aspect)
    } else {
        Vec2::new(camera.film * camera.aspect, camera.film)
    };
    let sensor = Vec3::new(film.x * (0.5 - uv.x), film.y * (uv.y - 0.5), camera.lens);
    let q = camera.frame.transform_point3(sensor);
    let e = camera.frame.frame_origin();
    Ray::new(e, e - q)
}

/// Image-plane coordinate of pixel `(i, j)` offset by `offset` in [0,1)².
#[inline]
pub fn pixel_uv(i: u32, j: u32, width: u32, height: u32, offset: Vec2) -> Vec2 {
    Vec2::new(
        (i as f32 + offset.x) / width as f32,
        (j as f32 + offset.y) / height as f32,
    )
}
