//! Wet-surface look: a glossy overlay tinted by a saturation and vignette grade.

use glint_core::Color;
use glint_math::{Vec2, Vec3, Vec4};

/// Rec. 709 luma weights.
const LUMA: Vec3 = Vec3::new(0.2126, 0.7152, 0.0722);

const SATURATION: f32 = 1.7;
const VIGNETTE_STRENGTH: f32 = 0.15;

/// Tint applied to wet reflections at texture coordinate `uv`.
///
/// The color is brightened (square root), over-saturated, then darkened toward
/// the edges of a frame `resolution` pixels wide.
pub fn wet_tint(color: Color, uv: Vec2, resolution: u32) -> Vec4 {
    let color = Vec3::new(color.x.sqrt(), color.y.sqrt(), color.z.sqrt());
    let color = saturate(color, SATURATION);

    let res = resolution as f32;
    let st = uv / Vec2::new(res, res * 300.0 / 720.0) * 2.0 - 1.0;
    let vignette = smoothstep(1.2, 0.7, st.y.abs()) * smoothstep(1.1, 0.8, st.x.abs());

    (color * (1.0 - (1.0 - vignette) * VIGNETTE_STRENGTH)).extend(1.0)
}

/// Push `color` away from (t > 1) or toward (t < 1) its luma.
fn saturate(color: Vec3, t: f32) -> Vec3 {
    Vec3::splat(color.dot(LUMA)).lerp(color, t)
}

/// Hermite step; `a > b` gives a falling edge.
#[inline]
fn smoothstep(a: f32, b: f32, x: f32) -> f32 {
    let t = ((x - a) / (b - a)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        // Falling edge
        assert_eq!(smoothstep(1.2, 0.7, 0.0), 1.0);
        assert_eq!(smoothstep(1.2, 0.7, 2.0), 0.0);
    }

    #[test]
    fn test_saturate_keeps_greys() {
        let grey = Vec3::splat(0.5);
        assert!((saturate(grey, SATURATION) - grey).length() < 1e-6);

        let red = Vec3::new(1.0, 0.0, 0.0);
        let boosted = saturate(red, SATURATION);
        assert!(boosted.x > 1.0);
        assert!(boosted.y < 0.0);
    }

    #[test]
    fn test_wet_tint() {
        let tint = wet_tint(Color::splat(0.25), Vec2::ZERO, 720);

        // sqrt(0.25) = 0.5, uv 0 maps to the frame corner (-1, -1)
        let vignette = smoothstep(1.2, 0.7, 1.0) * smoothstep(1.1, 0.8, 1.0);
        let expected = 0.5 * (1.0 - (1.0 - vignette) * VIGNETTE_STRENGTH);
        assert!((tint.x - expected).abs() < 1e-6);
        assert_eq!(tint.x, tint.z);
        assert_eq!(tint.w, 1.0);
    }
}
