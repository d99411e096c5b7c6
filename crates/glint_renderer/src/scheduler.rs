//! Sampling passes and the progressive render driver.
//!
//! A pass takes one new sample in every pixel. Pixels only touch their own
//! accumulator slot, hit counter and random stream, so the parallel policy
//! produces exactly the same state as the sequential one.

use glint_core::Camera;
use glint_math::{Vec2, Vec4};
use rayon::prelude::*;

use crate::camera::{eval_camera, pixel_uv};
use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::image::ImageBuffer;
use crate::oracle::SceneOracle;
use crate::sampling::RngStream;
use crate::shading::shade;
use crate::state::RenderState;

/// What a call to [`advance_pass`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// A pass was taken; `samples` passes are now complete.
    Advanced { samples: u32 },
    /// The configured sample count was already reached; nothing changed.
    Complete,
}

/// Take one sample per pixel and fold it into `state`.
///
/// The configuration is validated before any pixel is touched, so on error
/// the state is unchanged. Shading sees the state's resolution, not
/// `config.resolution`.
pub fn advance_pass<S: SceneOracle + ?Sized>(
    state: &mut RenderState,
    scene: &S,
    config: &RenderConfig,
) -> RenderResult<PassOutcome> {
    config.validate()?;
    if state.samples >= config.samples {
        return Ok(PassOutcome::Complete);
    }

    let config = &RenderConfig {
        resolution: state.resolution,
        ..config.clone()
    };
    let width = state.width;
    let height = state.height;
    let first = state.samples == 0;
    let camera = &state.camera;

    let pixel = |index: usize, sum: &mut Vec4, hits: &mut u32, rng: &mut RngStream| -> bool {
        let i = (index % width as usize) as u32;
        let j = (index / width as usize) as u32;
        let (radiance, finite) = sample_pixel(scene, camera, config, i, j, width, height, first, rng);
        *sum += radiance;
        *hits += 1;
        !finite
    };

    let anomalies = if config.parallel {
        state
            .image
            .par_iter_mut()
            .zip(state.hits.par_iter_mut())
            .zip(state.rngs.par_iter_mut())
            .enumerate()
            .map(|(index, ((sum, hits), rng))| pixel(index, sum, hits, rng))
            .filter(|anomaly| *anomaly)
            .count()
    } else {
        state
            .image
            .iter_mut()
            .zip(state.hits.iter_mut())
            .zip(state.rngs.iter_mut())
            .enumerate()
            .map(|(index, ((sum, hits), rng))| pixel(index, sum, hits, rng))
            .filter(|anomaly| *anomaly)
            .count()
    };

    state.samples += 1;
    log::debug!(
        "Pass {}/{} done ({} non-finite samples dropped)",
        state.samples,
        config.samples,
        anomalies
    );

    Ok(PassOutcome::Advanced {
        samples: state.samples,
    })
}

/// One radiance sample for pixel `(i, j)`; non-finite results become zero.
///
/// Returns the sample and whether the estimate was finite.
#[allow(clippy::too_many_arguments)]
fn sample_pixel<S: SceneOracle + ?Sized>(
    scene: &S,
    camera: &Camera,
    config: &RenderConfig,
    i: u32,
    j: u32,
    width: u32,
    height: u32,
    first: bool,
    rng: &mut RngStream,
) -> (Vec4, bool) {
    let offset = if first {
        Vec2::splat(0.5)
    } else {
        rng.rand2f()
    };
    let ray = eval_camera(camera, pixel_uv(i, j, width, height, offset));
    let radiance = shade(scene, &ray, rng, config);
    if radiance.is_finite() {
        (radiance, true)
    } else {
        (Vec4::ZERO, false)
    }
}

/// Render all configured passes and return the averaged image.
pub fn render<S: SceneOracle + ?Sized>(scene: &S, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    render_with_progress(scene, config, |_| {})
}

/// Like [`render`], calling `progress` with the state after every pass.
pub fn render_with_progress<S, F>(scene: &S, config: &RenderConfig, mut progress: F) -> RenderResult<ImageBuffer>
where
    S: SceneOracle + ?Sized,
    F: FnMut(&RenderState),
{
    config.validate()?;
    let mut state = RenderState::from_config(scene, config)?;
    log::info!(
        "Rendering {}x{} with {} samples, {} bounces, shader {}",
        state.width,
        state.height,
        config.samples,
        config.bounces,
        config.shader
    );

    while let PassOutcome::Advanced { .. } = advance_pass(&mut state, scene, config)? {
        progress(&state);
    }

    state.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShaderKind;
    use crate::error::RenderError;
    use crate::testing::PlaneScene;
    use glint_core::{Color, Environment, Material};
    use glint_math::Vec3;

    fn floor_scene(material: Material) -> PlaneScene {
        PlaneScene::new(material, Environment::sky())
            .with_camera(Camera::look_at(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO, Vec3::Y))
    }

    fn config(samples: u32) -> RenderConfig {
        RenderConfig::default()
            .with_quality(samples, 3)
            .with_resolution(16)
            .with_seed(42)
    }

    #[test]
    fn test_sequential_and_parallel_are_identical() {
        let scene = floor_scene(Material::glossy(Color::new(0.8, 0.5, 0.2), 0.3));
        let sequential = config(4).with_parallel(false);
        let parallel = config(4).with_parallel(true);

        let mut a = RenderState::from_config(&scene, &sequential).unwrap();
        let mut b = RenderState::from_config(&scene, &parallel).unwrap();
        for _ in 0..3 {
            advance_pass(&mut a, &scene, &sequential).unwrap();
            advance_pass(&mut b, &scene, &parallel).unwrap();
        }

        assert_eq!(a.accumulated(), b.accumulated());
        assert_eq!(a.hits(), b.hits());
        assert_eq!(a.snapshot().unwrap(), b.snapshot().unwrap());
    }

    #[test]
    fn test_passes_accumulate() {
        let scene = floor_scene(Material::matte(Color::splat(0.5)));
        let config = config(8);
        let mut state = RenderState::from_config(&scene, &config).unwrap();

        for k in 1..=3 {
            let outcome = advance_pass(&mut state, &scene, &config).unwrap();
            assert_eq!(outcome, PassOutcome::Advanced { samples: k });
            assert!(state.hits().iter().all(|h| *h == k));
        }

        let snapshot = state.snapshot().unwrap();
        for (pixel, sum) in snapshot.pixels.iter().zip(state.accumulated()) {
            assert_eq!(*pixel, *sum * (1.0 / 3.0));
        }
    }

    #[test]
    fn test_pass_after_target_is_noop() {
        let scene = floor_scene(Material::matte(Color::ONE));
        let config = config(2);
        let mut state = RenderState::from_config(&scene, &config).unwrap();

        advance_pass(&mut state, &scene, &config).unwrap();
        advance_pass(&mut state, &scene, &config).unwrap();
        let before = state.accumulated().to_vec();

        assert_eq!(advance_pass(&mut state, &scene, &config).unwrap(), PassOutcome::Complete);
        assert_eq!(state.samples(), 2);
        assert_eq!(state.accumulated(), before.as_slice());
    }

    #[test]
    fn test_invalid_config_leaves_state_untouched() {
        let scene = floor_scene(Material::matte(Color::ONE));
        let mut state = RenderState::from_config(&scene, &config(2)).unwrap();

        let mut bad = config(2);
        bad.samples = 0;
        assert!(matches!(
            advance_pass(&mut state, &scene, &bad),
            Err(RenderError::InvalidConfig(_))
        ));
        assert_eq!(state.samples(), 0);
        assert!(state.hits().iter().all(|h| *h == 0));
    }

    #[test]
    fn test_empty_scene_renders_environment() {
        let camera = Camera::look_at(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO, Vec3::Y);
        let scene = PlaneScene::empty(Environment::sky()).with_camera(camera.clone());
        let config = config(1);

        let image = render(&scene, &config).unwrap();
        for j in 0..image.height {
            for i in 0..image.width {
                let uv = pixel_uv(i, j, image.width, image.height, Vec2::splat(0.5));
                let direction = eval_camera(&camera, uv).direction();
                assert_eq!(image.get(i, j), Environment::sky().eval(direction).extend(1.0));
            }
        }
    }

    #[test]
    fn test_zero_bounces_renders_flat_emission() {
        let camera = Camera::look_at(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, Vec3::Z);
        let scene = PlaneScene::new(Material::emitter(Color::new(0.5, 1.0, 2.0)), Environment::sky())
            .with_camera(camera);
        let config = config(4).with_quality(4, 0);

        let image = render(&scene, &config).unwrap();
        assert!(image.pixels.iter().all(|p| *p == Vec4::new(0.5, 1.0, 2.0, 1.0)));
    }

    #[test]
    fn test_non_finite_samples_are_dropped() {
        let scene = floor_scene(Material::emitter(Color::splat(f32::NAN)));
        let config = config(2).with_shader(ShaderKind::Matte);
        let mut state = RenderState::from_config(&scene, &config).unwrap();

        advance_pass(&mut state, &scene, &config).unwrap();
        assert!(state.accumulated().iter().all(|c| c.is_finite()));
        assert!(state.hits().iter().all(|h| *h == 1));
    }

    #[test]
    fn test_progress_reports_every_pass() {
        let scene = floor_scene(Material::matte(Color::ONE));
        let config = config(3).with_shader(ShaderKind::Eyelight);

        let mut passes = Vec::new();
        let image = render_with_progress(&scene, &config, |state| passes.push(state.samples())).unwrap();

        assert_eq!(passes, vec![1, 2, 3]);
        assert_eq!((image.width, image.height), (16, 9));
    }

    #[test]
    fn test_wet_vignette_follows_state_resolution() {
        let scene = floor_scene(Material::reflective(Color::new(0.9, 0.4, 0.2), 0.0));
        let config = config(1).with_wet(true);

        // Sized independently of the config's 16-pixel resolution
        let mut state = RenderState::new(&scene, 0, 8, config.seed).unwrap();
        advance_pass(&mut state, &scene, &config).unwrap();

        let matching = config.clone().with_resolution(8);
        let mut expected = RenderState::from_config(&scene, &matching).unwrap();
        advance_pass(&mut expected, &scene, &matching).unwrap();

        assert_eq!(state.resolution(), 8);
        assert_eq!(state.accumulated(), expected.accumulated());
    }

    #[test]
    fn test_missing_camera_is_fatal() {
        let scene = floor_scene(Material::matte(Color::ONE));
        let err = render(&scene, &config(1).with_camera(2)).unwrap_err();
        assert_eq!(err, RenderError::MissingCamera(2));
        assert!(err.is_fatal());
    }
}
