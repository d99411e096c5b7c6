//! Progressive render state: per-pixel accumulators and random streams.

use glint_core::Camera;
use glint_math::Vec4;

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::image::ImageBuffer;
use crate::oracle::SceneOracle;
use crate::sampling::RngStream;

/// Everything that persists between sampling passes.
///
/// `image` holds the running sum of every sample taken so far; averaging only
/// happens in [`RenderState::snapshot`].
#[derive(Debug, Clone)]
pub struct RenderState {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Resolution the image was sized from
    pub(crate) resolution: u32,
    pub(crate) samples: u32,
    pub(crate) image: Vec<Vec4>,
    pub(crate) hits: Vec<u32>,
    pub(crate) rngs: Vec<RngStream>,
    pub(crate) camera: Camera,
}

impl RenderState {
    /// Size the image from the scene camera and seed one stream per pixel.
    pub fn new<S: SceneOracle + ?Sized>(
        scene: &S,
        camera_index: usize,
        resolution: u32,
        seed: u64,
    ) -> RenderResult<Self> {
        if resolution == 0 {
            return Err(RenderError::InvalidConfig("resolution must be at least 1".into()));
        }
        let camera = scene
            .camera(camera_index)
            .ok_or(RenderError::MissingCamera(camera_index))?
            .clone();
        let (width, height) = camera.image_size(resolution);
        let pixel_count = width as usize * height as usize;

        let rngs = (0..pixel_count as u64)
            .map(|index| RngStream::new(seed, index))
            .collect();

        log::info!("Render state {}x{} from camera {}", width, height, camera_index);

        Ok(Self {
            width,
            height,
            resolution,
            samples: 0,
            image: vec![Vec4::ZERO; pixel_count],
            hits: vec![0; pixel_count],
            rngs,
            camera,
        })
    }

    pub fn from_config<S: SceneOracle + ?Sized>(scene: &S, config: &RenderConfig) -> RenderResult<Self> {
        Self::new(scene, config.camera, config.resolution, config.seed)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of completed passes.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Accumulated radiance sums, row-major.
    pub fn accumulated(&self) -> &[Vec4] {
        &self.image
    }

    /// Per-pixel count of folded samples.
    pub fn hits(&self) -> &[u32] {
        &self.hits
    }

    /// Current estimate of the image.
    pub fn snapshot(&self) -> RenderResult<ImageBuffer> {
        let mut image = ImageBuffer::new(self.width, self.height);
        self.snapshot_into(&mut image)?;
        Ok(image)
    }

    /// Write the current estimate into a caller-owned buffer of matching size.
    pub fn snapshot_into(&self, image: &mut ImageBuffer) -> RenderResult<()> {
        image.check_size(self.width, self.height)?;
        if self.samples == 0 {
            return Err(RenderError::NoSamples);
        }
        let scale = 1.0 / self.samples as f32;
        for (pixel, sum) in image.pixels.iter_mut().zip(&self.image) {
            *pixel = *sum * scale;
        }
        Ok(())
    }
}
