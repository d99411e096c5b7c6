//! Cornell box example.
//!
//! Renders a small box scene progressively and saves it as PNG.
//!
//! Usage: `cargo run --example cornell_box [config.json] [output.png]`
//!
//! The optional JSON file holds a (partial) `RenderConfig`; missing fields
//! keep their defaults.

use std::f32::consts::FRAC_PI_2;
use std::time::Instant;

use anyhow::{Context, Result};
use glint_core::{Camera, Color, Environment, Instance, Material, Scene, Shape};
use glint_math::{Mat4, Quat, Vec3};
use glint_renderer::{render_with_progress, BvhScene, RenderConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let config: RenderConfig = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => RenderConfig::default().with_quality(64, 6).with_resolution(400),
    };
    let output = args.next().unwrap_or_else(|| "cornell_box.png".to_string());

    let scene = build_scene();
    let oracle = BvhScene::new(&scene)?;

    let start = Instant::now();
    let rendered = render_with_progress(&oracle, &config, |state| {
        if state.samples() % 16 == 0 {
            log::info!("{}/{} samples ({:?})", state.samples(), config.samples, start.elapsed());
        }
    })?;
    log::info!("Rendered {}x{} in {:?}", rendered.width, rendered.height, start.elapsed());

    image::save_buffer(
        &output,
        &rendered.to_rgba8(),
        rendered.width,
        rendered.height,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("writing {output}"))?;
    log::info!("Saved to {}", output);

    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new("cornell_box");

    let wall = scene.add_shape(Shape::quad(1.0, 1.0));
    let lamp = scene.add_shape(Shape::quad(0.25, 0.25));

    let white = scene.add_material(Material::matte(Color::new(0.73, 0.73, 0.73)).with_name("white"));
    let red = scene.add_material(Material::matte(Color::new(0.65, 0.05, 0.05)).with_name("red"));
    let green = scene.add_material(Material::matte(Color::new(0.12, 0.45, 0.15)).with_name("green"));
    let light = scene.add_material(Material::emitter(Color::splat(15.0)).with_name("light"));
    let mirror = scene.add_material(Material::reflective(Color::splat(0.9), 0.0).with_name("mirror"));
    let gold = scene.add_material(Material::glossy(Color::new(1.0, 0.71, 0.29), 0.2).with_name("gold"));
    let glass = scene.add_material(Material::refractive(Color::ONE, 1.5).with_name("glass"));

    let place = |rotation: Quat, translation: Vec3| Mat4::from_rotation_translation(rotation, translation);

    // Floor, ceiling and back wall
    scene.add_instance(
        Instance::new(wall, white).with_frame(place(Quat::from_rotation_x(-FRAC_PI_2), Vec3::new(0.0, -1.0, 0.0))),
    );
    scene.add_instance(
        Instance::new(wall, white).with_frame(place(Quat::from_rotation_x(FRAC_PI_2), Vec3::new(0.0, 1.0, 0.0))),
    );
    scene.add_instance(Instance::new(wall, white).with_frame(place(Quat::IDENTITY, Vec3::new(0.0, 0.0, -1.0))));

    // Colored side walls
    scene.add_instance(
        Instance::new(wall, red).with_frame(place(Quat::from_rotation_y(FRAC_PI_2), Vec3::new(-1.0, 0.0, 0.0))),
    );
    scene.add_instance(
        Instance::new(wall, green).with_frame(place(Quat::from_rotation_y(-FRAC_PI_2), Vec3::new(1.0, 0.0, 0.0))),
    );

    // Ceiling lamp, just below the ceiling
    scene.add_instance(
        Instance::new(lamp, light).with_frame(place(Quat::from_rotation_x(FRAC_PI_2), Vec3::new(0.0, 0.99, 0.0))),
    );

    // Tilted mirror panel
    let panel = scene.add_shape(Shape::quad(0.3, 0.5));
    scene.add_instance(Instance::new(panel, mirror).with_frame(place(
        Quat::from_rotation_y(0.4),
        Vec3::new(-0.45, -0.5, -0.5),
    )));

    // Glass beads on the floor
    let beads: Vec<Vec3> = (0..5)
        .map(|i| Vec3::new(0.1 + 0.15 * i as f32, -0.9, 0.2))
        .collect();
    let beads = scene.add_shape(Shape::points(beads, 0.07));
    scene.add_instance(Instance::new(beads, glass));

    // A gold wire loop
    let segments = 24;
    let positions: Vec<Vec3> = (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            Vec3::new(0.45 + 0.25 * angle.cos(), -0.3 + 0.25 * angle.sin(), -0.4)
        })
        .collect();
    let lines = (0..segments as u32).map(|i| [i, (i + 1) % segments as u32]).collect();
    let wire = scene.add_shape(Shape::lines(positions, lines, 0.02));
    scene.add_instance(Instance::new(wire, gold));

    scene.add_camera(Camera::look_at(Vec3::new(0.0, 0.0, 3.4), Vec3::ZERO, Vec3::Y).with_aspect(1.0));
    scene.add_environment(Environment::Constant(Color::ZERO));

    scene
}
