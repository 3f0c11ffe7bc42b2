//! Headless scene viewer
//!
//! Builds one of the demonstration scenes and drives it for a fixed number of
//! frames through the recording backend, logging what would have been drawn.
//!
//! Usage: `scene_viewer [config.toml|config.ron] [scene name]`

mod scenes;

use scene_engine::config::{Config, SceneConfig};
use scene_engine::foundation::logging;
use scene_engine::foundation::time::FrameClock;
use scene_engine::render::RecordingBackend;
use scene_engine::scene::Scene;

/// Frames between progress reports
const REPORT_INTERVAL: u32 = 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let mut config = match args.next() {
        Some(path) => SceneConfig::load_from_file(&path)?,
        None => SceneConfig::default(),
    };
    if let Some(scene) = args.next() {
        config.viewer.scene = scene;
    }
    config.validate()?;

    logging::init_with_level(&config.viewer.log_level);
    log::info!("Starting scene viewer");
    log::debug!("Configuration: {:?}", config);

    let mut scene = scenes::build(&config.viewer.scene, config.physics)?;
    run(&mut scene, &config)?;

    log::info!("Scene viewer finished");
    Ok(())
}

fn run(scene: &mut Scene, config: &SceneConfig) -> Result<(), Box<dyn std::error::Error>> {
    let viewer = &config.viewer;
    let mut clock = match viewer.fixed_dt {
        Some(dt) => FrameClock::fixed(dt),
        None => FrameClock::measured(viewer.max_frame_dt),
    };
    let mut backend = RecordingBackend::new();

    scene.start_animators();

    for frame in 1..=viewer.frame_count {
        let dt = clock.tick();
        backend.begin_frame();
        scene.frame(dt, &mut backend)?;

        log::trace!("Frame {} dt={:.4}s draws={}", frame, dt, backend.draws().len());
        if frame % REPORT_INTERVAL == 0 {
            report(frame, clock.total_time(), scene, &backend);
        }
    }

    log::info!(
        "Ran {} frame(s) over {:.2}s (avg {:.1} FPS), animations finished: {}",
        clock.frame_count(),
        clock.total_time(),
        clock.average_fps(),
        scene.animations_finished()
    );
    Ok(())
}

fn report(frame: u32, time: f32, scene: &Scene, backend: &RecordingBackend) {
    log::info!(
        "Frame {} at {:.2}s: {} draw(s), {} uniform write(s)",
        frame,
        time,
        backend.draws().len(),
        backend.uniform_writes()
    );
    for draw in backend.draws() {
        let p = draw.world_position();
        log::debug!("  {} ({} indices) at ({:.3}, {:.3}, {:.3})", draw.mesh, draw.index_count, p.x, p.y, p.z);
    }
    for root in scene.roots() {
        log::debug!("  root '{}' orientation {:?}", root.name(), root.orientation());
    }
}
