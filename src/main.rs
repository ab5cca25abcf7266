use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use log::info;
use pollster::block_on;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use preview_runtime::{LightPack, Renderer, Scene};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let xml = std::fs::read_to_string(&options.path)
        .with_context(|| format!("failed to read scene {}", options.path))?;
    let scene = Scene::from_xml(&xml).context("failed to parse scene XML")?;
    let pack = scene
        .light_pack()
        .context("scene exceeds the light capacity")?;

    println!(
        "Loaded scene with {} objects ({} directional, {} spot, {} point lights)",
        scene.objects.len(),
        pack.count.direction,
        pack.count.spot,
        pack.count.point
    );
    for object in &scene.objects {
        println!(
            " - {} ({})",
            object.name,
            object.mesh.as_deref().unwrap_or("default cube")
        );
    }

    if options.summary_only {
        print_frame_params(&scene, &pack);
        return Ok(());
    }

    // Meshes are referenced relative to the scene file.
    let asset_root = Path::new(&options.path)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    match run_interactive(&scene, asset_root) {
        Ok(()) => Ok(()),
        Err(err) if err.downcast_ref::<WindowInitError>().is_some() => {
            eprintln!(
                "{err}. Falling back to --summary-only mode (set DISPLAY or install X11 libs to enable rendering)."
            );
            print_frame_params(&scene, &pack);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn print_frame_params(scene: &Scene, pack: &LightPack) {
    let camera = scene.camera.params();
    println!("Frame parameters:");
    println!(
        " - camera position=({:.2}, {:.2}, {:.2})",
        camera.position[0], camera.position[1], camera.position[2]
    );
    println!(
        " - light counts direction={} spot={} point={}",
        pack.count.direction, pack.count.spot, pack.count.point
    );
}

fn run_interactive(scene: &Scene, asset_root: PathBuf) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| WindowInitError::new("event loop", err))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Preview Runtime")
            .with_inner_size(LogicalSize::new(1280.0, 720.0))
            .build(&event_loop)
            .map_err(|err| WindowInitError::new("window", err))?,
    );

    let mut renderer = block_on(Renderer::new(Arc::clone(&window), asset_root))?;
    let pack = scene.light_pack()?;
    let objects = scene.objects.clone();
    let mut camera = scene.camera;
    camera.aspect = aspect_of(window.inner_size());

    let mut last_error: Option<anyhow::Error> = None;

    event_loop.run(|event, elwt| match event {
        Event::WindowEvent { event, window_id } if window_id == renderer.window_id() => {
            match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => {
                    renderer.resize(size);
                    camera.aspect = aspect_of(size);
                }
                WindowEvent::RedrawRequested => {
                    renderer.upload_frame(&camera.params(), &pack);
                    match renderer.render(&objects) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let size = renderer.window().inner_size();
                            renderer.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            last_error = Some(anyhow!("GPU is out of memory"));
                            elwt.exit();
                        }
                        Err(wgpu::SurfaceError::Timeout) => {
                            info!("surface timeout; retrying next frame");
                        }
                    }
                }
                _ => {}
            }
        }
        Event::AboutToWait => renderer.window().request_redraw(),
        _ => {}
    })?;

    match last_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn aspect_of(size: winit::dpi::PhysicalSize<u32>) -> f32 {
    if size.height == 0 {
        1.0
    } else {
        size.width as f32 / size.height as f32
    }
}

#[derive(Debug)]
struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn new(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

struct CliOptions {
    path: String,
    summary_only: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let Some(path) = args.next() else {
            return Err(anyhow!("Usage: preview-runtime <scene.xml> [--summary-only]"));
        };
        let mut summary_only = false;
        for arg in args {
            match arg.as_str() {
                "--summary-only" => summary_only = true,
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --summary-only"
                    ));
                }
            }
        }
        Ok(Self { path, summary_only })
    }
}
