#[macro_use]
extern crate log;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Env;

use ray_tracer::camera::Camera;
use ray_tracer::scene::Scene;
use ray_tracer::error::SceneError;
use ray_tracer::consts::{ OUT_FILE, RECURSION_DEPTH };

const DEFAULT_LOGGING_LEVEL: &str = "info";

/// Renders a JSON scene description to a PPM image.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// JSON scene description; renders the built-in demo scene when omitted
    scene: Option<PathBuf>,

    /// File name to write the image to
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// Overrides the scene's canvas width
    #[clap(long)]
    width: Option<usize>,

    /// Overrides the scene's canvas height
    #[clap(long)]
    height: Option<usize>,

    /// Reflection and refraction recursion depth
    #[clap(long, default_value_t = RECURSION_DEPTH)]
    depth: usize,

    /// Number of render threads; defaults to one per core
    #[clap(long)]
    threads: Option<usize>,

    /// Render on the main thread only
    #[clap(long)]
    sequential: bool,
}

fn main() {
    env_logger::Builder::from_env(
        Env::default().default_filter_or(DEFAULT_LOGGING_LEVEL)
    ).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }

    info!("done");
}

fn run(args: &Args) -> Result<(), SceneError> {
    let mut scene = match args.scene {
        Some(ref path) => Scene::from_file(path)?,
        None => {
            info!("No scene given, rendering the demo scene");
            Scene::demo()?
        },
    };

    if args.width.is_some() || args.height.is_some() {
        scene.camera = resize(&scene.camera,
            args.width.unwrap_or(scene.camera.hsize),
            args.height.unwrap_or(scene.camera.vsize))?;
    }
    scene.camera.depth = args.depth;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| SceneError::InvalidScene {
                description: format!("cannot start {} render threads: {}", threads, e)
            })?;
    }

    let canvas = if args.sequential {
        scene.camera.render(&scene.world)
    } else {
        scene.camera.render_parallel(&scene.world)
    };

    info!("Saving rendered image to {}", args.output.display());
    canvas.save(&args.output).map_err(|e| SceneError::FailedToWrite {
        description: format!("{}: {}", args.output.display(), e)
    })
}

/// The same camera with a different canvas size.
fn resize(camera: &Camera, hsize: usize, vsize: usize)
    -> Result<Camera, SceneError> {
    if hsize == 0 || vsize == 0 {
        return Err(SceneError::InvalidScene {
            description: "canvas dimensions must be non-zero".to_string()
        });
    }

    let mut resized = Camera::new(hsize, vsize, camera.field_of_view)
        .with_transform(*camera.transform())?;
    resized.depth = camera.depth;

    Ok(resized)
}
