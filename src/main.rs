//! Seabed CLI - procedural bathymetry and headless boat runs.
//!
//! Generate depth maps from fractal noise, inspect grid sizes, and replay
//! scripted vessel input over a generated seabed.

use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec2;
use std::path::{Path, PathBuf};
use std::time::Instant;

use seabed::bathymetry::{DepthMapConfig, generate_depth_field};
use seabed::export::{
    export_depth_png, export_depth_preview_png, export_depth_raw, export_params_json,
    PngExportOptions, RawFormat,
};
use seabed::motion::{GroundingEvent, MotionConfig};
use seabed::noise::FractalNoiseConfig;
use seabed::simulation::{run_scenario, InputSegment, ScenarioConfig, VesselChoice};
use seabed::vessel::VesselCatalog;

/// Procedural seabed generator and boat motion sandbox.
#[derive(Parser)]
#[command(name = "seabed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a depth map and export it.
    Generate {
        #[command(flatten)]
        map: MapArgs,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "seabed")]
        name: String,

        /// Export format.
        #[arg(short, long, default_value = "png")]
        format: ExportFormat,

        /// Also write a white-to-blue preview image.
        #[arg(long)]
        preview: bool,

        /// Stretch PNG intensity over the observed depth range instead of
        /// the configured one.
        #[arg(long)]
        auto_range: bool,
    },

    /// Display information about a grid configuration.
    Info {
        /// Grid width in cells.
        #[arg(long, default_value = "512")]
        width: u32,

        /// Grid height in cells.
        #[arg(long, default_value = "512")]
        height: u32,
    },

    /// Drive one vessel over a generated seabed with constant input.
    Simulate {
        #[command(flatten)]
        map: MapArgs,

        /// JSON scenario file; overrides every other simulation option.
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Vessel class (Sailboat, Motorboat, "Cargo Ship", Submarine).
        #[arg(long, default_value = "Sailboat")]
        vessel: String,

        /// Starting world position, x.
        #[arg(long, default_value = "64.0")]
        start_x: f32,

        /// Starting world position, y.
        #[arg(long, default_value = "64.0")]
        start_y: f32,

        /// Horizontal input in [-1, 1].
        #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
        input_x: f32,

        /// Vertical input in [-1, 1].
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        input_y: f32,

        /// Seconds to hold the input.
        #[arg(long, default_value = "10.0")]
        duration: f32,

        /// Fixed timestep in seconds.
        #[arg(long, default_value = "0.02")]
        timestep: f32,

        /// Beached speed multiplier (0-1].
        #[arg(long, default_value = "0.2")]
        beached_multiplier: f32,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Depth map options shared by several commands.
#[derive(clap::Args)]
struct MapArgs {
    /// Grid width in cells.
    #[arg(long, default_value = "512")]
    width: u32,

    /// Grid height in cells.
    #[arg(long, default_value = "512")]
    height: u32,

    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<u32>,

    /// World units per grid cell.
    #[arg(long, default_value = "1.0")]
    world_scale: f32,

    /// Number of noise octaves.
    #[arg(long, default_value = "4")]
    octaves: u8,

    /// Base noise frequency.
    #[arg(long, default_value = "0.1")]
    noise_scale: f32,

    /// Frequency multiplier per octave (lacunarity).
    #[arg(long, default_value = "2.0")]
    lacunarity: f32,

    /// Amplitude decay per octave (persistence).
    #[arg(long, default_value = "0.5")]
    persistence: f32,

    /// Shallowest depth.
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    min_depth: f32,

    /// Deepest depth.
    #[arg(long, default_value = "100.0")]
    max_depth: f32,

    /// Use a preset instead of the individual noise/depth options.
    #[arg(long)]
    preset: Option<Preset>,
}

impl MapArgs {
    fn to_config(&self, seed: u32) -> DepthMapConfig {
        let mut config = match self.preset {
            Some(Preset::Coastal) => DepthMapConfig::coastal(seed),
            Some(Preset::OpenOcean) => DepthMapConfig::open_ocean(seed),
            None => DepthMapConfig {
                noise: FractalNoiseConfig {
                    octaves: self.octaves,
                    noise_scale: self.noise_scale,
                    lacunarity: self.lacunarity,
                    persistence: self.persistence,
                    seed,
                },
                min_depth: self.min_depth,
                max_depth: self.max_depth,
                ..Default::default()
            },
        };
        config.width = self.width;
        config.height = self.height;
        config.world_scale = self.world_scale;
        config
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Shallow reefs and sandbanks.
    Coastal,
    /// Deep, smooth basins.
    OpenOcean,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// 16-bit PNG (universal compatibility).
    Png,
    /// 16-bit RAW little-endian (Unity).
    Raw,
    /// 32-bit float RAW (high precision).
    RawFloat,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            map,
            output,
            name,
            format,
            preview,
            auto_range,
        } => run_generate(&map, &output, &name, format, preview, auto_range),
        Commands::Info { width, height } => run_info(width, height),
        Commands::Simulate {
            map,
            scenario,
            vessel,
            start_x,
            start_y,
            input_x,
            input_y,
            duration,
            timestep,
            beached_multiplier,
            json,
        } => {
            let scenario = match scenario {
                Some(path) => load_scenario(&path),
                None => ScenarioConfig {
                    depth_map: map.to_config(resolve_seed(map.seed)),
                    motion: MotionConfig {
                        beached_speed_multiplier: beached_multiplier,
                        ..Default::default()
                    },
                    vessel: VesselChoice::Named(vessel),
                    start: Vec2::new(start_x, start_y),
                    timestep,
                    segments: vec![InputSegment {
                        input: Vec2::new(input_x, input_y),
                        duration,
                    }],
                },
            };
            run_simulate(&scenario, json);
        }
    }
}

/// Uses the given seed, or derives one from the clock.
fn resolve_seed(seed: Option<u32>) -> u32 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u32)
            .unwrap_or(0)
    })
}

fn run_generate(
    map: &MapArgs,
    output: &Path,
    name: &str,
    format: ExportFormat,
    preview: bool,
    auto_range: bool,
) {
    let seed = resolve_seed(map.seed);
    let config = map.to_config(seed);

    println!("Seabed - Procedural Depth Map Generator");
    println!("=======================================");
    println!("Grid: {}x{} cells ({} world units/cell)", config.width, config.height, config.world_scale);
    println!("Seed: {}", seed);
    println!("Output: {}", output.display());

    let start = Instant::now();
    let field = generate_depth_field(&config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    println!("Generation completed in {:.2?}", start.elapsed());

    let (min_d, max_d) = field.depth_range();
    println!("Depth range: [{:.2}, {:.2}] (mean {:.2})", min_d, max_d, field.mean_depth());

    std::fs::create_dir_all(output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    let png_options = if auto_range {
        PngExportOptions::auto_range(&field)
    } else {
        PngExportOptions::declared_range(&field)
    };

    match format {
        ExportFormat::Png => {
            let path = output.join(format!("{}.png", name));
            export_depth_png(&field, &path, &png_options).unwrap_or_else(|e| {
                eprintln!("Error exporting PNG: {}", e);
                std::process::exit(1);
            });
            println!("  Exported {}", path.display());
        }
        ExportFormat::Raw | ExportFormat::RawFloat => {
            let raw_format = match format {
                ExportFormat::RawFloat => RawFormat::R32Float,
                _ => RawFormat::R16LittleEndian,
            };
            let path = output.join(format!("{}.raw", name));
            export_depth_raw(&field, &path, raw_format).unwrap_or_else(|e| {
                eprintln!("Error exporting RAW: {}", e);
                std::process::exit(1);
            });
            println!("  Exported {}", path.display());
        }
    }

    if preview {
        let path = output.join(format!("{}_preview.png", name));
        export_depth_preview_png(&field, &path, &png_options).unwrap_or_else(|e| {
            eprintln!("Error exporting preview: {}", e);
            std::process::exit(1);
        });
        println!("  Exported {}", path.display());
    }

    let params_path = output.join(format!("{}.json", name));
    export_params_json(&field, &params_path).unwrap_or_else(|e| {
        eprintln!("Error exporting parameters: {}", e);
        std::process::exit(1);
    });
    println!("  Exported {}", params_path.display());
}

fn run_info(width: u32, height: u32) {
    let cells = width as u64 * height as u64;
    let bytes_depths = cells * 4;
    let bytes_png = cells * 2;
    let bytes_raw_r16 = cells * 2;
    let bytes_raw_r32 = cells * 4;

    println!("Grid Configuration");
    println!("==================");
    println!("Dimensions: {}x{} cells", width, height);
    println!("Cells:      {:>12}", cells);
    println!();
    println!("Memory usage (in-memory):");
    println!("  Depths:         {:>12} bytes ({:.2} MB)", bytes_depths, bytes_depths as f64 / 1024.0 / 1024.0);
    println!();
    println!("Export file sizes:");
    println!("  PNG (16-bit):   {:>8} bytes ({:.2} MB) uncompressed", bytes_png, bytes_png as f64 / 1024.0 / 1024.0);
    println!("  RAW (R16):      {:>8} bytes ({:.2} MB)", bytes_raw_r16, bytes_raw_r16 as f64 / 1024.0 / 1024.0);
    println!("  RAW (R32):      {:>8} bytes ({:.2} MB)", bytes_raw_r32, bytes_raw_r32 as f64 / 1024.0 / 1024.0);
    println!();
    println!("Vessel classes:");
    for profile in VesselCatalog::standard().iter() {
        println!(
            "  {:<12} draft {:>5.1}  margin {:>4.1}  needs {:>5.1}",
            profile.name(),
            profile.draft(),
            profile.safety_margin(),
            profile.required_clearance()
        );
    }
}

fn load_scenario(path: &Path) -> ScenarioConfig {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading scenario {}: {}", path.display(), e);
        std::process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing scenario {}: {}", path.display(), e);
        std::process::exit(1);
    })
}

fn run_simulate(scenario: &ScenarioConfig, json: bool) {
    let start = Instant::now();
    let report = run_scenario(scenario).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Simulated {} ticks in {:.2?}", report.ticks, start.elapsed());
    for event in &report.events {
        let label = match event.event {
            GroundingEvent::Grounded => "ran aground",
            GroundingEvent::Ungrounded => "refloated",
        };
        println!(
            "  [tick {:>6}] {} at ({:.2}, {:.2})",
            event.tick, label, event.state.position.x, event.state.position.y
        );
    }

    let state = report.final_state;
    println!();
    println!("Final position: ({:.2}, {:.2})", state.position.x, state.position.y);
    println!("Final speed:    {:.3}", state.speed);
    println!("Heading:        {:.1} deg", state.heading);
    println!("Depth below:    {:.2}", report.final_depth);
    println!("State:          {:?}", state.grounding);
    if let Some(warning) = report.navigation.warning() {
        println!("Warning:        {}", warning);
    }
}
