//! Surface-of-revolution viewer, headless driver
//!
//! Builds the scene from a configuration, plays a scripted session of frames
//! (ring changes, light relocation, orbit, camera drags) and prints what the
//! renderer would have been asked to draw.
//!
//! # Usage
//!
//! ```bash
//! # Run the scripted session with the stock configuration
//! sor_viewer
//!
//! # Use a JSON configuration and run 300 frames
//! sor_viewer --config viewer.json --frames 300
//!
//! # Print geometry statistics only
//! sor_viewer --summary
//!
//! # Print the stock configuration as JSON
//! sor_viewer --dump-config
//! ```

use std::path::PathBuf;
use std::process;

use sor_core::Result;
use sor_math::Point3;
use sor_mesh::ObjectKind;
use sor_render::{Command, FrameDriver, FrameOutput, PointerButton, Primitive, ViewerConfig};

/// Host frame interval in milliseconds (60 Hz).
const FRAME_MS: f64 = 1000.0 / 60.0;

fn print_usage() {
    eprintln!(
        r#"Surface-of-revolution viewer (headless)

USAGE:
    sor_viewer [--config <file.json>] [--frames <n>]
    sor_viewer --summary [--config <file.json>]
    sor_viewer --dump-config

OPTIONS:
    --config <file>   Load viewer configuration from JSON
    --frames <n>      Number of frames to simulate (default 240)
    --summary         Print geometry statistics and exit
    --dump-config     Print the effective configuration as JSON and exit
    --help            Show this help message
"#
    );
}

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Run,
    Summary,
    DumpConfig,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
struct Options {
    mode: Mode,
    config: Option<PathBuf>,
    frames: usize,
}

fn parse_args(args: &[String]) -> std::result::Result<Options, String> {
    let mut options = Options {
        mode: Mode::Run,
        config: None,
        frames: 240,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => options.mode = Mode::Help,
            "--summary" => options.mode = Mode::Summary,
            "--dump-config" => options.mode = Mode::DumpConfig,
            "--config" => {
                let path = iter.next().ok_or("--config requires a file path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--frames" => {
                let value = iter.next().ok_or("--frames requires a count")?;
                options.frames = value
                    .parse()
                    .map_err(|_| format!("invalid frame count: {}", value))?;
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(options)
}

fn load_config(options: &Options) -> Result<ViewerConfig> {
    match &options.config {
        Some(path) => ViewerConfig::from_json_file(path),
        None => Ok(ViewerConfig::default()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("Error: {}\n", msg);
            print_usage();
            process::exit(1);
        }
    };

    if options.mode == Mode::Help {
        print_usage();
        return;
    }

    let result = load_config(&options).and_then(|config| match options.mode {
        Mode::DumpConfig => {
            println!("{}", config.to_json_string()?);
            Ok(())
        }
        Mode::Summary => handle_summary(&config),
        _ => handle_run(&config, options.frames),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn handle_summary(config: &ViewerConfig) -> Result<()> {
    let driver = FrameDriver::new(config)?;
    let registry = driver.scene().registry();
    let buffers = registry.buffers();

    println!("vertices: {}", buffers.vertex_count());
    println!("indices:  {}", buffers.index_count());
    for entry in registry.entries() {
        println!(
            "{:<8} {}x{} grid, vertices [{}, +{}), body [{}, +{}), normal lines [{}, +{}), box {:?} .. {:?}",
            entry.kind.name(),
            entry.resolution.rows,
            entry.resolution.cols,
            entry.vertices.first,
            entry.vertices.count,
            entry.body.first,
            entry.body.count,
            entry.normal_lines.first,
            entry.normal_lines.count,
            entry.bounds.min,
            entry.bounds.max,
        );
    }
    Ok(())
}

/// Commands issued at fixed frame numbers during the scripted session.
fn scripted_commands(frame: usize) -> Vec<Command> {
    match frame {
        0 => vec![Command::SetRingCount { count: 3 }],
        30 => vec![Command::TriggerRelocation { target: Point3::ZERO }],
        100 => vec![
            Command::SetLightColor { key: "skyBlue".into() },
            Command::TriggerRelocation {
                target: Point3::new(1.0, 2.0, 1.0),
            },
        ],
        170 => vec![Command::ToggleOrbit, Command::ToggleNormalLines],
        200 => vec![
            Command::SetMaterial {
                object: ObjectKind::Ring,
                key: "mauve".into(),
            },
            Command::SetShininess {
                object: ObjectKind::Ring,
                shininess: 80.0,
            },
        ],
        _ => Vec::new(),
    }
}

fn handle_run(config: &ViewerConfig, frames: usize) -> Result<()> {
    let mut driver = FrameDriver::new(config)?;
    let mut last = None;

    driver.pointer_down(PointerButton::Primary, 0.0, 0.0);
    for frame in 0..frames {
        for command in scripted_commands(frame) {
            driver.apply(command)?;
        }

        // Slow horizontal orbit drag for the first second, then a short zoom.
        match frame {
            0..=59 => {
                driver.pointer_move(frame as f64 * 2.0, 0.0);
            }
            60 => {
                driver.pointer_up(PointerButton::Primary);
                driver.pointer_down(PointerButton::Secondary, 0.0, 0.0);
            }
            61..=70 => {
                driver.pointer_move((frame - 60) as f64 * 5.0, 0.0);
            }
            71 => driver.pointer_leave(),
            _ => {}
        }

        let output = driver.tick(frame as f64 * FRAME_MS);
        if output.relocation_finished {
            log::info!("frame {}: relocation finished, controls unlocked", frame);
        }
        last = Some(output);
    }

    if let Some(output) = last {
        print_frame(&output);
    }
    Ok(())
}

fn print_frame(frame: &FrameOutput) {
    println!("eye:      {:?}", frame.eye);
    println!("up:       {:?}", frame.up);
    println!("light:    {:?} ({:?} frame)", frame.light_position, frame.light_frame);
    for kind in ObjectKind::ALL {
        let shading = frame.shading(kind);
        println!(
            "{:<8} visible={} shininess={} diffuse={:?}",
            kind.name(),
            shading.visible,
            shading.shininess,
            shading.color.diffuse
        );
    }
    for (i, ring) in frame.rings.iter().enumerate() {
        println!(
            "ring {}   center={:?} phase={}",
            i, ring.instance.center, ring.instance.phase_degrees
        );
    }
    let lines = frame.draws.iter().filter(|d| d.primitive == Primitive::Lines).count();
    println!(
        "draws:    {} ({} triangle ranges, {} line ranges)",
        frame.draws.len(),
        frame.draws.len() - lines,
        lines
    );
}
