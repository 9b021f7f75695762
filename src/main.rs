//! gradient-transition CLI
//!
//! Simulate gradient transitions frame by frame, or inspect how a gradient
//! value is parsed.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gradient_anim::{
    AttachOptions, ElementDescriptor, FrameInput, FrameOutput, GradientAnimator,
    StyleFingerprint, TimeOptions,
};
use gradient_config::{GradientConfig, StopDirection};
use gradient_model::{parse, stringify, ParseOptions};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ELEMENT_ID: &str = "simulated";

#[derive(Parser)]
#[command(name = "gradient-transition")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Animate CSS gradient backgrounds frame by frame", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./gradient-transition.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a transition between two gradients and print every frame
    Simulate {
        /// Starting background-image value
        #[arg(long)]
        from: String,

        /// Target background-image value
        #[arg(long)]
        to: String,

        /// Transition duration, e.g. 300ms or 1s
        #[arg(long)]
        duration: Option<String>,

        /// Transition delay
        #[arg(long)]
        delay: Option<String>,

        /// Timing function, e.g. ease or cubic-bezier(0.4, 0, 0.2, 1)
        #[arg(long)]
        timing: Option<String>,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Font size used to resolve em lengths, in px
        #[arg(long, default_value = "16")]
        em: f64,

        /// Stop pairing direction (start, end)
        #[arg(long)]
        direction: Option<String>,

        /// Switch back to --from at this time (ms)
        #[arg(long)]
        retarget_at: Option<f64>,
    },

    /// Parse a background-image value and print the model
    Parse {
        /// CSS value to parse
        css: String,

        /// Font size used to resolve em lengths, in px
        #[arg(long, default_value = "16")]
        em: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let mut config = GradientConfig::load_from_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            config.merge_with_env();
            config
        }
        None => GradientConfig::load(),
    };

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(&config.logging.filter)
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            from,
            to,
            duration,
            delay,
            timing,
            fps,
            em,
            direction,
            retarget_at,
        } => {
            let time_options = TimeOptions::parse(
                duration.as_deref().unwrap_or(&config.timing.duration),
                delay.as_deref().unwrap_or(&config.timing.delay),
                timing.as_deref().unwrap_or(&config.timing.timing_function),
            )?;
            let direction = match direction {
                Some(d) => match StopDirection::parse(&d) {
                    Some(direction) => direction,
                    None => bail!("unknown direction `{}` (expected start or end)", d),
                },
                None => config.attach.direction,
            };
            let simulation = Simulation {
                from: &from,
                to: &to,
                time_options,
                fps,
                em,
                direction,
                retarget_at,
            };
            simulate(&config, &simulation)?;
        }

        Commands::Parse { css, em } => {
            let parsed = parse(&css, &ParseOptions { em_size: em })?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            if !parsed.is_none() {
                println!("{}", stringify(&parsed)?);
            }
        }
    }

    Ok(())
}

struct Simulation<'a> {
    from: &'a str,
    to: &'a str,
    time_options: TimeOptions,
    fps: u32,
    em: f64,
    direction: StopDirection,
    retarget_at: Option<f64>,
}

fn simulate(config: &GradientConfig, sim: &Simulation<'_>) -> Result<()> {
    if sim.fps == 0 {
        bail!("--fps must be greater than zero");
    }
    let frame_ms = 1000.0 / f64::from(sim.fps);

    let mut animator = GradientAnimator::from_config(config);
    animator.attach(
        ElementDescriptor::new(ELEMENT_ID)
            .with_class(config.render.wrapper_class.clone())
            .with_render_target(format!("{}-{}", ELEMENT_ID, config.render.render_class)),
        AttachOptions {
            direction: sim.direction,
        },
    )?;

    let key_for = |value: &str| {
        StyleFingerprint::new(&config.render.custom_property)
            .declared("background-image", value)
            .em_size(sim.em)
            .timing(&sim.time_options)
            .build()
    };
    let from_key = key_for(sim.from);
    let to_key = key_for(sim.to);

    let transition_ms = sim.time_options.delay_ms.max(0.0) + sim.time_options.duration_ms;
    let end_ms = sim.retarget_at.unwrap_or(0.0).max(0.0) + transition_ms + frame_ms;
    info!(
        frame_ms,
        duration_ms = sim.time_options.duration_ms,
        delay_ms = sim.time_options.delay_ms,
        easing = %sim.time_options.easing,
        "simulating"
    );

    // The first frame only records the starting value.
    animator.frame(ELEMENT_ID, &frame_input(sim, 0.0, sim.from, &from_key))?;

    let mut frame = 0u64;
    loop {
        let time = frame as f64 * frame_ms;
        if time > end_ms {
            break;
        }
        let reverted = sim.retarget_at.is_some_and(|at| time >= at);
        let (raw, key) = if reverted {
            (sim.from, from_key.as_str())
        } else {
            (sim.to, to_key.as_str())
        };

        let output = animator.frame(ELEMENT_ID, &frame_input(sim, time, raw, key))?;
        match output {
            FrameOutput::Render { property, value } => {
                println!("{:>9.2}ms  {}: {}", time, property, value);
            }
            FrameOutput::Clear { property } => {
                println!("{:>9.2}ms  {}: <cleared>", time, property);
            }
        }
        frame += 1;
    }

    debug!(frames = frame, "simulation finished");
    Ok(())
}

fn frame_input<'a>(
    sim: &Simulation<'_>,
    time_ms: f64,
    raw_value: &'a str,
    key: &'a str,
) -> FrameInput<'a> {
    FrameInput {
        time_ms,
        raw_value,
        key,
        em_size: sim.em,
        time_options: sim.time_options,
    }
}
