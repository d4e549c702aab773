use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::io;
use std::time::Duration;

use gesture_servo::actuation::angle_for;
use gesture_servo::args::{Args, Command};
use gesture_servo::batch::{BatchRunner, BatchSummary};
use gesture_servo::bindings::ActuatorBindings;
use gesture_servo::config::AppConfig;
use gesture_servo::source::SidecarJsonSource;
use gesture_servo::stream::run_stream;
use gesture_servo::transport::{ActuatorTransport, ConsoleTransport, JsonLinesTransport};
use gesture_servo::types::Laterality;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // 0. Load config and validate the rig before touching any frame
    let mut config = AppConfig::load(&args.config)?;
    if let Some(angle) = args.open_angle {
        config.actuation.open_angle_deg = angle;
    }
    let bindings = config.bindings().context("Invalid actuator configuration")?;

    // 1. Pick the transport
    let transport: Box<dyn ActuatorTransport> = if args.json {
        Box::new(JsonLinesTransport::new(io::stdout()))
    } else {
        Box::new(ConsoleTransport::new())
    };

    match args.command {
        Command::Bindings => print_bindings(&bindings),
        Command::Batch { folder, dwell_ms } => {
            let dwell = Duration::from_millis(dwell_ms.unwrap_or(config.batch.dwell_ms));
            let mut runner = BatchRunner::new(
                &bindings,
                SidecarJsonSource::new(config.detection_filter()),
                transport,
            )
            .with_extensions(config.batch.extensions.clone())
            .with_dwell(dwell);

            let summary = runner.run(&folder)?;
            if !args.json {
                print_summary(&summary);
            }
        }
        Command::Stream => {
            let mut transport = transport;
            let stats = run_stream(io::stdin().lock(), &bindings, &config.detection_filter(), &mut transport)?;
            eprintln!("{} frames ({} undecodable)", stats.frames, stats.bad_frames);
        }
    }

    Ok(())
}

fn print_bindings(bindings: &ActuatorBindings) {
    println!("Open angle: {} deg", bindings.open_angle().degrees());
    println!("{:<14} | {:<8} | {:>6} | {:>6}", "Finger", "Pin", "Open", "Closed");
    println!("{}", "-".repeat(44));
    for binding in bindings.iter() {
        let l = binding.key.laterality;
        println!(
            "{:<14} | {:<8} | {:>6} | {:>6}",
            binding.key.to_string(),
            binding.pin.to_string(),
            angle_for(l, true, bindings.open_angle()),
            angle_for(l, false, bindings.open_angle()),
        );
    }
}

fn print_summary(summary: &BatchSummary) {
    if summary.processed() == 0 {
        println!("{}", "No images found in the selected folder.".yellow());
        return;
    }
    for image in &summary.images {
        let name = image.path.display().to_string();
        if image.readable {
            println!(
                "{}  right: {} up  left: {} up",
                name.green(),
                image.report.raised(Laterality::Right),
                image.report.raised(Laterality::Left),
            );
        } else {
            println!("{}  {}", name.red(), "unreadable, all fingers closed");
        }
    }
    println!(
        "Processed {} images ({} skipped)",
        summary.processed(),
        summary.skipped()
    );
}
