//! Run a scripted hover session.

use std::path::PathBuf;

use anyhow::Context;
use levitate_motion_core::script::HoverCue;
use levitate_motion_core::simulate::{simulate, SimulationConfig};
use levitate_scene_model::scene::SceneDescription;
use levitate_scene_model::trace::{serialize_trace, TraceHeader};

pub struct SimulateArgs {
    pub hovers: Vec<String>,
    pub fps: u32,
    pub duration: f64,
    pub scene: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub jsonl: Option<PathBuf>,
    pub json: bool,
}

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_deref())?;

    let scene = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene from {}", path.display()))?,
        None => SceneDescription::showcase(),
    };

    let cues = args
        .hovers
        .iter()
        .map(|s| s.parse::<HoverCue>())
        .collect::<Result<Vec<_>, _>>()?;

    let sim = SimulationConfig {
        fps: args.fps,
        duration_secs: args.duration,
    };

    tracing::info!(
        objects = scene.objects.len(),
        cues = cues.len(),
        fps = sim.fps,
        duration = sim.duration_secs,
        "Simulating"
    );

    let trace = simulate(&scene, &config.motion, &cues, &sim)?;
    let summaries = trace.summaries();

    if let Some(path) = &args.jsonl {
        let header = TraceHeader::now(trace.fps, trace.duration_secs);
        let content = serialize_trace(&header, &trace.samples)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write trace to {}", path.display()))?;
        tracing::info!("Trace written to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!(
        "Simulated {:.2}s at {} fps ({} samples)",
        trace.duration_secs,
        trace.fps,
        trace.samples.len()
    );
    println!();
    println!(
        "{:<14} {:>6} {:>8} {:>8} {:>9} {:>8} {:>9}",
        "object", "rest", "peak", "final", "velocity", "bounces", "settled"
    );
    for s in &summaries {
        let settled = s
            .settled_at
            .map_or_else(|| "-".to_string(), |t| format!("{t:.2}s"));
        println!(
            "{:<14} {:>6.3} {:>8.3} {:>8.3} {:>9.3} {:>8} {:>9}",
            s.id.as_str(),
            s.rest_height,
            s.peak_height,
            s.final_height,
            s.final_velocity,
            s.bounces,
            settled
        );
    }

    Ok(())
}
