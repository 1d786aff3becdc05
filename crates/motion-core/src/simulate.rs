//! Headless fixed-rate simulation.
//!
//! Runs a [`SceneAnimator`] at a fixed frame rate, sampling each object's
//! [`HoverScript`] at the start of every frame, and records the result as a
//! [`MotionTrace`]. Frames longer than the spring's `max_delta` are split into
//! equal sub-steps so simulated time always matches the reported time.

use levitate_common::clock::FixedStep;
use levitate_common::config::MotionConfig;
use levitate_common::error::{LevitateError, LevitateResult};
use levitate_scene_model::object::ObjectId;
use levitate_scene_model::scene::SceneDescription;
use levitate_scene_model::trace::MotionSample;
use serde::{Deserialize, Serialize};

use crate::driver::SceneAnimator;
use crate::script::{HoverCue, HoverScript};

/// Longest run [`simulate`] accepts, in frames.
pub const MAX_FRAMES: u64 = 1_000_000;

/// Frame rate and length of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub fps: u32,
    pub duration_secs: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            duration_secs: 3.0,
        }
    }
}

impl SimulationConfig {
    /// Reject a zero frame rate, a negative or non-finite duration, and runs
    /// longer than [`MAX_FRAMES`].
    pub fn validate(&self) -> LevitateResult<()> {
        if self.fps == 0 {
            return Err(LevitateError::config("fps must be positive"));
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(LevitateError::config(format!(
                "duration must be a finite, non-negative number of seconds (got {})",
                self.duration_secs
            )));
        }
        let frames = FixedStep::new(self.fps).frames_in(self.duration_secs);
        if frames > MAX_FRAMES {
            return Err(LevitateError::config(format!(
                "{frames} frames exceeds the limit of {MAX_FRAMES}"
            )));
        }
        Ok(())
    }
}

/// Every object's state after every frame of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionTrace {
    pub fps: u32,
    pub duration_secs: f64,
    /// Rest height per object, in scene order.
    rest_heights: Vec<(ObjectId, f64)>,
    /// Frame-major: all objects for frame 0, then frame 1, ...
    pub samples: Vec<MotionSample>,
}

/// Per-object statistics over a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub id: ObjectId,
    pub rest_height: f64,
    pub peak_height: f64,
    pub final_height: f64,
    pub final_velocity: f64,
    /// Ground contacts that actually bounced (rebound above settle speed).
    pub bounces: usize,
    /// Earliest time from which the object stayed unhovered and motionless
    /// at rest height until the end of the run.
    pub settled_at: Option<f64>,
}

impl MotionTrace {
    /// Samples for one object, in frame order.
    pub fn for_object<'a>(
        &'a self,
        id: &ObjectId,
    ) -> impl Iterator<Item = &'a MotionSample> + 'a {
        let id = id.clone();
        self.samples.iter().filter(move |s| s.id == id)
    }

    /// Heights for one object, in frame order.
    pub fn heights(&self, id: &ObjectId) -> Vec<f64> {
        self.for_object(id).map(|s| s.height).collect()
    }

    pub fn summaries(&self) -> Vec<ObjectSummary> {
        self.rest_heights
            .iter()
            .map(|(id, rest)| self.summarize(id, *rest))
            .collect()
    }

    fn summarize(&self, id: &ObjectId, rest_height: f64) -> ObjectSummary {
        let samples: Vec<&MotionSample> = self.for_object(id).collect();

        let peak_height = samples
            .iter()
            .map(|s| s.height)
            .fold(rest_height, f64::max);
        let (final_height, final_velocity) = samples
            .last()
            .map_or((rest_height, 0.0), |s| (s.height, s.velocity));
        let bounces = samples.iter().filter(|s| s.bounced).count();

        let at_rest =
            |s: &&MotionSample| !s.hovered && s.velocity == 0.0 && s.height == rest_height;
        let settled_from = samples
            .iter()
            .rposition(|s| !at_rest(s))
            .map_or(0, |last_moving| last_moving + 1);
        let settled_at = samples.get(settled_from).map(|s| s.time_secs);

        ObjectSummary {
            id: id.clone(),
            rest_height,
            peak_height,
            final_height,
            final_velocity,
            bounces,
            settled_at,
        }
    }
}

/// Run `scene` for `sim.duration_secs` at `sim.fps`, hovering objects as
/// `cues` dictate.
pub fn simulate(
    scene: &SceneDescription,
    motion: &MotionConfig,
    cues: &[HoverCue],
    sim: &SimulationConfig,
) -> LevitateResult<MotionTrace> {
    for cue in cues {
        if let Some(target) = &cue.target {
            if scene.get(target).is_none() {
                return Err(LevitateError::unknown_object(target.as_str()));
            }
        }
    }

    sim.validate()?;

    let mut animator = SceneAnimator::new(scene, motion)?;
    let step = FixedStep::new(sim.fps);
    let frames = step.frames_in(sim.duration_secs);
    let substeps = step.substeps(motion.spring.max_delta);
    let substep_delta = step.delta() / substeps as f64;

    let scripts: Vec<(ObjectId, HoverScript)> = scene
        .ids()
        .map(|id| (id.clone(), HoverScript::for_object(cues, id)))
        .collect();

    tracing::debug!(
        fps = step.fps(),
        frames,
        substeps,
        objects = scripts.len(),
        "Starting simulation"
    );

    let capacity = usize::try_from(frames)
        .ok()
        .and_then(|frames| frames.checked_mul(scripts.len()))
        .ok_or_else(|| LevitateError::config("simulation is too long to record"))?;
    let mut samples = Vec::with_capacity(capacity);
    for frame in 0..frames {
        let start = step.time_of(frame);
        for (id, script) in &scripts {
            animator.set_hovered(id, script.is_hovered(start))?;
        }

        let mut bounced = vec![false; animator.len()];
        for _ in 0..substeps {
            for (flag, contact) in bounced.iter_mut().zip(animator.step(substep_delta)) {
                *flag |= contact.is_some_and(|c| !c.settled());
            }
        }
        let end = step.time_of(frame + 1);

        for (object, bounced) in animator.objects().iter().zip(bounced) {
            samples.push(MotionSample {
                frame,
                time_secs: end,
                id: object.id().clone(),
                height: object.height(),
                velocity: object.velocity(),
                hovered: object.is_hovered(),
                phase: object.phase(),
                bounced,
            });
        }
    }

    Ok(MotionTrace {
        fps: step.fps(),
        duration_secs: sim.duration_secs,
        rest_heights: scene
            .objects
            .iter()
            .map(|o| (o.id.clone(), o.rest_height()))
            .collect(),
        samples,
    })
}
