//! Levitate Motion Core
//!
//! Per-frame motion for showcase objects:
//! - **Hover spring:** Spring toward a lifted height while hovered, fall
//!   back under gravity and bounce off the rest plane when released
//! - **Spin:** Constant slow rotation about the vertical axis
//! - **Scene driver:** Steps every object once per frame, handles pause/resume
//! - **Simulation:** Headless fixed-rate runs driven by hover scripts
//!
//! This crate is pure computation — no I/O, no rendering dependencies.
//! Callers supply deltas and hover flags; they get transforms back.

pub mod driver;
pub mod hover_spring;
pub mod object;
pub mod script;
pub mod simulate;
pub mod spin;

pub use driver::SceneAnimator;
pub use hover_spring::{GroundContact, HoverSpringAnimator, SpringState, SpringStep};
pub use object::AnimatedObject;
pub use script::{HoverCue, HoverScript, HoverWindow};
pub use simulate::{simulate, MotionTrace, ObjectSummary, SimulationConfig};
pub use spin::Spin;
