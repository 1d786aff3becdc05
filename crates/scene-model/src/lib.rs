//! Levitate Scene Model
//!
//! Defines the data contracts shared between the motion core and whatever
//! renders it:
//! - **Objects:** Identity, rest position, and appearance hints
//! - **Scene:** The set of showcase objects, loadable from JSON
//! - **Transforms:** Per-frame output handed to the renderer
//! - **Traces:** Recorded motion samples (JSONL) for inspection and tests
//!
//! Positions are world-space `glam::DVec3` with +Y up.

pub mod object;
pub mod scene;
pub mod trace;
pub mod transform;

pub use object::*;
pub use scene::*;
pub use trace::*;
pub use transform::*;
