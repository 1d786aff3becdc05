//! Per-frame output for the renderer.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::object::ObjectId;

/// Where an object should be drawn this frame.
///
/// `translation` is the rest position with its `y` replaced by the animated
/// height; `rotation_y` is the accumulated spin in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    pub id: ObjectId,
    pub translation: DVec3,
    pub rotation_y: f64,
}

impl ObjectTransform {
    /// Vertical component of the translation.
    pub fn height(&self) -> f64 {
        self.translation.y
    }
}
