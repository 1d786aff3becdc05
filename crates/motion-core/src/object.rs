//! Per-object animation state.

use glam::DVec3;
use levitate_scene_model::object::{ObjectDescription, ObjectId};
use levitate_scene_model::trace::HoverPhase;
use levitate_scene_model::transform::ObjectTransform;

use crate::hover_spring::SpringState;

/// Mutable motion state for one displayed object.
///
/// The rest position is fixed at construction. Height never drops below the
/// rest height once it has passed through the spring integrator.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedObject {
    id: ObjectId,
    rest_position: DVec3,
    height: f64,
    velocity: f64,
    hovered: bool,
    spin_angle: f64,
}

impl AnimatedObject {
    /// A new object sitting at rest, not hovered.
    pub fn new(id: impl Into<ObjectId>, rest_position: DVec3) -> Self {
        Self {
            id: id.into(),
            rest_position,
            height: rest_position.y,
            velocity: 0.0,
            hovered: false,
            spin_angle: 0.0,
        }
    }

    pub fn from_description(description: &ObjectDescription) -> Self {
        Self::new(description.id.clone(), description.rest_position)
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn rest_position(&self) -> DVec3 {
        self.rest_position
    }

    pub fn rest_height(&self) -> f64 {
        self.rest_position.y
    }

    /// Current vertical position.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn phase(&self) -> HoverPhase {
        HoverPhase::from_hovered(self.hovered)
    }

    /// Accumulated rotation about Y, in `[0, 2π)`.
    pub fn spin_angle(&self) -> f64 {
        self.spin_angle
    }

    pub fn spring_state(&self) -> SpringState {
        SpringState {
            height: self.height,
            velocity: self.velocity,
        }
    }

    pub(crate) fn set_spring_state(&mut self, state: SpringState) {
        self.height = state.height;
        self.velocity = state.velocity;
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub(crate) fn set_spin_angle(&mut self, angle: f64) {
        self.spin_angle = angle;
    }

    /// Drop any momentum, keeping the current height.
    pub fn reset_velocity(&mut self) {
        self.velocity = 0.0;
    }

    /// Where the renderer should draw this object.
    pub fn transform(&self) -> ObjectTransform {
        ObjectTransform {
            id: self.id.clone(),
            translation: DVec3::new(self.rest_position.x, self.height, self.rest_position.z),
            rotation_y: self.spin_angle,
        }
    }
}
