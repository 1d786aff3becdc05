//! Showcase object descriptions.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Opaque object identity (e.g. `"controller"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single object placed in the showcase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub id: ObjectId,

    /// Where the object sits when nothing is hovering it. Its `y`
    /// component is the rest height.
    pub rest_position: DVec3,

    /// How the renderer should draw it. Opaque to the motion core.
    pub appearance: Appearance,
}

impl ObjectDescription {
    pub fn new(id: impl Into<String>, rest_position: DVec3, appearance: Appearance) -> Self {
        Self {
            id: ObjectId::new(id),
            rest_position,
            appearance,
        }
    }

    /// Vertical resting position.
    pub fn rest_height(&self) -> f64 {
        self.rest_position.y
    }
}

/// Rendering hint for an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Appearance {
    /// A loaded model asset.
    Model {
        /// Asset path (e.g. `/models/controller.glb`).
        path: String,
        /// Uniform scale applied to the model.
        scale: f64,
    },

    /// A primitive stand-in used until a real model exists.
    Placeholder {
        shape: PlaceholderShape,
        /// CSS-style hex color, e.g. `#3b82f6`.
        color: String,
    },
}

/// Primitive shapes available for placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderShape {
    /// A ring, used for headphones.
    Torus,
    /// Three stacked slabs, used for books.
    BookStack,
}

impl Appearance {
    /// Asset path if this appearance references one.
    pub fn model_path(&self) -> Option<&str> {
        match self {
            Appearance::Model { path, .. } => Some(path),
            Appearance::Placeholder { .. } => None,
        }
    }
}
