//! Scene description: the set of objects on display.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::object::{Appearance, ObjectDescription, ObjectId, PlaceholderShape};

/// Current scene file schema version.
pub const SCENE_SCHEMA_VERSION: &str = "1.0";

/// Top-level scene file (`scene.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Schema version.
    pub schema_version: String,

    /// Objects in display order.
    pub objects: Vec<ObjectDescription>,
}

/// Errors from loading, saving, or validating a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Duplicate object id: {0}")]
    DuplicateId(ObjectId),

    #[error("Object {0} has a non-finite rest position")]
    NonFinitePosition(ObjectId),
}

impl SceneDescription {
    /// An empty scene.
    pub fn new() -> Self {
        Self {
            schema_version: SCENE_SCHEMA_VERSION.to_string(),
            objects: vec![],
        }
    }

    /// The "things I use daily" showcase: a controller, headphones, and a
    /// stack of books lined up on a platform.
    pub fn showcase() -> Self {
        Self {
            schema_version: SCENE_SCHEMA_VERSION.to_string(),
            objects: vec![
                ObjectDescription::new(
                    "controller",
                    DVec3::new(-2.0, 0.5, 0.0),
                    Appearance::Model {
                        path: "/models/controller.glb".to_string(),
                        scale: 1.5,
                    },
                ),
                ObjectDescription::new(
                    "headphones",
                    DVec3::new(0.0, 0.5, 0.0),
                    Appearance::Placeholder {
                        shape: PlaceholderShape::Torus,
                        color: "#3b82f6".to_string(),
                    },
                ),
                ObjectDescription::new(
                    "books",
                    DVec3::new(2.0, 0.5, 0.0),
                    Appearance::Placeholder {
                        shape: PlaceholderShape::BookStack,
                        color: "#22c55e".to_string(),
                    },
                ),
            ],
        }
    }

    /// Look up an object by id.
    pub fn get(&self, id: &ObjectId) -> Option<&ObjectDescription> {
        self.objects.iter().find(|o| &o.id == id)
    }

    /// Object ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.iter().map(|o| &o.id)
    }

    /// Check ids are unique and rest positions are finite.
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut seen = HashSet::new();
        for object in &self.objects {
            if !seen.insert(&object.id) {
                return Err(SceneError::DuplicateId(object.id.clone()));
            }
            if !object.rest_position.is_finite() {
                return Err(SceneError::NonFinitePosition(object.id.clone()));
            }
        }
        Ok(())
    }

    /// Load and validate a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SceneError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let scene = Self::from_json(&json).map_err(|e| SceneError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        scene.validate()?;
        Ok(scene)
    }

    /// Save the scene as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SceneError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = self.to_json().map_err(|e| SceneError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| SceneError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showcase_layout() {
        let scene = SceneDescription::showcase();
        assert!(scene.validate().is_ok());

        let ids: Vec<&str> = scene.ids().map(ObjectId::as_str).collect();
        assert_eq!(ids, ["controller", "headphones", "books"]);

        for object in &scene.objects {
            assert_eq!(object.rest_height(), 0.5);
        }
        let controller = scene.get(&ObjectId::new("controller")).unwrap();
        assert_eq!(controller.rest_position.x, -2.0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut scene = SceneDescription::showcase();
        let copy = scene.objects[0].clone();
        scene.objects.push(copy);
        assert!(matches!(
            scene.validate(),
            Err(SceneError::DuplicateId(id)) if id.as_str() == "controller"
        ));
    }

    #[test]
    fn test_non_finite_rest_position_rejected() {
        let mut scene = SceneDescription::new();
        scene.objects.push(ObjectDescription::new(
            "lamp",
            DVec3::new(0.0, f64::NAN, 0.0),
            Appearance::Placeholder {
                shape: PlaceholderShape::Torus,
                color: "#ffffff".to_string(),
            },
        ));
        assert!(matches!(
            scene.validate(),
            Err(SceneError::NonFinitePosition(_))
        ));
    }

    #[test]
    fn test_json_layout() {
        let json = SceneDescription::showcase().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schema_version"], "1.0");
        assert_eq!(value["objects"][0]["id"], "controller");
        assert_eq!(value["objects"][0]["rest_position"][1], 0.5);
        assert_eq!(value["objects"][1]["appearance"]["shape"], "torus");
    }

    #[test]
    fn test_save_and_load_on_disk() {
        let dir = std::env::temp_dir().join(format!("levitate-scene-{}", std::process::id()));
        let path = dir.join("scene.json");

        let scene = SceneDescription::showcase();
        scene.save(&path).unwrap();
        let loaded = SceneDescription::load(&path).unwrap();
        assert_eq!(loaded, scene);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneDescription::load("/nonexistent/levitate/scene.json").unwrap_err();
        assert!(matches!(err, SceneError::IoError { .. }));
    }
}
