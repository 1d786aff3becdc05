//! Scene-level driver.
//!
//! Owns one [`AnimatedObject`] per displayed object and advances them all
//! once per frame. The renderer feeds it hover flags and frame timestamps
//! (or deltas) and reads back transforms.

use levitate_common::clock::FrameClock;
use levitate_common::config::MotionConfig;
use levitate_common::error::{LevitateError, LevitateResult};
use levitate_scene_model::object::{ObjectDescription, ObjectId};
use levitate_scene_model::scene::SceneDescription;
use levitate_scene_model::transform::ObjectTransform;

use crate::hover_spring::{GroundContact, HoverSpringAnimator};
use crate::object::AnimatedObject;
use crate::spin::Spin;

/// Drives every object in a scene.
#[derive(Debug, Clone)]
pub struct SceneAnimator {
    animator: HoverSpringAnimator,
    spin: Spin,
    objects: Vec<AnimatedObject>,
    hover_input: Vec<bool>,
    clock: FrameClock,
    paused: bool,
}

impl SceneAnimator {
    /// Build a driver for `scene`, validating both scene and tuning.
    pub fn new(scene: &SceneDescription, config: &MotionConfig) -> LevitateResult<Self> {
        config.validate()?;
        scene
            .validate()
            .map_err(|e| LevitateError::scene(e.to_string()))?;

        let max_delta = config.spring.max_delta;
        let objects: Vec<AnimatedObject> = scene
            .objects
            .iter()
            .map(AnimatedObject::from_description)
            .collect();

        tracing::debug!(objects = objects.len(), "Scene animator created");

        Ok(Self {
            animator: HoverSpringAnimator::new(config.spring),
            spin: Spin::new(config.spin, max_delta),
            hover_input: vec![false; objects.len()],
            objects,
            clock: FrameClock::new(max_delta),
            paused: false,
        })
    }

    pub fn animator(&self) -> &HoverSpringAnimator {
        &self.animator
    }

    pub fn objects(&self) -> &[AnimatedObject] {
        &self.objects
    }

    pub fn object(&self, id: &ObjectId) -> Option<&AnimatedObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn index_of(&self, id: &ObjectId) -> LevitateResult<usize> {
        self.objects
            .iter()
            .position(|o| o.id() == id)
            .ok_or_else(|| LevitateError::unknown_object(id.as_str()))
    }

    /// Add an object at rest. Ids must be unique.
    pub fn insert(&mut self, description: &ObjectDescription) -> LevitateResult<()> {
        if self.object(&description.id).is_some() {
            return Err(LevitateError::scene(format!(
                "Duplicate object id: {}",
                description.id
            )));
        }
        if !description.rest_position.is_finite() {
            return Err(LevitateError::scene(format!(
                "Object {} has a non-finite rest position",
                description.id
            )));
        }
        self.objects
            .push(AnimatedObject::from_description(description));
        self.hover_input.push(false);
        Ok(())
    }

    /// Remove an object from the scene. Its state is simply dropped.
    pub fn remove(&mut self, id: &ObjectId) -> Option<AnimatedObject> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        self.hover_input.remove(index);
        Some(self.objects.remove(index))
    }

    /// Set the hover flag sampled on the next frame.
    pub fn set_hovered(&mut self, id: &ObjectId, hovered: bool) -> LevitateResult<()> {
        let index = self.index_of(id)?;
        self.hover_input[index] = hovered;
        Ok(())
    }

    /// Hover at most one object (the pointer's current hit), clearing the rest.
    pub fn hover_exclusive(&mut self, id: Option<&ObjectId>) -> LevitateResult<()> {
        let target = id.map(|id| self.index_of(id)).transpose()?;
        for (index, flag) in self.hover_input.iter_mut().enumerate() {
            *flag = Some(index) == target;
        }
        Ok(())
    }

    /// Ids currently flagged as hovered.
    pub fn hovered_ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects
            .iter()
            .zip(&self.hover_input)
            .filter(|(_, hovered)| **hovered)
            .map(|(object, _)| object.id())
    }

    /// Advance using a frame timestamp (seconds on any monotonic clock).
    pub fn tick(&mut self, now_secs: f64) -> Vec<ObjectTransform> {
        if self.paused {
            return self.transforms();
        }
        let delta = self.clock.tick(now_secs);
        self.advance(delta)
    }

    /// Advance by `delta` seconds and return every object's transform.
    pub fn advance(&mut self, delta: f64) -> Vec<ObjectTransform> {
        self.step(delta);
        self.transforms()
    }

    /// Advance by `delta` seconds, reporting ground contacts in object order.
    ///
    /// While paused this does nothing and reports no contacts.
    pub fn step(&mut self, delta: f64) -> Vec<Option<GroundContact>> {
        if self.paused {
            return vec![None; self.objects.len()];
        }

        self.objects
            .iter_mut()
            .zip(&self.hover_input)
            .map(|(object, &hovered)| {
                let (_, contact) = self.animator.update_with_contact(object, delta, hovered);
                object.set_spin_angle(self.spin.advance(object.spin_angle(), delta));
                contact
            })
            .collect()
    }

    /// Current transforms without advancing.
    pub fn transforms(&self) -> Vec<ObjectTransform> {
        self.objects.iter().map(AnimatedObject::transform).collect()
    }

    /// Stop advancing, e.g. when the page is hidden.
    pub fn pause(&mut self) {
        if !self.paused {
            tracing::debug!("Scene animator paused");
        }
        self.paused = true;
    }

    /// Continue after [`pause`](Self::pause). Velocities are zeroed and the
    /// frame clock restarts, so the hidden interval is never integrated.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        for object in &mut self.objects {
            object.reset_velocity();
        }
        self.clock.reset();
        self.paused = false;
        tracing::debug!("Scene animator resumed");
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use levitate_scene_model::object::{Appearance, PlaceholderShape};

    const DT: f64 = 1.0 / 60.0;

    fn showcase() -> SceneAnimator {
        SceneAnimator::new(&SceneDescription::showcase(), &MotionConfig::default()).unwrap()
    }

    fn id(s: &str) -> ObjectId {
        ObjectId::new(s)
    }

    #[test]
    fn test_only_hovered_object_lifts() {
        let mut scene = showcase();
        scene.set_hovered(&id("headphones"), true).unwrap();

        let mut transforms = vec![];
        for _ in 0..30 {
            transforms = scene.advance(DT);
        }

        assert_eq!(transforms.len(), 3);
        assert_eq!(transforms[0].height(), 0.5);
        assert!(transforms[1].height() > 1.0);
        assert_eq!(transforms[2].height(), 0.5);
        // Horizontal placement is untouched
        assert_eq!(transforms[1].translation.x, 0.0);
        assert_eq!(transforms[2].translation.x, 2.0);
        // Everything spins, hovered or not
        for transform in &transforms {
            assert!((transform.rotation_y - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unknown_object_is_an_error() {
        let mut scene = showcase();
        let err = scene.set_hovered(&id("lamp"), true).unwrap_err();
        assert!(matches!(err, LevitateError::UnknownObject { .. }));
        assert!(scene.hover_exclusive(Some(&id("lamp"))).is_err());
    }

    #[test]
    fn test_hover_exclusive() {
        let mut scene = showcase();
        scene.set_hovered(&id("controller"), true).unwrap();
        scene.hover_exclusive(Some(&id("books"))).unwrap();
        let hovered: Vec<&str> = scene.hovered_ids().map(ObjectId::as_str).collect();
        assert_eq!(hovered, ["books"]);

        scene.hover_exclusive(None).unwrap();
        assert_eq!(scene.hovered_ids().count(), 0);
    }

    #[test]
    fn test_pause_freezes_and_resume_resets_velocity() {
        let mut scene = showcase();
        scene.set_hovered(&id("books"), true).unwrap();
        scene.tick(0.0);
        for frame in 1..=10 {
            scene.tick(frame as f64 * DT);
        }
        let books = scene.object(&id("books")).unwrap();
        let height = books.height();
        assert!(books.velocity() > 0.0);

        scene.pause();
        let frozen = scene.tick(1.0);
        assert_eq!(frozen[2].height(), height);
        assert!(scene.step(DT).iter().all(Option::is_none));

        scene.resume();
        assert!(!scene.is_paused());
        assert!(scene.objects().iter().all(|o| o.velocity() == 0.0));

        // Ten seconds of hidden time must not land in one frame
        let after = scene.tick(11.0);
        assert_eq!(after[2].height(), height);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut scene = showcase();
        let lamp = ObjectDescription::new(
            "lamp",
            DVec3::new(4.0, 0.25, 0.0),
            Appearance::Placeholder {
                shape: PlaceholderShape::Torus,
                color: "#ffcc00".to_string(),
            },
        );
        scene.insert(&lamp).unwrap();
        assert_eq!(scene.len(), 4);
        assert!(scene.insert(&lamp).is_err());

        scene.set_hovered(&id("lamp"), true).unwrap();
        let removed = scene.remove(&id("lamp")).unwrap();
        assert_eq!(removed.rest_height(), 0.25);
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.hovered_ids().count(), 0);
        assert!(scene.remove(&id("lamp")).is_none());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = MotionConfig::default();
        config.spring.max_delta = 1.0;
        let err = SceneAnimator::new(&SceneDescription::showcase(), &config).unwrap_err();
        assert!(matches!(err, LevitateError::Config { .. }));
    }

    #[test]
    fn test_released_object_settles_back_to_rest() {
        let mut scene = showcase();
        scene.set_hovered(&id("controller"), true).unwrap();
        for _ in 0..90 {
            scene.advance(DT);
        }
        scene.set_hovered(&id("controller"), false).unwrap();

        let mut bounces = 0;
        for _ in 0..300 {
            let contacts = scene.step(DT);
            if matches!(contacts[0], Some(c) if !c.settled()) {
                bounces += 1;
            }
        }
        let controller = scene.object(&id("controller")).unwrap();
        assert!(bounces >= 1);
        assert_eq!(controller.height(), 0.5);
        assert_eq!(controller.velocity(), 0.0);
    }
}
