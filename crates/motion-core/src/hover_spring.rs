//! Hover-lift spring integrator.
//!
//! While hovered, an object springs toward `rest + lift_height`. When
//! released, the spring target drops back to rest and gravity pulls it down;
//! the rest plane acts as ground, so the object bounces off it with a
//! fraction of its impact speed instead of sinking through.
//!
//! Integration is semi-implicit Euler with multiplicative velocity damping:
//!
//! ```text
//! target    = hovered ? rest + lift : rest
//! force     = -k * (height - target) + (hovered ? 0 : -gravity)
//! velocity  = (velocity + force * dt) * (1 - c * dt)
//! height   += velocity * dt
//! if height < rest: height = rest, velocity = |velocity| * restitution
//! ```
//!
//! where `c = 2 * damping_ratio * sqrt(k)`. The damping factor is only
//! positive while `c * dt < 1`, which is why `dt` is clamped to `max_delta`.

use levitate_common::clock::sanitize_delta;
use levitate_common::config::SpringConfig;
use levitate_common::error::LevitateResult;
use levitate_scene_model::trace::HoverPhase;

use crate::object::AnimatedObject;

/// Vertical position and velocity of one object.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpringState {
    pub height: f64,
    pub velocity: f64,
}

impl SpringState {
    /// At rest on the ground.
    pub fn at_rest(rest_height: f64) -> Self {
        Self {
            height: rest_height,
            velocity: 0.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.height.is_finite() && self.velocity.is_finite()
    }
}

/// A collision with the rest plane during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    /// Velocity at the moment of impact (negative: moving down).
    pub impact_velocity: f64,
    /// Upward velocity after the bounce. Zero when the object settled.
    pub rebound_velocity: f64,
}

impl GroundContact {
    /// Whether the impact was too slow to bounce.
    pub fn settled(&self) -> bool {
        self.rebound_velocity == 0.0
    }
}

/// Result of a single integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringStep {
    pub state: SpringState,
    pub contact: Option<GroundContact>,
}

/// Integrates the hover spring for any number of independent objects.
///
/// Holds only constants; all mutable state lives in [`SpringState`] /
/// [`AnimatedObject`], so one animator can be shared across a scene.
#[derive(Debug, Clone)]
pub struct HoverSpringAnimator {
    config: SpringConfig,
    damping_coefficient: f64,
}

impl HoverSpringAnimator {
    /// Create an animator with the given constants.
    ///
    /// The constants are not checked; use [`try_new`](Self::try_new) for
    /// values that come from user configuration.
    pub fn new(config: SpringConfig) -> Self {
        Self {
            damping_coefficient: config.damping_coefficient(),
            config,
        }
    }

    /// Create an animator after validating the constants.
    pub fn try_new(config: SpringConfig) -> LevitateResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Per-second damping applied to velocity.
    pub fn damping_coefficient(&self) -> f64 {
        self.damping_coefficient
    }

    /// Height the spring pulls toward.
    pub fn target_height(&self, rest_height: f64, hovered: bool) -> f64 {
        if hovered {
            rest_height + self.config.lift_height
        } else {
            rest_height
        }
    }

    /// Advance one frame. Pure: the input state is not modified.
    ///
    /// `delta` is sanitized first: negative, NaN, and infinite values count
    /// as zero, and anything above `max_delta` is clamped.
    pub fn step(
        &self,
        state: SpringState,
        rest_height: f64,
        delta: f64,
        hovered: bool,
    ) -> SpringStep {
        if !state.is_finite() {
            tracing::warn!(
                height = state.height,
                velocity = state.velocity,
                "Non-finite spring state; snapping to rest"
            );
            return SpringStep {
                state: SpringState::at_rest(rest_height),
                contact: None,
            };
        }

        let dt = sanitize_delta(delta, self.config.max_delta);
        let target = self.target_height(rest_height, hovered);

        let spring_force = -self.config.spring_strength * (state.height - target);
        let gravity_force = if hovered { 0.0 } else { -self.config.gravity };

        let mut velocity = state.velocity + (spring_force + gravity_force) * dt;
        velocity *= 1.0 - self.damping_coefficient * dt;
        let mut height = state.height + velocity * dt;

        let mut contact = None;
        if height < rest_height {
            height = rest_height;
            let impact_velocity = velocity;
            velocity = impact_velocity.abs() * self.config.bounce_restitution;
            if velocity < self.config.settle_speed {
                velocity = 0.0;
            }
            contact = Some(GroundContact {
                impact_velocity,
                rebound_velocity: velocity,
            });
        }

        SpringStep {
            state: SpringState { height, velocity },
            contact,
        }
    }

    /// Advance an object one frame and return its new height.
    pub fn update(&self, object: &mut AnimatedObject, delta: f64, hovered: bool) -> f64 {
        self.update_with_contact(object, delta, hovered).0
    }

    /// Like [`update`](Self::update), also reporting any ground contact.
    pub fn update_with_contact(
        &self,
        object: &mut AnimatedObject,
        delta: f64,
        hovered: bool,
    ) -> (f64, Option<GroundContact>) {
        if object.is_hovered() != hovered {
            tracing::debug!(
                object = %object.id(),
                from = ?object.phase(),
                to = ?HoverPhase::from_hovered(hovered),
                height = object.height(),
                "Hover phase change"
            );
        }
        object.set_hovered(hovered);

        let step = self.step(object.spring_state(), object.rest_height(), delta, hovered);
        object.set_spring_state(step.state);

        if let Some(contact) = step.contact {
            if !contact.settled() {
                tracing::debug!(
                    object = %object.id(),
                    impact = contact.impact_velocity,
                    rebound = contact.rebound_velocity,
                    "Ground bounce"
                );
            }
        }

        (step.state.height, step.contact)
    }
}

impl Default for HoverSpringAnimator {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;
    const REST: f64 = 0.5;

    #[test]
    fn test_lift_to_target_in_one_second() {
        let animator = HoverSpringAnimator::default();
        let mut state = SpringState::at_rest(REST);

        for _ in 0..60 {
            state = animator.step(state, REST, DT, true).state;
            assert!(
                (REST..=1.6).contains(&state.height),
                "height {} left [0.5, 1.6]",
                state.height
            );
        }
        assert!(
            (state.height - 1.5).abs() < 0.05,
            "height {} not near 1.5 after one second",
            state.height
        );
    }

    #[test]
    fn test_bounce_keeps_exact_restitution() {
        let animator = HoverSpringAnimator::default();
        let config = *animator.config();

        // Just above ground, falling fast
        let before = SpringState {
            height: REST + 0.001,
            velocity: -3.0,
        };
        let step = animator.step(before, REST, DT, false);
        let contact = step.contact.expect("should hit the ground");

        let expected_impact = (before.velocity
            + (-config.spring_strength * (before.height - REST) - config.gravity) * DT)
            * (1.0 - animator.damping_coefficient() * DT);
        assert!((contact.impact_velocity - expected_impact).abs() < 1e-12);
        assert_eq!(
            contact.rebound_velocity,
            contact.impact_velocity.abs() * 0.3
        );
        assert_eq!(step.state.height, REST);
        assert_eq!(step.state.velocity, contact.rebound_velocity);
    }

    #[test]
    fn test_slow_impact_settles() {
        let animator = HoverSpringAnimator::default();
        let step = animator.step(SpringState::at_rest(REST), REST, DT, false);
        let contact = step.contact.expect("gravity pushes into the ground");
        assert!(contact.settled());
        assert_eq!(step.state, SpringState::at_rest(REST));
    }

    #[test]
    fn test_impact_just_above_settle_speed_bounces() {
        let animator = HoverSpringAnimator::default();
        let before = SpringState {
            height: REST + 0.001,
            velocity: -0.5,
        };
        let contact = animator
            .step(before, REST, DT, false)
            .contact
            .expect("should hit the ground");

        assert!(!contact.settled());
        assert!(contact.rebound_velocity > animator.config().settle_speed);
        assert!(contact.rebound_velocity < 0.25);
        assert_eq!(
            contact.rebound_velocity,
            contact.impact_velocity.abs() * 0.3
        );
    }

    #[test]
    fn test_resting_object_stays_put_at_max_delta() {
        let animator = HoverSpringAnimator::default();
        let mut state = SpringState::at_rest(REST);
        for _ in 0..5 {
            state = animator.step(state, REST, 1.0 / 30.0, false).state;
            assert_eq!(state, SpringState::at_rest(REST));
        }
    }

    #[test]
    fn test_invalid_delta_is_a_no_op() {
        let animator = HoverSpringAnimator::default();
        let state = SpringState {
            height: 1.2,
            velocity: 0.8,
        };
        for delta in [f64::NAN, -0.5, f64::INFINITY, 0.0] {
            let step = animator.step(state, REST, delta, true);
            assert_eq!(step.state, state, "delta {delta} changed the state");
            assert!(step.contact.is_none());
        }
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let animator = HoverSpringAnimator::default();
        let state = SpringState::at_rest(REST);
        let hitch = animator.step(state, REST, 5.0, true);
        let clamped = animator.step(state, REST, 1.0 / 30.0, true);
        assert_eq!(hitch, clamped);
    }

    #[test]
    fn test_hover_toggle_only_moves_target() {
        let animator = HoverSpringAnimator::default();
        let airborne = SpringState {
            height: 1.1,
            velocity: 0.4,
        };
        // A zero-length frame with the hover flag flipped leaves position alone
        assert_eq!(animator.step(airborne, REST, 0.0, false).state, airborne);
        assert_eq!(animator.target_height(REST, true), 1.5);
        assert_eq!(animator.target_height(REST, false), REST);
    }

    #[test]
    fn test_non_finite_state_recovers() {
        let animator = HoverSpringAnimator::default();
        let corrupt = SpringState {
            height: f64::NAN,
            velocity: 1.0,
        };
        let step = animator.step(corrupt, REST, DT, true);
        assert_eq!(step.state, SpringState::at_rest(REST));
    }

    #[test]
    fn test_try_new_rejects_bad_config() {
        let config = SpringConfig {
            spring_strength: -1.0,
            ..Default::default()
        };
        assert!(HoverSpringAnimator::try_new(config).is_err());
        assert!(HoverSpringAnimator::try_new(SpringConfig::default()).is_ok());
    }

    #[test]
    fn test_update_tracks_object_state() {
        let animator = HoverSpringAnimator::default();
        let mut object = AnimatedObject::new("headphones", glam::DVec3::new(0.0, REST, 0.0));

        let height = animator.update(&mut object, DT, true);
        assert!(height > REST);
        assert_eq!(object.height(), height);
        assert!(object.velocity() > 0.0);
        assert_eq!(object.phase(), HoverPhase::Lifted);
    }
}
