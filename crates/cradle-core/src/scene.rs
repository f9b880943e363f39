//! Pendulum-row scene description.
//!
//! A board at `board_height` carries one anchor per bob; every bob hangs
//! from its anchor on a rigid tether of `rest_length`. The first
//! `perturbed_count` bobs start displaced by `perturb_angle_deg` from
//! vertical and are released at rest; the remainder hang straight down.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Parameters for building a pendulum-row scene.
///
/// Bob mass is numerically equal to `bob_radius`, so the mass slider and
/// the size slider of a driving UI stay a single knob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Number of bobs in the row.
    pub bob_count: u32,
    /// How many bobs (from the left) start displaced.
    pub perturbed_count: u32,
    /// Release angle from vertical, degrees, in [0, 90].
    pub perturb_angle_deg: f32,
    /// Gap between neighboring bobs. 0 = touching, the cradle setup.
    pub spacing: f32,
    /// Height of the anchor board above the ground plane.
    pub board_height: f32,
    /// Tether length from anchor to bob center.
    pub rest_length: f32,
    /// Bob radius; also the bob mass.
    pub bob_radius: f32,
    /// Per-bob velocity damping in (0, 1]; 1.0 = no drag.
    pub damping: f32,
    /// Gravitational acceleration applied to every bob.
    pub gravity: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bob_count: 4,
            perturbed_count: 1,
            perturb_angle_deg: 45.0,
            spacing: 0.0,
            board_height: 8.0,
            rest_length: 6.5,
            bob_radius: 0.5,
            damping: 1.0,
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}

impl SceneConfig {
    /// Fail-fast validation of the whole parameter set.
    pub fn validate(&self) -> SimResult<()> {
        if self.bob_count == 0 {
            return Err(SimError::InvalidScene("bob_count must be at least 1".into()));
        }
        if self.perturbed_count > self.bob_count {
            return Err(SimError::InvalidScene(format!(
                "perturbed_count {} exceeds bob_count {}",
                self.perturbed_count, self.bob_count
            )));
        }
        if !(self.bob_radius.is_finite() && self.bob_radius > 0.0) {
            return Err(SimError::InvalidRadius(self.bob_radius));
        }
        if !(self.rest_length.is_finite() && self.rest_length > 0.0) {
            return Err(SimError::InvalidRestLength(self.rest_length));
        }
        if !(self.damping.is_finite() && self.damping > 0.0 && self.damping <= 1.0) {
            return Err(SimError::InvalidDamping(self.damping));
        }
        if !(0.0..=90.0).contains(&self.perturb_angle_deg) {
            return Err(SimError::InvalidScene(format!(
                "perturb_angle_deg {} outside [0, 90]",
                self.perturb_angle_deg
            )));
        }
        if !(self.spacing.is_finite() && self.spacing >= 0.0) {
            return Err(SimError::InvalidScene(format!(
                "spacing {} must be non-negative",
                self.spacing
            )));
        }
        if !(self.board_height.is_finite() && self.gravity.is_finite()) {
            return Err(SimError::InvalidScene(
                "board_height and gravity must be finite".into(),
            ));
        }
        Ok(())
    }

    /// X coordinate of the leftmost anchor; the row is centered on x = 0.
    fn x_start(&self) -> f32 {
        let diameter = self.bob_radius * 2.0;
        let row_width = self.bob_count as f32 * (diameter + self.spacing);
        -row_width / 2.0 + diameter / 2.0 + self.spacing / 2.0
    }

    /// Anchor point for bob `i`, on the board.
    pub fn anchor_position(&self, i: u32) -> Vec3 {
        let pitch = self.bob_radius * 2.0 + self.spacing;
        Vec3::new(
            self.x_start() + i as f32 * pitch,
            self.board_height,
            0.0,
        )
    }

    /// Initial center of bob `i`: hanging straight down, or swung out by
    /// the perturbation angle for the first `perturbed_count` bobs.
    pub fn bob_position(&self, i: u32) -> Vec3 {
        let anchor = self.anchor_position(i);
        if i < self.perturbed_count {
            let from_horizontal = (90.0 - self.perturb_angle_deg).to_radians();
            anchor
                - Vec3::new(
                    self.rest_length * from_horizontal.cos(),
                    self.rest_length * from_horizontal.sin(),
                    0.0,
                )
        } else {
            anchor - Vec3::new(0.0, self.rest_length, 0.0)
        }
    }
}
