//! Rigid body integration, buoyancy and fractional gravity.

use common::Vec3;

/// Ambient downward acceleration on the Y axis.
pub const GRAVITY_Y: f32 = -9.81;

/// Minimal rigid body driven by explicit per-tick integration.
#[derive(Clone, Debug, Default)]
pub struct RigidBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    /// While kinematic the body is externally driven: forces and
    /// integration are skipped.
    pub kinematic: bool,
}

impl RigidBody {
    /// Creates a body at rest at the given position.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Applies an instantaneous velocity change (impulse on unit mass).
    pub fn apply_velocity_change(&mut self, delta: Vec3) {
        if self.kinematic {
            return;
        }
        self.velocity += delta;
    }

    /// Applies a continuous acceleration over one tick.
    pub fn apply_acceleration(&mut self, accel: Vec3, dt: f32) {
        if self.kinematic {
            return;
        }
        self.velocity += accel * dt;
    }

    /// Applies an instantaneous angular velocity change about an axis.
    pub fn apply_torque(&mut self, delta: Vec3) {
        if self.kinematic {
            return;
        }
        self.angular_velocity += delta;
    }

    /// Advances position by the current velocity.
    pub fn integrate(&mut self, dt: f32) {
        if self.kinematic {
            return;
        }
        self.position += self.velocity * dt;
    }

    /// Rescales linear velocity to `max` when it is exceeded.
    pub fn clamp_speed(&mut self, max: f32) {
        let speed = self.velocity.length();
        if speed > max {
            self.velocity = self.velocity.normalized() * max;
        }
    }

    /// Rescales angular velocity to `max` when it is exceeded.
    pub fn clamp_angular_speed(&mut self, max: f32) {
        let speed = self.angular_velocity.length();
        if speed > max {
            self.angular_velocity = self.angular_velocity.normalized() * max;
        }
    }
}

/// Depth-proportional upward force below a water surface.
#[derive(Clone, Copy, Debug)]
pub struct Buoyancy {
    /// Y position of the water surface.
    pub water_level: f32,
    /// Force per unit of submerged depth.
    pub strength: f32,
    /// Velocity-proportional damping while submerged.
    pub damping: f32,
}

impl Default for Buoyancy {
    fn default() -> Self {
        Self {
            water_level: 0.0,
            strength: 10.0,
            damping: 0.5,
        }
    }
}

impl Buoyancy {
    /// Pushes the body up in proportion to how deep it sits, damping
    /// its velocity to settle the oscillation.
    pub fn apply(&self, body: &mut RigidBody, dt: f32) {
        if body.position.y >= self.water_level {
            return;
        }
        let depth = self.water_level - body.position.y;
        body.apply_acceleration(Vec3::UP * (self.strength * depth), dt);
        body.apply_acceleration(-body.velocity * self.damping, dt);
    }
}

/// Fractional gravity applied on top of whatever the driver integrates.
#[derive(Clone, Copy, Debug)]
pub struct Gravity {
    /// Multiplier on the ambient downward acceleration.
    pub scale: f32,
}

impl Default for Gravity {
    fn default() -> Self {
        Self { scale: 0.5 }
    }
}

impl Gravity {
    pub fn apply(&self, body: &mut RigidBody, dt: f32) {
        body.apply_acceleration(Vec3::new(0.0, GRAVITY_Y * self.scale, 0.0), dt);
    }
}
