//! Boat motion model: thrust, turning, drift and flotation.

use common::Vec3;
use data::VesselTuning;
use physics::{Buoyancy, Gravity, RigidBody};

/// Threshold above which steering input and speed trigger the sharp
/// lateral cut.
const DRIFT_INPUT_THRESHOLD: f32 = 0.2;

/// A boat with a rigid body, a yaw heading and immutable tuning.
#[derive(Clone, Debug)]
pub struct Vessel {
    pub body: RigidBody,
    /// Yaw angle in radians about the vertical axis.
    pub yaw: f32,
    tuning: VesselTuning,
    buoyancy: Buoyancy,
    gravity: Gravity,
    occupied: bool,
}

impl Vessel {
    /// Creates a vessel at rest at the given position.
    pub fn new(position: Vec3, tuning: VesselTuning) -> Self {
        Self {
            body: RigidBody::at(position),
            yaw: 0.0,
            tuning,
            buoyancy: Buoyancy {
                water_level: tuning.water_level,
                strength: tuning.buoyancy,
                damping: tuning.damping,
            },
            gravity: Gravity {
                scale: tuning.gravity_scale,
            },
            occupied: false,
        }
    }

    pub fn tuning(&self) -> &VesselTuning {
        &self.tuning
    }

    pub fn occupied(&self) -> bool {
        self.occupied
    }

    /// Unit forward vector derived from the yaw heading.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Unit starboard vector derived from the yaw heading.
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Position an occupant stands at while aboard.
    pub fn deck_position(&self) -> Vec3 {
        self.body.position + Vec3::UP * self.tuning.deck_height
    }

    /// Position an occupant is placed at when stepping off.
    pub fn exit_position(&self) -> Vec3 {
        let d = self.tuning.exit_distance;
        self.body.position + Vec3::new(d, 0.0, d)
    }

    /// Claims the single occupant slot. Returns whether boarding took
    /// effect; an occupied vessel refuses.
    pub fn board(&mut self) -> bool {
        if self.occupied {
            return false;
        }
        self.occupied = true;
        true
    }

    /// Releases the occupant slot. A no-op when empty.
    pub fn unboard(&mut self) {
        self.occupied = false;
    }

    /// Whether `point` lies within the boarding zone around the hull.
    pub fn in_boarding_zone(&self, point: Vec3) -> bool {
        (point - self.body.position).length() <= self.tuning.zone_radius
    }

    /// Applies one tick of steering. Ignored while unoccupied.
    ///
    /// `throttle` and `rudder` are the forward and lateral input axes in
    /// `[-1, 1]`.
    pub fn steer(&mut self, throttle: f32, rudder: f32, dt: f32) {
        if !self.occupied {
            return;
        }
        // Thrust and turn as instantaneous velocity changes.
        let thrust = self.forward() * (throttle * self.tuning.forward_speed * dt);
        self.body.apply_velocity_change(thrust);
        let turn = Vec3::UP * (rudder * self.tuning.turn_speed * dt);
        self.body.apply_torque(turn);

        self.body.clamp_speed(self.tuning.max_speed);
        self.body.clamp_angular_speed(self.tuning.max_turn_speed);

        self.apply_drift(dt);
        self.damp_drift(rudder, dt);
    }

    /// Lateral force from the cross of velocity and the up axis, scaled
    /// by current speed.
    fn apply_drift(&mut self, dt: f32) {
        let velocity = self.body.velocity;
        let drift_dir = velocity.cross(Vec3::UP).normalized();
        let drift = drift_dir * (self.tuning.drift_strength * velocity.length() * dt);
        self.body.apply_velocity_change(drift);
    }

    /// Blends the sideways velocity component toward zero, with a sharp
    /// cut while actively turning at speed.
    fn damp_drift(&mut self, rudder: f32, dt: f32) {
        let velocity = self.body.velocity;
        let right = self.right();
        let mut lateral = velocity.dot(right);
        let rest = velocity - right * lateral;

        if rudder.abs() > DRIFT_INPUT_THRESHOLD && velocity.length() > DRIFT_INPUT_THRESHOLD {
            lateral *= 1.0 - self.tuning.drift_factor;
        }
        let t = (self.tuning.lerp_speed * dt).min(1.0);
        lateral = common::lerp(lateral, lateral * self.tuning.drift_factor, t);

        self.body.velocity = rest + right * lateral;
    }

    /// Advances flotation and integration, occupied or not.
    ///
    /// Speed caps are re-applied at the end of the tick so drift and
    /// flotation forces can never leave the body above its limits.
    pub fn tick(&mut self, dt: f32) {
        self.buoyancy.apply(&mut self.body, dt);
        self.gravity.apply(&mut self.body, dt);
        self.body.clamp_speed(self.tuning.max_speed);
        self.body.clamp_angular_speed(self.tuning.max_turn_speed);
        self.body.integrate(dt);
        self.yaw += self.body.angular_velocity.y * dt;
    }
}
