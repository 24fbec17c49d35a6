use common::Vec3;
use physics::{Buoyancy, Gravity, RigidBody};

/// The player entity: a rigid body with its own flotation while on foot.
#[derive(Clone, Debug)]
pub struct Agent {
    pub body: RigidBody,
    /// Walking speed on foot.
    pub speed: f32,
    /// Sprite faces left after moving left.
    pub facing_left: bool,
    buoyancy: Buoyancy,
    gravity: Gravity,
}

impl Agent {
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            body: RigidBody::at(position),
            speed,
            facing_left: false,
            buoyancy: Buoyancy::default(),
            gravity: Gravity::default(),
        }
    }

    /// Sets horizontal velocity from the input axes, keeping the
    /// vertical component, and updates the facing flag.
    pub fn set_move_input(&mut self, x: f32, z: f32) {
        if self.body.kinematic {
            return;
        }
        let dir = Vec3::new(x, 0.0, z);
        self.body.velocity = Vec3::new(
            dir.x * self.speed,
            self.body.velocity.y,
            dir.z * self.speed,
        );
        if x != 0.0 {
            self.facing_left = x < 0.0;
        }
    }

    /// Advances flotation and integration. Skipped entirely while the
    /// body is kinematic (parented to a vessel).
    pub fn tick(&mut self, dt: f32) {
        if self.body.kinematic {
            return;
        }
        self.buoyancy.apply(&mut self.body, dt);
        self.gravity.apply(&mut self.body, dt);
        self.body.integrate(dt);
    }
}
