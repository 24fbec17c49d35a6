//! Fishing mini-game: a timed skill challenge on a vertical track.
//!
//! A target marker oscillates between the track bounds while the player
//! keeps a hook near it. Proximity fills a progress meter, distance drains
//! it; full progress wins, an empty timer loses.

use common::{lerp, ping_pong};
use data::FishingTuning;
use physics::GRAVITY_Y;
use rand::Rng;

/// Lifecycle of a [`FishingSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started yet.
    NotStarted,
    /// The mini game is running.
    Active,
    /// The progress meter was filled in time.
    Won,
    /// The timer ran out before the meter filled.
    Lost,
}

/// Surface the session reports to. Implementations may render however
/// they like; a session never depends on what the display does.
pub trait FishingDisplay {
    /// Makes the fishing UI visible.
    fn show(&mut self);
    /// Hides the fishing UI.
    fn hide(&mut self);
    /// Reports current progress in `[0, 1]`.
    fn set_progress(&mut self, value: f32);
    /// Reports a status line such as the win/loss message.
    fn set_status(&mut self, text: &str);
    /// Reports the countdown line.
    fn set_countdown(&mut self, text: &str);
}

/// Display that swallows every report, used when no panel is wired up.
pub struct NullDisplay;

impl FishingDisplay for NullDisplay {
    fn show(&mut self) {}
    fn hide(&mut self) {}
    fn set_progress(&mut self, _value: f32) {}
    fn set_status(&mut self, _text: &str) {}
    fn set_countdown(&mut self, _text: &str) {}
}

/// One run of the fishing mini-game.
#[derive(Clone, Debug)]
pub struct FishingSession {
    tuning: FishingTuning,
    state: SessionState,
    hook_pos: f32,
    hook_vel: f32,
    target_pos: f32,
    drift_vel: f32,
    progress: f32,
    remaining: f32,
    elapsed: f32,
    aligned: bool,
}

impl FishingSession {
    /// Creates an idle session with the given tuning.
    pub fn new(tuning: FishingTuning) -> Self {
        let mid = (tuning.bottom_bound + tuning.top_bound) * 0.5;
        Self {
            tuning,
            state: SessionState::NotStarted,
            hook_pos: mid,
            hook_vel: 0.0,
            target_pos: mid,
            drift_vel: 0.0,
            progress: 0.0,
            remaining: tuning.duration,
            elapsed: 0.0,
            aligned: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn hook_pos(&self) -> f32 {
        self.hook_pos
    }

    pub fn target_pos(&self) -> f32 {
        self.target_pos
    }

    /// Whether hook and target were within tolerance on the last tick.
    pub fn aligned(&self) -> bool {
        self.aligned
    }

    /// Starts the session. A no-op while one is already running.
    pub fn start<R: Rng>(&mut self, rng: &mut R, display: &mut dyn FishingDisplay) {
        if self.state == SessionState::Active {
            return;
        }
        self.state = SessionState::Active;
        self.progress = 0.0;
        self.remaining = self.tuning.duration;
        self.elapsed = 0.0;
        self.hook_vel = 0.0;
        self.drift_vel = self.sample_drift(rng);
        display.show();
        display.set_progress(0.0);
        display.set_status("Catch the fish!");
    }

    /// Advances the session by one tick. Returns the state afterwards.
    ///
    /// Sub-steps run in a fixed order: target motion, hook motion,
    /// alignment, progress, timer. The timer still runs on the tick the
    /// meter fills, so the countdown reflects the full elapsed time.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        ascend_held: bool,
        rng: &mut R,
        display: &mut dyn FishingDisplay,
    ) -> SessionState {
        if self.state != SessionState::Active {
            return self.state;
        }
        self.elapsed += dt;
        self.move_target(dt, rng);
        self.move_hook(dt, ascend_held);
        self.check_alignment();
        self.update_progress(dt, display);
        self.update_timer(dt, display);
        self.state
    }

    fn sample_drift<R: Rng>(&self, rng: &mut R) -> f32 {
        let r = self.tuning.drift_range;
        rng.gen_range(-r..=r)
    }

    fn move_target<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        let t = ping_pong(self.elapsed * self.tuning.target_speed, 1.0);
        let base = lerp(self.tuning.top_bound, self.tuning.bottom_bound, t);
        if rng.gen::<f32>() < self.tuning.drift_chance {
            self.drift_vel = self.sample_drift(rng);
        }
        let wander = self.drift_vel * dt * self.tuning.target_speed;
        self.target_pos = (base + wander).clamp(self.tuning.bottom_bound, self.tuning.top_bound);
    }

    fn move_hook(&mut self, dt: f32, ascend_held: bool) {
        if ascend_held {
            // Reset before the impulse so holding never stacks velocity.
            self.hook_vel = 0.0;
            self.hook_vel += self.tuning.hook_impulse;
        } else {
            // Floor only: upward velocity is never clamped.
            self.hook_vel = self.hook_vel.max(self.tuning.max_fall_speed);
        }
        self.hook_vel += GRAVITY_Y * self.tuning.hook_gravity_scale * dt;
        self.hook_pos += self.hook_vel * dt;
        self.hook_pos = self
            .hook_pos
            .clamp(self.tuning.bottom_bound, self.tuning.top_bound);
    }

    fn check_alignment(&mut self) {
        self.aligned = (self.hook_pos - self.target_pos).abs() < self.tuning.tolerance;
    }

    fn update_progress(&mut self, dt: f32, display: &mut dyn FishingDisplay) {
        if self.aligned {
            self.progress += self.tuning.fill_rate * dt;
        } else {
            self.progress -= self.tuning.drain_rate * dt;
        }
        self.progress = self.progress.clamp(0.0, 1.0);
        display.set_progress(self.progress);
        if self.progress >= 1.0 {
            self.finish(SessionState::Won, display);
        }
    }

    fn update_timer(&mut self, dt: f32, display: &mut dyn FishingDisplay) {
        self.remaining = (self.remaining - dt).max(0.0);
        display.set_countdown(&format!("Time left: {}", self.remaining.ceil()));
        if self.remaining <= 0.0 && self.state == SessionState::Active {
            self.finish(SessionState::Lost, display);
        }
    }

    fn finish(&mut self, outcome: SessionState, display: &mut dyn FishingDisplay) {
        self.state = outcome;
        display.hide();
        display.set_status(match outcome {
            SessionState::Won => "You caught the fish!",
            _ => "The fish got away!",
        });
    }
}
