//! Game engine entry point: interaction state machine and driver loop.

mod app;
mod input;
mod types;

use bracket_lib::prelude::*;

use common::{GameResult, Vec3};
use data::Tuning;
use fishing::{FishingSession, SessionState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ui::{FishingPanel, UiContext, UiLayout};
use vessel::Vessel;

pub use app::DriftwakeApp;
use input::InputConfig;
pub use types::Agent;

const CONFIG_PATH: &str = "driftwake.toml";
const TUNING_PATH: &str = "driftwake.json";
const AGENT_SPEED: f32 = 5.0;
const VIEW_WIDTH: i32 = 60;
const VIEW_HEIGHT: i32 = 17;

/// Where the player currently is relative to the boat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardingState {
    /// Roaming on foot, outside any boarding zone.
    Free,
    /// Inside a vessel's boarding zone, eligible to board or fish.
    InZone,
    /// Standing on the vessel, steering it.
    Boarded,
}

/// One tick's worth of player intent, decoupled from the key source.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    /// Lateral axis in `[-1, 1]`: walk sideways or steer.
    pub horizontal: f32,
    /// Forward axis in `[-1, 1]`: walk or throttle.
    pub vertical: f32,
    /// Board/unboard was pressed this tick.
    pub interact: bool,
    /// Start-fishing was pressed this tick.
    pub fish: bool,
    /// The ascend key is held.
    pub ascend: bool,
}

/// Loads key bindings, logging and falling back to the defaults when the
/// file exists but cannot be read.
fn input_or_default(ui: &mut UiContext, path: &str) -> InputConfig {
    match InputConfig::load(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui.add_log(&format!("Key bindings load failed, using defaults: {}", e))
                .ok();
            InputConfig::default()
        }
    }
}

/// Full simulation state, advanced by [`DriftwakeGame::sim_tick`].
pub struct DriftwakeGame {
    agent: Agent,
    vessel: Vessel,
    session: FishingSession,
    panel: FishingPanel,
    ui: UiContext,
    input: InputConfig,
    rng: StdRng,
    boarding: BoardingState,
}

impl DriftwakeGame {
    /// Creates a fresh game. Missing config files fall back to defaults;
    /// a malformed tuning file is logged and ignored.
    pub fn new(seed: u64) -> GameResult<Self> {
        let mut ui = UiContext::default();
        let tuning = match Tuning::load(TUNING_PATH) {
            Ok(t) => t,
            Err(e) => {
                ui.add_log(&format!("Tuning load failed, using defaults: {}", e))?;
                Tuning::default()
            }
        };
        let input = input_or_default(&mut ui, CONFIG_PATH);
        let mut game = Self {
            agent: Agent::new(Vec3::ZERO, AGENT_SPEED),
            vessel: Vessel::new(Vec3::new(6.0, 0.0, 0.0), tuning.vessel),
            session: FishingSession::new(tuning.fishing),
            panel: FishingPanel::default(),
            ui,
            input,
            rng: StdRng::seed_from_u64(seed),
            boarding: BoardingState::Free,
        };
        game.ui.set_layout(UiLayout::Help);
        Ok(game)
    }

    /// Current boarding state.
    pub fn boarding(&self) -> BoardingState {
        self.boarding
    }

    /// State of the fishing mini-game.
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Advances the whole simulation by one tick.
    ///
    /// Order: zone triggers, commands, locomotion, vessel physics,
    /// fishing session.
    pub fn sim_tick(&mut self, dt: f32, input: &FrameInput) {
        self.update_zone();
        if input.interact {
            match self.boarding {
                BoardingState::InZone => self.board(),
                BoardingState::Boarded => self.unboard(),
                BoardingState::Free => {}
            }
        }
        if input.fish {
            self.start_fishing();
        }

        if self.boarding == BoardingState::Boarded {
            self.vessel.steer(input.vertical, input.horizontal, dt);
        } else {
            self.agent.set_move_input(input.horizontal, input.vertical);
            self.agent.tick(dt);
        }
        self.vessel.tick(dt);
        if self.boarding == BoardingState::Boarded {
            self.agent.body.position = self.vessel.deck_position();
        }

        self.panel.tick(dt);
        self.update_session(dt, input.ascend);
    }

    /// Derives zone enter/exit transitions from the boarding-zone
    /// overlap. Skipped while boarded; the zone claim is implicit then.
    fn update_zone(&mut self) {
        if self.boarding == BoardingState::Boarded {
            return;
        }
        let overlap = self.vessel.in_boarding_zone(self.agent.body.position);
        match (self.boarding, overlap) {
            (BoardingState::Free, true) => {
                self.boarding = BoardingState::InZone;
                self.ui.add_log("Entered the boarding zone.").ok();
            }
            (BoardingState::InZone, false) => {
                self.boarding = BoardingState::Free;
                self.ui.add_log("Left the boarding zone.").ok();
            }
            _ => {}
        }
    }

    /// Boards the vessel. A no-op unless in the zone and the occupant
    /// slot is free.
    pub fn board(&mut self) {
        if self.boarding != BoardingState::InZone {
            return;
        }
        if !self.vessel.board() {
            return;
        }
        self.agent.body.velocity = Vec3::ZERO;
        self.agent.body.kinematic = true;
        self.agent.body.position = self.vessel.deck_position();
        self.boarding = BoardingState::Boarded;
        self.ui.add_log("You board the boat.").ok();
    }

    /// Steps off the vessel next to the hull. A no-op unless boarded.
    pub fn unboard(&mut self) {
        if self.boarding != BoardingState::Boarded {
            return;
        }
        self.vessel.unboard();
        self.agent.body.kinematic = false;
        self.agent.body.position = self.vessel.exit_position();
        self.boarding = if self.vessel.in_boarding_zone(self.agent.body.position) {
            BoardingState::InZone
        } else {
            BoardingState::Free
        };
        self.ui.add_log("You step off the boat.").ok();
    }

    /// Starts the fishing mini-game. A no-op outside the zone or while a
    /// session is already running.
    pub fn start_fishing(&mut self) {
        if self.boarding != BoardingState::InZone {
            return;
        }
        if self.session.is_active() {
            return;
        }
        self.session.start(&mut self.rng, &mut self.panel);
        self.ui.set_layout(UiLayout::Fishing);
        self.ui.add_log("Fishing game started!").ok();
    }

    fn update_session(&mut self, dt: f32, ascend: bool) {
        if !self.session.is_active() {
            return;
        }
        match self.session.tick(dt, ascend, &mut self.rng, &mut self.panel) {
            SessionState::Won => {
                self.ui.add_log("You caught the fish!").ok();
                self.ui.set_layout(UiLayout::Standard);
            }
            SessionState::Lost => {
                self.ui.add_log("The fish got away!").ok();
                self.ui.set_layout(UiLayout::Standard);
            }
            _ => {}
        }
    }

    /// Maps this tick's key to a [`FrameInput`].
    fn frame_input(&self, key: Option<VirtualKeyCode>) -> FrameInput {
        let mut fi = FrameInput::default();
        let Some(key) = key else {
            return fi;
        };
        if key == self.input.left || key == VirtualKeyCode::Left {
            fi.horizontal = -1.0;
        } else if key == self.input.right || key == VirtualKeyCode::Right {
            fi.horizontal = 1.0;
        } else if key == self.input.up || key == VirtualKeyCode::Up {
            fi.vertical = 1.0;
        } else if key == self.input.down || key == VirtualKeyCode::Down {
            fi.vertical = -1.0;
        }
        fi.interact = key == self.input.interact;
        fi.fish = key == self.input.fish;
        fi.ascend = key == self.input.ascend;
        fi
    }

    fn handle_meta_keys(&mut self, ctx: &mut BTerm) {
        let Some(key) = ctx.key else { return };
        if key == self.input.quit {
            ctx.quit();
        } else if key == self.input.help {
            let next = if self.ui.layout() == UiLayout::Help {
                UiLayout::Standard
            } else {
                UiLayout::Help
            };
            self.ui.set_layout(next);
        } else if key == self.input.scroll_up {
            self.ui.scroll_up();
        } else if key == self.input.scroll_down {
            self.ui.scroll_down();
        }
    }

    fn project(&self, p: Vec3) -> Option<(i32, i32)> {
        let x = VIEW_WIDTH / 2 + p.x.round() as i32;
        let y = VIEW_HEIGHT / 2 + p.z.round() as i32;
        if x < 0 || x >= VIEW_WIDTH || y < 0 || y >= VIEW_HEIGHT {
            None
        } else {
            Some((x, y))
        }
    }

    fn draw_scene(&self, ctx: &mut BTerm) {
        for y in 0..VIEW_HEIGHT {
            for x in 0..VIEW_WIDTH {
                ctx.set(x, y, RGB::named(NAVY), RGB::named(BLACK), to_cp437('~'));
            }
        }
        if let Some((x, y)) = self.project(self.vessel.body.position) {
            ctx.set(x, y, RGB::named(YELLOW), RGB::named(BLACK), to_cp437('B'));
        }
        if self.boarding != BoardingState::Boarded {
            if let Some((x, y)) = self.project(self.agent.body.position) {
                ctx.set(x, y, RGB::named(WHITE), RGB::named(BLACK), to_cp437('@'));
            }
        }
    }

    fn draw(&self, ctx: &mut BTerm) {
        ctx.cls();
        if self.ui.layout() == UiLayout::Help {
            self.ui.draw_help(ctx).ok();
            return;
        }
        self.draw_scene(ctx);
        self.panel.draw(ctx).ok();
        self.ui.draw_logs(ctx).ok();
        let mode = match self.boarding {
            BoardingState::Free => "On foot",
            BoardingState::InZone => "Near boat",
            BoardingState::Boarded => "At the helm",
        };
        let speed = if self.boarding == BoardingState::Boarded {
            self.vessel.body.velocity.length()
        } else {
            self.agent.body.velocity.length()
        };
        self.ui
            .draw_status(ctx, mode, speed, self.boarding == BoardingState::InZone)
            .ok();
    }
}

impl GameState for DriftwakeGame {
    fn tick(&mut self, ctx: &mut BTerm) {
        let dt = ctx.frame_time_ms / 1000.0;
        self.handle_meta_keys(ctx);
        let fi = self.frame_input(ctx.key);
        self.sim_tick(dt, &fi);
        self.draw(ctx);
    }
}

/// Runs the game loop using [`bracket-lib`].
pub fn run() -> BError {
    let context = BTermBuilder::simple(80, 25)?
        .with_title("Driftwake")
        .build()?;
    main_loop(context, DriftwakeApp::new())
}

/// Formats a fatal startup error for the terminal and the wasm console.
pub fn fatal_line(err: &dyn std::fmt::Display) -> String {
    format!("driftwake: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::FishingTuning;

    fn game() -> DriftwakeGame {
        DriftwakeGame::new(0).expect("game")
    }

    /// Walks the agent to the given position and settles zone state.
    fn place_agent(game: &mut DriftwakeGame, pos: Vec3) {
        game.agent.body.position = pos;
        game.sim_tick(0.0, &FrameInput::default());
    }

    #[test]
    fn starts_free_with_idle_session() {
        let game = game();
        assert_eq!(game.boarding(), BoardingState::Free);
        assert_eq!(game.session_state(), SessionState::NotStarted);
        assert!(!game.vessel.occupied());
    }

    #[test]
    fn approaching_the_boat_enters_the_zone() {
        let mut game = game();
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(game.boarding(), BoardingState::InZone);
        place_agent(&mut game, Vec3::new(-20.0, 0.0, 0.0));
        assert_eq!(game.boarding(), BoardingState::Free);
    }

    #[test]
    fn boarding_outside_the_zone_is_a_noop() {
        let mut game = game();
        game.board();
        assert_eq!(game.boarding(), BoardingState::Free);
        assert!(!game.vessel.occupied());
    }

    #[test]
    fn boarding_binds_agent_to_vessel() {
        let mut game = game();
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        game.board();
        assert_eq!(game.boarding(), BoardingState::Boarded);
        assert!(game.vessel.occupied());
        assert!(game.agent.body.kinematic);
        assert_eq!(game.agent.body.position, game.vessel.deck_position());
    }

    #[test]
    fn double_board_is_a_noop() {
        let mut game = game();
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        game.board();
        game.board();
        assert_eq!(game.boarding(), BoardingState::Boarded);
    }

    #[test]
    fn unboarding_restores_the_agent() {
        let mut game = game();
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        game.board();
        game.unboard();
        assert!(!game.vessel.occupied());
        assert!(!game.agent.body.kinematic);
        assert_eq!(game.agent.body.position, game.vessel.exit_position());
        // The exit spot is still inside the zone.
        assert_eq!(game.boarding(), BoardingState::InZone);
    }

    #[test]
    fn unboarding_while_free_is_a_noop() {
        let mut game = game();
        game.unboard();
        assert_eq!(game.boarding(), BoardingState::Free);
    }

    #[test]
    fn interact_key_toggles_boarding() {
        let mut game = game();
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        let press = FrameInput {
            interact: true,
            ..FrameInput::default()
        };
        game.sim_tick(0.016, &press);
        assert_eq!(game.boarding(), BoardingState::Boarded);
        game.sim_tick(0.016, &press);
        assert_eq!(game.boarding(), BoardingState::InZone);
    }

    #[test]
    fn throttle_steers_vessel_while_boarded() {
        let mut game = game();
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        game.board();
        let forward = FrameInput {
            vertical: 1.0,
            ..FrameInput::default()
        };
        game.sim_tick(0.1, &forward);
        assert!(game.vessel.body.velocity.length() > 0.0);
        assert_eq!(game.agent.body.position, game.vessel.deck_position());
    }

    #[test]
    fn walking_moves_the_agent() {
        let mut game = game();
        let walk = FrameInput {
            horizontal: 1.0,
            ..FrameInput::default()
        };
        game.sim_tick(0.1, &walk);
        assert!(game.agent.body.position.x > 0.0);
        assert!(!game.agent.facing_left);
    }

    #[test]
    fn fishing_requires_the_zone() {
        let mut game = game();
        game.start_fishing();
        assert_eq!(game.session_state(), SessionState::NotStarted);
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        game.start_fishing();
        assert_eq!(game.session_state(), SessionState::Active);
        assert_eq!(game.ui.layout(), UiLayout::Fishing);
        assert!(game.panel.visible());
    }

    #[test]
    fn starting_twice_keeps_the_running_session() {
        let mut game = game();
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        game.start_fishing();
        for _ in 0..10 {
            game.sim_tick(0.1, &FrameInput::default());
        }
        let remaining = game.session.remaining();
        game.start_fishing();
        assert_eq!(game.session.remaining(), remaining);
    }

    #[test]
    fn fishing_while_boarded_is_a_noop() {
        let mut game = game();
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        game.board();
        game.start_fishing();
        assert_eq!(game.session_state(), SessionState::NotStarted);
    }

    #[test]
    fn lost_session_returns_to_standard_layout() {
        let mut game = game();
        // Zero tolerance: the hook can never align.
        game.session = FishingSession::new(FishingTuning {
            tolerance: 0.0,
            ..FishingTuning::default()
        });
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        game.start_fishing();
        for _ in 0..41 {
            game.sim_tick(0.5, &FrameInput::default());
        }
        assert_eq!(game.session_state(), SessionState::Lost);
        assert_eq!(game.ui.layout(), UiLayout::Standard);
        assert!(!game.panel.visible());
        assert_eq!(game.panel.status(), "The fish got away!");
    }

    #[test]
    fn finished_session_allows_a_fresh_start() {
        let mut game = game();
        game.session = FishingSession::new(FishingTuning {
            tolerance: 0.0,
            ..FishingTuning::default()
        });
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        game.start_fishing();
        for _ in 0..41 {
            game.sim_tick(0.5, &FrameInput::default());
        }
        assert_eq!(game.session_state(), SessionState::Lost);
        game.start_fishing();
        assert_eq!(game.session_state(), SessionState::Active);
    }

    #[test]
    fn result_message_fades_a_few_seconds_after_loss() {
        let mut game = game();
        game.session = FishingSession::new(FishingTuning {
            tolerance: 0.0,
            ..FishingTuning::default()
        });
        place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
        game.start_fishing();
        for _ in 0..41 {
            game.sim_tick(0.5, &FrameInput::default());
        }
        assert_eq!(game.panel.status(), "The fish got away!");
        for _ in 0..8 {
            game.sim_tick(0.5, &FrameInput::default());
        }
        assert!(game.panel.status().is_empty());
    }

    #[test]
    fn unreadable_bindings_fall_back_to_defaults() {
        let mut ui = UiContext::default();
        // A directory cannot be read as a file, and it is not NotFound.
        let dir = std::env::temp_dir();
        let cfg = input_or_default(&mut ui, dir.to_str().expect("utf-8 path"));
        assert_eq!(cfg.interact, VirtualKeyCode::E);
        assert_eq!(cfg.fish, VirtualKeyCode::F);
    }

    #[test]
    fn fatal_line_carries_the_program_name() {
        let err = common::GameError::Parse("bad".into());
        assert_eq!(fatal_line(&err), "driftwake: parse error: bad");
    }

    #[test]
    fn frame_input_maps_bindings() {
        let game = game();
        let fi = game.frame_input(Some(VirtualKeyCode::E));
        assert!(fi.interact);
        let fi = game.frame_input(Some(VirtualKeyCode::Space));
        assert!(fi.ascend);
        let fi = game.frame_input(Some(VirtualKeyCode::A));
        assert_eq!(fi.horizontal, -1.0);
        let fi = game.frame_input(None);
        assert_eq!(fi.horizontal, 0.0);
        assert!(!fi.interact);
    }

    #[test]
    fn seeded_games_share_session_outcomes() {
        let run = |seed| {
            let mut game = DriftwakeGame::new(seed).expect("game");
            place_agent(&mut game, Vec3::new(3.0, 0.0, 0.0));
            game.start_fishing();
            let held = FrameInput {
                ascend: true,
                ..FrameInput::default()
            };
            for i in 0..200 {
                let fi = if i % 2 == 0 {
                    held
                } else {
                    FrameInput::default()
                };
                game.sim_tick(0.05, &fi);
            }
            (game.session.progress(), game.session.remaining())
        };
        assert_eq!(run(9), run(9));
    }
}
