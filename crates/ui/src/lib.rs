//! Terminal UI: message log, status panel and the fishing overlay.

use bracket_lib::prelude::{BTerm, BLACK, GREEN, RED, RGB, WHITE, YELLOW};
use common::GameResult;
use fishing::FishingDisplay;

const LOG_Y: i32 = 18;
const LOG_WINDOW: i32 = 6;
const PANEL_X: i32 = 60;
const METER_WIDTH: usize = 20;
/// Seconds the win/loss line stays on screen after the overlay hides.
const RESULT_LINGER: f32 = 3.0;

/// UI layout type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiLayout {
    /// Standard roaming/boating layout.
    Standard,
    /// Layout used during the fishing mini game.
    Fishing,
    /// Layout showing help and controls.
    Help,
}

/// Basic UI context holding the message log and current layout.
pub struct UiContext {
    logs: Vec<String>,
    scroll: usize,
    layout: UiLayout,
}

impl Default for UiContext {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            scroll: 0,
            layout: UiLayout::Standard,
        }
    }
}

impl UiContext {
    /// Sets the current layout.
    pub fn set_layout(&mut self, layout: UiLayout) {
        self.layout = layout;
    }

    /// Returns the current layout.
    pub fn layout(&self) -> UiLayout {
        self.layout
    }

    /// Adds a message to the log queue.
    pub fn add_log(&mut self, msg: &str) -> GameResult<()> {
        self.logs.push(msg.to_string());
        Ok(())
    }

    /// Scrolls log view one line up.
    pub fn scroll_up(&mut self) {
        if self.scroll + (LOG_WINDOW as usize) < self.logs.len() {
            self.scroll += 1;
        }
    }

    /// Scrolls log view one line down.
    pub fn scroll_down(&mut self) {
        if self.scroll > 0 {
            self.scroll -= 1;
        }
    }

    /// Draws the log window.
    pub fn draw_logs(&self, ctx: &mut BTerm) -> GameResult<()> {
        if self.layout == UiLayout::Help {
            return Ok(());
        }
        let start = self
            .logs
            .len()
            .saturating_sub(LOG_WINDOW as usize + self.scroll);
        let end = std::cmp::min(start + LOG_WINDOW as usize, self.logs.len());
        for (i, line) in self.logs[start..end].iter().enumerate() {
            ctx.print(0, LOG_Y + i as i32, line);
        }
        Ok(())
    }

    /// Draws the right-hand status panel.
    pub fn draw_status(
        &self,
        ctx: &mut BTerm,
        mode: &str,
        speed: f32,
        zone: bool,
    ) -> GameResult<()> {
        if self.layout == UiLayout::Help {
            return Ok(());
        }
        ctx.print(PANEL_X, LOG_Y, format!("Mode: {}", mode));
        ctx.print(PANEL_X, LOG_Y + 1, format!("Speed: {:.1}", speed));
        if zone {
            ctx.print_color(
                PANEL_X,
                LOG_Y + 2,
                RGB::named(YELLOW),
                RGB::named(BLACK),
                "E: board  F: fish",
            );
        }
        Ok(())
    }

    /// Draws help text when in `Help` layout.
    pub fn draw_help(&self, ctx: &mut BTerm) -> GameResult<()> {
        if self.layout != UiLayout::Help {
            return Ok(());
        }
        for (i, line) in help_strings().iter().enumerate() {
            ctx.print_centered(5 + i as i32, line);
        }
        Ok(())
    }
}

/// Fishing overlay state fed by the session through [`FishingDisplay`].
#[derive(Clone, Debug, Default)]
pub struct FishingPanel {
    visible: bool,
    progress: f32,
    status: String,
    countdown: String,
    linger: f32,
}

impl FishingPanel {
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Ages the lingering result line while the overlay is hidden; the
    /// status clears once its time is up.
    pub fn tick(&mut self, dt: f32) {
        if self.visible || self.linger <= 0.0 {
            return;
        }
        self.linger -= dt;
        if self.linger <= 0.0 {
            self.linger = 0.0;
            self.status.clear();
        }
    }

    /// Draws the overlay: progress meter, countdown and status line.
    pub fn draw(&self, ctx: &mut BTerm) -> GameResult<()> {
        if !self.visible {
            if !self.status.is_empty() {
                ctx.print_centered(3, &self.status);
            }
            return Ok(());
        }
        let meter = meter_string(self.progress, METER_WIDTH);
        let color = if self.progress > 0.66 {
            GREEN
        } else if self.progress > 0.33 {
            YELLOW
        } else {
            RED
        };
        ctx.print_centered(2, &self.status);
        ctx.print_color_centered(3, RGB::named(color), RGB::named(BLACK), &meter);
        ctx.print_color_centered(4, RGB::named(WHITE), RGB::named(BLACK), &self.countdown);
        Ok(())
    }
}

impl FishingDisplay for FishingPanel {
    fn show(&mut self) {
        self.visible = true;
        self.linger = 0.0;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.linger = RESULT_LINGER;
    }

    fn set_progress(&mut self, value: f32) {
        self.progress = value.clamp(0.0, 1.0);
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_countdown(&mut self, text: &str) {
        self.countdown = text.to_string();
    }
}

fn meter_string(progress: f32, width: usize) -> String {
    let filled = (progress * width as f32).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn help_strings() -> Vec<String> {
    vec![
        "Controls:".to_string(),
        "WASD / arrows: Move or steer".to_string(),
        "E: Board / leave the boat".to_string(),
        "F: Start fishing (near a boat)".to_string(),
        "Space: Raise the hook".to_string(),
        "F1: Toggle this help".to_string(),
        "Q: Quit".to_string(),
    ]
}
