use super::DriftwakeGame;
use bracket_lib::prelude::*;

pub enum AppState {
    Menu,
    Running(Box<DriftwakeGame>),
}

/// Menu wrapper around the running game.
pub struct DriftwakeApp {
    state: AppState,
}

impl DriftwakeApp {
    pub fn new() -> Self {
        Self {
            state: AppState::Menu,
        }
    }

    fn update_state(&mut self, ctx: &mut BTerm) -> bool {
        use VirtualKeyCode::*;
        match &mut self.state {
            AppState::Menu => match ctx.key {
                Some(Return) => {
                    let seed = 0;
                    match DriftwakeGame::new(seed) {
                        Ok(game) => self.state = AppState::Running(Box::new(game)),
                        Err(e) => eprintln!("Failed to start game: {}", e),
                    }
                    false
                }
                Some(Q) => true,
                _ => false,
            },
            AppState::Running(game) => {
                game.tick(ctx);
                false
            }
        }
    }
}

impl Default for DriftwakeApp {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for DriftwakeApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        let quit = self.update_state(ctx);
        if quit {
            ctx.quit();
            return;
        }
        if let AppState::Menu = self.state {
            ctx.cls();
            ctx.print_centered(10, "Driftwake");
            ctx.print_centered(12, "Press Enter to set out");
            ctx.print_centered(14, "Press Q to Quit");
        }
        // Running: game.tick already rendered.
    }
}
