use bracket_lib::prelude::VirtualKeyCode;
use common::GameResult;

/// Configuration for keyboard controls.
#[derive(Clone, Debug)]
pub struct InputConfig {
    pub left: VirtualKeyCode,
    pub right: VirtualKeyCode,
    pub up: VirtualKeyCode,
    pub down: VirtualKeyCode,
    pub interact: VirtualKeyCode,
    pub fish: VirtualKeyCode,
    pub ascend: VirtualKeyCode,
    pub help: VirtualKeyCode,
    pub quit: VirtualKeyCode,
    pub scroll_up: VirtualKeyCode,
    pub scroll_down: VirtualKeyCode,
}

impl Default for InputConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            left: A,
            right: D,
            up: W,
            down: S,
            interact: E,
            fish: F,
            ascend: Space,
            help: F1,
            quit: Q,
            scroll_up: PageUp,
            scroll_down: PageDown,
        }
    }
}

impl InputConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let mut cfg = Self::default();
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(cfg),
            Err(e) => return Err(e.into()),
        };
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, val) = match line.split_once('=') {
                Some(v) => v,
                None => continue,
            };
            let val = val.trim().trim_matches('"');
            if let Some(kc) = parse_key(val) {
                match key.trim() {
                    "left" => cfg.left = kc,
                    "right" => cfg.right = kc,
                    "up" => cfg.up = kc,
                    "down" => cfg.down = kc,
                    "interact" => cfg.interact = kc,
                    "fish" => cfg.fish = kc,
                    "ascend" => cfg.ascend = kc,
                    "help" => cfg.help = kc,
                    "quit" => cfg.quit = kc,
                    "scroll_up" => cfg.scroll_up = kc,
                    "scroll_down" => cfg.scroll_down = kc,
                    _ => {}
                }
            }
        }
        Ok(cfg)
    }
}

fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    match name.to_ascii_lowercase().as_str() {
        "left" => Some(Left),
        "right" => Some(Right),
        "up" => Some(Up),
        "down" => Some(Down),
        "a" => Some(A),
        "d" => Some(D),
        "w" => Some(W),
        "s" => Some(S),
        "e" => Some(E),
        "f" => Some(F),
        "q" => Some(Q),
        "x" => Some(X),
        "space" => Some(Space),
        "f1" => Some(F1),
        "pageup" => Some(PageUp),
        "pagedown" => Some(PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_nonexistent_returns_default() {
        let cfg = InputConfig::load("/no/such/file.toml").unwrap();
        assert_eq!(cfg.interact, VirtualKeyCode::E);
        assert_eq!(cfg.ascend, VirtualKeyCode::Space);
    }

    #[test]
    fn load_overrides_fields() {
        let mut path = std::env::temp_dir();
        path.push("driftwake_input_test.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "fish = \"X\"").unwrap();
        let cfg = InputConfig::load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(cfg.fish, VirtualKeyCode::X);
        assert_eq!(cfg.interact, VirtualKeyCode::E);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut path = std::env::temp_dir();
        path.push("driftwake_input_unknown.toml");
        std::fs::write(&path, "fish = \"NoSuchKey\"\nnot_a_binding = \"e\"\n").unwrap();
        let cfg = InputConfig::load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(cfg.fish, VirtualKeyCode::F);
    }
}
