fn main() {
    if let Err(e) = game_core::run() {
        eprintln!("{}", game_core::fatal_line(&e));
        std::process::exit(1);
    }
}
