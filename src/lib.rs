pub mod ai;
pub mod console;
pub mod game;
pub mod hosting;
pub mod joining;
pub mod protocol;
pub mod tiles;

/// Pip count on one end of a domino.
pub type Pip = u8;

/// Owner label of the shared train that belongs to nobody.
pub const MEXICAN_TRAIN: &str = "MEXICAN_TRAIN";
/// Pseudo-player name carrying the boneyard size in round announcements.
pub const BONEYARD: &str = "BONEYARD";

/// Longest accepted player name after sanitization.
pub const MAX_NAME_LEN: usize = 20;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// Strips a prospective player name down to letters, digits, underscores
/// and interior spaces, truncated to [`MAX_NAME_LEN`]. Names travel on the
/// wire between field delimiters, so everything else is dropped.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == ' ')
        .take(MAX_NAME_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_delimiters() {
        assert_eq!(sanitize("Al;ice,"), "Alice");
        assert_eq!(sanitize("  Bob  "), "Bob");
        assert_eq!(sanitize("under_score 2"), "under_score 2");
    }

    #[test]
    fn sanitize_truncates() {
        let long = "x".repeat(MAX_NAME_LEN * 2);
        assert_eq!(sanitize(&long).len(), MAX_NAME_LEN);
    }
}
