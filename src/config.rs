use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::GameMode;
use crate::session::clock::Pacing;
use crate::session::presenter::SessionOptions;

pub const WORDS_FILE_NAME: &str = "2222.txt";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_words_file")]
    pub words_file: PathBuf,
    #[serde(default = "default_words_url")]
    pub words_url: String,
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default = "default_session_seconds")]
    pub session_seconds: u64,
    #[serde(default)]
    pub game_mode: GameMode,
    #[serde(default = "default_random_order")]
    pub random_order: bool,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_stats_after_index")]
    pub stats_after_index: usize,
    #[serde(default = "default_eta_after_index")]
    pub eta_after_index: usize,
}

fn default_words_file() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(WORDS_FILE_NAME)))
        .unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("twotwotwotwo")
                .join(WORDS_FILE_NAME)
        })
}
fn default_words_url() -> String {
    "https://raw.githubusercontent.com/ivanreese/2222/refs/heads/2222/2222.txt".to_string()
}
fn default_word_count() -> usize {
    2222
}
fn default_session_seconds() -> u64 {
    1342
}
fn default_random_order() -> bool {
    true
}
fn default_fetch_timeout_secs() -> u64 {
    10
}
fn default_stats_after_index() -> usize {
    5
}
fn default_eta_after_index() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_file: default_words_file(),
            words_url: default_words_url(),
            word_count: default_word_count(),
            session_seconds: default_session_seconds(),
            game_mode: GameMode::default(),
            random_order: default_random_order(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            stats_after_index: default_stats_after_index(),
            eta_after_index: default_eta_after_index(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("twotwotwotwo")
            .join("config.toml")
    }

    /// Seconds each word stays on screen so a full pass lasts `session_seconds`.
    pub fn seconds_per_word(&self) -> f64 {
        if self.word_count == 0 {
            return 0.0;
        }
        self.session_seconds as f64 / self.word_count as f64
    }

    pub fn time_per_word(&self) -> Duration {
        Duration::from_secs_f64(self.seconds_per_word())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            total_words: self.word_count,
            stats_after_index: self.stats_after_index,
            eta_after_index: self.eta_after_index,
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            mode: self.game_mode,
            shuffled: self.random_order,
            time_per_word: self.time_per_word(),
            pacing: self.pacing(),
        }
    }
}
