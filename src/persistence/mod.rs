//! Best-score persistence
//!
//! A missing or corrupt score file is never fatal: loads degrade to zero and
//! saves log and carry on, so a broken disk only costs the leaderboard.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const SCORE_FILE: &str = "best_score.json";
const LEGACY_SCORE_FILE: &str = "best_score.txt";

#[derive(Debug, Serialize, Deserialize)]
struct ScoreRecord {
    best_score: u64,
}

/// File-backed score storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    dir: PathBuf,
}

impl ScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn score_path(&self) -> PathBuf {
        self.dir.join(SCORE_FILE)
    }

    /// Load the persisted best score, or 0 when nothing valid is stored.
    pub fn load_best_score(&self) -> u64 {
        match fs::read_to_string(self.score_path()) {
            Ok(raw) => match serde_json::from_str::<ScoreRecord>(&raw) {
                Ok(record) => record.best_score,
                Err(err) => {
                    log::warn!("corrupt score file, starting from 0: {err}");
                    0
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => self.migrate_legacy_score(),
            Err(err) => {
                log::warn!("failed to read score file, starting from 0: {err}");
                0
            }
        }
    }

    /// Persist `score` and return the value actually written.
    pub fn save_best_score(&self, score: u64) -> u64 {
        let record = ScoreRecord { best_score: score };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(err) = write_atomically(&self.dir, &self.score_path(), &json) {
                    log::warn!("failed to save best score: {err}");
                }
            }
            Err(err) => log::warn!("failed to serialize best score: {err}"),
        }
        score
    }

    /// One-shot upgrade from the old plain-integer file. The legacy file is
    /// removed after a successful read so the migration runs once.
    fn migrate_legacy_score(&self) -> u64 {
        let legacy_path = self.dir.join(LEGACY_SCORE_FILE);
        let Ok(raw) = fs::read_to_string(&legacy_path) else {
            return 0;
        };

        let score = match raw.trim().parse::<u64>() {
            Ok(score) => score,
            Err(err) => {
                log::warn!("corrupt legacy score file, starting from 0: {err}");
                0
            }
        };

        self.save_best_score(score);
        if let Err(err) = fs::remove_file(&legacy_path) {
            log::warn!("failed to remove legacy score file: {err}");
        }
        log::info!("migrated legacy best score: {score}");
        score
    }
}

/// Write via a temp file and rename so a crash mid-write cannot leave a
/// truncated score file behind.
fn write_atomically(dir: &Path, path: &Path, contents: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)
}
