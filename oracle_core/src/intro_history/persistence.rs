use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Result};
use sled::{Batch, Db, Tree};

use crate::intro_history::dto::{IntroEntry, IntroHistoryMap};

pub const INTRO_HISTORY_TREE: &str = "intro_history";

/// Whole-map load/save. A failed save must leave the previous state readable.
pub trait IntroPersistence: Send + Sync {
    fn name(&self) -> &str;
    fn load(&self) -> Result<IntroHistoryMap>;
    fn save(&self, history: &IntroHistoryMap) -> Result<()>;
}

/// One key per wallet in the `intro_history` tree.
#[derive(Clone)]
pub struct SledIntroPersistence {
    tree: Tree,
}

impl SledIntroPersistence {
    pub fn new(db: &Db) -> Result<Self> {
        let tree = db.open_tree(INTRO_HISTORY_TREE)?;
        Ok(Self { tree })
    }
}

impl IntroPersistence for SledIntroPersistence {
    fn name(&self) -> &str {
        "sled"
    }

    fn load(&self) -> Result<IntroHistoryMap> {
        let mut history = IntroHistoryMap::new();

        for item in self.tree.iter() {
            let (key, value) = item?;
            let wallet = String::from_utf8(key.to_vec())?;
            match serde_json::from_slice::<Vec<IntroEntry>>(&value) {
                Ok(entries) => {
                    history.insert(wallet, entries);
                }
                Err(e) => {
                    log::error!("Skipping unreadable intro history for {}: {}", wallet, e);
                }
            }
        }

        Ok(history)
    }

    fn save(&self, history: &IntroHistoryMap) -> Result<()> {
        let mut batch = Batch::default();

        for key in self.tree.iter().keys() {
            let key = key?;
            let keep = std::str::from_utf8(&key)
                .map(|wallet| history.contains_key(wallet))
                .unwrap_or(false);
            if !keep {
                batch.remove(key);
            }
        }

        for (wallet, entries) in history {
            batch.insert(wallet.as_bytes(), serde_json::to_vec(entries)?);
        }

        self.tree.apply_batch(batch)?;
        self.tree.flush()?;
        Ok(())
    }
}

/// Single JSON document, replaced through a temp file and a rename.
#[derive(Debug, Clone)]
pub struct JsonFileIntroPersistence {
    path: PathBuf,
}

impl JsonFileIntroPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl IntroPersistence for JsonFileIntroPersistence {
    fn name(&self) -> &str {
        "json-file"
    }

    fn load(&self) -> Result<IntroHistoryMap> {
        if !self.path.exists() {
            return Ok(IntroHistoryMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(IntroHistoryMap::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, history: &IntroHistoryMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, serde_json::to_vec_pretty(history)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryIntroPersistence {
    history: Mutex<IntroHistoryMap>,
}

impl MemoryIntroPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: IntroHistoryMap) -> Self {
        Self {
            history: Mutex::new(history),
        }
    }

    pub fn snapshot(&self) -> IntroHistoryMap {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl IntroPersistence for MemoryIntroPersistence {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> Result<IntroHistoryMap> {
        self.history
            .lock()
            .map(|history| history.clone())
            .map_err(|_| anyhow!("Intro history lock poisoned"))
    }

    fn save(&self, history: &IntroHistoryMap) -> Result<()> {
        let mut stored = self
            .history
            .lock()
            .map_err(|_| anyhow!("Intro history lock poisoned"))?;
        *stored = history.clone();
        Ok(())
    }
}
