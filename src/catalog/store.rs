use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::lock::CatalogLock;
use super::model::{new_id, Program};
use super::CatalogError;

pub const CATALOG_FILE: &str = "programs.json";

#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn open(profile_dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = profile_dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: dir.join(CATALOG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    pub fn load(&self) -> Result<Vec<Program>, CatalogError> {
        self.read()
    }

    pub fn load_keyed(&self) -> Result<Vec<Program>, CatalogError> {
        let programs = self.read()?;
        if programs.iter().all(|program| !program.id.is_empty()) {
            return Ok(programs);
        }

        info!(path = %self.path.display(), "assigning ids to legacy catalog records");
        self.update(|programs| Ok(programs.clone()))
    }

    pub fn save(&self, programs: &[Program]) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(programs).map_err(CatalogError::Serialize)?;

        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(CATALOG_FILE);
        let temp = self
            .path
            .with_file_name(format!("{file_name}.tmp.{}", std::process::id()));

        fs::write(&temp, json).map_err(|source| CatalogError::Io {
            path: temp.clone(),
            source,
        })?;

        if let Err(source) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(CatalogError::Io {
                path: self.path.clone(),
                source,
            });
        }

        debug!(path = %self.path.display(), records = programs.len(), "catalog saved");
        Ok(())
    }

    /// Loads, applies `f`, and saves, all while holding the catalog lock.
    /// Nothing is written when `f` fails.
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut Vec<Program>) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        let _lock = CatalogLock::acquire(self.lock_path())?;

        let mut programs = self.read()?;
        for program in programs.iter_mut().filter(|program| program.id.is_empty()) {
            program.id = new_id();
        }

        let out = f(&mut programs)?;
        self.save(&programs)?;
        Ok(out)
    }

    fn read(&self) -> Result<Vec<Program>, CatalogError> {
        let file = match fs::read_to_string(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no catalog yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(CatalogError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&file).map_err(|source| {
            warn!(path = %self.path.display(), error = %source, "catalog is corrupt");
            CatalogError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::ProgramFields;
    use tempfile::TempDir;

    fn program(title: &str, path: &str, lastplayed: i64) -> Program {
        let mut program = Program::new(ProgramFields {
            title: title.to_string(),
            path: path.to_string(),
            ..ProgramFields::default()
        });
        program.lastplayed = lastplayed;
        program
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn open_creates_profile_dir() {
        let dir = TempDir::new().unwrap();
        let profile = dir.path().join("nested").join("profile");
        CatalogStore::open(&profile).unwrap();
        assert!(profile.is_dir());
    }

    #[test]
    fn malformed_file_is_corruption() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        fs::write(store.path(), "this is not json").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt { .. }));
    }

    #[test]
    fn save_then_load_preserves_records() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        let records = vec![program("A", "/a", 100), program("B", "/b", 200)];
        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn save_of_load_keeps_file_content() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        let raw = r#"[{"id":"1","title":"A","year":"1999","description":"d","image":"/i.png","fanart":"/f.jpg","path":"/a","lastplayed":5},{"id":"2","title":"B","year":2001,"description":"","image":"","fanart":"","clearlogo":"/l.png","path":"/b","lastplayed":0,"favourite":true}]"#;
        fs::write(store.path(), raw).unwrap();

        store.save(&store.load().unwrap()).unwrap();

        let before: serde_json::Value = serde_json::from_str(raw).unwrap();
        let after: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn legacy_records_get_persistent_ids() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        fs::write(store.path(), r#"[{"title":"A","path":"/a"}]"#).unwrap();

        let first = store.load_keyed().unwrap();
        let second = store.load().unwrap();
        assert!(!first[0].id.is_empty());
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn load_of_legacy_catalog_ignores_a_held_lock() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        let raw = r#"[{"title":"A","path":"/a"}]"#;
        fs::write(store.path(), raw).unwrap();
        let _held = CatalogLock::acquire(store.lock_path()).unwrap();

        let started = std::time::Instant::now();
        let programs = store.load().unwrap();

        assert!(started.elapsed() < std::time::Duration::from_secs(1));
        assert_eq!(programs[0].id, "");
        assert_eq!(fs::read_to_string(store.path()).unwrap(), raw);
    }

    #[test]
    fn failed_update_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        store.save(&[program("A", "/a", 1)]).unwrap();

        let result: Result<(), _> = store.update(|programs| {
            programs.clear();
            Err(CatalogError::NotFound("x".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        store.save(&[program("A", "/a", 1)]).unwrap();
        store.update(|_| Ok(())).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![CATALOG_FILE.to_string()]);
    }
}
