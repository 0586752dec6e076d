pub mod lock;
pub mod model;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

pub use model::{Program, ProgramFields};
pub use store::CatalogStore;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("no program with id {0}")]
    NotFound(String),

    #[error("catalog is locked by another process ({0})")]
    Locked(PathBuf),
}

impl CatalogStore {
    pub fn add(&self, fields: ProgramFields) -> Result<Program, CatalogError> {
        let program = Program::new(fields);
        let added = program.clone();
        self.update(move |programs| {
            programs.push(program);
            Ok(())
        })?;
        info!(id = %added.id, title = %added.title, "program added");
        Ok(added)
    }

    pub fn edit(&self, id: &str, fields: ProgramFields) -> Result<Program, CatalogError> {
        let edited = self.update(|programs| {
            let program = programs
                .iter_mut()
                .find(|program| program.id == id)
                .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
            program.apply(fields);
            Ok(program.clone())
        })?;
        info!(id, title = %edited.title, "program updated");
        Ok(edited)
    }

    pub fn remove(&self, id: &str) -> Result<Program, CatalogError> {
        let removed = self.update(|programs| {
            let position = programs
                .iter()
                .position(|program| program.id == id)
                .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
            Ok(programs.remove(position))
        })?;
        info!(id, title = %removed.title, "program removed");
        Ok(removed)
    }

    pub fn touch(&self, path: &str, now: i64) -> Result<bool, CatalogError> {
        let matched = self.update(|programs| {
            Ok(match programs.iter_mut().find(|program| program.path == path) {
                Some(program) => {
                    program.lastplayed = now;
                    true
                }
                None => false,
            })
        })?;
        debug!(path, matched, "lastplayed update");
        Ok(matched)
    }

    pub fn get(&self, id: &str) -> Result<Program, CatalogError> {
        self.load()?
            .into_iter()
            .find(|program| !id.is_empty() && program.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}
