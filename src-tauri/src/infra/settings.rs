//! Usage: Persisted settings document (load with defaults, dot-path get/set, write-through persist, export).

pub mod defaults;
mod dot_path;

#[cfg(test)]
mod tests;

use crate::app_paths;
use crate::shared::fs::{json_to_bytes, read_optional_file, write_file_atomic};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub use defaults::{default_document, keys};
pub use dot_path::SettingsError;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join(SETTINGS_FILE_NAME))
}

/// Acknowledgment of an accepted mutation.
///
/// `persisted == false` means the in-memory document changed but the flush failed; memory stays
/// authoritative until the next successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteAck {
    pub persisted: bool,
}

/// Result of an export. Serializes to `{success:true,path}`, `{canceled:true}` or
/// `{success:false,error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ExportReply")]
pub enum ExportOutcome {
    Saved { path: String },
    Canceled,
    Failed { error: String },
}

#[derive(Serialize)]
#[serde(untagged)]
enum ExportReply {
    Saved { success: bool, path: String },
    Canceled { canceled: bool },
    Failed { success: bool, error: String },
}

impl From<ExportOutcome> for ExportReply {
    fn from(outcome: ExportOutcome) -> Self {
        match outcome {
            ExportOutcome::Saved { path } => Self::Saved {
                success: true,
                path,
            },
            ExportOutcome::Canceled => Self::Canceled { canceled: true },
            ExportOutcome::Failed { error } => Self::Failed {
                success: false,
                error,
            },
        }
    }
}

impl ExportOutcome {
    pub fn saved(path: &Path) -> Self {
        Self::Saved {
            path: path.display().to_string(),
        }
    }

    pub fn canceled() -> Self {
        Self::Canceled
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    doc: Value,
    defaults: Value,
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn read_document(path: &Path) -> Option<Value> {
    let bytes = match read_optional_file(path) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!("settings read failed, using defaults: {}", err);
            return None;
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => {
            tracing::warn!(
                path = %path.display(),
                "settings root is not an object, using defaults"
            );
            None
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                "failed to parse settings.json, using defaults: {}",
                err
            );
            None
        }
    }
}

impl SettingsStore {
    /// Load the document at `path`. Never fails: a missing, unreadable or corrupt file yields the
    /// default document. A missing file is created with the defaults so it is discoverable.
    pub fn load(path: PathBuf) -> Self {
        let defaults = default_document();
        let existed = path.exists();

        let doc = match read_document(&path) {
            Some(on_disk) => dot_path::merge_over_defaults(defaults.clone(), on_disk),
            None => defaults.clone(),
        };

        let store = Self {
            path,
            doc,
            defaults,
        };

        if !existed {
            // Best-effort: materialize defaults on first run.
            store.persist();
        }

        tracing::debug!(path = %store.path.display(), "settings loaded");
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full document for `None`, otherwise the value at the dot-path. Unset paths fall back to the
    /// built-in default for that path.
    pub fn get(&self, path: Option<&str>) -> Option<Value> {
        match path {
            None => Some(self.doc.clone()),
            Some(path) => dot_path::lookup(&self.doc, path)
                .or_else(|| dot_path::lookup(&self.defaults, path))
                .cloned(),
        }
    }

    pub fn set(&mut self, path: &str, value: Value) -> Result<WriteAck, SettingsError> {
        dot_path::assign(&mut self.doc, path, value)?;
        tracing::debug!(path = %path, "setting updated");
        Ok(WriteAck {
            persisted: self.persist(),
        })
    }

    /// Apply several pairs with a single flush. Either every pair is applied or none is.
    pub fn set_many<'a, I>(&mut self, pairs: I) -> Result<WriteAck, SettingsError>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut next = self.doc.clone();
        for (path, value) in pairs {
            dot_path::assign(&mut next, path, value)?;
        }
        self.doc = next;
        Ok(WriteAck {
            persisted: self.persist(),
        })
    }

    pub fn restore_defaults(&mut self) -> Value {
        self.doc = self.defaults.clone();
        self.persist();
        tracing::info!("settings restored to defaults");
        self.doc.clone()
    }

    /// Re-read the file after an external edit. Returns the new document only when it differs from
    /// memory; an unreadable file (e.g. an editor mid-save) keeps the current document.
    pub fn reload(&mut self) -> Option<Value> {
        let on_disk = read_document(&self.path)?;
        let next = dot_path::merge_over_defaults(self.defaults.clone(), on_disk);
        if next == self.doc {
            return None;
        }
        self.doc = next;
        tracing::info!(path = %self.path.display(), "settings reloaded from disk");
        Some(self.doc.clone())
    }

    /// Export the current document. `None` means the user dismissed the destination picker.
    pub fn export(&self, destination: Option<&Path>) -> ExportOutcome {
        let Some(destination) = destination else {
            return ExportOutcome::canceled();
        };

        let result = json_to_bytes(&self.doc, "settings")
            .and_then(|bytes| write_file_atomic(destination, &bytes));
        match result {
            Ok(()) => {
                tracing::info!(path = %destination.display(), "settings exported");
                ExportOutcome::saved(destination)
            }
            Err(err) => {
                tracing::warn!(path = %destination.display(), "settings export failed: {}", err);
                ExportOutcome::failed(err)
            }
        }
    }

    pub fn bool_at(&self, path: &str) -> bool {
        self.typed_at(path, Value::as_bool).unwrap_or(false)
    }

    pub fn str_at(&self, path: &str) -> String {
        self.typed_at(path, |v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    pub fn f64_at(&self, path: &str) -> Option<f64> {
        self.typed_at(path, Value::as_f64)
    }

    /// Subtree at `path`, falling back to the default subtree when missing or not an object.
    pub fn object_at(&self, path: &str) -> serde_json::Map<String, Value> {
        self.typed_at(path, |v| v.as_object().cloned())
            .unwrap_or_default()
    }

    /// Value of the expected type at `path`; a value of the wrong type counts as unset.
    fn typed_at<T>(&self, path: &str, extract: impl Fn(&Value) -> Option<T>) -> Option<T> {
        dot_path::lookup(&self.doc, path)
            .and_then(&extract)
            .or_else(|| dot_path::lookup(&self.defaults, path).and_then(&extract))
    }

    fn persist(&self) -> bool {
        let result =
            json_to_bytes(&self.doc, "settings").and_then(|bytes| write_file_atomic(&self.path, &bytes));
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(path = %self.path.display(), "settings persist failed: {}", err);
                false
            }
        }
    }
}
