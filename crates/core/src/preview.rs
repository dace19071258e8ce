//! Revocable preview handles for the selected video.
//!
//! A handle lets a front-end render the chosen file locally before anything is
//! uploaded. Handles stay resolvable until revoked; the session revokes the
//! previous handle whenever the selection changes.

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::media::SelectedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle {
    id: Uuid,
}

impl PreviewHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview:{}", self.id)
    }
}

#[derive(Debug, Default)]
pub struct PreviewStore {
    live: HashMap<Uuid, PathBuf>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, file: &SelectedFile) -> PreviewHandle {
        let handle = PreviewHandle { id: Uuid::new_v4() };
        self.live.insert(handle.id, file.path().to_path_buf());
        tracing::debug!(%handle, path = %file.path().display(), "preview created");
        handle
    }

    /// Release a handle. Returns false if it was already revoked.
    pub fn revoke(&mut self, handle: PreviewHandle) -> bool {
        let released = self.live.remove(&handle.id).is_some();
        if released {
            tracing::debug!(%handle, "preview revoked");
        }
        released
    }

    pub fn resolve(&self, handle: &PreviewHandle) -> Option<&Path> {
        self.live.get(&handle.id).map(PathBuf::as_path)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
