use std::collections::BTreeMap;

use bazar_logging::{bazar_debug, bazar_warn};
use listing_core::{PreviewHandle, PreviewId, SourceHandle};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("preview {0} is already live")]
    AlreadyLive(PreviewId),
    #[error("preview {0} is not live (never acquired or already released)")]
    UnknownHandle(PreviewId),
}

#[derive(Debug, Clone)]
struct LivePreview {
    uri: String,
    source: SourceHandle,
}

/// Resource table backing preview handles. Every acquired handle must be
/// released exactly once; violations are reported, never silently absorbed.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    live: BTreeMap<PreviewId, LivePreview>,
    released: u64,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(
        &mut self,
        handle: &PreviewHandle,
        source: &SourceHandle,
    ) -> Result<(), PreviewError> {
        if self.live.contains_key(&handle.id()) {
            bazar_warn!("Preview {} acquired twice", handle.id());
            return Err(PreviewError::AlreadyLive(handle.id()));
        }
        bazar_debug!("Acquire preview {} for {}", handle.uri(), source);
        self.live.insert(
            handle.id(),
            LivePreview {
                uri: handle.uri().to_string(),
                source: source.clone(),
            },
        );
        Ok(())
    }

    pub fn release(&mut self, handle: &PreviewHandle) -> Result<(), PreviewError> {
        match self.live.remove(&handle.id()) {
            Some(preview) => {
                bazar_debug!("Release preview {}", preview.uri);
                self.released += 1;
                Ok(())
            }
            None => {
                bazar_warn!("Release of unknown preview {}", handle.id());
                Err(PreviewError::UnknownHandle(handle.id()))
            }
        }
    }

    /// File behind a displayable preview URI, while it is live.
    pub fn resolve(&self, uri: &str) -> Option<&SourceHandle> {
        self.live
            .values()
            .find(|preview| preview.uri == uri)
            .map(|preview| &preview.source)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn released_count(&self) -> u64 {
        self.released
    }
}
