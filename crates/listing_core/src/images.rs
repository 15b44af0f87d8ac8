use std::fmt;

use thiserror::Error;

/// Most photos a single listing can carry.
pub const MAX_IMAGES: usize = 5;

pub const PREVIEW_URI_PREFIX: &str = "blob:campus-bazar/";

pub type PreviewId = u64;

/// Opaque reference to a file the user picked. Never read by the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceHandle(String);

impl SourceHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceHandle {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SourceHandle {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Displayable preview for one attachment. Must be released exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    id: PreviewId,
    uri: String,
}

impl PreviewHandle {
    fn mint(id: PreviewId) -> Self {
        Self {
            id,
            uri: format!("{PREVIEW_URI_PREFIX}{id}"),
        }
    }

    pub fn id(&self) -> PreviewId {
        self.id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    source: SourceHandle,
    preview: PreviewHandle,
}

impl ImageAttachment {
    pub fn source(&self) -> &SourceHandle {
        &self.source
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("You can upload a maximum of {max} images")]
    TooManyImages {
        current: usize,
        requested: usize,
        max: usize,
    },
    #[error("There is no photo at position {index} (the listing has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered photos of a draft together with their live preview handles.
///
/// Handles are minted on add and handed back to the caller on removal and
/// disposal; the caller is responsible for releasing what it gets back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageAttachmentManager {
    attachments: Vec<ImageAttachment>,
    next_preview_id: PreviewId,
}

impl ImageAttachmentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the whole batch or nothing. Returns the attachments just added.
    pub fn add_images(
        &mut self,
        selected: Vec<SourceHandle>,
    ) -> Result<&[ImageAttachment], ImageError> {
        let current = self.attachments.len();
        if current + selected.len() > MAX_IMAGES {
            return Err(ImageError::TooManyImages {
                current,
                requested: selected.len(),
                max: MAX_IMAGES,
            });
        }
        for source in selected {
            self.next_preview_id += 1;
            let preview = PreviewHandle::mint(self.next_preview_id);
            self.attachments.push(ImageAttachment { source, preview });
        }
        Ok(&self.attachments[current..])
    }

    /// Removes the attachment at `index` and returns its handle for release.
    pub fn remove_image(&mut self, index: usize) -> Result<PreviewHandle, ImageError> {
        if index >= self.attachments.len() {
            return Err(ImageError::IndexOutOfRange {
                index,
                len: self.attachments.len(),
            });
        }
        Ok(self.attachments.remove(index).preview)
    }

    /// Empties the sequence and returns every handle for release.
    pub fn dispose_all(&mut self) -> Vec<PreviewHandle> {
        self.attachments
            .drain(..)
            .map(|attachment| attachment.preview)
            .collect()
    }

    pub fn attachments(&self) -> &[ImageAttachment] {
        &self.attachments
    }

    pub fn main_image(&self) -> Option<&ImageAttachment> {
        self.attachments.first()
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    pub fn remaining_capacity(&self) -> usize {
        MAX_IMAGES - self.attachments.len()
    }

    pub fn can_add_more(&self) -> bool {
        self.remaining_capacity() > 0
    }

    pub fn preview_uris(&self) -> Vec<String> {
        self.attachments
            .iter()
            .map(|attachment| attachment.preview.uri.clone())
            .collect()
    }
}
