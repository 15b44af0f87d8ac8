//! Per-step checks. Rules run in a fixed order and the first failure wins.
use thiserror::Error;

use crate::{ContactMethod, ListingDraft, Step};

pub const MIN_DESCRIPTION_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a title for your listing")]
    EmptyTitle,
    #[error("Please enter a valid price")]
    InvalidPrice,
    #[error("Please provide a detailed description (at least 20 characters)")]
    DescriptionTooShort,
    #[error("Please add at least one photo of your item")]
    NoPhotos,
    #[error("Please enter a phone number buyers can reach you on")]
    MissingPhone,
    #[error("Please enter a meeting location")]
    MissingLocation,
}

impl ValidationError {
    /// Wizard step that owns the violated field.
    pub fn step(self) -> Step {
        match self {
            ValidationError::EmptyTitle
            | ValidationError::InvalidPrice
            | ValidationError::DescriptionTooShort => Step::Details,
            ValidationError::NoPhotos => Step::Photos,
            ValidationError::MissingPhone | ValidationError::MissingLocation => Step::Contact,
        }
    }
}

pub fn validate_details(draft: &ListingDraft) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    match draft.price_value() {
        Some(price) if price > 0.0 => {}
        _ => return Err(ValidationError::InvalidPrice),
    }
    if draft.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooShort);
    }
    Ok(())
}

pub fn validate_photos(draft: &ListingDraft) -> Result<(), ValidationError> {
    if draft.images().is_empty() {
        return Err(ValidationError::NoPhotos);
    }
    Ok(())
}

pub fn validate_contact(draft: &ListingDraft) -> Result<(), ValidationError> {
    if draft.contact_method == ContactMethod::Phone && draft.phone.trim().is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    if draft.location.trim().is_empty() {
        return Err(ValidationError::MissingLocation);
    }
    Ok(())
}

/// Details, then photos, then contact.
pub fn validate_listing(draft: &ListingDraft) -> Result<(), ValidationError> {
    validate_details(draft)?;
    validate_photos(draft)?;
    validate_contact(draft)
}
