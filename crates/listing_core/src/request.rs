use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::{validate_listing, ValidationError};
use crate::{Category, Condition, ContactMethod, CurrentUser, ListingDraft};

/// Identifier assigned by the listing-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload handed to the listing-creation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequest {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub condition: Condition,
    pub images: Vec<String>,
    pub contact_method: ContactMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub location: String,
    pub seller_id: String,
    pub seller_name: String,
    pub seller_university: String,
}

impl ListingRequest {
    /// Packages a draft, re-checking every step first.
    pub fn from_draft(draft: &ListingDraft, seller: &CurrentUser) -> Result<Self, ValidationError> {
        validate_listing(draft)?;
        let price = draft.price_value().ok_or(ValidationError::InvalidPrice)?;
        let phone = match draft.contact_method {
            ContactMethod::Phone => Some(draft.phone.trim().to_string()),
            ContactMethod::InApp => None,
        };
        Ok(Self {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            price,
            category: draft.category,
            condition: draft.condition,
            images: draft.images().preview_uris(),
            contact_method: draft.contact_method,
            phone,
            location: draft.location.trim().to_string(),
            seller_id: seller.id.clone(),
            seller_name: seller.name.clone(),
            seller_university: seller.university.clone(),
        })
    }
}
