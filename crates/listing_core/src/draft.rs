use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::images::ImageAttachmentManager;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Category {
    #[default]
    Textbooks,
    Electronics,
    Furniture,
    Clothing,
    Stationery,
    Sports,
    Other,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Condition {
    New,
    #[serde(rename = "Like New")]
    #[strum(to_string = "Like New", serialize = "LikeNew")]
    LikeNew,
    #[default]
    Good,
    Fair,
    Poor,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum ContactMethod {
    #[default]
    #[serde(rename = "in-app")]
    #[strum(serialize = "in-app")]
    InApp,
    #[serde(rename = "phone")]
    #[strum(serialize = "phone")]
    Phone,
}

/// Signed-in user as supplied by the auth layer. Read-only to the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub university: String,
}

/// Source of the signed-in user, injected into the wizard when it opens.
pub trait AuthCollaborator {
    fn current_user(&self) -> Option<CurrentUser>;
}

impl AuthCollaborator for Option<CurrentUser> {
    fn current_user(&self) -> Option<CurrentUser> {
        self.clone()
    }
}

impl AuthCollaborator for CurrentUser {
    fn current_user(&self) -> Option<CurrentUser> {
        Some(self.clone())
    }
}

/// The in-progress listing. Text fields hold exactly what the user typed;
/// `price` is parsed only when validated or packaged for submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: Category,
    pub condition: Condition,
    pub contact_method: ContactMethod,
    pub phone: String,
    pub location: String,
    pub(crate) images: ImageAttachmentManager,
}

impl ListingDraft {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn images(&self) -> &ImageAttachmentManager {
        &self.images
    }

    /// Parsed price, if the whole trimmed text is a finite number.
    pub fn price_value(&self) -> Option<f64> {
        let trimmed = self.price.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
    }

    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Title(value) => self.title = value,
            FieldEdit::Description(value) => self.description = value,
            FieldEdit::Price(value) => self.price = value,
            FieldEdit::Category(value) => self.category = value,
            FieldEdit::Condition(value) => self.condition = value,
            FieldEdit::ContactMethod(value) => self.contact_method = value,
            FieldEdit::Phone(value) => self.phone = value,
            FieldEdit::Location(value) => self.location = value,
        }
    }
}

/// One field change coming from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Title(String),
    Description(String),
    Price(String),
    Category(Category),
    Condition(Condition),
    ContactMethod(ContactMethod),
    Phone(String),
    Location(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldEditError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("`{value}` is not a valid {field}")]
    InvalidValue { field: &'static str, value: String },
}

impl FieldEdit {
    /// Builds an edit from a form field name and its raw value.
    pub fn from_name_value(name: &str, value: &str) -> Result<Self, FieldEditError> {
        let edit = match name {
            "title" => FieldEdit::Title(value.to_string()),
            "description" => FieldEdit::Description(value.to_string()),
            "price" => FieldEdit::Price(value.to_string()),
            "category" => FieldEdit::Category(parse_choice("category", value)?),
            "condition" => FieldEdit::Condition(parse_choice("condition", value)?),
            "contactMethod" => FieldEdit::ContactMethod(parse_choice("contactMethod", value)?),
            "phone" => FieldEdit::Phone(value.to_string()),
            "location" => FieldEdit::Location(value.to_string()),
            other => return Err(FieldEditError::UnknownField(other.to_string())),
        };
        Ok(edit)
    }
}

fn parse_choice<T: FromStr>(field: &'static str, value: &str) -> Result<T, FieldEditError> {
    value
        .trim()
        .parse()
        .map_err(|_| FieldEditError::InvalidValue {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn price_value_requires_whole_finite_number() {
        let mut draft = ListingDraft::default();
        for (input, expected) in [
            ("30", Some(30.0)),
            (" 12.5 ", Some(12.5)),
            ("", None),
            ("   ", None),
            ("12abc", None),
            ("inf", None),
            ("NaN", None),
        ] {
            draft.price = input.to_string();
            assert_eq!(draft.price_value(), expected, "input {input:?}");
        }
    }

    #[test]
    fn new_draft_prefills_location_and_defaults() {
        let draft = ListingDraft::new("State University");
        assert_eq!(draft.location, "State University");
        assert_eq!(draft.category, Category::Textbooks);
        assert_eq!(draft.condition, Condition::Good);
        assert_eq!(draft.contact_method, ContactMethod::InApp);
        assert!(draft.images().is_empty());
    }

    #[test]
    fn field_edits_parse_form_names() {
        assert_eq!(
            FieldEdit::from_name_value("condition", "Like New"),
            Ok(FieldEdit::Condition(Condition::LikeNew))
        );
        assert_eq!(
            FieldEdit::from_name_value("contactMethod", "phone"),
            Ok(FieldEdit::ContactMethod(ContactMethod::Phone))
        );
        assert_eq!(
            FieldEdit::from_name_value("category", "Sports"),
            Ok(FieldEdit::Category(Category::Sports))
        );
        assert_eq!(
            FieldEdit::from_name_value("colour", "red"),
            Err(FieldEditError::UnknownField("colour".to_string()))
        );
        assert!(matches!(
            FieldEdit::from_name_value("category", "Cars"),
            Err(FieldEditError::InvalidValue { field: "category", .. })
        ));
    }

    #[test]
    fn condition_labels_match_the_form() {
        let labels: Vec<String> = Condition::iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, ["New", "Like New", "Good", "Fair", "Poor"]);
        assert_eq!(ContactMethod::InApp.to_string(), "in-app");
    }
}
