//! Form payloads and their validation schema.
//!
//! Every form is posted as `application/x-www-form-urlencoded`. Missing
//! fields deserialize to empty strings so that a blank submission reaches
//! validation instead of failing extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::flash::FlashMessage;

/// Input widget used to render a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    Text,
    Email,
    Textarea,
    Select,
}

/// Declaration of one editable field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub required: bool,
    /// Empty first option for selects, hint text otherwise.
    pub placeholder: Option<&'static str>,
}

/// A form schema: which fields exist, how they render and how they validate.
pub trait FormSchema: Validate + Sized {
    const FIELDS: &'static [FieldSpec];
    const SUBMIT_LABEL: &'static str;

    /// Current value of a field, for re-rendering.
    fn value(&self, field: &str) -> &str;

    /// Trim surrounding whitespace from every field.
    fn normalized(self) -> Self;

    /// Normalize and validate.
    fn check(self) -> Result<Self, (Self, FormErrors)> {
        let form = self.normalized();
        match form.validate() {
            Ok(()) => Ok(form),
            Err(errors) => Err((form, errors.into())),
        }
    }
}

/// Field-level validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FormErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

/// Admin form for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CategoryForm {
    #[validate(length(min = 1, message = "This value should not be blank."))]
    pub name: String,
}

impl FormSchema for CategoryForm {
    const FIELDS: &'static [FieldSpec] = &[FieldSpec {
        name: "name",
        label: "Name",
        widget: Widget::Text,
        required: true,
        placeholder: None,
    }];
    const SUBMIT_LABEL: &'static str = "Save";

    fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            _ => "",
        }
    }

    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

/// Admin form for a post.
///
/// `category` carries the selected category id as submitted; the empty
/// placeholder option is rejected here, the existence of the id is checked
/// against the store by the handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PostForm {
    #[validate(length(min = 1, message = "Please select a category."))]
    pub category: String,
    #[validate(length(min = 1, message = "This value should not be blank."))]
    pub title: String,
    #[validate(length(min = 1, message = "This value should not be blank."))]
    pub body: String,
}

impl PostForm {
    /// The selected category id, if the submission holds a number.
    pub fn category_id(&self) -> Option<i32> {
        self.category.parse().ok()
    }
}

impl FormSchema for PostForm {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "category",
            label: "Category",
            widget: Widget::Select,
            required: true,
            placeholder: Some("select one…"),
        },
        FieldSpec {
            name: "title",
            label: "Title",
            widget: Widget::Text,
            required: true,
            placeholder: None,
        },
        FieldSpec {
            name: "body",
            label: "Body",
            widget: Widget::Textarea,
            required: true,
            placeholder: None,
        },
    ];
    const SUBMIT_LABEL: &'static str = "Save";

    fn value(&self, field: &str) -> &str {
        match field {
            "category" => &self.category,
            "title" => &self.title,
            "body" => &self.body,
            _ => "",
        }
    }

    fn normalized(self) -> Self {
        Self {
            category: self.category.trim().to_string(),
            title: self.title.trim().to_string(),
            body: self.body.trim().to_string(),
        }
    }
}

/// Contact form, shared by every contact page variant.
///
/// The constraints are declared for rendering; the contact handlers never
/// enforce them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(email(message = "This value is not a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "This value should not be blank."))]
    pub message: String,
}

impl FormSchema for ContactForm {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "email",
            label: "Email",
            widget: Widget::Email,
            required: true,
            placeholder: Some("you@example.com"),
        },
        FieldSpec {
            name: "message",
            label: "Message",
            widget: Widget::Textarea,
            required: true,
            placeholder: None,
        },
    ];
    const SUBMIT_LABEL: &'static str = "Send";

    fn value(&self, field: &str) -> &str {
        match field {
            "email" => &self.email,
            "message" => &self.message,
            _ => "",
        }
    }

    fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// Which contact page is being served. Each variant renders the same
/// [`ContactForm`] and differs only in route and flash notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactVariant {
    V1,
    V2,
    V3,
}

impl ContactVariant {
    pub const ALL: [ContactVariant; 3] = [Self::V1, Self::V2, Self::V3];

    pub fn path(self) -> &'static str {
        match self {
            Self::V1 => "/contacts-v1",
            Self::V2 => "/contacts-v2",
            Self::V3 => "/contacts-v3",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::V1 => "Contact us (v1)",
            Self::V2 => "Contact us (v2)",
            Self::V3 => "Contact us (v3)",
        }
    }

    /// Notification shown after a submission.
    pub fn flash(self) -> FlashMessage {
        match self {
            Self::V1 => FlashMessage::success("Thank you! Your message has been sent."),
            Self::V2 => FlashMessage::primary("Thanks for reaching out, we will reply soon."),
            Self::V3 => FlashMessage::info("Your message has been received."),
        }
    }
}
