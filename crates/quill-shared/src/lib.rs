//! # Quill Shared
//!
//! Types that cross the HTTP boundary: form payloads and their validation
//! schema, flash notifications and error pages.

pub mod flash;
pub mod forms;
pub mod response;

pub use flash::{FlashLevel, FlashMessage};
pub use forms::{
    CategoryForm, ContactForm, ContactVariant, FieldSpec, FormErrors, FormSchema, PostForm, Widget,
};
pub use response::ErrorPage;
