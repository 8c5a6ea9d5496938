//! Domain entities - the core business objects.

mod category;
mod post;

pub use category::{Category, NewCategory};
pub use post::{NewPost, Post, PostWithCategory};
