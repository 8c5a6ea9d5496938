use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// Post entity - represents a blog post.
///
/// The category reference is nullable in storage; the admin form is what
/// insists on one being chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub category_id: Option<i32>,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Overwrite the editable fields and bump `updated_at`.
    pub fn revise(&mut self, category_id: Option<i32>, title: String, body: String) {
        self.category_id = category_id;
        self.title = title;
        self.body = body;
        self.updated_at = Utc::now();
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub category_id: Option<i32>,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post.
    pub fn new(category_id: Option<i32>, title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            category_id,
            title,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A post joined with the category it references, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithCategory {
    pub post: Post,
    pub category: Option<Category>,
}
