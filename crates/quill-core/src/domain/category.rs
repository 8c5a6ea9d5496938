use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category entity - a named bucket posts are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Rename the category and bump `updated_at`.
    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

/// A category that has not been stored yet. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewCategory {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_touches_updated_at_only() {
        let created = NewCategory::new("News".to_string());
        let mut category = Category {
            id: 1,
            name: created.name,
            created_at: created.created_at,
            updated_at: created.updated_at,
        };

        category.rename("Releases".to_string());

        assert_eq!(category.name, "Releases");
        assert_eq!(category.created_at, created.created_at);
        assert!(category.updated_at >= created.updated_at);
    }
}
