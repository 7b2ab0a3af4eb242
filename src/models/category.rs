//! Expense/income category model.

use serde::{Deserialize, Serialize};

use super::CategoryId;

/// Icon shown when a category has none of its own.
pub const FALLBACK_ICON: &str = "📁";

/// Neutral gray used when a category has no color of its own.
pub const FALLBACK_COLOR: &str = "#6B7B8D";

/// A user-defined spending/earning category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier assigned by the server.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Emoji-style icon label.
    pub icon: Option<String>,
    /// Hex display color (e.g. `#E07A5F`).
    pub color: Option<String>,
    /// Whether this is one of the server-seeded default categories.
    #[serde(default)]
    pub is_default: bool,
}

impl Category {
    /// Returns the icon, falling back to [`FALLBACK_ICON`].
    #[inline]
    #[must_use]
    pub fn icon_or_default(&self) -> &str {
        self.icon.as_deref().filter(|s| !s.is_empty()).unwrap_or(FALLBACK_ICON)
    }

    /// Returns the color, falling back to [`FALLBACK_COLOR`].
    #[inline]
    #[must_use]
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().filter(|s| !s.is_empty()).unwrap_or(FALLBACK_COLOR)
    }
}

/// Request body for creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    /// Display name.
    pub name: String,
    /// Emoji-style icon label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Hex display color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Whether the category should be marked as a default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_category() {
        let json = r##"{
            "id": 3,
            "name": "Groceries",
            "icon": "🛒",
            "color": "#81B29A",
            "isDefault": true
        }"##;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, CategoryId::new(3));
        assert_eq!(category.name, "Groceries");
        assert!(category.is_default);
        assert_eq!(category.icon_or_default(), "🛒");
        assert_eq!(category.color_or_default(), "#81B29A");
    }

    #[test]
    fn missing_icon_and_color_fall_back() {
        let json = r#"{
            "id": 4,
            "name": "Misc",
            "icon": null,
            "color": null
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert!(!category.is_default);
        assert_eq!(category.icon_or_default(), FALLBACK_ICON);
        assert_eq!(category.color_or_default(), FALLBACK_COLOR);
    }

    #[test]
    fn request_omits_unset_fields() {
        let request = CategoryRequest {
            name: "Pets".to_owned(),
            icon: None,
            color: None,
            is_default: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"name":"Pets"}"#);
    }
}
