//! Category lookup and validation.
//!
//! Categories are per-user. A note keeps whatever category id it was saved with,
//! so lookups are always against the viewer's own list and may come back empty:
//! a deleted category, or one owned by whoever shared the note.

use crate::error::NotesError;
use crate::models::{Category, NewCategory};

/// Default colour palette offered when creating a category.
pub const DEFAULT_PALETTE: [&str; 7] = [
    "#FFCDD2", "#F8BBD0", "#E1BEE7", "#D1C4E9", "#C5CAE9", "#BBDEFB", "#B3E5FC",
];

/// Find `category_id` among the current user's categories.
pub fn resolve_category<'a>(
    category_id: Option<&str>,
    categories: &'a [Category],
) -> Option<&'a Category> {
    let id = category_id?;
    categories.iter().find(|c| c.id == id)
}

/// Whether `color` is a `#RRGGBB` hex colour.
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Build a category insert, trimming the name and falling back to `default_color`.
pub fn new_category(
    owner_id: &str,
    name: &str,
    color: Option<&str>,
    default_color: &str,
) -> Result<NewCategory, NotesError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NotesError::ValidationFailed("name"));
    }
    let color = color.unwrap_or(default_color);
    if !is_hex_color(color) {
        return Err(NotesError::ValidationFailed("color"));
    }
    Ok(NewCategory {
        name: name.to_string(),
        color: color.to_string(),
        owner_id: owner_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "cat1".into(),
                name: "Errands".into(),
                color: "#FFCDD2".into(),
                owner_id: "u1".into(),
            },
            Category {
                id: "cat2".into(),
                name: "Work".into(),
                color: "#BBDEFB".into(),
                owner_id: "u1".into(),
            },
        ]
    }

    #[test]
    fn test_resolve_by_id() {
        let cats = categories();
        assert_eq!(resolve_category(Some("cat2"), &cats).map(|c| c.name.as_str()), Some("Work"));
        assert!(resolve_category(Some("gone"), &cats).is_none());
        assert!(resolve_category(None, &cats).is_none());
        assert!(resolve_category(Some("cat1"), &[]).is_none());
    }

    #[test]
    fn test_new_category_validation() {
        let c = new_category("u1", "  Ideas ", None, DEFAULT_PALETTE[0]).unwrap();
        assert_eq!(c.name, "Ideas");
        assert_eq!(c.color, "#FFCDD2");
        assert_eq!(c.owner_id, "u1");

        assert_eq!(
            new_category("u1", "   ", None, DEFAULT_PALETTE[0]),
            Err(NotesError::ValidationFailed("name"))
        );
        assert_eq!(
            new_category("u1", "Ideas", Some("blue"), DEFAULT_PALETTE[0]),
            Err(NotesError::ValidationFailed("color"))
        );
    }

    #[test]
    fn test_palette_is_valid() {
        assert!(DEFAULT_PALETTE.iter().all(|c| is_hex_color(c)));
        assert!(!is_hex_color("#FFF"));
        assert!(!is_hex_color("FFCDD2F"));
    }
}
