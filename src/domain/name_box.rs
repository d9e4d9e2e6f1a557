//! Name-box text contract
//!
//! Every category carries one text shape, the name-box, whose text reads
//! `Category: <name>`. The name-box is authoritative for the category's
//! display name and, through it, the category's mirror folder.

use super::name::is_valid_name;

/// Prefix that marks a text shape as a category name-box
pub const NAME_BOX_PREFIX: &str = "Category: ";

/// Shape name given to name-boxes created by the gallery
pub const NAME_BOX_SHAPE_NAME: &str = "Category Name Box";

/// Extracts the category name from name-box text
///
/// Returns `None` if the text does not follow the `Category: <name>` pattern
/// or the name is not filesystem-safe.
pub fn parse_name_box(text: &str) -> Option<&str> {
    let name = text.trim().strip_prefix(NAME_BOX_PREFIX)?.trim();
    is_valid_name(name).then_some(name)
}

/// Renders the name-box text for a category name
pub fn name_box_text(name: &str) -> String {
    format!("{}{}", NAME_BOX_PREFIX, name)
}

/// Returns true for container names the host assigns automatically
///
/// Matches an empty name, `Untitled`, and `Slide<n>` / `Slide <n>`.
/// Such names carry no user intent, so they are never adopted as a
/// category name.
pub fn is_default_container_name(name: &str) -> bool {
    let name = name.trim();

    if name.is_empty() || name.eq_ignore_ascii_case("untitled") {
        return true;
    }

    match name.strip_prefix("Slide") {
        Some(rest) => {
            let digits = rest.strip_prefix(' ').unwrap_or(rest);
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_box_text() {
        assert_eq!(parse_name_box("Category: Arrows"), Some("Arrows"));
        assert_eq!(parse_name_box("  Category: My Shapes  "), Some("My Shapes"));
    }

    #[test]
    fn rejects_foreign_text() {
        assert_eq!(parse_name_box("Arrows"), None);
        assert_eq!(parse_name_box("category: Arrows"), None);
        assert_eq!(parse_name_box("Category: "), None);
        assert_eq!(parse_name_box("Category: a/b"), None);
    }

    #[test]
    fn text_roundtrips() {
        let text = name_box_text("Basic Shapes");
        assert_eq!(text, "Category: Basic Shapes");
        assert_eq!(parse_name_box(&text), Some("Basic Shapes"));
    }

    #[test]
    fn default_container_names() {
        assert!(is_default_container_name(""));
        assert!(is_default_container_name("Slide1"));
        assert!(is_default_container_name("Slide 12"));
        assert!(is_default_container_name("Untitled"));

        assert!(!is_default_container_name("Slides"));
        assert!(!is_default_container_name("Slide "));
        assert!(!is_default_container_name("Slide deck"));
        assert!(!is_default_container_name("Arrows"));
    }
}
