//! Page path classification.
//!
//! Every page URL has the shape `/<operation>/<title>`, where the title is one
//! or more ASCII letters or digits. A single compiled pattern covers all three
//! operations and is shared by every request.

use std::sync::LazyLock;

use regex::Regex;

/// Whole-path pattern: operation prefix in group 1, title in group 2.
static VALID_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(edit|save|view)/([a-zA-Z0-9]+)$").unwrap());

/// The logical operations a page URL can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Render a page read-only.
    View,
    /// Render the edit form for a page.
    Edit,
    /// Store a submitted page body.
    Save,
}

impl Operation {
    /// All operations, in routing order.
    pub const ALL: [Self; 3] = [Self::View, Self::Edit, Self::Save];

    /// URL prefix for this operation (`view`, `edit`, `save`).
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Save => "save",
        }
    }

    /// URL path of this operation for `title` (e.g. `/edit/FrontPage`).
    #[must_use]
    pub fn path(self, title: &str) -> String {
        format!("/{}/{title}", self.prefix())
    }
}

/// Extract the page title from `path` if it is exactly `/<prefix>/<title>`
/// for `operation`.
///
/// Returns `None` for anything else: another operation's prefix, an empty
/// title, extra segments, or characters outside `[a-zA-Z0-9]` (including
/// percent-encoded ones).
#[must_use]
pub fn title_for(operation: Operation, path: &str) -> Option<&str> {
    let captures = VALID_PATH.captures(path)?;
    if captures.get(1)?.as_str() != operation.prefix() {
        return None;
    }
    captures.get(2).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(Operation::View.prefix(), "view");
        assert_eq!(Operation::Edit.prefix(), "edit");
        assert_eq!(Operation::Save.prefix(), "save");
    }

    #[test]
    fn test_path() {
        assert_eq!(Operation::Edit.path("Missing"), "/edit/Missing");
        assert_eq!(Operation::View.path("Alpha"), "/view/Alpha");
    }

    #[test]
    fn test_accepts_alphanumeric_titles_for_every_operation() {
        for operation in Operation::ALL {
            for title in ["Alpha", "a", "Z9", "0", "FrontPage2024", "abcXYZ019"] {
                let path = operation.path(title);
                assert_eq!(title_for(operation, &path), Some(title), "{path}");
            }
        }
    }

    #[test]
    fn test_round_trips_path_builder() {
        for operation in Operation::ALL {
            let path = operation.path("TestPage");
            assert_eq!(title_for(operation, &path), Some("TestPage"));
        }
    }

    #[test]
    fn test_rejects_disallowed_characters() {
        for title in [
            "bad title!",
            "bad%20title",
            "dash-ed",
            "under_score",
            "dot.txt",
            "Ünïcode",
            "tab\t",
            "new\nline",
        ] {
            let path = format!("/view/{title}");
            assert_eq!(title_for(Operation::View, &path), None, "{path:?}");
        }
    }

    #[test]
    fn test_rejects_empty_title() {
        for operation in Operation::ALL {
            let path = format!("/{}/", operation.prefix());
            assert_eq!(title_for(operation, &path), None);
        }
    }

    #[test]
    fn test_rejects_extra_segments_and_slashes() {
        for path in [
            "/view/Alpha/",
            "/view/Alpha/Beta",
            "//view/Alpha",
            "/view//Alpha",
            "/view/../Alpha",
            "/view/Alpha?x=1",
            "view/Alpha",
            "/view",
            "/",
            "",
        ] {
            assert_eq!(title_for(Operation::View, path), None, "{path:?}");
        }
    }

    #[test]
    fn test_rejects_other_operation_prefix() {
        assert_eq!(title_for(Operation::View, "/edit/Alpha"), None);
        assert_eq!(title_for(Operation::Edit, "/save/Alpha"), None);
        assert_eq!(title_for(Operation::Save, "/view/Alpha"), None);
    }

    #[test]
    fn test_rejects_unknown_prefix() {
        assert_eq!(title_for(Operation::View, "/delete/Alpha"), None);
        assert_eq!(title_for(Operation::View, "/View/Alpha"), None);
        assert_eq!(title_for(Operation::View, "/xview/Alpha"), None);
    }
}
