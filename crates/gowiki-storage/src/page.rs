//! The page record.

/// A wiki page: a title and its raw body bytes.
///
/// The type does not enforce the title pattern itself; titles are validated
/// at the HTTP boundary before a `Page` is ever built. Use [`is_valid_title`]
/// where a check is needed elsewhere.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// Unique page identifier (ASCII letters and digits).
    pub title: String,
    /// Raw page body. May be empty and is not required to be UTF-8.
    pub body: Vec<u8>,
}

impl Page {
    /// Create a page from a title and body.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Create a page with an empty body.
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    #[must_use]
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Check whether `title` is a non-empty run of ASCII letters and digits.
#[must_use]
pub fn is_valid_title(title: &str) -> bool {
    !title.is_empty() && title.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::new("FrontPage", "Welcome");

        assert_eq!(page.title, "FrontPage");
        assert_eq!(page.body, b"Welcome".to_vec());
    }

    #[test]
    fn test_page_empty() {
        let page = Page::empty("Draft");

        assert_eq!(page.title, "Draft");
        assert!(page.body.is_empty());
    }

    #[test]
    fn test_body_text_lossy() {
        let page = Page::new("Bin", vec![b'h', b'i', 0xff]);

        assert_eq!(page.body_text(), "hi\u{fffd}");
    }

    #[test]
    fn test_is_valid_title() {
        assert!(is_valid_title("FrontPage"));
        assert!(is_valid_title("a1"));
        assert!(is_valid_title("0"));
    }

    #[test]
    fn test_is_valid_title_rejects() {
        assert!(!is_valid_title(""));
        assert!(!is_valid_title("bad title"));
        assert!(!is_valid_title("../etc"));
        assert!(!is_valid_title("a/b"));
        assert!(!is_valid_title("Ünïcode"));
        assert!(!is_valid_title("dash-ed"));
    }
}
