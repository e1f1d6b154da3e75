//! Declaration name quoting

use std::borrow::Cow;

const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Renders a declaration name, backtick-quoting keywords and names that are
/// not plain identifiers
///
/// Special names such as `<no name provided>` are returned unchanged.
pub fn render_name(name: &str) -> Cow<'_, str> {
    if name.starts_with('<') || (is_identifier(name) && !KEYWORDS.contains(&name)) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("`{name}`"))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|ch| ch == '_' || ch.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_are_unchanged() {
        assert_eq!(render_name("foo"), "foo");
        assert_eq!(render_name("_bar2"), "_bar2");
    }

    #[test]
    fn test_keywords_and_odd_names_are_quoted() {
        assert_eq!(render_name("object"), "`object`");
        assert_eq!(render_name("my name"), "`my name`");
        assert_eq!(render_name("1st"), "`1st`");
    }

    #[test]
    fn test_special_names_are_not_quoted() {
        assert_eq!(render_name("<no name provided>"), "<no name provided>");
    }
}
