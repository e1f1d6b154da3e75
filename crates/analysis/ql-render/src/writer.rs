//! Output buffer of the declaration renderer

/// Spaces per brace nesting level
const INDENT_WIDTH: usize = 4;

/// Accumulates rendered text; supports rolling back to an earlier length
#[derive(Debug, Default)]
pub(crate) struct RenderBuffer {
    text: String,
}

impl RenderBuffer {
    pub(crate) fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Starts a new line indented to `depth`
    pub(crate) fn new_line(&mut self, depth: usize) {
        self.text.push('\n');
        self.text.extend(std::iter::repeat_n(' ', depth * INDENT_WIDTH));
    }

    /// Writes `keyword` followed by a space when `enabled`
    pub(crate) fn modifier(&mut self, enabled: bool, keyword: &str) {
        if enabled {
            self.text.push_str(keyword);
            self.text.push(' ');
        }
    }

    pub(crate) fn space_if_needed(&mut self) {
        if !self.text.ends_with(' ') {
            self.text.push(' ');
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.text.len()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.text.truncate(len);
    }

    /// Rendered text without surrounding spaces, newlines and tabs
    pub(crate) fn finish(self) -> String {
        self.text.trim_matches([' ', '\n', '\t']).to_string()
    }
}
