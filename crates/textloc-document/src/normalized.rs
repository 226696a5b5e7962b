//! Whitespace-normalizing text buffer.

use std::fmt;

/// Whitespace test used throughout indexing; includes the no-break space.
pub fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{a0}'
}

/// Append-only text buffer that collapses every whitespace run into a
/// single space.
///
/// The buffer never starts with a space, and a single trailing space is
/// not counted by [`NormalizedText::len`]. Appending can be switched off
/// temporarily, which the indexer uses to keep form-control content out of
/// one of its streams.
#[derive(Debug, Clone, Default)]
pub struct NormalizedText {
    content: Vec<char>,
    append_disabled: bool,
}

impl NormalizedText {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop appending until [`NormalizedText::enable_append`] is called.
    pub fn disable_append(&mut self) {
        self.append_disabled = true;
    }

    /// Resume appending.
    pub fn enable_append(&mut self) {
        self.append_disabled = false;
    }

    fn ends_blank(&self) -> bool {
        self.content.last().map_or(true, |c| *c == ' ')
    }

    /// Append `text`, collapsing whitespace.
    pub fn append(&mut self, text: &str) {
        if self.append_disabled {
            return;
        }
        let mut blank = self.ends_blank();
        for c in text.chars() {
            if is_blank(c) {
                if !blank {
                    blank = true;
                    self.content.push(' ');
                }
            } else {
                blank = false;
                self.content.push(c);
            }
        }
    }

    /// Append a single separating space unless one is already there.
    pub fn append_blank(&mut self) {
        if self.append_disabled || self.ends_blank() {
            return;
        }
        self.content.push(' ');
    }

    /// Length in characters, excluding one trailing space.
    pub fn len(&self) -> usize {
        match self.content.last() {
            Some(' ') => self.content.len() - 1,
            _ => self.content.len(),
        }
    }

    /// Whether the buffer holds no visible text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Characters `[start, end)` with one boundary space trimmed on each side.
    ///
    /// Out-of-range bounds are clamped; an inverted range yields "".
    pub fn substring(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        if end == 0 || start >= end {
            return String::new();
        }

        let mut end = end;
        if self.content[end - 1] == ' ' {
            end -= 1;
        }
        let mut start = start;
        if start < end && self.content[start] == ' ' {
            start += 1;
        }
        if start >= end {
            return String::new();
        }
        self.content[start..end].iter().collect()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.substring(0, self.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(parts: &[&str]) -> NormalizedText {
        let mut text = NormalizedText::new();
        for part in parts {
            text.append(part);
        }
        text
    }

    #[test]
    fn test_collapses_whitespace() {
        let text = normalized(&["  Some \t\n text", "\u{a0}\u{a0}here "]);
        assert_eq!(text.to_string(), "Some text here");
        assert_eq!(text.len(), 14);
    }

    #[test]
    fn test_no_blank_across_parts() {
        let text = normalized(&["Check", "Box"]);
        assert_eq!(text.to_string(), "CheckBox");
    }

    #[test]
    fn test_append_blank() {
        let mut text = NormalizedText::new();
        text.append_blank();
        assert_eq!(text.len(), 0);

        text.append("a");
        text.append_blank();
        text.append_blank();
        text.append("b");
        assert_eq!(text.to_string(), "a b");
    }

    #[test]
    fn test_disabled_append() {
        let mut text = normalized(&["a"]);
        text.disable_append();
        text.append("ignored");
        text.append_blank();
        text.enable_append();
        text.append("b");
        assert_eq!(text.to_string(), "ab");
    }

    #[test]
    fn test_substring_trims_boundary_blanks() {
        let text = normalized(&["Some text .... Marker "]);
        assert_eq!(text.len(), 21);
        assert_eq!(text.substring(0, 15), "Some text ....");
        assert_eq!(text.substring(14, 21), "Marker");
        assert_eq!(text.substring(9, 9), "");
    }

    #[test]
    fn test_substring_out_of_range() {
        let text = normalized(&["abc"]);
        assert_eq!(text.substring(1, 99), "bc");
        assert_eq!(text.substring(5, 2), "");
        assert_eq!(NormalizedText::new().substring(0, 3), "");
    }

    #[test]
    fn test_single_blank_substring_is_empty() {
        let text = normalized(&["a b"]);
        assert_eq!(text.substring(1, 2), "");
    }
}
