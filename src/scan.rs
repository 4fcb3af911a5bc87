//! Quote tracking shared by the splitters.

/// Tracks whether a left-to-right scan is inside a basic (`"..."`) or a
/// literal (`'...'`) string.
///
/// A `'` inside a basic string does not open a literal string and vice versa.
/// Inside a basic string a backslash escapes the next character, so `\"`
/// never closes it. Literal strings have no escapes.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Quotes {
    basic: bool,
    literal: bool,
    escaped: bool,
}

impl Quotes {
    /// Feeds the next character and returns `true` when it is structural,
    /// i.e. neither a quote nor part of a quoted span.
    pub(crate) fn feed(&mut self, ch: char) -> bool {
        if self.basic {
            if self.escaped {
                self.escaped = false;
            } else if ch == '\\' {
                self.escaped = true;
            } else if ch == '"' {
                self.basic = false;
            }
            return false;
        }
        if self.literal {
            if ch == '\'' {
                self.literal = false;
            }
            return false;
        }
        match ch {
            '"' => {
                self.basic = true;
                false
            }
            '\'' => {
                self.literal = true;
                false
            }
            _ => true,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.basic || self.literal
    }
}

/// Returns the byte index of the first structural occurrence of `target`:
/// outside quotes and, when `nested` is set, outside `[]`/`{}` nesting.
pub(crate) fn find_structural(text: &str, target: char, nested: bool) -> Option<usize> {
    let mut quotes = Quotes::default();
    let mut depth = 0usize;
    for (i, ch) in text.char_indices() {
        if !quotes.feed(ch) {
            continue;
        }
        match ch {
            c if c == target && depth == 0 => return Some(i),
            '[' | '{' if nested => depth += 1,
            ']' | '}' if nested => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_quote_does_not_close() {
        assert_eq!(find_structural(r#""a\"=b" = 1"#, '=', true), Some(8));
        assert_eq!(find_structural(r#""a\\" = 1"#, '=', true), Some(6));
    }

    #[test]
    fn test_mixed_quotes() {
        assert_eq!(find_structural(r#""it's" # c"#, '#', false), Some(7));
        assert_eq!(find_structural(r#"'say "hi"' # c"#, '#', false), Some(11));
        assert_eq!(find_structural("'open # c", '#', false), None);
    }

    #[test]
    fn test_nesting() {
        assert_eq!(find_structural("[a = 1] = 2", '=', true), Some(8));
        assert_eq!(find_structural("{a = 1}", '=', false), Some(3));
    }
}
