/// Byte cursor over notation text.
///
/// Notation is plain ASCII and case-insensitive, so the scanner works on bytes
/// and hands out lowercased characters. Any non-ASCII byte simply fails to match
/// a token and is reported by the interpreter that meets it.
pub(crate) struct Scanner<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str, position: usize) -> Self {
        Self {
            input: input.as_bytes(),
            position,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Lowercased byte at the cursor.
    pub(crate) fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    pub(crate) fn peek_at(&self, offset: usize) -> Option<char> {
        self.input
            .get(self.position + offset)
            .map(|b| b.to_ascii_lowercase() as char)
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.position += 1;
        }
    }

    /// Consumes `c` if it is next.
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn at_digit(&self) -> bool {
        self.peek().is_some_and(|c| c.is_ascii_digit())
    }

    /// Consumes a run of decimal digits. Values too large for `u32` saturate.
    pub(crate) fn number(&mut self) -> Option<u32> {
        if !self.at_digit() {
            return None;
        }
        let mut value: u32 = 0;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(digit);
            self.position += 1;
        }
        Some(value)
    }
}
