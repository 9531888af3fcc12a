use std::fmt;

/// A 1-based source position.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Location {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Location {
    /// The starting location of a source string.
    pub fn start() -> Self {
        Location { line: 1, column: 1 }
    }

    /// Advances the location past a single scanned character.
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub(crate) fn into_error(self, message: impl Into<String>) -> LexerError {
        LexerError {
            message: message.into(),
            location: self,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line: {}, Column {}", self.line, self.column)
    }
}

/// An error raised while tokenizing source text.
///
/// Lexer errors are always fatal (spec §7): they stop parsing outright
/// rather than feeding the lenient-recovery path statement parsers use.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexerError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Where in the source the error was detected.
    pub location: Location,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.location)
    }
}

impl std::error::Error for LexerError {}
