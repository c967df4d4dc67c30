use alloc::string::String;
use core::{fmt, ops::Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// A line matching no grammar, or a malformed part of one.
    Syntax,
    UnknownEvent,
    /// Repeated page number, or repeated switch number inside a page.
    DuplicateKey,
    EmptyMapping,
    /// A switch line before any page line.
    Ordering,
    /// A switch uses the number reserved for the control switch.
    ReservedSwitchConflict,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::UnknownEvent => "unknown event",
            ErrorKind::DuplicateKey => "duplicate number",
            ErrorKind::EmptyMapping => "no mappings",
            ErrorKind::Ordering => "out of order",
            ErrorKind::ReservedSwitchConflict => "reserved switch",
        }
    }
}

/// The mapping file line an error was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext {
    /// 1-based line number.
    pub number: usize,
    /// The line text, trimmed.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ErrorKind,
    pub message: String,
    /// Byte range of the offending token or line within the source.
    pub span: Option<Range<usize>>,
    pub context: Option<LineContext>,
}

impl ConfigError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            context: None,
        }
    }

    pub fn at(mut self, span: Range<usize>, context: LineContext) -> Self {
        self.span = Some(span);
        self.context = Some(context);
        self
    }

    pub fn line(&self) -> Option<usize> {
        self.context.as_ref().map(|c| c.number)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.name(), self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n    at line {}: {}", context.number, context.text)?;
        }
        Ok(())
    }
}

impl core::error::Error for ConfigError {}
