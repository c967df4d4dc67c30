use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::{ops::Range, str::FromStr};

use crate::{
    codec::EventCodec,
    error::{ConfigError, ErrorKind, LineContext},
    event::EventGroup,
    mapping::{MappingMode, MappingSet, Page, Shortcut, Switch},
};

type Result<T> = core::result::Result<T, ConfigError>;

const UNKNOWN_LINE: &str =
    "Expected 'page-N \"label\"', 'switch-N \"label\" events...' or 'N events... ; label'";
const MISSING_LABEL: &str = "Missing '\"label\"'";
const UNTERMINATED_LABEL: &str = "Label is missing its closing '\"'";
const MISSING_EVENTS: &str = "No events given";
const EMPTY_EVENT: &str = "Empty event name; use 'minus' for '-'";
const MISSING_SEMICOLON: &str = "Missing ';' before the label";
const INVALID_NUMBER: &str = "Invalid number";
const MIXED_GRAMMAR: &str = "Cannot mix page/switch lines with 'N events ; label' lines";
const SWITCH_BEFORE_PAGE: &str = "switch line given before any page";

/// Compile mapping text with the standard event vocabulary.
pub fn compile(source: &str) -> Result<MappingSet> {
    MappingCompiler::default().compile(source)
}

/// Parses mapping files into a [MappingSet].
///
/// Two grammars are understood; the first mapping line decides which one a file uses.
///
/// ```text
/// # paged
/// page-1 "common"
/// switch-1 "cut" ctrl-x
/// switch-4 "[shift][mouse]" shift-leftclick
///
/// # cycling; a switch number may repeat, each line adds to its cycle
/// 1 CONTROL-X ; cut
/// 1 CONTROL-C ; copy
/// 2 LEFT_BUTTON LEFT_BUTTON ; dbl-click
/// ```
#[derive(Default)]
pub struct MappingCompiler {
    codec: EventCodec,
    reserved_switch: Option<usize>,
}

impl MappingCompiler {
    pub fn new(codec: EventCodec) -> Self {
        Self {
            codec,
            reserved_switch: None,
        }
    }

    /// Reject any switch numbered `switch`; it belongs to the control switch.
    pub fn with_reserved_switch(mut self, switch: usize) -> Self {
        self.reserved_switch = Some(switch);
        self
    }

    pub fn codec(&self) -> &EventCodec {
        &self.codec
    }

    pub fn compile(&self, source: &str) -> Result<MappingSet> {
        let mut parser = Parser {
            compiler: self,
            mode: None,
            pages: Vec::new(),
        };
        for line in lines(source) {
            if line.text.is_empty() || line.text.starts_with('#') {
                continue;
            }
            parser.parse_line(&line)?;
        }
        parser.finish()
    }
}

struct Line<'s> {
    /// 1-based.
    number: usize,
    /// Byte offset of `text` within the source.
    start: usize,
    text: &'s str,
}

impl Line<'_> {
    fn context(&self) -> LineContext {
        LineContext {
            number: self.number,
            text: self.text.to_string(),
        }
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ConfigError {
        self.error_at(kind, message, 0..self.text.len())
    }

    /// `range` is relative to the start of the line text.
    fn error_at(
        &self,
        kind: ErrorKind,
        message: impl Into<String>,
        range: Range<usize>,
    ) -> ConfigError {
        ConfigError::new(kind, message).at(
            self.start + range.start..self.start + range.end,
            self.context(),
        )
    }
}

fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    source.split('\n').enumerate().map(move |(i, raw)| {
        let start = offset + (raw.len() - raw.trim_start().len());
        offset += raw.len() + 1;
        Line {
            number: i + 1,
            start,
            text: raw.trim(),
        }
    })
}

/// Whitespace separated words with their byte offsets.
fn words(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut pos = 0;
    core::iter::from_fn(move || {
        let tail = &text[pos..];
        let start = pos + (tail.len() - tail.trim_start().len());
        if start >= text.len() {
            return None;
        }
        let len = text[start..]
            .find(char::is_whitespace)
            .unwrap_or(text.len() - start);
        pos = start + len;
        Some((start, &text[start..pos]))
    })
}

fn parse_number<T: FromStr>(digits: &str) -> Option<T> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A `page-N "label" rest` or `switch-N "label" rest` line, split into its parts.
struct Labelled<'s> {
    number: &'s str,
    number_at: Range<usize>,
    label: &'s str,
    rest: &'s str,
    rest_at: usize,
}

fn split_labelled<'s>(line: &Line<'s>, prefix: &str) -> Result<Labelled<'s>> {
    let text = line.text;
    let Some(first) = text.find('"') else {
        return Err(line.error(ErrorKind::Syntax, MISSING_LABEL));
    };
    let last = text.rfind('"').unwrap_or(first);
    if first == last {
        return Err(line.error_at(ErrorKind::Syntax, UNTERMINATED_LABEL, first..text.len()));
    }

    let head = text[..first].trim_end();
    let number = &head[prefix.len()..];
    if number.contains(char::is_whitespace) {
        return Err(line.error_at(ErrorKind::Syntax, UNKNOWN_LINE, 0..head.len()));
    }

    let rest = &text[last + 1..];
    let rest_at = last + 1 + (rest.len() - rest.trim_start().len());
    Ok(Labelled {
        number,
        number_at: prefix.len()..head.len(),
        label: &text[first + 1..last],
        rest: rest.trim(),
        rest_at,
    })
}

struct Parser<'c> {
    compiler: &'c MappingCompiler,
    mode: Option<MappingMode>,
    pages: Vec<Page>,
}

impl Parser<'_> {
    fn parse_line(&mut self, line: &Line) -> Result<()> {
        if line.text.starts_with("page-") {
            self.set_mode(line, MappingMode::Paged)?;
            self.parse_page(line)
        } else if line.text.starts_with("switch-") {
            self.set_mode(line, MappingMode::Paged)?;
            self.parse_switch(line)
        } else if line.text.starts_with(|c: char| c.is_ascii_digit()) {
            self.set_mode(line, MappingMode::Cycling)?;
            self.parse_shortcut(line)
        } else {
            Err(line.error(ErrorKind::Syntax, UNKNOWN_LINE))
        }
    }

    fn set_mode(&mut self, line: &Line, mode: MappingMode) -> Result<()> {
        match self.mode {
            None => {
                self.mode = Some(mode);
                if mode == MappingMode::Cycling {
                    self.pages.push(Page::new(0, String::new()));
                }
                Ok(())
            }
            Some(m) if m == mode => Ok(()),
            Some(_) => Err(line.error(ErrorKind::Syntax, MIXED_GRAMMAR)),
        }
    }

    fn parse_page(&mut self, line: &Line) -> Result<()> {
        let parts = split_labelled(line, "page-")?;
        let number: u32 = parse_number(parts.number).ok_or_else(|| {
            line.error_at(ErrorKind::Syntax, INVALID_NUMBER, parts.number_at.clone())
        })?;
        if !parts.rest.is_empty() {
            return Err(line.error_at(
                ErrorKind::Syntax,
                "Unexpected text after the page label",
                parts.rest_at..line.text.len(),
            ));
        }
        if self.pages.iter().any(|p| p.number == number) {
            return Err(line.error_at(
                ErrorKind::DuplicateKey,
                format!("Page {number} is already defined"),
                parts.number_at,
            ));
        }

        self.pages.push(Page::new(number, parts.label.to_string()));
        Ok(())
    }

    fn parse_switch(&mut self, line: &Line) -> Result<()> {
        if self.pages.is_empty() {
            return Err(line.error(ErrorKind::Ordering, SWITCH_BEFORE_PAGE));
        }
        let parts = split_labelled(line, "switch-")?;
        let number = self.switch_number(line, parts.number, parts.number_at.clone())?;
        if parts.rest.is_empty() {
            return Err(line.error(ErrorKind::Syntax, MISSING_EVENTS));
        }
        let groups = self.parse_groups(line, parts.rest, parts.rest_at)?;

        let Some(page) = self.pages.last_mut() else {
            return Err(line.error(ErrorKind::Ordering, SWITCH_BEFORE_PAGE));
        };
        if page.switch(number).is_some() {
            return Err(line.error_at(
                ErrorKind::DuplicateKey,
                format!("Switch {number} is already defined on page {}", page.number),
                parts.number_at,
            ));
        }

        let label = parts.label.to_string();
        let shortcut = Shortcut::new(label.clone(), groups)
            .ok_or_else(|| line.error(ErrorKind::Syntax, MISSING_EVENTS))?;
        page.insert(Switch::new(number, label, line.number, shortcut));
        Ok(())
    }

    fn parse_shortcut(&mut self, line: &Line) -> Result<()> {
        let text = line.text;
        let Some(semi) = text.find(';') else {
            return Err(line.error(ErrorKind::Syntax, MISSING_SEMICOLON));
        };
        let mut fields = words(&text[..semi]);
        let Some((_, digits)) = fields.next() else {
            return Err(line.error(ErrorKind::Syntax, UNKNOWN_LINE));
        };
        let number = self.switch_number(line, digits, 0..digits.len())?;

        let events_at = match fields.next() {
            Some((at, _)) => at,
            None => return Err(line.error(ErrorKind::Syntax, MISSING_EVENTS)),
        };
        let groups = self.parse_groups(line, text[events_at..semi].trim_end(), events_at)?;
        let label = text[semi + 1..].trim().to_string();
        let shortcut = Shortcut::new(label, groups)
            .ok_or_else(|| line.error(ErrorKind::Syntax, MISSING_EVENTS))?;

        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| line.error(ErrorKind::Ordering, SWITCH_BEFORE_PAGE))?;
        match page.switch_mut(number) {
            Some(switch) => switch.push(shortcut),
            None => {
                page.insert(Switch::new(number, String::new(), line.number, shortcut));
            }
        }
        Ok(())
    }

    fn switch_number(&self, line: &Line, digits: &str, at: Range<usize>) -> Result<usize> {
        let number: usize = parse_number(digits)
            .ok_or_else(|| line.error_at(ErrorKind::Syntax, INVALID_NUMBER, at.clone()))?;
        if self.compiler.reserved_switch == Some(number) {
            return Err(line.error_at(
                ErrorKind::ReservedSwitchConflict,
                format!("Switch {number} is reserved for the control switch"),
                at,
            ));
        }
        Ok(number)
    }

    /// `groups_text` is `offset` bytes into the line text.
    fn parse_groups(&self, line: &Line, groups_text: &str, offset: usize) -> Result<Vec<EventGroup>> {
        let codec = &self.compiler.codec;
        let mut groups = Vec::new();
        for (at, word) in words(groups_text) {
            let word_at = offset + at;
            let mut events = Vec::new();
            let mut pos = word_at;
            for token in word.split('-') {
                let token_at = pos..pos + token.len();
                pos = token_at.end + 1;
                if token.is_empty() {
                    return Err(line.error_at(
                        ErrorKind::Syntax,
                        EMPTY_EVENT,
                        word_at..word_at + word.len(),
                    ));
                }
                let event = codec
                    .encode(token)
                    .map_err(|err| line.error_at(ErrorKind::UnknownEvent, err.to_string(), token_at))?;
                events.push(event);
            }
            groups.extend(EventGroup::new(events));
        }
        Ok(groups)
    }

    fn finish(self) -> Result<MappingSet> {
        let Some(mode) = self.mode else {
            return Err(ConfigError::new(
                ErrorKind::EmptyMapping,
                "No mappings defined",
            ));
        };
        let set = MappingSet::new(mode, self.pages);
        if set.is_empty() {
            return Err(ConfigError::new(
                ErrorKind::EmptyMapping,
                "No switches defined",
            ));
        }
        Ok(set)
    }
}

#[cfg(test)]
#[path = "compiler_test.rs"]
mod test;
