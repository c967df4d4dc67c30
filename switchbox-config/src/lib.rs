use std::fmt::Write;
use std::{num::ParseIntError, ops::Range, path::Path};

pub use switchbox_common::{
    codec::{Entry, Table},
    ConfigError, ErrorKind, Event, EventCodec, EventGroup, EventRegistry, MappingCompiler,
    MappingMode, MappingSet,
};

/// Byte span of `err` as a char span of `source`, which is what ariadne counts in.
pub fn char_span(err: &ConfigError, source: &str) -> Option<Range<usize>> {
    let span = err.span.clone()?;
    let start = source.get(..span.start)?.chars().count();
    let len = source.get(span.clone())?.chars().count();
    Some(start..start + len)
}

/// Render `err` the way `pretty_compile` prints it, without colors.
pub fn render_error(file: &Path, src: &str, err: &ConfigError) -> String {
    let mut out = Vec::new();
    write_report(file, src, err, false, &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

fn write_report(file: &Path, src: &str, err: &ConfigError, color: bool, out: &mut Vec<u8>) {
    use ariadne::{ColorGenerator, Config, Label, Report, ReportBuilder, ReportKind, Source};
    let filename = file.to_str().unwrap_or("<unknown>");
    let mut colors = ColorGenerator::new();

    let span = char_span(err, src);
    let mut report: ReportBuilder<(&str, Range<usize>)> = Report::build(
        ReportKind::Error,
        filename,
        span.as_ref().map_or(0, |s| s.start),
    )
    .with_config(Config::default().with_color(color));
    match span {
        Some(span) => {
            report = report
                .with_message(format!("Invalid mapping: {}", err.kind.name()))
                .with_label(
                    Label::new((filename, span))
                        .with_message(&err.message)
                        .with_color(colors.next()),
                );
        }
        // nothing to point at
        None => {
            report = report.with_message(format!(
                "Invalid mapping: {}: {}",
                err.kind.name(),
                err.message
            ));
        }
    }
    if let Err(e) = report
        .finish()
        .write((filename, Source::from(src)), &mut *out)
    {
        log::warn!("failed to render diagnostic: {e}");
    }
}

/// Compile `src`, printing a diagnostic to stderr on failure. `control_switch`, when given, may
/// not be used by any mapping.
pub fn pretty_compile(
    file: &Path,
    src: &str,
    control_switch: Option<usize>,
) -> Result<MappingSet, ConfigError> {
    let mut compiler = MappingCompiler::default();
    if let Some(n) = control_switch {
        compiler = compiler.with_reserved_switch(n);
    }
    match compiler.compile(src) {
        Ok(set) => {
            log::debug!(
                "{}: {:?} mapping with {} pages",
                file.display(),
                set.mode(),
                set.pages().len()
            );
            Ok(set)
        }
        Err(err) => {
            let mut out = Vec::new();
            write_report(file, src, &err, true, &mut out);
            eprint!("{}", String::from_utf8_lossy(&out));
            Err(err)
        }
    }
}

/// The preferred vocabulary name for `event`, or its raw form if it has none.
pub fn event_name(registry: &EventRegistry, event: Event) -> String {
    registry
        .entries()
        .find(|e| e.table != Table::Alias && e.event == event)
        .map_or_else(|| event.to_string(), |e| e.name.to_string())
}

pub fn group_text(registry: &EventRegistry, group: &EventGroup) -> String {
    group
        .events()
        .iter()
        .map(|e| event_name(registry, *e))
        .collect::<Vec<_>>()
        .join("-")
}

/// A readable listing of every page, switch and shortcut.
pub fn describe(set: &MappingSet) -> String {
    let codec = EventCodec::default();
    let registry = codec.registry();
    let mut out = String::new();
    let mode = match set.mode() {
        MappingMode::Paged => "paged",
        MappingMode::Cycling => "cycling",
    };
    let _ = writeln!(out, "mode: {mode}");
    for page in set.pages() {
        if set.mode() == MappingMode::Paged {
            let _ = writeln!(out, "page {} {:?}", page.number, page.label);
        }
        for switch in page.switches() {
            let _ = writeln!(out, "  switch {} (line {})", switch.number, switch.line);
            for shortcut in switch.shortcuts() {
                let groups = shortcut
                    .groups()
                    .iter()
                    .map(|g| group_text(registry, g))
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = writeln!(out, "    {:?}: {groups}", shortcut.label);
            }
        }
    }
    out
}

/// Vocabulary entries limited to `table` whose name contains `pattern` (case insensitive). A
/// pattern starting with `0x` matches the event code instead.
pub fn find_events(
    registry: &EventRegistry,
    pattern: Option<&str>,
    table: Option<Table>,
) -> Result<Vec<Entry>, ParseIntError> {
    let iter = registry
        .entries()
        .filter(|e| table.is_none() || table == Some(e.table));
    let Some(pattern) = pattern else {
        return Ok(iter.collect());
    };
    let pattern = pattern.to_lowercase();
    if let Some(hex) = pattern.strip_prefix("0x") {
        let code = u16::from_str_radix(hex, 16)?;
        Ok(iter.filter(|e| event_code(e.event) == Some(code)).collect())
    } else {
        Ok(iter
            .filter(|e| e.name.to_lowercase().contains(&pattern))
            .collect())
    }
}

pub fn event_code(event: Event) -> Option<u16> {
    match event {
        Event::Keyboard(code) | Event::MouseButton(code) => Some(code.into()),
        Event::ConsumerControl(code) => Some(code),
        Event::MouseScroll(_) | Event::ModifierHold(_) => None,
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;
