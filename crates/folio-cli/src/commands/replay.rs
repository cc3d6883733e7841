//! Replay command - fold a JSON-lines event log into a library state.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use folio::{Event, LibraryView, RootState, library_store};
use folio_config::FolioConfig;

use crate::StateFormat;
use crate::style::colors::SemanticStyle;
use crate::style::{authors_table, books_table};

#[derive(Debug, Clone, Copy)]
pub struct ReplayOptions {
    pub trace: bool,
    pub format: StateFormat,
    pub pretty: bool,
}

pub fn run(input: &str, config: &FolioConfig, options: ReplayOptions) -> Result<()> {
    let events = if input == "-" {
        read_events(io::stdin().lock())?
    } else {
        let file = File::open(input).with_context(|| format!("Failed to open {input}"))?;
        read_events(BufReader::new(file)).with_context(|| format!("Failed to read {input}"))?
    };

    let mut store = library_store(&config.library).context("Failed to build library store")?;
    let mut out = io::stdout().lock();

    for event in &events {
        store.dispatch(event);

        if options.trace {
            let heading = format!("#{} {}", store.sequence(), event.tag());
            write_state(&mut out, store.state(), options, Some(&heading))?;
        }
    }

    if !options.trace || events.is_empty() {
        write_state(&mut out, store.state(), options, None)?;
    }

    tracing::info!(events = events.len(), "replay finished");
    Ok(())
}

/// Parses one event per line. Blank lines and `#` comments are skipped.
pub fn read_events(reader: impl BufRead) -> Result<Vec<Event>> {
    let mut events = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("line {line_number}: read failed"))?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event = Event::from_json(line)
            .with_context(|| format!("line {line_number}: invalid event"))?;
        tracing::trace!(line = line_number, tag = event.tag(), "event parsed");
        events.push(event);
    }

    Ok(events)
}

fn write_state(
    out: &mut impl Write,
    state: &RootState,
    options: ReplayOptions,
    heading: Option<&str>,
) -> Result<()> {
    match options.format {
        StateFormat::Json => {
            let rendered = if options.pretty {
                serde_json::to_string_pretty(state)?
            } else {
                serde_json::to_string(state)?
            };
            writeln!(out, "{rendered}")?;
        }
        StateFormat::Table => {
            if let Some(heading) = heading {
                writeln!(out, "{}", heading.header())?;
            }
            let view = LibraryView::new(state);
            writeln!(out, "{}", "Books".muted())?;
            writeln!(out, "{}", books_table(&view))?;
            writeln!(out, "{}", "Authors".muted())?;
            writeln!(out, "{}", authors_table(&view))?;
        }
    }
    Ok(())
}
