//! Line-by-line conversion driver.
//!
//! Reads a source one line at a time, feeds each line to a fresh
//! [`Parser`] in order and writes the resulting fragments to a sink,
//! applying the configured error policy to lines that fail.

use log::{debug, error, warn};
use mdhtml_config::{Config, ErrorPolicy};
use mdhtml_core::Result;
use mdhtml_parser::{escape_text, Parser};
use std::io::{BufRead, Write};

/// Counters for one converted source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Lines read from the source
    pub lines: usize,
    /// Lines that failed to parse and were skipped or passed through
    pub failed: usize,
}

/// Convert everything `reader` yields and write HTML to `writer`.
///
/// `source` names the input in log messages.
pub fn convert<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    config: &Config,
    source: &str,
) -> Result<ConvertStats> {
    let mut parser = Parser::new();
    let mut stats = ConvertStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        stats.lines += 1;

        let fragment = match parser.parse(&line) {
            Ok(fragment) => fragment,
            Err(e) if e.is_parse_error() => {
                stats.failed += 1;
                match config.errors.on_error {
                    ErrorPolicy::Abort => {
                        error!("{}:{}: {}", source, line_no, e);
                        return Err(e);
                    }
                    ErrorPolicy::Skip => {
                        warn!("{}:{}: {}; line skipped", source, line_no, e);
                        continue;
                    }
                    ErrorPolicy::Passthrough => {
                        warn!("{}:{}: {}; line written as text", source, line_no, e);
                        escape_text(&line)
                    }
                }
            }
            Err(e) => return Err(e),
        };

        write_fragment(writer, config, &fragment)?;
    }

    if config.output.close_open_blocks {
        let closing = parser.finish();
        if !closing.is_empty() {
            write_fragment(writer, config, &closing)?;
        }
    }

    debug!("{}: {} lines, {} failed", source, stats.lines, stats.failed);
    Ok(stats)
}

fn write_fragment<W: Write>(writer: &mut W, config: &Config, fragment: &str) -> Result<()> {
    if !config.output.should_write(fragment) {
        return Ok(());
    }
    writer.write_all(fragment.as_bytes())?;
    if config.output.newline {
        writer.write_all(b"\n")?;
    }
    Ok(())
}
