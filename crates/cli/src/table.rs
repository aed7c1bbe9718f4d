// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-layout tables for `pm list`.
//!
//! Each column is as wide as its widest cell, counted in chars. Padding
//! happens before coloring so escape codes never skew alignment. A
//! left-aligned last column is not padded.

use std::io::{self, Write};

use crate::color;

/// Coloring applied to a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Plain,
    /// Secondary columns such as timestamps
    Muted,
    /// Colored by the first word, see [`color::apply_status`]
    Status,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Column {
    pub header: &'static str,
    pub right: bool,
    pub tone: Tone,
    /// Longer cells are cut to this many chars
    pub cap: Option<usize>,
}

const fn column(header: &'static str, right: bool, tone: Tone, cap: Option<usize>) -> Column {
    Column {
        header,
        right,
        tone,
        cap,
    }
}

pub(crate) const PROGRAM_COLUMNS: [Column; 7] = [
    column("NAME", false, Tone::Plain, None),
    column("PID", true, Tone::Plain, None),
    column("STATE", false, Tone::Status, None),
    column("UPTIME", false, Tone::Plain, None),
    column("RETRIES", true, Tone::Plain, None),
    column("LAST CHECKUP", false, Tone::Muted, None),
    column("HEALTH", false, Tone::Status, Some(60)),
];

pub(crate) const TASK_COLUMNS: [Column; 7] = [
    column("NAME", false, Tone::Plain, None),
    column("FREQ", false, Tone::Plain, None),
    column("DAYS", false, Tone::Plain, None),
    column("START", false, Tone::Plain, None),
    column("LAST RAN", false, Tone::Muted, None),
    column("LAST ERR", false, Tone::Muted, None),
    column("NEXT RUN", false, Tone::Plain, None),
];

const SEP: &str = "  ";

/// Write the header line and one line per row. Writes nothing for no rows.
pub(crate) fn render<const N: usize>(
    out: &mut impl Write,
    columns: &[Column; N],
    rows: &[[String; N]],
    colorize: bool,
) -> io::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let cells: Vec<[&str; N]> = rows
        .iter()
        .map(|row| std::array::from_fn(|i| clip(&row[i], columns[i].cap)))
        .collect();
    let widths: [usize; N] = std::array::from_fn(|i| {
        cells
            .iter()
            .map(|row| row[i].chars().count())
            .fold(columns[i].header.chars().count(), usize::max)
    });

    let headers: [&str; N] = std::array::from_fn(|i| columns[i].header);
    write_line(out, columns, &widths, &headers, colorize, true)?;
    for row in &cells {
        write_line(out, columns, &widths, row, colorize, false)?;
    }
    Ok(())
}

fn write_line<const N: usize>(
    out: &mut impl Write,
    columns: &[Column; N],
    widths: &[usize; N],
    cells: &[&str; N],
    colorize: bool,
    is_header: bool,
) -> io::Result<()> {
    let mut line = String::new();
    for (i, (column, text)) in columns.iter().zip(cells).enumerate() {
        if i > 0 {
            line.push_str(SEP);
        }
        let padded = pad(text, widths[i], column.right, i + 1 == N);
        let styled = match (colorize, is_header, column.tone) {
            (false, _, _) | (true, false, Tone::Plain) => padded,
            (true, true, _) => color::apply_header(&padded),
            (true, false, Tone::Muted) => color::apply_muted(&padded),
            (true, false, Tone::Status) => color::apply_status(&padded),
        };
        line.push_str(&styled);
    }
    writeln!(out, "{line}")
}

fn pad(text: &str, width: usize, right: bool, last: bool) -> String {
    match (right, last) {
        (true, _) => format!("{text:>width$}"),
        (false, true) => text.to_string(),
        (false, false) => format!("{text:<width$}"),
    }
}

/// Cut `text` to at most `cap` chars on a char boundary.
fn clip(text: &str, cap: Option<usize>) -> &str {
    match cap.and_then(|cap| text.char_indices().nth(cap)) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
