use std::io::{self, IsTerminal, Write};

use todo_shared::{ListView, RowLabel, RowView};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

const STRIKE_DIM: &str = "9;2";
const ID_COLOR: &str = "33";

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            color: cfg.get_bool("color").unwrap_or(true),
        }
    }

    /// Replaces whatever was shown before with the full list and its status line.
    #[tracing::instrument(skip(self, view), fields(rows = view.rows.len()))]
    pub fn print_list(&mut self, view: &ListView) -> anyhow::Result<()> {
        let styled = self.color && io::stdout().is_terminal();
        let mut out = io::stdout().lock();
        write_list(&mut out, view, styled)
    }

    pub fn print_status(&mut self, view: &ListView) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", view.status)?;
        Ok(())
    }

    pub fn print_notice(&mut self, notice: &str) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{notice}")?;
        Ok(())
    }
}

pub fn write_list<W: Write>(mut writer: W, view: &ListView, styled: bool) -> anyhow::Result<()> {
    if view.rows.is_empty() {
        writeln!(writer, "No tasks.")?;
    } else {
        let headers = vec!["ID".to_string(), "Done".to_string(), "Task".to_string()];
        let rows = view
            .rows
            .iter()
            .map(|row| row_cells(row, styled))
            .collect();
        write_table(&mut writer, headers, rows)?;
    }

    writeln!(writer)?;
    writeln!(writer, "{}", view.status)?;
    Ok(())
}

fn row_cells(row: &RowView, styled: bool) -> Vec<String> {
    let id = paint(&row.id.to_string(), ID_COLOR, styled);
    let done = if row.completed { "[x]" } else { "[ ]" }.to_string();
    let text = match &row.label {
        RowLabel::Display { text, .. } => escape_controls(text),
        RowLabel::Editing { value } => format!("{}_", escape_controls(value)),
    };
    let text = if row.completed {
        paint(&text, STRIKE_DIM, styled)
    } else {
        text
    };
    vec![id, done, text]
}

/// Stored text is user data; control characters are shown escaped so they
/// cannot drive the terminal or skew column widths.
fn escape_controls(text: &str) -> String {
    if !text.chars().any(char::is_control) {
        return text.to_string();
    }
    text.chars()
        .map(|ch| {
            if ch.is_control() {
                ch.escape_default().to_string()
            } else {
                ch.to_string()
            }
        })
        .collect()
}

fn paint(text: &str, code: &str, styled: bool) -> String {
    if !styled {
        return text.to_string();
    }
    format!("\x1b[{code}m{text}\x1b[0m")
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    let last = column_count.saturating_sub(1);
    for (idx, header) in headers.iter().enumerate() {
        write_cell(&mut writer, header, widths[idx], idx == last)?;
    }
    writeln!(writer)?;

    for (idx, width) in widths.iter().enumerate() {
        let sep = if idx == last { "" } else { " " };
        write!(writer, "{:-<width$}{sep}", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            write_cell(&mut writer, cell, widths[idx], idx == last)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn write_cell<W: Write>(writer: &mut W, cell: &str, width: usize, last: bool) -> io::Result<()> {
    if last {
        return write!(writer, "{cell}");
    }
    let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
    let padding = width.saturating_sub(visible_width);
    write!(writer, "{}{} ", cell, " ".repeat(padding))
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
