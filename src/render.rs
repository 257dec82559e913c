// 🧾 Presentation - tables for the menu and the browse view
// The same ratatui Table is drawn full-screen by the browse view and into
// an off-screen Buffer for plain line output.

use crate::inventory::ItemValue;
use crate::record::{Field, Record};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Column text plus layout, independent of where it is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Right-align flag per column
    numeric: Vec<bool>,
}

impl TableData {
    pub fn from_records(title: &str, records: &[Record], fields: &[Field]) -> Self {
        TableData {
            title: title.to_string(),
            headers: fields.iter().map(|f| f.header().to_string()).collect(),
            rows: records
                .iter()
                .map(|record| fields.iter().map(|f| f.cell(record)).collect())
                .collect(),
            numeric: fields.iter().map(|f| f.is_numeric()).collect(),
        }
    }

    pub fn from_values(title: &str, values: &[ItemValue<'_>]) -> Self {
        TableData {
            title: title.to_string(),
            headers: Field::VALUATION
                .iter()
                .map(|f| f.header().to_string())
                .collect(),
            rows: values
                .iter()
                .map(|item| vec![item.name.to_string(), item.value.to_string()])
                .collect(),
            numeric: vec![false, true],
        }
    }

    /// Widest cell per column in terminal columns, header included
    pub fn column_widths(&self) -> Vec<u16> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| display_width(cell))
                    .chain(std::iter::once(display_width(header)))
                    .max()
                    .unwrap_or(0);
                widest.min(u16::MAX as usize) as u16
            })
            .collect()
    }

    /// Lines per row; a multi-line field makes its whole row taller
    pub fn row_heights(&self) -> Vec<u16> {
        self.rows
            .iter()
            .map(|row| {
                let tallest = row.iter().map(|cell| line_count(cell)).max().unwrap_or(1);
                tallest.min(u16::MAX as usize) as u16
            })
            .collect()
    }

    /// Build the ratatui widget; callers add highlight styles as needed
    pub fn widget(&self) -> Table<'_> {
        let widths = self.column_widths();
        let heights = self.row_heights();

        let header = Row::new(self.headers.iter().map(|h| {
            Cell::from(h.as_str()).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        }))
        .height(1);

        let rows = self.rows.iter().zip(heights).map(|(row, height)| {
            let cells = row.iter().enumerate().map(|(col, text)| {
                let width = widths.get(col).copied().unwrap_or(0) as usize;
                if self.numeric.get(col).copied().unwrap_or(false) {
                    Cell::from(format!("{:>width$}", text, width = width))
                } else {
                    Cell::from(text.as_str())
                }
            });
            Row::new(cells).height(height)
        });

        Table::new(rows, widths.iter().map(|w| Constraint::Length(*w)))
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title)),
            )
    }

    /// Size of the bordered table when every column gets its full width
    pub fn natural_size(&self) -> (u16, u16) {
        let widths = self.column_widths();
        let spacing = widths.len().saturating_sub(1) as u16;
        let width = widths
            .iter()
            .fold(spacing, |acc, w| acc.saturating_add(*w))
            .saturating_add(2)
            .max((display_width(&self.title) as u16).saturating_add(4));
        let height = self
            .row_heights()
            .iter()
            .fold(3u16, |acc, h| acc.saturating_add(*h));
        (width, height)
    }

    /// Draw into an off-screen buffer and return the text lines
    pub fn render_lines(&self) -> Vec<String> {
        let (width, height) = self.natural_size();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        self.widget().render(area, &mut buf);
        buffer_lines(&buf)
    }

    pub fn render(&self) -> String {
        let mut out = self.render_lines().join("\n");
        out.push('\n');
        out
    }
}

/// Widest line of `text` in terminal columns
fn display_width(text: &str) -> usize {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

fn line_count(text: &str) -> usize {
    text.lines().count().max(1)
}

fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let width = (buf.area.width as usize).max(1);
    buf.content
        .chunks(width)
        .map(|row| {
            let mut line = String::new();
            // cells covered by the previous wide glyph
            let mut hidden = 0;
            for cell in row {
                if hidden > 0 {
                    hidden -= 1;
                    continue;
                }
                let symbol = cell.symbol();
                line.push_str(symbol);
                hidden = symbol.width().saturating_sub(1);
            }
            line.trim_end().to_string()
        })
        .collect()
}

// ============================================================================
// CONVENIENCE
// ============================================================================

/// "View all" table
pub fn records_table(records: &[Record]) -> String {
    TableData::from_records("Inventory", records, &Field::ALL).render()
}

/// "Value per item" table
pub fn values_table(values: &[ItemValue<'_>]) -> String {
    TableData::from_values("Value per item", values).render()
}
