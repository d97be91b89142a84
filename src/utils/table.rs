//! Table rendering utilities for CLI outputs.

pub struct Column {
    pub header: String,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            columns: headers
                .iter()
                .map(|h| Column {
                    header: h.to_string(),
                })
                .collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Render with each column as wide as its widest cell (header included).
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.header.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let mut out = String::new();

        // Header
        for (col, width) in self.columns.iter().zip(&widths) {
            out.push_str(&format!("{:<width$} |", col.header, width = width));
        }
        out.push('\n');

        // Separator
        for width in &widths {
            out.push_str(&format!("{:-<width$}-|", "", width = width));
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (cell, width) in row.iter().zip(&widths) {
                out.push_str(&format!("{:<width$} |", cell, width = width));
            }
            out.push('\n');
        }

        out
    }
}
