/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use std::fmt::Write;

const COLUMN_GAP: &str = "   ";

/// Plain column-aligned table for listings of single-line items, such as the
/// expenses of a month or the categories of a report.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(Self::owned(row)));
	}

	pub fn add_row(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Data(Self::owned(row)));
	}

	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			if col < self.column_count {
				self.right_align[col] = true;
			}
		}
	}

	pub fn render(&self) -> String {
		let widths = self.widths();
		let mut out = String::new();

		for row in &self.rows {
			let line = match row {
				Row::Header(cells) => self.render_cells(&widths, cells, true),
				Row::Data(cells) => self.render_cells(&widths, cells, false),
				Row::Separator => {
					let total = widths.iter().sum::<usize>()
						+ COLUMN_GAP.len() * self.column_count.saturating_sub(1);
					"-".repeat(total)
				},
			};
			let _ = writeln!(out, "{}", line.trim_end());
		}

		out
	}

	/// Rows may be shorter than the table; missing cells are blank.
	fn owned(row: Vec<&str>) -> Vec<String> {
		row.into_iter().map(|s| s.to_string()).collect()
	}

	fn widths(&self) -> Vec<usize> {
		let mut widths = vec![0; self.column_count];
		for row in &self.rows {
			if let Row::Data(cells) | Row::Header(cells) = row {
				for (i, value) in cells.iter().enumerate().take(self.column_count) {
					widths[i] = widths[i].max(value.chars().count());
				}
			}
		}
		widths
	}

	fn render_cells(&self, widths: &[usize], cells: &[String], centered: bool) -> String {
		let mut line = String::new();
		for (i, width) in widths.iter().enumerate() {
			let value = cells.get(i).map(String::as_str).unwrap_or("");
			let cell = if centered {
				Self::center_align(value, *width)
			} else if self.right_align[i] {
				format!("{:>width$}", value, width = width)
			} else {
				format!("{:<width$}", value, width = width)
			};
			line.push_str(&cell);
			if i < widths.len() - 1 {
				line.push_str(COLUMN_GAP);
			}
		}
		line
	}

	fn center_align(value: &str, width: usize) -> String {
		let len = value.chars().count();
		if len >= width {
			return value.to_string();
		}
		let total_padding = width - len;
		let left_padding = total_padding / 2;
		let right_padding = total_padding - left_padding;

		format!(
			"{}{}{}",
			" ".repeat(left_padding),
			value,
			" ".repeat(right_padding)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_aligns_columns() {
		let mut table = Table::new(3);
		table.add_header(vec!["Date", "Description", "Amount"]);
		table.add_separator();
		table.add_row(vec!["2024-03-05", "Groceries", "20.00"]);
		table.add_row(vec!["2024-03-01", "Tea", "1,205.50"]);
		table.right_align(vec![2]);

		let expected = concat!(
			"   Date      Description    Amount\n",
			"-----------------------------------\n",
			"2024-03-05   Groceries        20.00\n",
			"2024-03-01   Tea           1,205.50\n",
		);
		assert_eq!(table.render(), expected);
	}

	#[test]
	fn test_short_rows() {
		let mut table = Table::new(2);
		table.add_header(vec!["A", "B"]);
		table.add_row(vec!["only"]);
		assert_eq!(table.render(), " A     B\nonly\n");
	}
}
