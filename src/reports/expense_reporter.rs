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
use crate::model::expense::{Expense, ExpenseTag, RecurringExpense};
use crate::reports::table::Table;
use crate::transform::grouping::MonthlyGroups;
use crate::util::amount::Amount;
use std::fmt::Write;

pub struct ExpenseReporter<'a> {
	groups: &'a MonthlyGroups,
}

impl<'a> ExpenseReporter<'a> {
	pub fn new(groups: &'a MonthlyGroups) -> Self {
		Self { groups }
	}

	/// One table per month, newest first, each closed by the month's total.
	pub fn render_by_month(&self) -> String {
		if self.groups.is_empty() {
			return "No expenses recorded.\n".to_string();
		}

		let mut out = String::new();
		for (month, expenses) in self.groups.iter() {
			let mut table = Table::new(5);
			table.add_header(vec!["Date", "Category", "Description", "Amount", "ID"]);
			table.add_separator();
			table.right_align(vec![3]);

			for expense in expenses {
				let amount = expense.amount.to_string();
				table.add_row(vec![
					&expense.date.to_string(),
					expense.category.as_str(),
					&expense.description,
					&amount,
					expense.id.id().unwrap_or(""),
				]);
			}

			let total: Amount = expenses.iter().map(|e| &e.amount).sum();
			table.add_separator();
			table.add_row(vec!["", "", "Total", &total.to_string()]);

			let _ = writeln!(out, "\n{}", month.label());
			out.push_str(&table.render());
		}
		out
	}
}

pub fn render_detail(expense: &Expense) -> String {
	let mut table = Table::new(2);
	table.add_row(vec!["ID", expense.id.id().unwrap_or("(unsaved)")]);
	table.add_row(vec!["Date", &expense.date.to_string()]);
	table.add_row(vec!["Amount", &expense.amount.to_string()]);
	table.add_row(vec!["Category", expense.category.as_str()]);
	table.add_row(vec!["Description", &expense.description]);
	table.add_row(vec!["Notes", expense.notes.as_deref().unwrap_or("")]);
	table.render()
}

/// Quick-entry tags in two columns. Numbering runs down the left column and
/// continues down the right, so a number always names the same tag.
pub fn render_tag_columns(left: &[ExpenseTag], right: &[ExpenseTag]) -> String {
	if left.is_empty() {
		return "No tags available.\n".to_string();
	}

	let label = |n: usize, tag: &ExpenseTag| {
		format!("{}. {} ({}, {})", n, tag.description, tag.category, tag.amount)
	};

	let mut table = Table::new(2);
	for (i, tag) in left.iter().enumerate() {
		let l = label(i + 1, tag);
		let r = right
			.get(i)
			.map(|tag| label(left.len() + i + 1, tag))
			.unwrap_or_default();
		table.add_row(vec![&l, &r]);
	}
	table.render()
}

pub fn render_recurring(items: &[RecurringExpense], selected: &[bool]) -> String {
	if items.is_empty() {
		return "No recurring expenses found.\n".to_string();
	}

	let mut table = Table::new(5);
	table.add_header(vec!["#", "", "Description", "Category", "Amount"]);
	table.add_separator();
	table.right_align(vec![0, 4]);

	for (i, item) in items.iter().enumerate() {
		let mark = if selected.get(i).copied().unwrap_or(false) {
			"[x]"
		} else {
			"[ ]"
		};
		table.add_row(vec![
			&(i + 1).to_string(),
			mark,
			&item.description,
			item.category.as_str(),
			&item.amount.to_string(),
		]);
	}
	table.render()
}
