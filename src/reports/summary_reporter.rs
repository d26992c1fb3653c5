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
use crate::model::report::{
	CategoryTotal, ComparisonReport, MonthSummary, MonthlyReport,
};
use crate::reports::table::Table;
use crate::util::amount::Amount;
use crate::util::month::MonthKey;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

pub struct SummaryReporter<'a> {
	report: &'a MonthlyReport,
}

impl<'a> SummaryReporter<'a> {
	pub fn new(report: &'a MonthlyReport) -> Self {
		Self { report }
	}

	/// One block per month in the given order, each with its categories as
	/// `ranked` lists them.
	pub fn render_monthly(
		&self,
		months: &[MonthKey],
		ranked: impl Fn(&MonthKey) -> Vec<CategoryTotal>,
	) -> String {
		if self.report.is_empty() {
			return "No monthly data available.\n".to_string();
		}

		let mut out = String::new();
		for month in months {
			let Some(summary) = self.report.get(month) else {
				continue;
			};

			let mut table = Table::new(2);
			table.right_align(vec![1]);
			for CategoryTotal { category, amount } in ranked(month) {
				table.add_row(vec![&category, &amount.to_string()]);
			}
			table.add_separator();
			table.add_row(vec!["Total", &summary.total.to_string()]);

			let _ = writeln!(out, "\n{}", month.label());
			out.push_str(&table.render());
		}
		out
	}
}

/// Both months side by side, one row per category either month has, in the
/// order of the first month's ranking followed by anything only the second
/// month has.
pub fn render_comparison(
	report: &ComparisonReport,
	month1: &MonthKey,
	month2: &MonthKey,
	ranked: impl Fn(&MonthKey) -> Vec<CategoryTotal>,
) -> String {
	let empty = MonthSummary::default();
	let first = report.get(month1).map_or(&empty, |m| &m.summary);
	let second = report.get(month2).map_or(&empty, |m| &m.summary);

	let mut seen = BTreeSet::new();
	let categories: Vec<String> = ranked(month1)
		.into_iter()
		.chain(ranked(month2))
		.map(|c| c.category)
		.filter(|c| seen.insert(c.clone()))
		.collect();

	let amount_of = |categories: &BTreeMap<String, Amount>, name: &str| {
		categories.get(name).copied().unwrap_or_else(Amount::zero)
	};
	let change = |a: Amount, b: Amount| {
		Amount::from_hundredths(b.hundredths() - a.hundredths())
	};

	let mut table = Table::new(4);
	table.add_header(vec![
		"Category",
		&month1.label(),
		&month2.label(),
		"Change",
	]);
	table.add_separator();
	table.right_align(vec![1, 2, 3]);

	for name in &categories {
		let a = amount_of(&first.categories, name);
		let b = amount_of(&second.categories, name);
		table.add_row(vec![
			name,
			&a.to_string(),
			&b.to_string(),
			&signed(change(a, b)),
		]);
	}

	table.add_separator();
	table.add_row(vec![
		"Total",
		&first.total.to_string(),
		&second.total.to_string(),
		&signed(change(first.total, second.total)),
	]);

	let mut out = table.render();
	for month in [month1, month2] {
		let count = report.get(month).map_or(0, |m| m.details.len());
		let _ = writeln!(out, "{}: {} expenses", month.label(), count);
	}
	out
}

fn signed(amount: Amount) -> String {
	if amount.is_positive() {
		format!("+{}", amount)
	} else {
		amount.to_string()
	}
}
