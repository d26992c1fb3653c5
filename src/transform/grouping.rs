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
use crate::model::expense::Expense;
use crate::util::month::MonthKey;
use std::collections::BTreeMap;

/// Expenses bucketed by the month they fall in, newest month first and
/// newest day first within each month.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonthlyGroups {
	months: Vec<MonthKey>,
	buckets: BTreeMap<MonthKey, Vec<Expense>>,
}

impl MonthlyGroups {
	/// Month keys, strictly descending.
	pub fn months(&self) -> &[MonthKey] {
		&self.months
	}

	pub fn expenses_in(&self, month: &MonthKey) -> &[Expense] {
		self.buckets.get(month).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Buckets in display order.
	pub fn iter(&self) -> impl Iterator<Item = (&MonthKey, &[Expense])> {
		self.months().iter().map(|m| (m, self.expenses_in(m)))
	}

	pub fn is_empty(&self) -> bool {
		self.months.is_empty()
	}
}

/// Groups a flat expense list by "YYYY-MM". The input is left untouched; the
/// buckets hold copies.
pub fn group_by_month(expenses: &[Expense]) -> MonthlyGroups {
	let mut buckets: BTreeMap<MonthKey, Vec<Expense>> = BTreeMap::new();
	for expense in expenses {
		buckets
			.entry(expense.date.month_key())
			.or_default()
			.push(expense.clone());
	}

	for bucket in buckets.values_mut() {
		bucket.sort_by(|a, b| b.date.cmp(&a.date));
	}

	let months = buckets.keys().rev().copied().collect();
	MonthlyGroups { months, buckets }
}
