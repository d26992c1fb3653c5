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
use crate::model::todo::Todo;
use crate::util::month::MonthKey;
use std::collections::BTreeMap;

/// Newest todo first. A todo without a creation time counts as created at
/// the epoch and so lands at the bottom.
pub fn order_todos(todos: &[Todo]) -> Vec<Todo> {
	let mut ordered = todos.to_vec();
	ordered.sort_by_key(|t| std::cmp::Reverse(t.effective_created_at()));
	ordered
}

/// Keys of a month-keyed report, newest first.
pub fn months_descending<V>(report: &BTreeMap<MonthKey, V>) -> Vec<MonthKey> {
	report.keys().rev().copied().collect()
}
