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
use crate::model::report::CategoryTotal;
use crate::util::amount::Amount;
use std::collections::BTreeMap;

/// Category totals from a report entry, biggest first. Equal amounts come
/// out in whatever order the map yields them.
pub fn rank_categories(categories: &BTreeMap<String, Amount>) -> Vec<CategoryTotal> {
	let mut ranked: Vec<CategoryTotal> = categories
		.iter()
		.map(|(category, amount)| CategoryTotal {
			category: category.clone(),
			amount: *amount,
		})
		.collect();

	ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
	ranked
}
