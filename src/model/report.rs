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
use crate::util::amount::Amount;
use crate::util::month::MonthKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Server-side totals for one month. Categories are kept as the plain names
/// the server reports rather than `Category`, because these are derived
/// figures and an unfamiliar name should not make the whole report unreadable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
	pub total: Amount,

	#[serde(default)]
	pub categories: BTreeMap<String, Amount>,
}

/// A month of the comparison report: the usual totals plus the expenses
/// they were summed from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparedMonth {
	#[serde(flatten)]
	pub summary: MonthSummary,

	#[serde(default)]
	pub details: Vec<Expense>,
}

pub type MonthlyReport = BTreeMap<MonthKey, MonthSummary>;
pub type ComparisonReport = BTreeMap<MonthKey, ComparedMonth>;

/// One row of a ranked category breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
	pub category: String,
	pub amount: Amount,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_monthly_report() {
		let json = r#"{
			"2024-03": {"total": 25, "categories": {"Food": 25}},
			"2024-02": {"total": 50.1, "categories": {"Housing": 50.1}}
		}"#;
		let report: MonthlyReport = serde_json::from_str(json).unwrap();
		let feb = &report[&MonthKey::from_str("2024-02").unwrap()];
		assert_eq!(feb.total.to_string(), "50.10");
		assert_eq!(feb.categories["Housing"].to_string(), "50.10");
	}

	#[test]
	fn test_decode_comparison_report() {
		let json = r#"{
			"2024-03": {
				"total": 5,
				"categories": {"Food": 5},
				"details": [{"id": "e1", "date": "2024-03-01", "amount": 5,
					"category": "Food", "description": "Coffee"}]
			},
			"2024-01": {"total": 0, "categories": {}, "details": []}
		}"#;
		let report: ComparisonReport = serde_json::from_str(json).unwrap();
		let march = &report[&MonthKey::from_str("2024-03").unwrap()];
		assert_eq!(march.details.len(), 1);
		assert_eq!(march.summary.categories["Food"].to_string(), "5.00");
		let jan = &report[&MonthKey::from_str("2024-01").unwrap()];
		assert!(jan.details.is_empty());
	}

	#[test]
	fn test_comparison_with_unfamiliar_category() {
		let json = r#"{
			"2024-03": {
				"total": 40,
				"categories": {"Travel": 40},
				"details": [{"id": "e9", "date": "2024-03-09", "amount": 40,
					"category": "Travel", "description": "Train"}]
			}
		}"#;
		let report: ComparisonReport = serde_json::from_str(json).unwrap();
		let march = &report[&MonthKey::from_str("2024-03").unwrap()];
		assert_eq!(march.summary.categories["Travel"].to_string(), "40.00");
		assert_eq!(march.details[0].category.as_str(), "Travel");
	}
}
