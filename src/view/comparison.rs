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
use crate::api::gateway::ExpenseApi;
use crate::model::report::{CategoryTotal, ComparisonReport};
use crate::transform::ordering::months_descending;
use crate::transform::ranking::rank_categories;
use crate::util::month::MonthKey;
use tracing::error;

pub const MONTHS_FAILED: &str = "Failed to load available months for comparison.";
pub const MISSING_MONTH: &str = "Please select both months for comparison.";
pub const SAME_MONTH: &str = "Please select two different months for comparison.";
pub const COMPARE_FAILED: &str = "Failed to fetch comparison report. Please ensure the backend server is running and months are valid.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComparisonState {
	/// Months the server has data for, newest first, to choose from.
	pub available_months: Vec<MonthKey>,
	pub selected: Option<(MonthKey, MonthKey)>,
	pub report: Option<ComparisonReport>,
	pub error: Option<String>,
}

impl ComparisonState {
	fn failed(&self, message: &str) -> Self {
		Self {
			error: Some(message.to_string()),
			..self.clone()
		}
	}
}

/// Two months side by side.
pub struct ComparisonView<'a, A: ExpenseApi + ?Sized> {
	api: &'a A,
	state: ComparisonState,
}

impl<'a, A: ExpenseApi + ?Sized> ComparisonView<'a, A> {
	pub fn new(api: &'a A) -> Self {
		Self {
			api,
			state: ComparisonState::default(),
		}
	}

	pub fn state(&self) -> &ComparisonState {
		&self.state
	}

	/// Fetches the monthly report only for its keys.
	pub fn load(&mut self) {
		self.state = match self.api.monthly_report() {
			Ok(report) => ComparisonState {
				available_months: months_descending(&report),
				..self.state.clone()
			},
			Err(e) => {
				error!("error loading available months: {}", e);
				self.state.failed(MONTHS_FAILED)
			},
		};
	}

	/// Checks the selection locally before asking the server. Two equal
	/// months never reach the server.
	pub fn submit(&mut self, month1: Option<MonthKey>, month2: Option<MonthKey>) {
		let cleared = ComparisonState {
			error: None,
			..self.state.clone()
		};

		let (Some(month1), Some(month2)) = (month1, month2) else {
			self.state = cleared.failed(MISSING_MONTH);
			return;
		};

		if month1 == month2 {
			self.state = cleared.failed(SAME_MONTH);
			return;
		}

		self.state = match self.api.comparison_report(&month1, &month2) {
			Ok(report) => ComparisonState {
				selected: Some((month1, month2)),
				report: Some(report),
				..cleared
			},
			Err(e) => {
				error!("error fetching comparison {} vs {}: {}", month1, month2, e);
				cleared.failed(COMPARE_FAILED)
			},
		};
	}

	/// Ranked categories for one side of the fetched comparison.
	pub fn categories_for(&self, month: &MonthKey) -> Vec<CategoryTotal> {
		self.state
			.report
			.as_ref()
			.and_then(|r| r.get(month))
			.map(|m| rank_categories(&m.summary.categories))
			.unwrap_or_default()
	}
}
