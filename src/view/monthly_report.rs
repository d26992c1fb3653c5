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
use crate::model::report::{CategoryTotal, MonthlyReport};
use crate::transform::ordering::months_descending;
use crate::transform::ranking::rank_categories;
use crate::util::month::MonthKey;
use tracing::error;

pub const LOAD_FAILED: &str =
	"Failed to load monthly report. Please ensure the backend server is running.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonthlyReportState {
	pub report: MonthlyReport,
	pub months: Vec<MonthKey>,
	pub error: Option<String>,
}

/// Server-computed totals per month, newest month first.
pub struct MonthlyReportView<'a, A: ExpenseApi + ?Sized> {
	api: &'a A,
	state: MonthlyReportState,
}

impl<'a, A: ExpenseApi + ?Sized> MonthlyReportView<'a, A> {
	pub fn new(api: &'a A) -> Self {
		Self {
			api,
			state: MonthlyReportState::default(),
		}
	}

	pub fn state(&self) -> &MonthlyReportState {
		&self.state
	}

	pub fn load(&mut self) {
		self.state = match self.api.monthly_report() {
			Ok(report) => MonthlyReportState {
				months: months_descending(&report),
				report,
				error: None,
			},
			Err(e) => {
				error!("error loading monthly report: {}", e);
				MonthlyReportState {
					error: Some(LOAD_FAILED.to_string()),
					..self.state.clone()
				}
			},
		};
	}

	/// Ranked category breakdown; empty for a month not in the report.
	pub fn categories_for(&self, month: &MonthKey) -> Vec<CategoryTotal> {
		self.state
			.report
			.get(month)
			.map(|summary| rank_categories(&summary.categories))
			.unwrap_or_default()
	}
}
