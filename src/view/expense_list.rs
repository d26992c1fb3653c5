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
use crate::model::expense::Expense;
use crate::transform::grouping::{group_by_month, MonthlyGroups};
use crate::view::Prompter;
use tracing::{error, info};

pub const LOAD_FAILED: &str =
	"Failed to load expenses. Please ensure the backend server is running.";
pub const DELETE_FAILED: &str = "Failed to delete expense.";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this expense?";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseListState {
	/// As fetched, in server order.
	pub expenses: Vec<Expense>,
	pub groups: MonthlyGroups,
	pub error: Option<String>,
}

impl ExpenseListState {
	fn loaded(expenses: Vec<Expense>) -> Self {
		let groups = group_by_month(&expenses);
		Self {
			expenses,
			groups,
			error: None,
		}
	}

	fn failed(&self, message: &str) -> Self {
		Self {
			error: Some(message.to_string()),
			..self.clone()
		}
	}
}

/// All expenses, grouped by month.
pub struct ExpenseListView<'a, A: ExpenseApi + ?Sized> {
	api: &'a A,
	state: ExpenseListState,
}

impl<'a, A: ExpenseApi + ?Sized> ExpenseListView<'a, A> {
	pub fn new(api: &'a A) -> Self {
		Self {
			api,
			state: ExpenseListState::default(),
		}
	}

	pub fn state(&self) -> &ExpenseListState {
		&self.state
	}

	/// Fetches everything again. Also what a create elsewhere should be
	/// followed by.
	pub fn load(&mut self) {
		self.state = match self.api.list_expenses() {
			Ok(expenses) => ExpenseListState::loaded(expenses),
			Err(e) => {
				error!("error loading expenses: {}", e);
				self.state.failed(LOAD_FAILED)
			},
		};
	}

	/// Deletes after confirmation and drops the expense from the local list.
	/// Nothing happens if the user declines.
	pub fn delete(&mut self, id: &str, prompter: &dyn Prompter) {
		if !prompter.confirm(DELETE_CONFIRM) {
			return;
		}

		self.state = match self.api.delete_expense(id) {
			Ok(()) => {
				info!("deleted expense {}", id);
				let remaining = self
					.state
					.expenses
					.iter()
					.filter(|e| !e.id.is(id))
					.cloned()
					.collect();
				ExpenseListState::loaded(remaining)
			},
			Err(e) => {
				error!("error deleting expense {}: {}", id, e);
				self.state.failed(DELETE_FAILED)
			},
		};
	}
}
