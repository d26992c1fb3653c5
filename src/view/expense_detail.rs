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
use crate::view::expense_list::{DELETE_CONFIRM, DELETE_FAILED};
use crate::view::Prompter;
use tracing::{error, info};

pub const NO_ID: &str = "No expense ID provided.";
pub const LOAD_FAILED: &str = "Failed to load expense details. Expense might not exist or backend is down.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseDetailState {
	pub expense: Option<Expense>,
	pub deleted: bool,
	pub error: Option<String>,
}

impl ExpenseDetailState {
	fn failed(&self, message: &str) -> Self {
		Self {
			error: Some(message.to_string()),
			..self.clone()
		}
	}
}

/// One expense, with the option of deleting it.
pub struct ExpenseDetailView<'a, A: ExpenseApi + ?Sized> {
	api: &'a A,
	id: String,
	state: ExpenseDetailState,
}

impl<'a, A: ExpenseApi + ?Sized> ExpenseDetailView<'a, A> {
	pub fn new(api: &'a A, id: &str) -> Self {
		Self {
			api,
			id: id.trim().to_string(),
			state: ExpenseDetailState::default(),
		}
	}

	pub fn state(&self) -> &ExpenseDetailState {
		&self.state
	}

	pub fn load(&mut self) {
		if self.id.is_empty() {
			self.state = self.state.failed(NO_ID);
			return;
		}

		self.state = match self.api.get_expense(&self.id) {
			Ok(expense) => ExpenseDetailState {
				expense: Some(expense),
				deleted: false,
				error: None,
			},
			Err(e) => {
				error!("error loading expense {}: {}", self.id, e);
				self.state.failed(LOAD_FAILED)
			},
		};
	}

	/// Only a loaded, saved expense can be deleted; otherwise this is a
	/// no-op.
	pub fn delete(&mut self, prompter: &dyn Prompter) {
		let Some(id) = self
			.state
			.expense
			.as_ref()
			.and_then(|e| e.id.id())
			.map(|id| id.to_string())
		else {
			return;
		};

		if !prompter.confirm(DELETE_CONFIRM) {
			return;
		}

		self.state = match self.api.delete_expense(&id) {
			Ok(()) => {
				info!("deleted expense {}", id);
				ExpenseDetailState {
					deleted: true,
					error: None,
					..self.state.clone()
				}
			},
			Err(e) => {
				error!("error deleting expense {}: {}", id, e);
				self.state.failed(DELETE_FAILED)
			},
		};
	}
}
