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
use crate::api::error::ApiError;
use crate::api::gateway::ExpenseApi;
use crate::model::expense::{Expense, RecurringExpense};
use crate::util::date::Date;
use std::thread;
use tracing::{error, info};

pub const LOAD_FAILED: &str = "Failed to load recurring expenses. Please ensure the backend server is running and data is available.";
pub const NOTHING_SELECTED: &str =
	"Please select at least one recurring expense to add.";
pub const ADD_FAILED: &str = "Failed to add one or more recurring expenses.";
pub const ADD_SUCCEEDED: &str = "Selected recurring expenses added successfully!";
pub const RECURRING_NOTE: &str = "Recurring expense added automatically";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecurringState {
	pub items: Vec<RecurringExpense>,
	/// Parallel to `items`.
	pub selected: Vec<bool>,
	pub loading: bool,
	pub error: Option<String>,
	pub success: Option<String>,
}

/// Charges the server believes repeat, with a way to book a batch of them
/// for today.
pub struct RecurringView<'a, A: ExpenseApi + ?Sized> {
	api: &'a A,
	months: u32,
	state: RecurringState,
}

impl<'a, A: ExpenseApi + ?Sized> RecurringView<'a, A> {
	pub fn new(api: &'a A, months: u32) -> Self {
		Self {
			api,
			months,
			state: RecurringState {
				loading: true,
				..Default::default()
			},
		}
	}

	pub fn state(&self) -> &RecurringState {
		&self.state
	}

	pub fn load(&mut self) {
		self.state = RecurringState {
			loading: true,
			error: None,
			..self.state.clone()
		};

		self.state = match self.api.recurring_expenses(self.months) {
			Ok(items) => RecurringState {
				selected: vec![false; items.len()],
				items,
				loading: false,
				error: None,
				success: None,
			},
			Err(e) => {
				error!("error loading recurring expenses: {}", e);
				RecurringState {
					loading: false,
					error: Some(LOAD_FAILED.to_string()),
					..self.state.clone()
				}
			},
		};
	}

	/// Marks or unmarks the item at `index`. Out-of-range indexes are
	/// ignored.
	pub fn select(&mut self, index: usize, selected: bool) {
		if index >= self.state.selected.len() {
			return;
		}

		let mut marks = self.state.selected.clone();
		marks[index] = selected;
		self.state = RecurringState {
			selected: marks,
			..self.state.clone()
		};
	}

	pub fn toggle(&mut self, index: usize) {
		if let Some(current) = self.state.selected.get(index).copied() {
			self.select(index, !current);
		}
	}

	/// Books every selected item as a new expense dated `today`.
	///
	/// The creates go out at the same time and are all waited for. The
	/// batch only counts as added if every one of them succeeded; those that
	/// did succeed stay on the server either way.
	pub fn add_selected(&mut self, today: Date) {
		let batch: Vec<Expense> = self
			.state
			.items
			.iter()
			.zip(&self.state.selected)
			.filter(|(_, selected)| **selected)
			.map(|(item, _)| item.to_expense(today).with_notes(RECURRING_NOTE))
			.collect();

		let cleared = RecurringState {
			error: None,
			success: None,
			..self.state.clone()
		};

		if batch.is_empty() {
			self.state = RecurringState {
				error: Some(NOTHING_SELECTED.to_string()),
				..cleared
			};
			return;
		}

		let api = self.api;
		let outcomes: Vec<Result<Expense, ApiError>> = thread::scope(|s| {
			let handles: Vec<_> = batch
				.iter()
				.map(|expense| s.spawn(move || api.create_expense(expense)))
				.collect();

			handles
				.into_iter()
				.map(|h| h.join().unwrap_or(Err(ApiError::Aborted)))
				.collect()
		});

		let failures: Vec<&ApiError> =
			outcomes.iter().filter_map(|o| o.as_ref().err()).collect();
		for e in &failures {
			error!("error adding recurring expense: {}", e);
		}

		self.state = if failures.is_empty() {
			info!("added {} recurring expenses", outcomes.len());
			RecurringState {
				success: Some(ADD_SUCCEEDED.to_string()),
				..cleared
			}
		} else {
			RecurringState {
				error: Some(ADD_FAILED.to_string()),
				..cleared
			}
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::expense::Category;
	use crate::view::testing::{template, FakeApi};

	fn api() -> FakeApi {
		FakeApi {
			recurring: vec![
				template("Rent", Category::Housing, "900"),
				template("Internet", Category::Utilities, "45.99"),
				template("Gym", Category::Healthcare, "30"),
			],
			..Default::default()
		}
	}

	fn today() -> Date {
		Date::from_str("2024-06-01").unwrap()
	}

	#[test]
	fn test_load() {
		let api = api();
		let mut view = RecurringView::new(&api, 3);
		assert!(view.state().loading);
		view.load();
		let state = view.state();
		assert!(!state.loading);
		assert_eq!(state.items.len(), 3);
		assert_eq!(state.selected, vec![false, false, false]);
	}

	#[test]
	fn test_load_failure() {
		let api = api();
		api.fail("recurring_expenses");
		let mut view = RecurringView::new(&api, 3);
		view.load();
		assert!(!view.state().loading);
		assert_eq!(view.state().error.as_deref(), Some(LOAD_FAILED));
	}

	#[test]
	fn test_nothing_selected() {
		let api = api();
		let mut view = RecurringView::new(&api, 3);
		view.load();
		view.add_selected(today());
		assert_eq!(view.state().error.as_deref(), Some(NOTHING_SELECTED));
		assert_eq!(api.count("create_expense"), 0);
	}

	#[test]
	fn test_adds_selected_for_today() {
		let api = api();
		let mut view = RecurringView::new(&api, 3);
		view.load();
		view.toggle(0);
		view.toggle(2);
		view.select(7, true);
		view.add_selected(today());

		assert_eq!(view.state().error, None);
		assert_eq!(view.state().success.as_deref(), Some(ADD_SUCCEEDED));
		assert_eq!(api.count("create_expense"), 2);

		let stored = api.expenses.lock().unwrap().clone();
		let mut names: Vec<&str> =
			stored.iter().map(|e| e.description.as_str()).collect();
		names.sort();
		assert_eq!(names, vec!["Gym", "Rent"]);
		for e in &stored {
			assert_eq!(e.date, today());
			assert_eq!(e.notes.as_deref(), Some(RECURRING_NOTE));
		}
	}

	#[test]
	fn test_one_failure_fails_the_batch_without_rollback() {
		let api = FakeApi {
			reject_description: Some("Internet".to_string()),
			..api()
		};
		let mut view = RecurringView::new(&api, 3);
		view.load();
		for i in 0..3 {
			view.select(i, true);
		}
		view.add_selected(today());

		assert_eq!(view.state().error.as_deref(), Some(ADD_FAILED));
		assert_eq!(view.state().success, None);
		assert_eq!(api.count("create_expense"), 3);
		assert_eq!(api.expenses.lock().unwrap().len(), 2);
	}
}
