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
use crate::model::expense::{Category, Expense, ExpenseTag};
use crate::transform::columns::split_columns;
use crate::util::amount::Amount;
use crate::util::date::Date;
use tracing::{error, info, warn};

pub const LOAD_FAILED: &str = "Failed to load expense for editing.";
pub const INVALID: &str = "Please fill in all required fields correctly.";
pub const CREATE_FAILED: &str = "Failed to create expense.";
pub const UPDATE_FAILED: &str = "Failed to update expense.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
	New,
	Edit(String),
}

/// The form fields as typed, before any parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
	pub date: String,
	pub amount: String,
	pub category: String,
	pub description: String,
	pub notes: String,
}

impl ExpenseDraft {
	fn from_expense(expense: &Expense) -> Self {
		Self {
			date: expense.date.to_string(),
			amount: expense.amount.to_string().replace(',', ""),
			category: expense.category.to_string(),
			description: expense.description.clone(),
			notes: expense.notes.clone().unwrap_or_default(),
		}
	}

	/// Presence and range checks only. On failure, names the fields that
	/// did not pass.
	pub fn validate(&self) -> Result<Expense, Vec<&'static str>> {
		let mut invalid = Vec::new();

		let date = Date::from_str(&self.date).ok();
		if date.is_none() {
			invalid.push("date");
		}

		// the minimum applies to the typed value, before rounding
		let minimum = Amount::from_hundredths(1);
		let amount = Amount::from_str(&self.amount)
			.ok()
			.filter(|_| {
				Amount::truncated(&self.amount).is_ok_and(|typed| typed >= minimum)
			});
		if amount.is_none() {
			invalid.push("amount");
		}

		let category = Category::from_str(&self.category).ok();
		if category.is_none() {
			invalid.push("category");
		}

		let description = self.description.trim();
		if description.is_empty() {
			invalid.push("description");
		}

		match (date, amount, category) {
			(Some(date), Some(amount), Some(category)) if invalid.is_empty() => {
				let expense = Expense::new(date, amount, category, description);
				let notes = self.notes.trim();
				Ok(if notes.is_empty() {
					expense
				} else {
					expense.with_notes(notes)
				})
			},
			_ => Err(invalid),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseFormState {
	pub mode: FormMode,
	pub draft: ExpenseDraft,

	/// Quick-entry tags as fetched, and the same tags split for two columns.
	pub tags: Vec<ExpenseTag>,
	pub left_tags: Vec<ExpenseTag>,
	pub right_tags: Vec<ExpenseTag>,

	pub invalid_fields: Vec<&'static str>,
	pub saved: Option<Expense>,
	pub error: Option<String>,
}

impl ExpenseFormState {
	fn failed(&self, message: &str) -> Self {
		Self {
			error: Some(message.to_string()),
			..self.clone()
		}
	}
}

/// Entry form for a new expense, or for changing an existing one.
pub struct ExpenseFormView<'a, A: ExpenseApi + ?Sized> {
	api: &'a A,
	today: Date,
	tag_months: u32,
	state: ExpenseFormState,
}

impl<'a, A: ExpenseApi + ?Sized> ExpenseFormView<'a, A> {
	/// A blank form dated `today`, offering tags from the trailing
	/// `tag_months` once loaded.
	pub fn new_entry(api: &'a A, today: Date, tag_months: u32) -> Self {
		Self {
			api,
			today,
			tag_months,
			state: ExpenseFormState {
				mode: FormMode::New,
				draft: ExpenseDraft {
					date: today.to_string(),
					..Default::default()
				},
				tags: Vec::new(),
				left_tags: Vec::new(),
				right_tags: Vec::new(),
				invalid_fields: Vec::new(),
				saved: None,
				error: None,
			},
		}
	}

	/// A form for the expense with the given id; `load` fills it in.
	pub fn edit(api: &'a A, id: &str, today: Date) -> Self {
		let mut view = Self::new_entry(api, today, 0);
		view.state.mode = FormMode::Edit(id.to_string());
		view.state.draft = ExpenseDraft::default();
		view
	}

	pub fn state(&self) -> &ExpenseFormState {
		&self.state
	}

	/// New mode fetches tags; edit mode fetches the expense being edited.
	pub fn load(&mut self) {
		match self.state.mode.clone() {
			FormMode::New => self.load_tags(),
			FormMode::Edit(id) => self.load_expense(&id),
		}
	}

	fn load_tags(&mut self) {
		match self.api.expense_tags(self.tag_months) {
			Ok(tags) => {
				let (left, right) = split_columns(&tags);
				self.state = ExpenseFormState {
					left_tags: left.to_vec(),
					right_tags: right.to_vec(),
					tags,
					..self.state.clone()
				};
			},
			// tags only speed up entry; the form works without them
			Err(e) => warn!("error loading expense tags: {}", e),
		}
	}

	fn load_expense(&mut self, id: &str) {
		self.state = match self.api.get_expense(id) {
			Ok(expense) => ExpenseFormState {
				draft: ExpenseDraft::from_expense(&expense),
				error: None,
				..self.state.clone()
			},
			Err(e) => {
				error!("error loading expense {}: {}", id, e);
				self.state.failed(LOAD_FAILED)
			},
		};
	}

	/// Copies a tag into the form, dated today and without notes.
	pub fn fill_with_tag(&mut self, tag: &ExpenseTag) {
		self.state = ExpenseFormState {
			draft: ExpenseDraft {
				date: self.today.to_string(),
				amount: tag.amount.to_string().replace(',', ""),
				category: tag.category.to_string(),
				description: tag.description.clone(),
				notes: String::new(),
			},
			..self.state.clone()
		};
	}

	pub fn update_draft(&mut self, change: impl FnOnce(&mut ExpenseDraft)) {
		let mut draft = self.state.draft.clone();
		change(&mut draft);
		self.state = ExpenseFormState {
			draft,
			..self.state.clone()
		};
	}

	/// Validates, then creates or updates. Nothing is sent when the draft is
	/// invalid.
	pub fn submit(&mut self) {
		let expense = match self.state.draft.validate() {
			Ok(expense) => expense,
			Err(invalid_fields) => {
				self.state = ExpenseFormState {
					invalid_fields,
					error: Some(INVALID.to_string()),
					..self.state.clone()
				};
				return;
			},
		};

		let (result, failure) = match &self.state.mode {
			FormMode::New => (self.api.create_expense(&expense), CREATE_FAILED),
			FormMode::Edit(id) => {
				(self.api.update_expense(id, &expense), UPDATE_FAILED)
			},
		};

		self.state = match result {
			Ok(saved) => {
				info!("saved expense {}", saved.id);
				ExpenseFormState {
					saved: Some(saved),
					invalid_fields: Vec::new(),
					error: None,
					..self.state.clone()
				}
			},
			Err(e) => {
				error!("error saving expense: {}", e);
				ExpenseFormState {
					invalid_fields: Vec::new(),
					..self.state.failed(failure)
				}
			},
		};
	}
}
