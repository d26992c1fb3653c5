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
//! In-memory stand-ins for the server and the person at the keyboard.

use crate::api::error::{ApiError, Result};
use crate::api::gateway::{ExpenseApi, TodoApi};
use crate::model::expense::{Category, Expense, ExpenseTag, RecurringExpense};
use crate::model::identity::Identity;
use crate::model::report::{ComparisonReport, MonthlyReport};
use crate::model::todo::{NewTodo, Todo, TodoPatch};
use crate::util::amount::Amount;
use crate::util::date::Date;
use crate::util::month::MonthKey;
use crate::view::Prompter;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use std::collections::HashSet;
use std::sync::Mutex;

pub fn expense(id: &str, date: &str, amount: &str, category: Category) -> Expense {
	let description = format!("{} on {}", category, date);
	let mut e = Expense::new(
		Date::from_str(date).unwrap(),
		Amount::from_str(amount).unwrap(),
		category,
		&description,
	);
	e.id = Identity::Saved(id.to_string());
	e
}

pub fn template(description: &str, category: Category, amount: &str) -> ExpenseTag {
	ExpenseTag {
		description: description.to_string(),
		category,
		amount: Amount::from_str(amount).unwrap(),
	}
}

pub fn todo(id: &str, text: &str, created_at: Option<&str>) -> Todo {
	Todo {
		id: Identity::Saved(id.to_string()),
		text: text.to_string(),
		completed: false,
		created_at: created_at.map(|s| s.parse::<DateTime<Utc>>().unwrap()),
	}
}

pub fn month(key: &str) -> MonthKey {
	MonthKey::from_str(key).unwrap()
}

/// A server that keeps everything in memory and records every call by
/// operation name. Operations listed with `fail` answer with a 500.
#[derive(Default)]
pub struct FakeApi {
	pub expenses: Mutex<Vec<Expense>>,
	pub todos: Mutex<Vec<Todo>>,
	pub monthly: MonthlyReport,
	pub comparison: ComparisonReport,
	pub recurring: Vec<RecurringExpense>,
	pub tags: Vec<ExpenseTag>,

	/// Creates of an expense with this description fail.
	pub reject_description: Option<String>,

	pub failing: Mutex<HashSet<&'static str>>,
	pub calls: Mutex<Vec<String>>,
	pub next_id: Mutex<usize>,
}

impl FakeApi {
	pub fn with_expenses(expenses: Vec<Expense>) -> Self {
		Self {
			expenses: Mutex::new(expenses),
			..Default::default()
		}
	}

	pub fn with_todos(todos: Vec<Todo>) -> Self {
		Self {
			todos: Mutex::new(todos),
			..Default::default()
		}
	}

	pub fn fail(&self, operation: &'static str) {
		self.failing.lock().unwrap().insert(operation);
	}

	pub fn heal(&self, operation: &'static str) {
		self.failing.lock().unwrap().remove(operation);
	}

	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().unwrap().clone()
	}

	pub fn count(&self, operation: &str) -> usize {
		self.calls
			.lock()
			.unwrap()
			.iter()
			.filter(|c| c.as_str() == operation)
			.count()
	}

	fn enter(&self, operation: &'static str) -> Result<()> {
		self.calls.lock().unwrap().push(operation.to_string());
		if self.failing.lock().unwrap().contains(operation) {
			return Err(ApiError::Server {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				message: format!("{} exploded", operation),
			});
		}
		Ok(())
	}

	fn new_id(&self, prefix: &str) -> Identity {
		let mut next = self.next_id.lock().unwrap();
		*next += 1;
		Identity::Saved(format!("{}{}", prefix, *next))
	}
}

impl ExpenseApi for FakeApi {
	fn list_expenses(&self) -> Result<Vec<Expense>> {
		self.enter("list_expenses")?;
		Ok(self.expenses.lock().unwrap().clone())
	}

	fn get_expense(&self, id: &str) -> Result<Expense> {
		self.enter("get_expense")?;
		self.expenses
			.lock()
			.unwrap()
			.iter()
			.find(|e| e.id.is(id))
			.cloned()
			.ok_or(ApiError::NotFound {
				path: format!("expenses/{}", id),
			})
	}

	fn create_expense(&self, expense: &Expense) -> Result<Expense> {
		self.enter("create_expense")?;
		if self.reject_description.as_deref() == Some(expense.description.as_str()) {
			return Err(ApiError::Server {
				status: StatusCode::BAD_REQUEST,
				message: "rejected".to_string(),
			});
		}
		let mut created = expense.clone();
		created.id = self.new_id("e");
		self.expenses.lock().unwrap().push(created.clone());
		Ok(created)
	}

	fn update_expense(&self, id: &str, expense: &Expense) -> Result<Expense> {
		self.enter("update_expense")?;
		let mut expenses = self.expenses.lock().unwrap();
		let Some(slot) = expenses.iter_mut().find(|e| e.id.is(id)) else {
			return Err(ApiError::NotFound {
				path: format!("expenses/{}", id),
			});
		};
		*slot = Expense {
			id: Identity::Saved(id.to_string()),
			..expense.clone()
		};
		Ok(slot.clone())
	}

	fn delete_expense(&self, id: &str) -> Result<()> {
		self.enter("delete_expense")?;
		self.expenses.lock().unwrap().retain(|e| !e.id.is(id));
		Ok(())
	}

	fn monthly_report(&self) -> Result<MonthlyReport> {
		self.enter("monthly_report")?;
		Ok(self.monthly.clone())
	}

	fn comparison_report(
		&self,
		month1: &MonthKey,
		month2: &MonthKey,
	) -> Result<ComparisonReport> {
		self.enter("comparison_report")?;
		Ok(self
			.comparison
			.iter()
			.filter(|(k, _)| *k == month1 || *k == month2)
			.map(|(k, v)| (*k, v.clone()))
			.collect())
	}

	fn recurring_expenses(&self, _months: u32) -> Result<Vec<RecurringExpense>> {
		self.enter("recurring_expenses")?;
		Ok(self.recurring.clone())
	}

	fn expense_tags(&self, _months: u32) -> Result<Vec<ExpenseTag>> {
		self.enter("expense_tags")?;
		Ok(self.tags.clone())
	}
}

impl TodoApi for FakeApi {
	fn list_todos(&self) -> Result<Vec<Todo>> {
		self.enter("list_todos")?;
		Ok(self.todos.lock().unwrap().clone())
	}

	fn create_todo(&self, todo: &NewTodo) -> Result<Todo> {
		self.enter("create_todo")?;
		let created = Todo {
			id: self.new_id("t"),
			text: todo.text.clone(),
			completed: todo.completed,
			created_at: Some(Utc::now()),
		};
		self.todos.lock().unwrap().push(created.clone());
		Ok(created)
	}

	fn update_todo(&self, id: &str, patch: &TodoPatch) -> Result<Todo> {
		self.enter("update_todo")?;
		let mut todos = self.todos.lock().unwrap();
		let Some(slot) = todos.iter_mut().find(|t| t.id.is(id)) else {
			return Err(ApiError::NotFound {
				path: format!("todos/{}", id),
			});
		};
		if let Some(text) = &patch.text {
			slot.text = text.clone();
		}
		if let Some(completed) = patch.completed {
			slot.completed = completed;
		}
		Ok(slot.clone())
	}

	fn delete_todo(&self, id: &str) -> Result<()> {
		self.enter("delete_todo")?;
		self.todos.lock().unwrap().retain(|t| !t.id.is(id));
		Ok(())
	}
}

/// Answers every question the same way and remembers what was asked.
pub struct ScriptedPrompter {
	pub confirm: bool,
	pub text: Option<String>,
	pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
	pub fn yes() -> Self {
		Self {
			confirm: true,
			text: None,
			asked: Mutex::new(Vec::new()),
		}
	}

	pub fn no() -> Self {
		Self {
			confirm: false,
			..Self::yes()
		}
	}

	pub fn answering(text: Option<&str>) -> Self {
		Self {
			text: text.map(|t| t.to_string()),
			..Self::yes()
		}
	}
}

impl Prompter for ScriptedPrompter {
	fn confirm(&self, message: &str) -> bool {
		self.asked.lock().unwrap().push(message.to_string());
		self.confirm
	}

	fn prompt_text(&self, message: &str, _default: &str) -> Option<String> {
		self.asked.lock().unwrap().push(message.to_string());
		self.text.clone()
	}
}
