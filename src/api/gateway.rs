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
use crate::api::error::Result;
use crate::api::http::Client;
use crate::model::expense::{Expense, ExpenseTag, RecurringExpense};
use crate::model::report::{ComparisonReport, MonthlyReport};
use crate::model::todo::{NewTodo, Todo, TodoPatch};
use crate::util::month::MonthKey;
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_RECURRING_MONTHS: u32 = 3;
pub const DEFAULT_TAG_MONTHS: u32 = 2;

/// The expense side of the server. `Sync` because the recurring screen fans
/// its creates out over several threads at once.
pub trait ExpenseApi: Sync {
	fn list_expenses(&self) -> Result<Vec<Expense>>;
	fn get_expense(&self, id: &str) -> Result<Expense>;
	fn create_expense(&self, expense: &Expense) -> Result<Expense>;
	fn update_expense(&self, id: &str, expense: &Expense) -> Result<Expense>;
	fn delete_expense(&self, id: &str) -> Result<()>;

	fn monthly_report(&self) -> Result<MonthlyReport>;

	/// The two months must differ; callers check that before asking.
	fn comparison_report(
		&self,
		month1: &MonthKey,
		month2: &MonthKey,
	) -> Result<ComparisonReport>;

	/// Charges the server sees repeating over the trailing `months`.
	fn recurring_expenses(&self, months: u32) -> Result<Vec<RecurringExpense>>;

	/// Distinct {description, category, amount} combinations from the
	/// trailing `months`, for quick entry.
	fn expense_tags(&self, months: u32) -> Result<Vec<ExpenseTag>>;
}

pub trait TodoApi {
	fn list_todos(&self) -> Result<Vec<Todo>>;
	fn create_todo(&self, todo: &NewTodo) -> Result<Todo>;
	fn update_todo(&self, id: &str, patch: &TodoPatch) -> Result<Todo>;
	fn delete_todo(&self, id: &str) -> Result<()>;
}

// -------------
// -- SENDING --
// -------------

#[derive(Debug, Serialize)]
struct CompareParams {
	month1: String,
	month2: String,
}

#[derive(Debug, Serialize)]
struct LookbackParams {
	months: u32,
}

/// Both APIs over HTTP.
pub struct HttpGateway {
	http: Client,
}

impl HttpGateway {
	pub fn new(http: Client) -> Self {
		debug!("using server at {}", http.base_url());
		Self { http }
	}
}

impl ExpenseApi for HttpGateway {
	fn list_expenses(&self) -> Result<Vec<Expense>> {
		self.http.get(&["expenses"], None::<()>)
	}

	fn get_expense(&self, id: &str) -> Result<Expense> {
		self.http.get(&["expenses", id], None::<()>)
	}

	fn create_expense(&self, expense: &Expense) -> Result<Expense> {
		self.http.post(&["expenses"], expense)
	}

	fn update_expense(&self, id: &str, expense: &Expense) -> Result<Expense> {
		self.http.put(&["expenses", id], expense)
	}

	fn delete_expense(&self, id: &str) -> Result<()> {
		self.http.delete(&["expenses", id])
	}

	fn monthly_report(&self) -> Result<MonthlyReport> {
		self.http.get(&["reports", "monthly"], None::<()>)
	}

	fn comparison_report(
		&self,
		month1: &MonthKey,
		month2: &MonthKey,
	) -> Result<ComparisonReport> {
		self.http.get(
			&["reports", "compare"],
			Some(CompareParams {
				month1: month1.to_string(),
				month2: month2.to_string(),
			}),
		)
	}

	fn recurring_expenses(&self, months: u32) -> Result<Vec<RecurringExpense>> {
		self.http
			.get(&["reports", "recurring"], Some(LookbackParams { months }))
	}

	fn expense_tags(&self, months: u32) -> Result<Vec<ExpenseTag>> {
		self.http.get(&["tags"], Some(LookbackParams { months }))
	}
}

impl TodoApi for HttpGateway {
	fn list_todos(&self) -> Result<Vec<Todo>> {
		self.http.get(&["todos"], None::<()>)
	}

	fn create_todo(&self, todo: &NewTodo) -> Result<Todo> {
		self.http.post(&["todos"], todo)
	}

	fn update_todo(&self, id: &str, patch: &TodoPatch) -> Result<Todo> {
		self.http.put(&["todos", id], patch)
	}

	fn delete_todo(&self, id: &str) -> Result<()> {
		self.http.delete(&["todos", id])
	}
}
