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
use crate::model::identity::Identity;
use crate::util::amount::Amount;
use crate::util::date::Date;
use anyhow::{bail, Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The fixed set of categories an expense can be filed under, in the
/// byte order the entry form lists them. Names the server sends that are
/// outside the set are kept as `Unknown` so one odd record cannot stop a
/// whole screen from loading; the form never produces one.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
	Emi,
	Education,
	Entertainment,
	Food,
	Healthcare,
	Housing,
	Investment,
	Other,
	Salary,
	Shopping,
	Transportation,
	Utilities,
	Unknown(String),
}

impl Category {
	pub const ALL: [Category; 12] = [
		Category::Emi,
		Category::Education,
		Category::Entertainment,
		Category::Food,
		Category::Healthcare,
		Category::Housing,
		Category::Investment,
		Category::Other,
		Category::Salary,
		Category::Shopping,
		Category::Transportation,
		Category::Utilities,
	];

	pub fn as_str(&self) -> &str {
		match self {
			Category::Emi => "EMI",
			Category::Education => "Education",
			Category::Entertainment => "Entertainment",
			Category::Food => "Food",
			Category::Healthcare => "Healthcare",
			Category::Housing => "Housing",
			Category::Investment => "Investment",
			Category::Other => "Other",
			Category::Salary => "Salary",
			Category::Shopping => "Shopping",
			Category::Transportation => "Transportation",
			Category::Utilities => "Utilities",
			Category::Unknown(name) => name,
		}
	}

	/// Case-insensitive lookup by name, limited to the fixed set.
	pub fn from_str(s: &str) -> Result<Self, Error> {
		let wanted = s.trim();
		match Category::ALL
			.iter()
			.find(|c| c.as_str().eq_ignore_ascii_case(wanted))
		{
			Some(c) => Ok(c.clone()),
			None => bail!("unknown category: {}", s),
		}
	}

	/// Exact lookup for names coming off the wire. Never fails.
	fn from_wire(name: String) -> Self {
		Category::ALL
			.iter()
			.find(|c| c.as_str() == name)
			.cloned()
			.unwrap_or(Category::Unknown(name))
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl Serialize for Category {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Category {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(Category::from_wire(String::deserialize(deserializer)?))
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
	#[serde(default, skip_serializing_if = "Identity::is_unsaved")]
	pub id: Identity,
	pub date: Date,
	pub amount: Amount,
	pub category: Category,
	pub description: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}

impl Expense {
	pub fn new(
		date: Date,
		amount: Amount,
		category: Category,
		description: &str,
	) -> Self {
		Self {
			id: Identity::Unsaved,
			date,
			amount,
			category,
			description: description.to_string(),
			notes: None,
		}
	}

	pub fn with_notes(mut self, notes: &str) -> Self {
		self.notes = Some(notes.to_string());
		self
	}
}

/// A {description, category, amount} pattern offered by the server, either
/// as a recurring charge or as a quick-entry tag. Neither is a stored record
/// in its own right, so there is no identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseTemplate {
	pub description: String,
	pub category: Category,
	pub amount: Amount,
}

impl ExpenseTemplate {
	/// A new, unsaved expense following this pattern on the given day.
	pub fn to_expense(&self, date: Date) -> Expense {
		Expense::new(date, self.amount, self.category.clone(), &self.description)
	}
}

pub type RecurringExpense = ExpenseTemplate;
pub type ExpenseTag = ExpenseTemplate;
