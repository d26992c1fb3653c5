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
//! One controller per screen. Every controller owns a plain state struct and
//! swaps it out whole on each transition, so tests can look at the state
//! after any action without a terminal attached.
//!
//! Failures from the server are logged and turned into the screen's own
//! message; they never escape a controller.

pub mod comparison;
pub mod expense_detail;
pub mod expense_form;
pub mod expense_list;
pub mod monthly_report;
pub mod prompt;
pub mod recurring;
pub mod todo_list;

#[cfg(test)]
pub(crate) mod testing;

/// Questions a controller needs answered by a person before it acts.
pub trait Prompter {
	/// Yes/no before anything destructive.
	fn confirm(&self, message: &str) -> bool;

	/// Free text with a suggested value. `None` means the user backed out.
	fn prompt_text(&self, message: &str, default: &str) -> Option<String>;
}
