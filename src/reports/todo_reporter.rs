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
use crate::model::todo::Todo;
use crate::reports::table::Table;

/// The todo panel: done marker, text and the id needed to act on an item.
pub fn render_todos(todos: &[Todo]) -> String {
	if todos.is_empty() {
		return "No todos yet.\n".to_string();
	}

	let mut table = Table::new(3);
	for todo in todos {
		let mark = if todo.completed { "[x]" } else { "[ ]" };
		table.add_row(vec![mark, &todo.text, todo.id.id().unwrap_or("")]);
	}
	table.render()
}
