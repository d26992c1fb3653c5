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
use crate::api::gateway::TodoApi;
use crate::model::todo::{NewTodo, Todo, TodoPatch};
use crate::transform::ordering::order_todos;
use crate::view::Prompter;
use tracing::{error, info};

pub const LOAD_FAILED: &str =
	"Failed to load todos. Please ensure the backend server is running.";
pub const EMPTY_NEW: &str = "Please enter a todo item.";
pub const ADD_FAILED: &str = "Failed to add todo. Please try again.";
pub const ADDED: &str = "Todo added successfully!";
pub const TOGGLE_FAILED: &str = "Failed to update todo status. Please try again.";
pub const EDIT_PROMPT: &str = "Edit todo:";
pub const EMPTY_EDIT: &str = "Todo text cannot be empty.";
pub const EDIT_FAILED: &str = "Failed to edit todo. Please try again.";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this todo?";
pub const DELETE_FAILED: &str = "Failed to delete todo. Please try again.";
pub const DELETED: &str = "Todo deleted successfully!";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoListState {
	/// Newest first.
	pub todos: Vec<Todo>,
	pub loading: bool,
	pub error: Option<String>,
	pub success: Option<String>,
}

impl TodoListState {
	fn failed(&self, message: &str) -> Self {
		Self {
			error: Some(message.to_string()),
			..self.clone()
		}
	}

	/// The list with `updated` in place of the todo sharing its identity.
	fn replacing(&self, updated: Todo) -> Self {
		let todos = self
			.todos
			.iter()
			.map(|t| {
				if t.id == updated.id {
					updated.clone()
				} else {
					t.clone()
				}
			})
			.collect();
		Self {
			todos,
			error: None,
			..self.clone()
		}
	}
}

/// The todo panel. Lives next to the expense list but shares nothing with
/// it.
pub struct TodoListView<'a, A: TodoApi + ?Sized> {
	api: &'a A,
	state: TodoListState,
}

impl<'a, A: TodoApi + ?Sized> TodoListView<'a, A> {
	pub fn new(api: &'a A) -> Self {
		Self {
			api,
			state: TodoListState {
				loading: true,
				..Default::default()
			},
		}
	}

	pub fn state(&self) -> &TodoListState {
		&self.state
	}

	pub fn load(&mut self) {
		self.state = TodoListState {
			loading: true,
			error: None,
			..self.state.clone()
		};

		self.state = match self.api.list_todos() {
			Ok(todos) => TodoListState {
				todos: order_todos(&todos),
				loading: false,
				error: None,
				..self.state.clone()
			},
			Err(e) => {
				error!("error fetching todos: {}", e);
				TodoListState {
					loading: false,
					..self.state.failed(LOAD_FAILED)
				}
			},
		};
	}

	pub fn add(&mut self, text: &str) {
		let text = text.trim();
		if text.is_empty() {
			self.state = self.state.failed(EMPTY_NEW);
			return;
		}

		let cleared = TodoListState {
			error: None,
			success: None,
			..self.state.clone()
		};

		self.state = match self.api.create_todo(&NewTodo::new(text)) {
			Ok(added) => {
				info!("added todo {}", added.id);
				let mut todos = vec![added];
				todos.extend(cleared.todos.iter().cloned());
				TodoListState {
					todos: order_todos(&todos),
					success: Some(ADDED.to_string()),
					..cleared
				}
			},
			Err(e) => {
				error!("error adding todo: {}", e);
				cleared.failed(ADD_FAILED)
			},
		};
	}

	/// Flips the completed flag of a saved todo.
	pub fn toggle(&mut self, id: &str) {
		let Some(todo) = self.find(id) else {
			return;
		};

		self.state = TodoListState {
			error: None,
			..self.state.clone()
		};

		self.state = match self
			.api
			.update_todo(id, &TodoPatch::completed(!todo.completed))
		{
			Ok(updated) => self.state.replacing(updated),
			Err(e) => {
				error!("error toggling todo {}: {}", id, e);
				self.state.failed(TOGGLE_FAILED)
			},
		};
	}

	/// Asks for new text, then saves it. Backing out of the prompt changes
	/// nothing; blank text is refused without asking the server.
	pub fn edit(&mut self, id: &str, prompter: &dyn Prompter) {
		let Some(todo) = self.find(id) else {
			return;
		};

		let Some(new_text) = prompter.prompt_text(EDIT_PROMPT, &todo.text) else {
			return;
		};

		let new_text = new_text.trim();
		if new_text.is_empty() {
			self.state = self.state.failed(EMPTY_EDIT);
			return;
		}

		self.state = TodoListState {
			error: None,
			..self.state.clone()
		};

		self.state = match self.api.update_todo(id, &TodoPatch::text(new_text)) {
			Ok(updated) => self.state.replacing(updated),
			Err(e) => {
				error!("error editing todo {}: {}", id, e);
				self.state.failed(EDIT_FAILED)
			},
		};
	}

	pub fn delete(&mut self, id: &str, prompter: &dyn Prompter) {
		if self.find(id).is_none() || !prompter.confirm(DELETE_CONFIRM) {
			return;
		}

		self.state = TodoListState {
			error: None,
			..self.state.clone()
		};

		self.state = match self.api.delete_todo(id) {
			Ok(()) => {
				info!("deleted todo {}", id);
				TodoListState {
					todos: self
						.state
						.todos
						.iter()
						.filter(|t| !t.id.is(id))
						.cloned()
						.collect(),
					success: Some(DELETED.to_string()),
					..self.state.clone()
				}
			},
			Err(e) => {
				error!("error deleting todo {}: {}", id, e);
				self.state.failed(DELETE_FAILED)
			},
		};
	}

	/// A saved todo in the current list; unsaved ones cannot be acted on.
	fn find(&self, id: &str) -> Option<Todo> {
		self.state.todos.iter().find(|t| t.id.is(id)).cloned()
	}
}
