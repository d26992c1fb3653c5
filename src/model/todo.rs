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
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
	#[serde(default, skip_serializing_if = "Identity::is_unsaved")]
	pub id: Identity,
	pub text: String,

	#[serde(default)]
	pub completed: bool,

	/// Assigned by the server on creation and never changed afterwards.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<DateTime<Utc>>,
}

impl Todo {
	/// Milliseconds since the epoch, with a missing timestamp counting as
	/// the epoch itself.
	pub fn effective_created_at(&self) -> i64 {
		self.created_at.map_or(0, |t| t.timestamp_millis())
	}
}

// -------------
// -- SENDING --
// -------------

#[derive(Debug, Serialize)]
pub struct NewTodo {
	pub text: String,
	pub completed: bool,
}

impl NewTodo {
	pub fn new(text: &str) -> Self {
		Self {
			text: text.to_string(),
			completed: false,
		}
	}
}

/// Partial update; only the fields that are set go over the wire.
#[derive(Debug, Default, Serialize)]
pub struct TodoPatch {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub completed: Option<bool>,
}

impl TodoPatch {
	pub fn text(text: &str) -> Self {
		Self {
			text: Some(text.to_string()),
			..Default::default()
		}
	}

	pub fn completed(completed: bool) -> Self {
		Self {
			completed: Some(completed),
			..Default::default()
		}
	}
}
