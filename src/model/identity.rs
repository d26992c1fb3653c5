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
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a record has been persisted by the server yet. Records built
/// locally start out `Unsaved`; only the server hands out ids.
///
/// On the wire this is the optional `id` field: absent (or null) for
/// `Unsaved`, a string for `Saved`.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Identity {
	#[default]
	Unsaved,
	Saved(String),
}

impl Identity {
	pub fn id(&self) -> Option<&str> {
		match self {
			Identity::Unsaved => None,
			Identity::Saved(id) => Some(id),
		}
	}

	pub fn is_unsaved(&self) -> bool {
		matches!(self, Identity::Unsaved)
	}

	pub fn is(&self, id: &str) -> bool {
		self.id() == Some(id)
	}
}

impl From<Option<String>> for Identity {
	fn from(value: Option<String>) -> Self {
		match value {
			Some(id) if !id.is_empty() => Identity::Saved(id),
			_ => Identity::Unsaved,
		}
	}
}

impl From<Identity> for Option<String> {
	fn from(value: Identity) -> Self {
		match value {
			Identity::Unsaved => None,
			Identity::Saved(id) => Some(id),
		}
	}
}

impl fmt::Display for Identity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Identity::Unsaved => write!(f, "(unsaved)"),
			Identity::Saved(id) => write!(f, "{}", id),
		}
	}
}
