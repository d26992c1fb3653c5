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
use anyhow::{bail, Error};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// A calendar month, rendered as "YYYY-MM". Used as the bucket key for
/// grouped expenses and as the key of every server report.
///
/// Field order makes the derived ordering chronological, which is also the
/// lexical order of the rendered keys.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
	year: u32,
	month: u8,
}

fn month_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"^(\d{4})-(\d{2})$").expect("month pattern is valid")
	})
}

impl MonthKey {
	pub(crate) fn new(year: u32, month: u8) -> Self {
		Self { year, month }
	}

	pub fn from_str(input: &str) -> Result<Self, Error> {
		let Some(caps) = month_pattern().captures(input.trim()) else {
			bail!("Month must be formatted as YYYY-MM: {}", input);
		};

		let year = caps[1].parse::<u32>()?;
		let month = caps[2].parse::<u8>()?;
		if !(1..=12).contains(&month) {
			bail!("Invalid month: {}", input);
		}

		Ok(Self { year, month })
	}

	/// "March 2024".
	pub fn label(&self) -> String {
		match chrono::Month::try_from(self.month) {
			Ok(name) => format!("{} {}", name.name(), self.year),
			Err(_) => self.to_string(),
		}
	}
}

impl fmt::Display for MonthKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}-{:02}", self.year, self.month)
	}
}

// Reports arrive as JSON objects keyed by month, so these have to work as map
// keys too; both directions go through plain strings.
impl Serialize for MonthKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for MonthKey {
	fn deserialize<D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		MonthKey::from_str(&raw).map_err(serde::de::Error::custom)
	}
}
