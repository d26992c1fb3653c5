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
use crate::util::month::MonthKey;
use anyhow::{bail, Error};
use chrono::{Datelike, Local};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// A calendar day with no time component.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Date {
	year: u32,
	month: u8,
	day: u8,
}

fn date_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:T.*)?$")
			.expect("date pattern is valid")
	})
}

impl Date {
	/// Constructor to parse a string in the "YYYY-mm-dd" format. A trailing
	/// ISO-8601 time part ("2024-03-05T00:00:00.000Z") is accepted and
	/// dropped, since the server sometimes hands back full timestamps.
	pub fn from_str(date_str: &str) -> Result<Date, Error> {
		let Some(caps) = date_pattern().captures(date_str.trim()) else {
			bail!("Date format must be YYYY-MM-DD: {}", date_str);
		};

		let year = caps[1].parse::<u32>()?;
		let month = caps[2].parse::<u8>()?;
		let day = caps[3].parse::<u8>()?;

		if !Date::is_valid_date(year, month, day) {
			bail!("Invalid date: {}", date_str);
		}

		Ok(Date { year, month, day })
	}

	pub fn today() -> Date {
		let now = Local::now().date_naive();
		Date {
			year: now.year() as u32,
			month: now.month() as u8,
			day: now.day() as u8,
		}
	}

	/// The "YYYY-MM" bucket this day falls into.
	pub fn month_key(&self) -> MonthKey {
		MonthKey::new(self.year, self.month)
	}

	fn is_leap_year(year: u32) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	fn days_in_month(year: u32, month: u8) -> u8 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Date::is_leap_year(year) {
					29
				} else {
					28
				}
			},
			_ => 0, // Invalid month
		}
	}

	fn is_valid_date(year: u32, month: u8, day: u8) -> bool {
		if !(1..=12).contains(&month) {
			return false;
		}
		if day < 1 || day > Date::days_in_month(year, month) {
			return false;
		}
		true
	}
}

impl PartialOrd for Date {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Date {
	fn cmp(&self, other: &Self) -> Ordering {
		(self.year, self.month, self.day).cmp(&(
			other.year,
			other.month,
			other.day,
		))
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
	}
}

impl Serialize for Date {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Date {
	fn deserialize<D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Date::from_str(&raw).map_err(serde::de::Error::custom)
	}
}
