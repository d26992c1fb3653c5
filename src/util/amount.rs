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
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A currency-agnostic money value, held as a whole number of hundredths.
///
/// The server speaks JSON numbers, which are binary floats on its side, so a
/// summed report total can arrive as `33.300000000000004`. Everything that
/// comes in is read through its decimal text and rounded half away from zero
/// to two places. Sums over amounts are then exact.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount {
	hundredths: i64,
}

impl Amount {
	const SCALE: i64 = 100;

	pub fn zero() -> Self {
		Self { hundredths: 0 }
	}

	pub fn from_hundredths(hundredths: i64) -> Self {
		Self { hundredths }
	}

	/// Parses a plain decimal ("12", "-4.5", "0.125", "1e3" is refused).
	pub fn from_str(input: &str) -> Result<Self, Error> {
		Self::parse(input, true)
	}

	/// Parses like `from_str` but drops digits past the hundredths instead
	/// of rounding, so "0.005" stays below one hundredth.
	pub fn truncated(input: &str) -> Result<Self, Error> {
		Self::parse(input, false)
	}

	fn parse(input: &str, round: bool) -> Result<Self, Error> {
		let input = input.trim();
		let (is_negative, sanitized) = match input.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, input),
		};

		let parts: Vec<&str> = sanitized.split('.').collect();
		let (whole, decimal) = match parts.len() {
			1 => (parts[0], ""),
			2 => (parts[0], parts[1]),
			_ => bail!("Invalid decimal format: {}", input),
		};

		if whole.is_empty() && decimal.is_empty() {
			bail!("Invalid decimal format: {}", input);
		}
		if !whole.chars().chain(decimal.chars()).all(|c| c.is_ascii_digit()) {
			bail!("Invalid decimal format: {}", input);
		}

		let whole = if whole.is_empty() {
			0
		} else {
			whole.parse::<i64>()?
		};

		let mut digits = decimal.chars().map(|c| c as i64 - '0' as i64);
		let tenths = digits.next().unwrap_or(0);
		let hundredths = digits.next().unwrap_or(0);
		let round_up = round && digits.next().unwrap_or(0) >= 5;

		let Some(mut value) = whole
			.checked_mul(Self::SCALE)
			.and_then(|v| v.checked_add(tenths * 10 + hundredths))
		else {
			bail!("Amount out of range: {}", input);
		};
		if round_up {
			value += 1;
		}

		Ok(Self {
			hundredths: if is_negative { -value } else { value },
		})
	}

	pub fn is_positive(&self) -> bool {
		self.hundredths > 0
	}

	pub fn hundredths(&self) -> i64 {
		self.hundredths
	}

	/// The exact value as a JSON number with at most two decimals.
	fn to_json_number(self) -> serde_json::Number {
		let whole = self.hundredths / Self::SCALE;
		let fraction = (self.hundredths % Self::SCALE).abs();
		if fraction == 0 {
			return serde_json::Number::from(whole);
		}

		let sign = if self.hundredths < 0 { "-" } else { "" };
		let text = format!("{}{}.{:02}", sign, whole.abs(), fraction);
		text.parse::<f64>()
			.ok()
			.and_then(serde_json::Number::from_f64)
			.unwrap_or_else(|| serde_json::Number::from(whole))
	}
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let whole = (self.hundredths / Self::SCALE).unsigned_abs();
		let fraction = (self.hundredths % Self::SCALE).unsigned_abs();

		let mut int_str = whole.to_string();
		let mut i = int_str.len() as isize - 3;
		while i > 0 {
			int_str.insert(i as usize, ',');
			i -= 3;
		}

		if self.hundredths < 0 {
			write!(f, "-{}.{:02}", int_str, fraction)
		} else {
			write!(f, "{}.{:02}", int_str, fraction)
		}
	}
}

impl Add for Amount {
	type Output = Self;
	fn add(self, rhs: Self) -> Self::Output {
		Self {
			hundredths: self.hundredths + rhs.hundredths,
		}
	}
}

impl AddAssign for Amount {
	fn add_assign(&mut self, rhs: Self) {
		self.hundredths += rhs.hundredths;
	}
}

impl Sum for Amount {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Amount::zero(), |acc, a| acc + a)
	}
}

impl<'a> Sum<&'a Amount> for Amount {
	fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
		iter.copied().sum()
	}
}

impl Serialize for Amount {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_json_number().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Amount {
	fn deserialize<D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Self, D::Error> {
		// strings show up when a form value is stored unconverted
		let value = serde_json::Value::deserialize(deserializer)?;
		let text = match value {
			serde_json::Value::Number(num) => num.to_string(),
			serde_json::Value::String(s) => s,
			_ => return Err(serde::de::Error::custom("expected a number")),
		};

		if text.contains(['e', 'E']) {
			let float = text.parse::<f64>().map_err(serde::de::Error::custom)?;
			return Amount::from_str(&format!("{:.3}", float))
				.map_err(serde::de::Error::custom);
		}

		Amount::from_str(&text).map_err(serde::de::Error::custom)
	}
}
