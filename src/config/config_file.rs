/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
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
use crate::api::gateway::{DEFAULT_RECURRING_MONTHS, DEFAULT_TAG_MONTHS};
use serde::Deserialize;

pub const DEFAULT_URL: &str = "http://localhost:3000";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	pub server: Option<Server>,
	pub lookback: Option<Lookback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Server {
	pub url: Option<String>,
	pub api_token: Option<String>,

	/// Shell command whose output is used as `api_token`.
	pub api_token_cmd: Option<String>,
}

/// How many trailing months the server looks at when guessing.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lookback {
	pub recurring_months: Option<u32>,
	pub tag_months: Option<u32>,
}

impl Config {
	pub fn url(&self) -> &str {
		self.server
			.as_ref()
			.and_then(|s| s.url.as_deref())
			.unwrap_or(DEFAULT_URL)
	}

	pub fn api_token(&self) -> Option<String> {
		self.server.as_ref().and_then(|s| s.api_token.clone())
	}

	pub fn recurring_months(&self) -> u32 {
		self.lookback
			.as_ref()
			.and_then(|l| l.recurring_months)
			.unwrap_or(DEFAULT_RECURRING_MONTHS)
	}

	pub fn tag_months(&self) -> u32 {
		self.lookback
			.as_ref()
			.and_then(|l| l.tag_months)
			.unwrap_or(DEFAULT_TAG_MONTHS)
	}
}
