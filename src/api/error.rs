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
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong talking to the expense server. Controllers
/// never show these to the user directly; they log them and store their own
/// message instead.
#[derive(Debug, Error)]
pub enum ApiError {
	/// Connection refused, DNS, broken pipe, or a body that would not decode.
	#[error("transport error: {0}")]
	Transport(#[from] reqwest::Error),

	#[error("invalid server URL {url}: {reason}")]
	InvalidUrl { url: String, reason: String },

	#[error("not found: {path}")]
	NotFound { path: String },

	#[error("server returned {status}: {message}")]
	Server { status: StatusCode, message: String },

	/// The task carrying a request died before it could report back.
	#[error("request task aborted")]
	Aborted,
}

pub type Result<T> = std::result::Result<T, ApiError>;
