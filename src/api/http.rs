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
use crate::api::error::{ApiError, Result};
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Thin JSON-over-HTTP client bound to one server origin. Each call is a
/// single round trip with no retries and no timeout. Nothing is cached
/// between calls.
pub struct Client {
	client: reqwest::blocking::Client,
	base: Url,
	base_url: String,
	api_token: Option<String>,
}

impl Client {
	pub fn new(base_url: &str, api_token: Option<String>) -> Result<Self> {
		let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
			url: base_url.to_string(),
			reason: e.to_string(),
		})?;
		if base.cannot_be_a_base() {
			return Err(ApiError::InvalidUrl {
				url: base_url.to_string(),
				reason: "not a base URL".to_string(),
			});
		}

		let client = reqwest::blocking::Client::builder()
			.timeout(None)
			.build()?;

		Ok(Client {
			client,
			base,
			base_url: base_url.trim_end_matches('/').to_string(),
			api_token,
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Sends a GET and decodes the JSON response.
	pub fn get<Q, R>(&self, path: &[&str], query_params: Option<Q>) -> Result<R>
	where
		Q: Serialize,
		R: for<'de> Deserialize<'de>,
	{
		let mut request = self.request(Method::GET, path)?;
		if let Some(query_params) = query_params {
			request = request.query(&query_params);
		}

		let response = self.send(Method::GET, path, request)?;
		Ok(response.json()?)
	}

	/// Sends a POST with a JSON body and decodes the JSON response.
	pub fn post<B, R>(&self, path: &[&str], body: &B) -> Result<R>
	where
		B: Serialize + ?Sized,
		R: for<'de> Deserialize<'de>,
	{
		let request = self.request(Method::POST, path)?.json(body);
		let response = self.send(Method::POST, path, request)?;
		Ok(response.json()?)
	}

	/// Sends a PUT with a JSON body and decodes the JSON response.
	pub fn put<B, R>(&self, path: &[&str], body: &B) -> Result<R>
	where
		B: Serialize + ?Sized,
		R: for<'de> Deserialize<'de>,
	{
		let request = self.request(Method::PUT, path)?.json(body);
		let response = self.send(Method::PUT, path, request)?;
		Ok(response.json()?)
	}

	/// Sends a DELETE. Whatever body comes back is ignored.
	pub fn delete(&self, path: &[&str]) -> Result<()> {
		let request = self.request(Method::DELETE, path)?;
		self.send(Method::DELETE, path, request)?;
		Ok(())
	}

	/// The base URL with `path` appended, one percent-encoded segment per
	/// element.
	fn url(&self, path: &[&str]) -> Result<Url> {
		let mut url = self.base.clone();
		url.path_segments_mut()
			.map_err(|_| ApiError::InvalidUrl {
				url: self.base_url.clone(),
				reason: "not a base URL".to_string(),
			})?
			.pop_if_empty()
			.extend(path);
		Ok(url)
	}

	fn request(&self, method: Method, path: &[&str]) -> Result<RequestBuilder> {
		let mut request = self.client.request(method, self.url(path)?);
		if let Some(token) = &self.api_token {
			request = request.bearer_auth(token);
		}
		Ok(request)
	}

	/// Sends the request and turns non-2xx response codes into errors.
	fn send(
		&self,
		method: Method,
		path: &[&str],
		request: RequestBuilder,
	) -> Result<Response> {
		let endpoint = path.join("/");
		debug!("sending {} to {}/{}", method, self.base_url, endpoint);
		let response = request.send()?;

		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}

		debug!("{} {} failed with status {}", method, endpoint, status);
		if status == StatusCode::NOT_FOUND {
			return Err(ApiError::NotFound { path: endpoint });
		}

		let body = response.text().unwrap_or_default();
		Err(ApiError::Server {
			status,
			message: error_message(status, &body),
		})
	}
}

/// Picks the most useful message out of an error response: the `error` or
/// `message` field of a JSON body, else the body itself, else the reason
/// phrase for the status.
fn error_message(status: StatusCode, body: &str) -> String {
	#[derive(Deserialize)]
	struct ErrorBody {
		error: Option<String>,
		message: Option<String>,
	}

	if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
		if let Some(msg) = parsed.error.or(parsed.message) {
			return msg;
		}
	}

	let trimmed = body.trim();
	if !trimmed.is_empty() {
		return trimmed.to_string();
	}

	status
		.canonical_reason()
		.unwrap_or("unknown error")
		.to_string()
}
