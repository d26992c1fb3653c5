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
use crate::view::Prompter;
use std::io::{self, BufRead, Write};

/// Asks on the terminal. With `assume_yes` every confirmation passes without
/// reading anything; with a preset answer text prompts are answered without
/// reading anything either.
pub struct TerminalPrompter {
	assume_yes: bool,
	answer: Option<String>,
}

impl TerminalPrompter {
	pub fn new(assume_yes: bool) -> Self {
		Self {
			assume_yes,
			answer: None,
		}
	}

	pub fn with_answer(mut self, answer: Option<String>) -> Self {
		self.answer = answer;
		self
	}

	fn read_line(prompt: &str) -> Option<String> {
		print!("{} ", prompt);
		io::stdout().flush().ok()?;

		let mut line = String::new();
		match io::stdin().lock().read_line(&mut line) {
			Ok(0) | Err(_) => None, // EOF counts as backing out
			Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
		}
	}
}

impl Prompter for TerminalPrompter {
	fn confirm(&self, message: &str) -> bool {
		if self.assume_yes {
			return true;
		}

		match Self::read_line(&format!("{} [y/N]", message)) {
			Some(reply) => {
				matches!(reply.trim().to_lowercase().as_str(), "y" | "yes")
			},
			None => false,
		}
	}

	fn prompt_text(&self, message: &str, default: &str) -> Option<String> {
		if let Some(answer) = &self.answer {
			return Some(answer.clone());
		}

		let reply = Self::read_line(&format!("{} [{}]", message, default))?;
		if reply.is_empty() {
			Some(default.to_string())
		} else {
			Some(reply)
		}
	}
}
