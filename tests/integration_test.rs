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
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

/// Nothing listens here, so any request fails straight away.
const DEAD_URL: &str = "http://127.0.0.1:9";

/// A request as seen by the fake server: method, full target and body.
type Seen = Arc<Mutex<Vec<(String, String, String)>>>;

/// Serves canned JSON per "METHOD path" until the test process exits. The
/// query string plays no part in routing. Unknown routes get a 404.
fn serve(routes: Vec<(&'static str, &'static str)>) -> (String, Seen) {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let url = format!("http://{}", listener.local_addr().unwrap());
	let seen: Seen = Arc::new(Mutex::new(Vec::new()));
	let log = seen.clone();

	thread::spawn(move || {
		for stream in listener.incoming() {
			let Ok(mut stream) = stream else {
				continue;
			};
			let mut reader = BufReader::new(stream.try_clone().unwrap());

			let mut request_line = String::new();
			reader.read_line(&mut request_line).unwrap();
			let mut parts = request_line.split_whitespace();
			let method = parts.next().unwrap_or("").to_string();
			let target = parts.next().unwrap_or("").to_string();
			let path = target.split('?').next().unwrap_or("").to_string();

			let mut content_length = 0;
			loop {
				let mut header = String::new();
				reader.read_line(&mut header).unwrap();
				let header = header.trim_end();
				if header.is_empty() {
					break;
				}
				if let Some((name, value)) = header.split_once(':') {
					if name.eq_ignore_ascii_case("content-length") {
						content_length = value.trim().parse().unwrap_or(0);
					}
				}
			}
			let mut body = vec![0; content_length];
			reader.read_exact(&mut body).unwrap();

			let key = format!("{} {}", method, path);
			let (status, reply) = match routes.iter().find(|(route, _)| *route == key) {
				Some((_, reply)) => ("200 OK", *reply),
				None => ("404 Not Found", r#"{"error":"no route"}"#),
			};
			log.lock().unwrap().push((
				method,
				target,
				String::from_utf8_lossy(&body).to_string(),
			));

			let response = format!(
				"HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
				status,
				reply.len(),
				reply
			);
			let _ = stream.write_all(response.as_bytes());
		}
	});

	(url, seen)
}

fn run(home: &TempDir, url: &str, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_spendr"))
		.args(args)
		.args(["--url", url])
		.env("HOME", home.path())
		.env_remove("RUST_LOG")
		.output()
		.expect("failed to run spendr")
}

fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
	String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_same_month_comparison_never_reaches_server() {
	let home = TempDir::new().unwrap();
	let output = run(&home, DEAD_URL, &["compare", "2024-03", "2024-03"]);

	assert!(!output.status.success());
	assert!(stderr(&output)
		.contains("Please select two different months for comparison."));
}

#[test]
fn test_default_config_is_created() {
	let home = TempDir::new().unwrap();
	run(&home, DEAD_URL, &["compare", "2024-03", "2024-03"]);
	assert!(home.path().join(".config/spendr/config.toml").exists());
}

#[test]
fn test_unreachable_server() {
	let home = TempDir::new().unwrap();
	let output = run(&home, DEAD_URL, &["monthly"]);

	assert!(!output.status.success());
	assert!(stderr(&output).contains(
		"Failed to load monthly report. Please ensure the backend server is running."
	));
}

#[test]
fn test_list_groups_by_month_with_todos() {
	let (url, _) = serve(vec![
		(
			"GET /api/expenses",
			r#"[
				{"id":"a","date":"2024-03-01","amount":5,"category":"Food","description":"Coffee beans"},
				{"id":"b","date":"2024-02-15","amount":50,"category":"Housing","description":"Plumber"},
				{"id":"c","date":"2024-03-05","amount":20,"category":"Food","description":"Groceries"}
			]"#,
		),
		(
			"GET /api/todos",
			r#"[
				{"id":"t1","text":"Renew passport","completed":false,"createdAt":"2024-01-10T09:00:00Z"},
				{"id":"t2","text":"Pay rent","completed":true,"createdAt":"2024-05-01T09:00:00Z"}
			]"#,
		),
	]);
	let home = TempDir::new().unwrap();
	let output = run(&home, &format!("{}/api", url), &["list"]);
	let out = stdout(&output);

	assert!(output.status.success(), "{}", stderr(&output));
	let order: Vec<usize> = [
		"March 2024",
		"Groceries",
		"Coffee beans",
		"February 2024",
		"Plumber",
		"Todos",
		"Pay rent",
		"Renew passport",
	]
	.iter()
	.map(|needle| out.find(needle).unwrap_or_else(|| panic!("{} missing", needle)))
	.collect();
	assert!(order.windows(2).all(|w| w[0] < w[1]), "{}", out);
	assert!(out.contains("25.00"));
}

#[test]
fn test_list_shows_todos_when_expenses_fail() {
	let (url, _) = serve(vec![("GET /api/todos", "[]")]);
	let home = TempDir::new().unwrap();
	let output = run(&home, &format!("{}/api", url), &["list"]);

	assert!(!output.status.success());
	assert!(stdout(&output).contains("No todos yet."));
	assert!(stderr(&output).contains("Failed to load expenses."));
}

#[test]
fn test_add_posts_expense() {
	let (url, seen) = serve(vec![(
		"POST /api/expenses",
		r#"{"id":"new1","date":"2024-06-01","amount":12.5,"category":"Food","description":"Lunch"}"#,
	)]);
	let home = TempDir::new().unwrap();
	let output = run(
		&home,
		&format!("{}/api", url),
		&["add", "-d", "2024-06-01", "-a", "12.50", "-c", "food", "--desc", "Lunch"],
	);

	assert!(output.status.success(), "{}", stderr(&output));
	assert!(stdout(&output).contains("new1"));

	let seen = seen.lock().unwrap();
	assert_eq!(seen.len(), 1);
	let body: serde_json::Value = serde_json::from_str(&seen[0].2).unwrap();
	assert_eq!(body["amount"], serde_json::json!(12.5));
	assert_eq!(body["category"], "Food");
	assert!(body.get("id").is_none());
}

#[test]
fn test_invalid_add_sends_nothing() {
	let (url, seen) = serve(vec![]);
	let home = TempDir::new().unwrap();
	let output = run(&home, &format!("{}/api", url), &["add", "-a", "0", "--desc", "x"]);

	assert!(!output.status.success());
	let err = stderr(&output);
	assert!(err.contains("Please fill in all required fields correctly."));
	assert!(err.contains("amount"));
	assert!(err.contains("category"));
	assert!(seen.lock().unwrap().is_empty());
}

fn targets(seen: &Seen) -> Vec<String> {
	seen.lock()
		.unwrap()
		.iter()
		.map(|(method, target, _)| format!("{} {}", method, target))
		.collect()
}

#[test]
fn test_compare_sends_both_months() {
	let (url, seen) = serve(vec![(
		"GET /api/reports/compare",
		r#"{
			"2024-03": {"total": 5, "categories": {"Food": 5}, "details": []},
			"2024-01": {"total": 40, "categories": {"Travel": 40}, "details": [
				{"id":"e9","date":"2024-01-09","amount":40,"category":"Travel","description":"Train"}
			]}
		}"#,
	)]);
	let home = TempDir::new().unwrap();
	let output = run(&home, &format!("{}/api", url), &["compare", "2024-03", "2024-01"]);

	assert!(output.status.success(), "{}", stderr(&output));
	assert_eq!(
		targets(&seen),
		vec!["GET /api/reports/compare?month1=2024-03&month2=2024-01"]
	);
	assert!(stdout(&output).contains("Travel"));
}

#[test]
fn test_compare_reports_month_load_failure() {
	let home = TempDir::new().unwrap();
	let output = run(&home, DEAD_URL, &["compare", "2024-03"]);

	assert!(!output.status.success());
	let err = stderr(&output);
	assert!(err.contains("Failed to load available months for comparison."));
	assert!(!err.contains("Please select both months"));
}

#[test]
fn test_lookbacks_default_from_config() {
	let (url, seen) = serve(vec![
		("GET /api/reports/recurring", "[]"),
		("GET /api/tags", "[]"),
	]);
	let home = TempDir::new().unwrap();
	let url = format!("{}/api", url);

	let output = run(&home, &url, &["recurring"]);
	assert!(output.status.success(), "{}", stderr(&output));
	let output = run(&home, &url, &["tags"]);
	assert!(output.status.success(), "{}", stderr(&output));
	let output = run(&home, &url, &["tags", "-m", "6"]);
	assert!(output.status.success(), "{}", stderr(&output));

	assert_eq!(
		targets(&seen),
		vec![
			"GET /api/reports/recurring?months=3",
			"GET /api/tags?months=2",
			"GET /api/tags?months=6",
		]
	);
}

const TODOS: &str = r#"[
	{"id":"t1","text":"Renew passport","completed":false,"createdAt":"2024-01-10T09:00:00Z"}
]"#;

#[test]
fn test_todo_toggle_sends_completed_only() {
	let (url, seen) = serve(vec![
		("GET /api/todos", TODOS),
		(
			"PUT /api/todos/t1",
			r#"{"id":"t1","text":"Renew passport","completed":true,"createdAt":"2024-01-10T09:00:00Z"}"#,
		),
	]);
	let home = TempDir::new().unwrap();
	let output = run(&home, &format!("{}/api", url), &["todo-toggle", "t1"]);

	assert!(output.status.success(), "{}", stderr(&output));
	let seen = seen.lock().unwrap();
	assert_eq!(seen.len(), 2);
	assert_eq!((seen[1].0.as_str(), seen[1].1.as_str()), ("PUT", "/api/todos/t1"));
	let body: serde_json::Value = serde_json::from_str(&seen[1].2).unwrap();
	assert_eq!(body, serde_json::json!({"completed": true}));
}

#[test]
fn test_todo_edit_sends_text_only() {
	let (url, seen) = serve(vec![
		("GET /api/todos", TODOS),
		(
			"PUT /api/todos/t1",
			r#"{"id":"t1","text":"Call the bank","completed":false,"createdAt":"2024-01-10T09:00:00Z"}"#,
		),
	]);
	let home = TempDir::new().unwrap();
	let output = run(
		&home,
		&format!("{}/api", url),
		&["todo-edit", "t1", "Call", "the", "bank"],
	);

	assert!(output.status.success(), "{}", stderr(&output));
	assert!(stdout(&output).contains("Call the bank"));
	let seen = seen.lock().unwrap();
	assert_eq!(seen[1].1, "/api/todos/t1");
	let body: serde_json::Value = serde_json::from_str(&seen[1].2).unwrap();
	assert_eq!(body, serde_json::json!({"text": "Call the bank"}));
}

#[test]
fn test_show_encodes_id() {
	let (url, seen) = serve(vec![(
		"GET /api/expenses/a%2Fb%3Fc",
		r#"{"id":"a/b?c","date":"2024-06-01","amount":3,"category":"Travel","description":"Bus"}"#,
	)]);
	let home = TempDir::new().unwrap();
	let output = run(&home, &format!("{}/api", url), &["show", "a/b?c"]);

	assert!(output.status.success(), "{}", stderr(&output));
	assert!(stdout(&output).contains("Travel"));
	assert_eq!(targets(&seen), vec!["GET /api/expenses/a%2Fb%3Fc"]);
}
