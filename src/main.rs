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
use crate::api::gateway::HttpGateway;
use crate::api::http::Client;
use crate::config::filesystem::Filesystem;
use crate::reports::expense_reporter::{
	render_detail, render_recurring, render_tag_columns, ExpenseReporter,
};
use crate::reports::summary_reporter::{render_comparison, SummaryReporter};
use crate::reports::todo_reporter::render_todos;
use crate::util::date::Date;
use crate::util::month::MonthKey;
use crate::view::comparison::ComparisonView;
use crate::view::expense_detail::ExpenseDetailView;
use crate::view::expense_form::{ExpenseDraft, ExpenseFormView};
use crate::view::expense_list::ExpenseListView;
use crate::view::monthly_report::MonthlyReportView;
use crate::view::prompt::TerminalPrompter;
use crate::view::recurring::RecurringView;
use crate::view::todo_list::TodoListView;
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod model;
mod reports;
mod transform;
mod util;
mod view;

#[derive(Parser)]
#[command(
	name = "spendr",
	version = "0.1",
	about = "Client for a personal expense tracking server"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// Ids, months, indexes or text, depending on the command
	#[arg(required = false)]
	terms: Vec<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Custom config file location (default: ~/.config/spendr/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Server address, overriding the config file
	#[arg(long)]
	url: Option<String>,

	/// How many trailing months to consider for recurring expenses and tags
	#[arg(short, long)]
	months: Option<u32>,

	/// Expense date (YYYY-MM-DD)
	#[arg(short, long)]
	date: Option<String>,

	/// Expense amount
	#[arg(short, long)]
	amount: Option<String>,

	/// Expense category
	#[arg(short, long)]
	category: Option<String>,

	/// Expense description
	#[arg(long = "desc")]
	description: Option<String>,

	/// Expense notes
	#[arg(short, long)]
	notes: Option<String>,

	/// Prefill a new expense from the tag with this number (see `tags`)
	#[arg(short, long)]
	tag: Option<usize>,

	/// Delete the expense being shown, after confirmation
	#[arg(long)]
	delete: bool,

	/// Answer yes to every confirmation
	#[arg(short, long)]
	yes: bool,

	/// Log every request to stderr
	#[arg(short, long)]
	verbose: bool,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if self.months == Some(0) {
			bail!("Months must be at least 1");
		}
		if self.tag == Some(0) {
			bail!("Tags are numbered from 1");
		}
		if self.tag.is_some() && self.command != Directive::Add {
			bail!("--tag only applies to the add command");
		}
		if self.delete && self.command != Directive::Show {
			bail!("--delete only applies to the show command");
		}

		let wanted = match self.command {
			Directive::Show
			| Directive::Edit
			| Directive::Delete
			| Directive::TodoToggle
			| Directive::TodoDelete => Some(1),
			Directive::List
			| Directive::Add
			| Directive::Monthly
			| Directive::Tags
			| Directive::Todos => Some(0),
			_ => None,
		};
		if let Some(wanted) = wanted {
			if self.terms.len() != wanted {
				bail!(
					"Expected {} argument(s) after the command, got {}",
					wanted,
					self.terms.len()
				);
			}
		}

		Ok(())
	}

	fn id(&self) -> &str {
		self.terms.first().map(String::as_str).unwrap_or("")
	}

	/// Applies whichever expense fields were given on the command line.
	fn fill_draft(&self, draft: &mut ExpenseDraft) {
		if let Some(date) = &self.date {
			draft.date = date.clone();
		}
		if let Some(amount) = &self.amount {
			draft.amount = amount.clone();
		}
		if let Some(category) = &self.category {
			draft.category = category.clone();
		}
		if let Some(description) = &self.description {
			draft.description = description.clone();
		}
		if let Some(notes) = &self.notes {
			draft.notes = notes.clone();
		}
	}
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Directive {
	List,    // expenses by month, plus todos
	Show,    // one expense
	Add,     // new expense
	Edit,    // change an expense
	Delete,  // remove an expense
	Monthly, // monthly report
	Compare, // two months side by side
	Recurring,
	Tags,

	Todos,
	TodoAdd,
	TodoToggle,
	TodoEdit,
	TodoDelete,
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	init_logging(args.verbose);
	args.validate()?;

	let config = Filesystem::new().get_config(args.config.as_ref())?;
	let url = args.url.clone().unwrap_or_else(|| config.url().to_string());
	let gateway = HttpGateway::new(Client::new(&url, config.api_token())?);
	let prompter = TerminalPrompter::new(args.yes);
	let today = Date::today();

	match args.command {
		Directive::List => list(&gateway)?,
		Directive::Show => {
			let mut view = ExpenseDetailView::new(&gateway, args.id());
			view.load();
			fail_on(&view.state().error)?;
			if let Some(expense) = &view.state().expense {
				print!("{}", render_detail(expense));
			}

			if args.delete {
				view.delete(&prompter);
				fail_on(&view.state().error)?;
				if view.state().deleted {
					println!("Expense deleted.");
				}
			}
		},
		Directive::Add => {
			let tag_months = args.months.unwrap_or(config.tag_months());
			let mut form = ExpenseFormView::new_entry(&gateway, today, tag_months);

			if let Some(n) = args.tag {
				form.load();
				let Some(tag) = form.state().tags.get(n - 1).cloned() else {
					bail!("No tag numbered {}", n);
				};
				form.fill_with_tag(&tag);
			}

			form.update_draft(|draft| args.fill_draft(draft));
			save(&mut form)?;
		},
		Directive::Edit => {
			let mut form = ExpenseFormView::edit(&gateway, args.id(), today);
			form.load();
			fail_on(&form.state().error)?;
			form.update_draft(|draft| args.fill_draft(draft));
			save(&mut form)?;
		},
		Directive::Delete => delete(&gateway, args.id(), &prompter)?,
		Directive::Monthly => {
			let mut view = MonthlyReportView::new(&gateway);
			view.load();
			let state = view.state();
			fail_on(&state.error)?;
			print!(
				"{}",
				SummaryReporter::new(&state.report)
					.render_monthly(&state.months, |m| view.categories_for(m))
			);
		},
		Directive::Compare => compare(&gateway, &args.terms)?,
		Directive::Recurring => {
			let months = args.months.unwrap_or(config.recurring_months());
			recurring(&gateway, months, &args.terms, today)?
		},
		Directive::Tags => {
			let tag_months = args.months.unwrap_or(config.tag_months());
			let mut form = ExpenseFormView::new_entry(&gateway, today, tag_months);
			form.load();
			let state = form.state();
			print!("{}", render_tag_columns(&state.left_tags, &state.right_tags));
		},
		Directive::Todos
		| Directive::TodoAdd
		| Directive::TodoToggle
		| Directive::TodoEdit
		| Directive::TodoDelete => todos(&gateway, &args, prompter)?,
	}

	Ok(())
}

fn init_logging(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

/// Turns a controller's error state into the program's failure.
fn fail_on(error: &Option<String>) -> Result<(), Error> {
	match error {
		Some(message) => bail!("{}", message),
		None => Ok(()),
	}
}

/// The expense list with the todo panel below it. The two load separately;
/// one failing does not hide the other.
fn list(gateway: &HttpGateway) -> Result<(), Error> {
	let mut expenses = ExpenseListView::new(gateway);
	let mut todos = TodoListView::new(gateway);
	expenses.load();
	todos.load();

	let mut errors = Vec::new();

	match &expenses.state().error {
		Some(e) => errors.push(e.clone()),
		None => print!(
			"{}",
			ExpenseReporter::new(&expenses.state().groups).render_by_month()
		),
	}

	println!("\nTodos");
	match &todos.state().error {
		Some(e) => errors.push(e.clone()),
		None => print!("{}", render_todos(&todos.state().todos)),
	}

	if !errors.is_empty() {
		bail!("{}", errors.join("\n"));
	}
	Ok(())
}

/// Deletes from the full list and shows what is left.
fn delete(
	gateway: &HttpGateway,
	id: &str,
	prompter: &TerminalPrompter,
) -> Result<(), Error> {
	let mut view = ExpenseListView::new(gateway);
	view.load();
	fail_on(&view.state().error)?;

	let before = view.state().expenses.len();
	if !view.state().expenses.iter().any(|e| e.id.is(id)) {
		bail!("No expense with id {}", id);
	}

	view.delete(id, prompter);
	let state = view.state();
	fail_on(&state.error)?;
	if state.expenses.len() < before {
		println!("Expense deleted.");
		print!("{}", ExpenseReporter::new(&state.groups).render_by_month());
	}
	Ok(())
}

fn save(form: &mut ExpenseFormView<HttpGateway>) -> Result<(), Error> {
	form.submit();
	let state = form.state();

	if !state.invalid_fields.is_empty() {
		eprintln!("Invalid: {}", state.invalid_fields.join(", "));
	}
	fail_on(&state.error)?;

	if let Some(saved) = &state.saved {
		println!("Expense saved.");
		print!("{}", render_detail(saved));
	}
	Ok(())
}

/// With fewer than two months given, lists the months to choose from before
/// reporting what is missing.
fn compare(gateway: &HttpGateway, terms: &[String]) -> Result<(), Error> {
	if terms.len() > 2 {
		bail!("Compare takes two months");
	}
	let months = terms
		.iter()
		.map(|t| MonthKey::from_str(t))
		.collect::<Result<Vec<_>, _>>()?;

	let mut view = ComparisonView::new(gateway);
	if months.len() < 2 {
		view.load();
		fail_on(&view.state().error)?;
		let available = &view.state().available_months;
		if !available.is_empty() {
			let names: Vec<String> = available.iter().map(|m| m.to_string()).collect();
			println!("Available months: {}", names.join(", "));
		}
	}

	view.submit(months.first().copied(), months.get(1).copied());
	let state = view.state();
	fail_on(&state.error)?;

	if let (Some(report), Some((month1, month2))) = (&state.report, &state.selected) {
		print!(
			"{}",
			render_comparison(report, month1, month2, |m| view.categories_for(m))
		);
	}
	Ok(())
}

/// Lists recurring expenses; given 1-based indexes, books those for today.
/// Naming an index twice unmarks it again.
fn recurring(
	gateway: &HttpGateway,
	months: u32,
	terms: &[String],
	today: Date,
) -> Result<(), Error> {
	let mut view = RecurringView::new(gateway, months);
	view.load();
	fail_on(&view.state().error)?;

	if terms.is_empty() {
		let state = view.state();
		print!("{}", render_recurring(&state.items, &state.selected));
		return Ok(());
	}

	for term in terms {
		let n: usize = match term.parse() {
			Ok(n) if n >= 1 && n <= view.state().items.len() => n,
			_ => bail!("No recurring expense numbered {}", term),
		};
		view.toggle(n - 1);
	}

	let state = view.state();
	print!("{}", render_recurring(&state.items, &state.selected));

	view.add_selected(today);
	let state = view.state();
	fail_on(&state.error)?;
	if let Some(message) = &state.success {
		println!("{}", message);
	}
	Ok(())
}

/// Every todo command shows the panel afterwards, so each starts from a
/// fresh load.
fn todos(
	gateway: &HttpGateway,
	args: &Cli,
	prompter: TerminalPrompter,
) -> Result<(), Error> {
	let mut view = TodoListView::new(gateway);
	view.load();
	fail_on(&view.state().error)?;

	let id = args.id();
	let known = view.state().todos.iter().any(|t| t.id.is(id));
	let needs_id = matches!(
		args.command,
		Directive::TodoToggle | Directive::TodoEdit | Directive::TodoDelete
	);
	if needs_id && !known {
		bail!("No todo with id {}", id);
	}

	match args.command {
		Directive::TodoAdd => view.add(&args.terms.join(" ")),
		Directive::TodoToggle => view.toggle(id),
		Directive::TodoEdit => {
			let text = args
				.terms
				.get(1..)
				.filter(|rest| !rest.is_empty())
				.map(|rest| rest.join(" "));
			view.edit(id, &prompter.with_answer(text));
		},
		Directive::TodoDelete => view.delete(id, &prompter),
		_ => {},
	}

	let state = view.state();
	fail_on(&state.error)?;
	if let Some(message) = &state.success {
		println!("{}", message);
	}
	print!("{}", render_todos(&state.todos));
	Ok(())
}
