//! Terminal front end for administering merchant records.

use std::io::{self, BufRead, Write as _};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use merchant_admin::client::{DEFAULT_BASE_URL, MerchantBlockingClient};
use merchant_admin::dashboard::BlockingDashboard;
use merchant_admin::error::MerchantError;
use merchant_admin::models::{Merchant, MerchantField, MerchantId, MerchantStatus, StatusStyle};
use merchant_admin::repository::BlockingRepository;
use owo_colors::OwoColorize;

/// Environment variable holding the API base URL.
const BASE_URL_ENV: &str = "MERCHANT_API_URL";

/// Merchant admin CLI: list, inspect, add, edit and delete merchants.
#[derive(Debug, Parser)]
#[command(name = "merchant-admin", version, about)]
struct Cli {
    /// API base URL (default: $MERCHANT_API_URL, then http://localhost:8000/api).
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// List all merchants.
    List,
    /// Show one merchant as stored on the server.
    Show {
        /// Merchant identifier.
        id: MerchantId,
    },
    /// Add a merchant.
    Add(AddArgs),
    /// Edit fields of an existing merchant.
    Edit(EditArgs),
    /// Delete a merchant.
    Delete {
        /// Merchant identifier.
        id: MerchantId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

/// Arguments for the `add` subcommand.
#[derive(Debug, Args)]
struct AddArgs {
    /// Business name.
    #[arg(long)]
    name: String,
    /// Business registration number.
    #[arg(long)]
    brn: String,
    /// Contact email.
    #[arg(long)]
    email: String,
    /// Contact phone.
    #[arg(long)]
    phone: String,
    /// Lifecycle status (Pending, Active or Suspended).
    #[arg(long, value_parser = parse_status)]
    status: Option<MerchantStatus>,
}

/// Arguments for the `edit` subcommand.
#[derive(Debug, Args)]
struct EditArgs {
    /// Merchant identifier.
    id: MerchantId,
    /// New business name.
    #[arg(long)]
    name: Option<String>,
    /// New business registration number.
    #[arg(long)]
    brn: Option<String>,
    /// New contact email.
    #[arg(long)]
    email: Option<String>,
    /// New contact phone.
    #[arg(long)]
    phone: Option<String>,
    /// New lifecycle status (Pending, Active or Suspended).
    #[arg(long, value_parser = parse_status)]
    status: Option<MerchantStatus>,
}

impl EditArgs {
    /// Returns the text fields to change, in form order.
    fn changes(&self) -> Vec<(MerchantField, &str)> {
        [
            (MerchantField::Name, self.name.as_deref()),
            (MerchantField::BusinessRegistrationNumber, self.brn.as_deref()),
            (MerchantField::Email, self.email.as_deref()),
            (MerchantField::Phone, self.phone.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|text| (field, text)))
        .collect()
    }
}

/// Parses one of the selectable statuses (case-insensitive) for clap.
fn parse_status(s: &str) -> Result<MerchantStatus, String> {
    MerchantStatus::CHOICES
        .iter()
        .find(|choice| choice.as_str().eq_ignore_ascii_case(s.trim()))
        .cloned()
        .ok_or_else(|| format!("expected one of Pending, Active, Suspended; got {s:?}"))
}

/// Picks the base URL: flag, then environment, then the default.
fn resolve_base_url(flag: Option<String>, env: Option<String>) -> String {
    flag.into_iter()
        .chain(env)
        .find(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let base_url = resolve_base_url(cli.base_url, std::env::var(BASE_URL_ENV).ok());

    let client = match MerchantBlockingClient::builder().base_url(base_url).build() {
        Ok(client) => client,
        Err(err) => {
            report("failed to build client", &err)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut dashboard = BlockingDashboard::new(client);
    dispatch(&mut dashboard, cli.command, &mut io::stdin().lock())
}

/// Loads the merchant list, then dispatches to the subcommand handler.
fn dispatch<R: BlockingRepository, In: BufRead>(
    dashboard: &mut BlockingDashboard<R>,
    command: Command,
    input: &mut In,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Loading merchants...");
    let loaded = dashboard.start();
    spinner.finish_and_clear();
    if let Err(err) = loaded {
        report("failed to load merchants", &err)?;
        return Ok(ExitCode::FAILURE);
    }

    match command {
        Command::List => cmd_list(dashboard),
        Command::Show { id } => cmd_show(dashboard, id),
        Command::Add(args) => cmd_add(dashboard, args),
        Command::Edit(args) => cmd_edit(dashboard, &args),
        Command::Delete { id, yes } => cmd_delete(dashboard, id, yes, input),
    }
}

/// Executes the `list` subcommand: prints the cached list.
fn cmd_list<R: BlockingRepository>(dashboard: &BlockingDashboard<R>) -> io::Result<ExitCode> {
    print_merchants_table(dashboard.merchants())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `show` subcommand: fetches one merchant by id.
fn cmd_show<R: BlockingRepository>(
    dashboard: &BlockingDashboard<R>,
    id: MerchantId,
) -> io::Result<ExitCode> {
    match dashboard.repository().fetch(id) {
        Ok(merchant) => {
            print_merchant_details(&merchant)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report(&format!("failed to fetch merchant {id}"), &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `add` subcommand: fills and submits the new-merchant form.
fn cmd_add<R: BlockingRepository>(
    dashboard: &mut BlockingDashboard<R>,
    args: AddArgs,
) -> io::Result<ExitCode> {
    dashboard.set_form_field(MerchantField::Name, args.name);
    dashboard.set_form_field(MerchantField::BusinessRegistrationNumber, args.brn);
    dashboard.set_form_field(MerchantField::Email, args.email);
    dashboard.set_form_field(MerchantField::Phone, args.phone);
    if let Some(status) = args.status {
        dashboard.set_form_status(status);
    }

    let spinner = make_spinner("Creating merchant...");
    let submitted = dashboard.submit_new();
    spinner.finish_and_clear();

    match submitted {
        Ok(()) => {
            writeln!(io::stdout().lock(), "{}", "Merchant created.".green().bold())?;
            print_merchants_table(dashboard.merchants())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report("failed to create merchant", &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `edit` subcommand: opens a draft, applies changes, saves.
fn cmd_edit<R: BlockingRepository>(
    dashboard: &mut BlockingDashboard<R>,
    args: &EditArgs,
) -> io::Result<ExitCode> {
    let changes = args.changes();
    if changes.is_empty() && args.status.is_none() {
        writeln!(
            io::stderr().lock(),
            "{} edit requires at least one of --name, --brn, --email, --phone, --status",
            "error:".red().bold()
        )?;
        return Ok(ExitCode::FAILURE);
    }

    if let Err(err) = dashboard.open_edit(args.id) {
        report("cannot edit", &err)?;
        return Ok(ExitCode::FAILURE);
    }
    for (field, value) in changes {
        _ = dashboard.set_edit_field(field, value);
    }
    if let Some(status) = args.status.clone() {
        _ = dashboard.set_edit_status(status);
    }

    let spinner = make_spinner("Saving changes...");
    let saved = dashboard.save_edit();
    spinner.finish_and_clear();

    match saved {
        Ok(()) => {
            writeln!(io::stdout().lock(), "{}", "Merchant updated.".green().bold())?;
            print_merchants_table(dashboard.merchants())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report("failed to update merchant", &err)?;
            dashboard.cancel_edit();
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `delete` subcommand: marks the target, confirms, deletes.
fn cmd_delete<R: BlockingRepository, In: BufRead>(
    dashboard: &mut BlockingDashboard<R>,
    id: MerchantId,
    yes: bool,
    input: &mut In,
) -> io::Result<ExitCode> {
    if let Err(err) = dashboard.request_delete(id) {
        report("cannot delete", &err)?;
        return Ok(ExitCode::FAILURE);
    }
    let label = dashboard
        .delete_target()
        .map(Merchant::label)
        .unwrap_or_default();

    let question = format!("Are you sure you want to delete {label}?");
    if !yes && !confirm(input, &mut io::stdout().lock(), &question)? {
        dashboard.cancel_delete();
        writeln!(io::stdout().lock(), "{}", "Cancelled.".dimmed())?;
        return Ok(ExitCode::SUCCESS);
    }

    let spinner = make_spinner("Deleting merchant...");
    let refreshed = dashboard.confirm_delete();
    spinner.finish_and_clear();

    match refreshed {
        Ok(()) => {
            writeln!(
                io::stdout().lock(),
                "{} {}",
                "Delete sent.".green().bold(),
                format_args!("({} merchants remaining)", dashboard.merchants().len()).dimmed()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report("failed to refresh merchants", &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Asks a y/N question; anything but `y`/`yes` declines.
fn confirm<In: BufRead, Out: io::Write>(
    input: &mut In,
    output: &mut Out,
    question: &str,
) -> io::Result<bool> {
    write!(output, "{question} {} ", "[y/N]".dimmed())?;
    output.flush()?;
    let mut answer = String::new();
    let _read = input.read_line(&mut answer)?;
    let reply = answer.trim();
    Ok(reply.eq_ignore_ascii_case("y") || reply.eq_ignore_ascii_case("yes"))
}

// ── Output formatting ────────────────────────────────────────────────

/// Prints an error, plus per-field validation messages when present.
fn report(context: &str, err: &MerchantError) -> io::Result<()> {
    let mut out = io::stderr().lock();
    writeln!(out, "{} {context}: {err}", "error:".red().bold())?;
    if let Some(fields) = err.field_errors() {
        for (field, messages) in fields {
            writeln!(out, "  {} {}", format_args!("{field}:").cyan(), messages.join(" "))?;
        }
    }
    Ok(())
}

/// Table colour of a status bucket.
const fn status_color(style: StatusStyle) -> Color {
    match style {
        StatusStyle::Active => Color::Green,
        StatusStyle::Suspended => Color::Red,
        StatusStyle::Pending => Color::Yellow,
    }
}

/// Prints merchants in a table.
fn print_merchants_table(merchants: &[Merchant]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if merchants.is_empty() {
        writeln!(out, "{}", "No merchants found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Registration No.").fg(Color::Cyan),
        Cell::new("Email").fg(Color::Cyan),
        Cell::new("Phone").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for merchant in merchants {
        let phone = if merchant.phone.is_empty() {
            "\u{2014}"
        } else {
            merchant.phone.as_str()
        };
        _ = table.add_row(vec![
            Cell::new(merchant.id),
            Cell::new(&merchant.name),
            Cell::new(&merchant.business_registration_number),
            Cell::new(&merchant.email),
            Cell::new(phone),
            Cell::new(&merchant.status).fg(status_color(merchant.status.style())),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Merchants".green().bold(),
        format_args!("({})", merchants.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints every attribute of one merchant.
fn print_merchant_details(merchant: &Merchant) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", merchant.label().green().bold())?;
    writeln!(out)?;
    writeln!(out, "  {} {}", "ID:".bold(), merchant.id)?;
    for field in MerchantField::ALL {
        writeln!(out, "  {} {}", format_args!("{}:", field.label()).bold(), merchant.field(field))?;
    }
    writeln!(out, "  {} {}", "Status:".bold(), merchant.status)?;
    if let Some(created) = merchant.created_at {
        writeln!(out, "  {} {created}", "Created:".bold())?;
    }
    if let Some(updated) = merchant.updated_at {
        writeln!(out, "  {} {updated}", "Updated:".bold())?;
    }
    Ok(())
}

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use merchant_admin::repository::{InMemoryRepository, Operation, RepositoryCall};

    /// Creates a test merchant.
    fn test_merchant(id: i64, name: &str, status: MerchantStatus) -> Merchant {
        Merchant {
            id: MerchantId::new(id),
            name: name.to_owned(),
            business_registration_number: format!("BRN-{id}"),
            email: format!("merchant{id}@example.com"),
            phone: format!("02440000{id:02}"),
            status,
            created_at: None,
            updated_at: None,
        }
    }

    /// Creates a started dashboard over two merchants, with the call log cleared.
    fn started() -> BlockingDashboard<InMemoryRepository> {
        let repository = InMemoryRepository::with_merchants(vec![
            test_merchant(1, "Acme", MerchantStatus::Active),
            test_merchant(3, "Beta", MerchantStatus::Other("Review".to_owned())),
        ]);
        let mut dashboard = BlockingDashboard::new(repository);
        dashboard.start().unwrap();
        dashboard.repository().clear_calls().unwrap();
        dashboard
    }

    /// Edit arguments that change nothing.
    fn no_changes(id: i64) -> EditArgs {
        EditArgs {
            id: MerchantId::new(id),
            name: None,
            brn: None,
            email: None,
            phone: None,
            status: None,
        }
    }

    // ── argument parsing tests ───────────────────────────────────────

    #[test]
    fn parse_status_accepts_choices_case_insensitively() {
        assert_eq!(parse_status("active").unwrap(), MerchantStatus::Active);
        assert_eq!(parse_status(" Suspended ").unwrap(), MerchantStatus::Suspended);
        assert_eq!(parse_status("PENDING").unwrap(), MerchantStatus::Pending);
    }

    #[test]
    fn parse_status_rejects_unknown() {
        assert!(parse_status("Archived").is_err());
        assert!(parse_status("").is_err());
    }

    #[test]
    fn cli_parses_delete_with_yes() {
        let cli = Cli::try_parse_from(["merchant-admin", "delete", "3", "--yes"]).unwrap();
        assert!(cli.base_url.is_none());
        assert!(matches!(cli.command, Command::Delete { id, yes: true } if id == MerchantId::new(3)));
    }

    #[test]
    fn cli_parses_edit_with_global_base_url() {
        let cli = Cli::try_parse_from([
            "merchant-admin",
            "edit",
            "7",
            "--status",
            "active",
            "--base-url",
            "http://api.test",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://api.test"));
        assert!(matches!(
            cli.command,
            Command::Edit(EditArgs {
                id,
                name: None,
                status: Some(MerchantStatus::Active),
                ..
            }) if id == MerchantId::new(7)
        ));
    }

    #[test]
    fn edit_changes_keep_form_order() {
        let args = EditArgs {
            phone: Some("0200".to_owned()),
            name: Some("Acme".to_owned()),
            ..no_changes(1)
        };
        assert_eq!(
            args.changes(),
            vec![(MerchantField::Name, "Acme"), (MerchantField::Phone, "0200")]
        );
        assert!(no_changes(1).changes().is_empty());
    }

    #[test]
    fn cli_add_requires_all_fields() {
        assert!(Cli::try_parse_from(["merchant-admin", "add", "--name", "Acme"]).is_err());
    }

    #[test]
    fn cli_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["merchant-admin", "show", "abc"]).is_err());
    }

    // ── base URL resolution tests ────────────────────────────────────

    #[test]
    fn base_url_prefers_flag() {
        let url = resolve_base_url(
            Some("http://flag.test".to_owned()),
            Some("http://env.test".to_owned()),
        );
        assert_eq!(url, "http://flag.test");
    }

    #[test]
    fn base_url_falls_back_to_env_then_default() {
        assert_eq!(
            resolve_base_url(None, Some("http://env.test".to_owned())),
            "http://env.test"
        );
        assert_eq!(resolve_base_url(Some("  ".to_owned()), None), DEFAULT_BASE_URL);
        assert_eq!(resolve_base_url(None, None), DEFAULT_BASE_URL);
    }

    // ── confirm tests ────────────────────────────────────────────────

    #[test]
    fn confirm_accepts_yes_variants() {
        for answer in ["y\n", "Y\n", "yes\n", " YES \n"] {
            let mut sink = Vec::new();
            assert!(confirm(&mut answer.as_bytes(), &mut sink, "Delete?").unwrap());
        }
    }

    #[test]
    fn confirm_declines_everything_else() {
        for answer in ["\n", "n\n", "no\n", "sure\n", ""] {
            let mut sink = Vec::new();
            assert!(!confirm(&mut answer.as_bytes(), &mut sink, "Delete?").unwrap());
        }
    }

    #[test]
    fn confirm_writes_question() {
        let mut sink = Vec::new();
        let _answer = confirm(&mut "n\n".as_bytes(), &mut sink, "Delete Acme (BRN-1)?").unwrap();
        let written = String::from_utf8(sink).unwrap();
        assert!(written.starts_with("Delete Acme (BRN-1)?"));
    }

    // ── command tests ────────────────────────────────────────────────

    #[test]
    fn cmd_list_succeeds() {
        let dashboard = started();
        assert_eq!(cmd_list(&dashboard).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn cmd_list_empty_succeeds() {
        let mut dashboard = BlockingDashboard::new(InMemoryRepository::new());
        dashboard.start().unwrap();
        assert_eq!(cmd_list(&dashboard).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn cmd_show_fetches_by_id() {
        let dashboard = started();
        assert_eq!(cmd_show(&dashboard, MerchantId::new(1)).unwrap(), ExitCode::SUCCESS);
        assert_eq!(
            dashboard.repository().calls().unwrap(),
            vec![RepositoryCall::Fetch(MerchantId::new(1))]
        );
    }

    #[test]
    fn cmd_show_unknown_id_fails() {
        let dashboard = started();
        assert_eq!(cmd_show(&dashboard, MerchantId::new(99)).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn cmd_add_creates_and_reloads() {
        let mut dashboard = started();
        let args = AddArgs {
            name: "Gamma".to_owned(),
            brn: "BRN-9".to_owned(),
            email: "gamma@example.com".to_owned(),
            phone: "0244000009".to_owned(),
            status: Some(MerchantStatus::Suspended),
        };
        assert_eq!(cmd_add(&mut dashboard, args).unwrap(), ExitCode::SUCCESS);
        assert_eq!(dashboard.merchants().len(), 3);
        assert_eq!(dashboard.repository().call_count(Operation::Create).unwrap(), 1);
        assert_eq!(dashboard.repository().call_count(Operation::ListAll).unwrap(), 1);
        assert!(dashboard.form().draft().is_blank());
    }

    #[test]
    fn cmd_add_blank_field_fails_without_request() {
        let mut dashboard = started();
        let args = AddArgs {
            name: "Gamma".to_owned(),
            brn: "  ".to_owned(),
            email: "gamma@example.com".to_owned(),
            phone: "0244000009".to_owned(),
            status: None,
        };
        assert_eq!(cmd_add(&mut dashboard, args).unwrap(), ExitCode::FAILURE);
        assert!(dashboard.repository().calls().unwrap().is_empty());
    }

    #[test]
    fn cmd_edit_saves_changes() {
        let mut dashboard = started();
        let args = EditArgs {
            name: Some("Acme Holdings".to_owned()),
            status: Some(MerchantStatus::Suspended),
            ..no_changes(1)
        };
        assert_eq!(cmd_edit(&mut dashboard, &args).unwrap(), ExitCode::SUCCESS);
        let saved = dashboard.merchant(MerchantId::new(1)).unwrap();
        assert_eq!(saved.name, "Acme Holdings");
        assert_eq!(saved.status, MerchantStatus::Suspended);
        assert!(dashboard.edit_draft().is_none());
    }

    #[test]
    fn cmd_edit_without_changes_fails() {
        let mut dashboard = started();
        assert_eq!(cmd_edit(&mut dashboard, &no_changes(1)).unwrap(), ExitCode::FAILURE);
        assert!(dashboard.repository().calls().unwrap().is_empty());
    }

    #[test]
    fn cmd_edit_unknown_id_fails() {
        let mut dashboard = started();
        let args = EditArgs {
            phone: Some("0200".to_owned()),
            ..no_changes(42)
        };
        assert_eq!(cmd_edit(&mut dashboard, &args).unwrap(), ExitCode::FAILURE);
        assert!(dashboard.repository().calls().unwrap().is_empty());
    }

    #[test]
    fn cmd_edit_rejected_update_fails_and_closes_draft() {
        let mut dashboard = started();
        dashboard.repository().fail_next(Operation::Update).unwrap();
        let args = EditArgs {
            email: Some("new@example.com".to_owned()),
            ..no_changes(3)
        };
        assert_eq!(cmd_edit(&mut dashboard, &args).unwrap(), ExitCode::FAILURE);
        assert!(dashboard.edit_draft().is_none());
        assert_eq!(
            dashboard.merchant(MerchantId::new(3)).unwrap().email,
            "merchant3@example.com"
        );
    }

    #[test]
    fn cmd_delete_with_yes_skips_prompt() {
        let mut dashboard = started();
        let code = cmd_delete(&mut dashboard, MerchantId::new(3), true, &mut "".as_bytes()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(
            dashboard.repository().calls().unwrap(),
            vec![
                RepositoryCall::Remove(MerchantId::new(3)),
                RepositoryCall::ListAll
            ]
        );
        assert!(dashboard.merchant(MerchantId::new(3)).is_none());
    }

    #[test]
    fn cmd_delete_declined_sends_nothing() {
        let mut dashboard = started();
        let code =
            cmd_delete(&mut dashboard, MerchantId::new(1), false, &mut "n\n".as_bytes()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(dashboard.delete_target().is_none());
        assert!(dashboard.repository().calls().unwrap().is_empty());
    }

    #[test]
    fn cmd_delete_confirmed_at_prompt() {
        let mut dashboard = started();
        let code =
            cmd_delete(&mut dashboard, MerchantId::new(1), false, &mut "y\n".as_bytes()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(dashboard.merchants().len(), 1);
    }

    #[test]
    fn cmd_delete_unknown_id_fails() {
        let mut dashboard = started();
        let code =
            cmd_delete(&mut dashboard, MerchantId::new(5), true, &mut "".as_bytes()).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert!(dashboard.repository().calls().unwrap().is_empty());
    }

    // ── dispatch tests ───────────────────────────────────────────────

    #[test]
    fn dispatch_list() {
        let mut dashboard = BlockingDashboard::new(InMemoryRepository::with_merchants(vec![
            test_merchant(1, "Acme", MerchantStatus::Active),
        ]));
        let code = dispatch(&mut dashboard, Command::List, &mut "".as_bytes()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(dashboard.merchants().len(), 1);
    }

    #[test]
    fn dispatch_fails_when_initial_load_fails() {
        let repository = InMemoryRepository::new();
        repository.fail_next(Operation::ListAll).unwrap();
        let mut dashboard = BlockingDashboard::new(repository);
        let code = dispatch(&mut dashboard, Command::List, &mut "".as_bytes()).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn status_colors_follow_buckets() {
        assert_eq!(status_color(StatusStyle::classify("Active")), Color::Green);
        assert_eq!(status_color(StatusStyle::classify("Suspended")), Color::Red);
        assert_eq!(status_color(StatusStyle::classify("Review")), Color::Yellow);
    }
}
