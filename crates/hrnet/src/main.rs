//! `hrnet` - CLI for employee records
//!
//! This binary drives the create-employee form and the employee table from
//! the command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, warn};

use hrnet::cli::{
    Cli, Command, ConfigCommand, CreateCommand, ListCommand, OptionList, OptionsCommand,
    OutputFormat,
};
use hrnet::data::employee_columns;
use hrnet::form::CONFIRMATION_MESSAGE;
use hrnet::shell::render_header;
use hrnet::table::render::{render_plain, render_table};
use hrnet::table::{SortDirection, SortState};
use hrnet::widgets::date_input::format_external;
use hrnet::widgets::{DateInput, SearchableSelect};
use hrnet::{
    init_logging, Config, DataTable, EmployeeForm, EmployeeStore, Field, PageSize, Route, Storage,
    SubmitOutcome,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    // Execute the command
    match cli.command {
        Command::Create(create_cmd) => handle_create(&config, &create_cmd),
        Command::List(list_cmd) => {
            let store = open_store(&config)?;
            handle_list(&config, &store, &list_cmd)
        }
        Command::Open(open_cmd) => {
            let route: Route = open_cmd.path.parse()?;
            handle_open(&config, route)
        }
        Command::Options(options_cmd) => {
            handle_options(&config, &options_cmd);
            Ok(())
        }
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<EmployeeStore<Storage>> {
    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;
    Ok(EmployeeStore::load(storage, config.storage.key.clone()))
}

fn handle_create(config: &Config, cmd: &CreateCommand) -> anyhow::Result<()> {
    let mut form = EmployeeForm::new(config.form_options());

    for field in Field::ALL {
        if let Some(text) = cmd.value(field) {
            if let Err(e) = form.set_text(field, text) {
                debug!(field = %field, error = %e, "Input rejected");
            }
        }
    }

    let mut store = open_store(config)?;
    match form.submit(&mut store) {
        SubmitOutcome::Created(employee) => {
            println!("{}", render_header(Route::CreateEmployee));
            println!("{CONFIRMATION_MESSAGE}");
            println!();
            println!("  Id:          {}", employee.id);
            println!("  Name:        {}", employee.full_name());
            println!("  Department:  {}", employee.get(Field::Department));
            println!("  Start date:  {}", employee.get(Field::StartDate));
            form.close_confirmation();
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => {
            for (field, message) in &errors {
                eprintln!("{:<14} {message}", format!("{}:", field.label()));
            }
            bail!("employee not created: {} invalid field(s)", errors.len())
        }
    }
}

fn handle_list(
    config: &Config,
    store: &EmployeeStore<Storage>,
    cmd: &ListCommand,
) -> anyhow::Result<()> {
    let page_size = match cmd.page_size {
        Some(rows) => PageSize::try_from(rows)?,
        None => config.page_size(),
    };

    let mut table = DataTable::new(store.employees(), employee_columns()).with_page_size(page_size);
    if let Some(query) = &cmd.search {
        table.set_global_filter(query.as_str());
    }
    if let Some(column) = &cmd.sort {
        let direction = if cmd.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        table.set_sort(Some(SortState {
            column: column.clone(),
            direction,
        }))?;
    }
    table.set_page(cmd.page.saturating_sub(1));
    if cmd.page > table.page_count().max(1) {
        warn!(
            requested = cmd.page,
            pages = table.page_count(),
            "Page out of range, showing last page"
        );
    }

    let view = table.view();
    debug!(
        total = view.total_rows,
        matching = view.filtered_rows,
        page = view.page_index + 1,
        "Rendering employee table"
    );

    match cmd.format {
        OutputFormat::Json => {
            let employees: Vec<_> = view
                .row_indices
                .iter()
                .map(|&i| &store.employees()[i])
                .collect();
            println!("{}", serde_json::to_string_pretty(&employees)?);
        }
        OutputFormat::Plain => print!("{}", render_plain(&view)),
        OutputFormat::Table => {
            println!("{}", render_header(Route::EmployeeList));
            print!("{}", render_table(&view));
            if store.is_empty() {
                println!();
                println!("Add an employee with `hrnet create`.");
            }
        }
    }
    Ok(())
}

fn handle_open(config: &Config, route: Route) -> anyhow::Result<()> {
    match route {
        Route::CreateEmployee => {
            let form = EmployeeForm::new(config.form_options());
            println!("{}", render_header(route));
            for field in Field::ALL {
                println!("  {:<15} {}", field.label(), field_hint(&form, field));
            }
            println!();
            println!("Submit with `hrnet create --first-name .. --department ..`.");
            Ok(())
        }
        Route::EmployeeList => {
            let store = open_store(config)?;
            let cmd = ListCommand {
                search: None,
                sort: None,
                desc: false,
                page: 1,
                page_size: None,
                format: OutputFormat::Table,
            };
            handle_list(config, &store, &cmd)
        }
    }
}

fn field_hint(form: &EmployeeForm, field: Field) -> String {
    match field {
        Field::DateOfBirth => date_hint(&EmployeeForm::date_of_birth_input()),
        Field::StartDate => date_hint(&EmployeeForm::start_date_input()),
        Field::State => select_hint(&form.state_select()),
        Field::Department => select_hint(&form.department_select()),
        Field::ZipCode => "12345 or 12345-6789".to_string(),
        _ => String::new(),
    }
}

fn date_hint(input: &DateInput) -> String {
    match input.max() {
        Some(max) => format!("MM/DD/YYYY, on or before {}", format_external(max)),
        None => "MM/DD/YYYY".to_string(),
    }
}

fn select_hint(select: &SearchableSelect) -> String {
    format!("{} ({} options)", select.display_value(), select.options().len())
}

fn handle_options(config: &Config, cmd: &OptionsCommand) {
    let form = EmployeeForm::new(config.form_options());
    let mut select = match cmd.list {
        OptionList::States => form.state_select(),
        OptionList::Departments => form.department_select(),
    };

    select.open();
    if let Some(filter) = &cmd.filter {
        select.set_filter(filter.as_str());
        if select.filter().is_empty() {
            warn!(list = ?cmd.list, "This list is not searchable, ignoring filter");
        }
    }

    let visible = select.visible_options();
    if visible.is_empty() {
        println!("No options");
        return;
    }
    for option in visible {
        if option.label == option.value {
            println!("{}", option.label);
        } else {
            println!("{} ({})", option.label, option.value);
        }
    }
    select.press_escape();
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let stats = store.backend().stats()?;
    let keys = store.backend().keys()?;

    if json {
        let status = serde_json::json!({
            "database_path": store.backend().path(),
            "storage_key": store.key(),
            "employees": store.len(),
            "total_keys": stats.total_keys,
            "keys": keys,
            "total_bytes": stats.total_bytes,
            "last_write": stats.last_write,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("hrnet status");
        println!("------------");
        println!("Database:      {}", store.backend().path().display());
        println!("Storage key:   {}", store.key());
        println!("Employees:     {}", store.len());
        println!("Keys stored:   {} ({})", stats.total_keys, keys.join(", "));
        println!("Payload bytes: {}", stats.total_bytes);
        println!("Database size: {} bytes", stats.db_size_bytes);
        match stats.last_write {
            Some(at) => println!("Last write:    {}", at.to_rfc3339()),
            None => println!("Last write:    never"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!("  Key:            {}", config.storage.key);
                println!();
                println!("[Table]");
                println!("  Page size:      {}", config.page_size());
                println!();
                println!("[Options]");
                println!(
                    "  States:         {} ({})",
                    config.state_options().len(),
                    source(config.options.states.is_some())
                );
                println!(
                    "  Departments:    {} ({})",
                    config.department_options().len(),
                    source(config.options.departments.is_some())
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn source(configured: bool) -> &'static str {
    if configured {
        "configured"
    } else {
        "built in"
    }
}
