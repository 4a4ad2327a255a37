//! Command-line front end.
//!
//! Each subcommand opens the file-backed store, performs one operation and
//! prints the outcome in the configured locale.

use std::io::Write;

use anyhow::{Context, Result, bail};

use crate::config::{Command, Config, EmployeeArgs};
use crate::error::FormError;
use crate::form::EmployeeForm;
use crate::i18n::Localizer;
use crate::model::{Employee, Field};
use crate::pagination::Pagination;
use crate::store::{EmployeeStore, FileStorage, KeyValueStorage};
use crate::validation::{ErrorMap, Validator};

/// Parse arguments, set up logging and run the requested command
pub fn run() -> Result<()> {
    let (config, command) = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let mut out = std::io::stdout().lock();
    execute(&config, command, &mut out)
}

/// Run `command` against the store in `config.data_dir`, writing to `out`
pub fn execute<W: Write>(config: &Config, command: Command, out: &mut W) -> Result<()> {
    log::debug!("Using data directory {}", config.data_dir.display());
    let localizer = Localizer::new(config.locale);
    let mut store = EmployeeStore::open(FileStorage::new(&config.data_dir));
    let validator = Validator::new(&localizer);

    match command {
        Command::List {
            page,
            page_size,
            view,
            json,
        } => {
            let size = page_size.unwrap_or_else(|| match view {
                Some(view) => config.page_sizes.for_view(view),
                None => config.page_sizes.default,
            });
            let mut pagination = Pagination::new(size, store.len());
            pagination.set_page(page);
            let rows = pagination.slice(store.employees());

            if json {
                let body = serde_json::json!({
                    "employees": rows,
                    "pagination": pagination,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            } else {
                print_table(out, &localizer, rows, &pagination)?;
            }
        }
        Command::Show { id } => {
            let Some(employee) = store.get_by_id(&id) else {
                bail!("{}: {}", localizer.t("employeeNotFound"), id);
            };
            writeln!(out, "{}", serde_json::to_string_pretty(employee)?)?;
        }
        Command::Add(fields) => {
            let mut form = EmployeeForm::add();
            fill(&mut form, &fields, &validator);
            submit(out, &localizer, &mut form, &mut store, &validator)?;
        }
        Command::Update { id, fields } => {
            let Some(mut form) = EmployeeForm::load(&store, &id) else {
                bail!("{}: {}", localizer.t("employeeNotFound"), id);
            };
            fill(&mut form, &fields, &validator);
            submit(out, &localizer, &mut form, &mut store, &validator)?;
        }
        Command::Delete { ids } => {
            let names: Vec<String> = ids
                .iter()
                .filter_map(|id| store.get_by_id(id).map(Employee::display_name))
                .collect();
            let deleted = store.delete_employees(&ids);

            match deleted {
                0 => bail!("{}: {}", localizer.t("employeeNotFound"), ids.join(", ")),
                1 if ids.len() == 1 => {
                    writeln!(out, "{}: {}", localizer.t("recordDeleted"), names.join(""))?
                }
                n => writeln!(out, "{} ({})", localizer.t("recordsDeleted"), n)?,
            }
        }
        Command::Validate { field, fields } => {
            let result = match field {
                Some(name) => {
                    let field: Field = name.parse()?;
                    let value = fields
                        .values()
                        .into_iter()
                        .find(|(f, _)| *f == field)
                        .map(|(_, v)| v);
                    serde_json::to_value(validator.validate_field(field, value))?
                }
                None => serde_json::to_value(validator.validate_form(&fields.to_draft()))?,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        }
    }

    out.flush().context("flushing output")?;
    Ok(())
}

fn fill(form: &mut EmployeeForm, fields: &EmployeeArgs, validator: &Validator<'_, Localizer>) {
    for (field, value) in fields.values() {
        form.set_field(field, value, validator);
    }
}

fn submit<W: Write, S: KeyValueStorage>(
    out: &mut W,
    localizer: &Localizer,
    form: &mut EmployeeForm,
    store: &mut EmployeeStore<S>,
    validator: &Validator<'_, Localizer>,
) -> Result<()> {
    match form.submit(store, validator) {
        Ok(saved) => {
            writeln!(out, "{}", saved.message(localizer))?;
            Ok(())
        }
        Err(FormError::Invalid(errors)) => {
            print_errors(out, localizer, &errors)?;
            bail!(localizer.t("pleaseFixErrors"));
        }
        Err(FormError::NotFound(id)) => {
            bail!("{}: {}", localizer.t("employeeNotFound"), id)
        }
    }
}

fn print_errors<W: Write>(out: &mut W, localizer: &Localizer, errors: &ErrorMap) -> Result<()> {
    for (field, messages) in errors {
        for message in messages {
            writeln!(out, "{}: {}", localizer.t(field.as_str()), message)?;
        }
    }
    Ok(())
}

fn print_table<W: Write>(
    out: &mut W,
    localizer: &Localizer,
    rows: &[Employee],
    pagination: &Pagination,
) -> Result<()> {
    writeln!(out, "{}", localizer.t("employeeList"))?;
    if rows.is_empty() {
        writeln!(out, "{}", localizer.t("noEmployees"))?;
        return Ok(());
    }

    let header: Vec<String> = std::iter::once(localizer.t("id"))
        .chain(Field::ALL.iter().map(|f| localizer.t(f.as_str())))
        .collect();
    writeln!(out, "{}", header.join(" | "))?;

    for row in rows {
        let cells: Vec<String> = std::iter::once(row.id.clone())
            .chain(Field::ALL.iter().map(|f| match f {
                Field::Position => localizer.t(row.get(*f)),
                _ => row.get(*f).to_string(),
            }))
            .collect();
        writeln!(out, "{}", cells.join(" | "))?;
    }

    writeln!(
        out,
        "{} {}/{}",
        localizer.t("page"),
        pagination.page(),
        pagination.total_pages()
    )?;
    Ok(())
}
