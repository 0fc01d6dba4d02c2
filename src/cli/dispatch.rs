// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::path::Path;

use crate::config::FormcheckConfig;
use crate::dom::{ElementId, Event};
use crate::error::{FormError, Result};
use crate::page::{Page, PageReport, PageSpec};

use super::args::{CheckArgs, Cli, Commands, FillArgs, InitArgs, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        FormcheckConfig::load_from(config_path)?
    } else {
        FormcheckConfig::load()?
    };

    if let Some(locale) = cli.locale {
        tracing::debug!("Locale overridden to {:?}", locale);
        config.rules.locale = locale;
    }

    // Dispatch to the appropriate command handler
    match cli.command.clone() {
        Commands::Check(args) => run_check(&cli, &config, args),
        Commands::Fill(args) => run_fill(&config, args),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

fn load_page(path: &Path, config: &FormcheckConfig) -> Result<Page> {
    let spec = PageSpec::load(path)?;
    Page::from_spec(&spec, config)
}

/// A form id that must name a form with fields.
fn wired_form(page: &Page, id: &str) -> Result<ElementId> {
    let form = page.element_by_id(id)?;
    if page.engine().is_wired(form) {
        Ok(form)
    } else {
        Err(FormError::WithContext {
            context: id.to_string(),
            message: "not a form with fields to validate".to_string(),
        })
    }
}

/// Run the check command.
fn run_check(cli: &Cli, config: &FormcheckConfig, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let mut page = load_page(&args.page, config)?;

    for (id, value) in &args.set {
        let field = page.field_by_id(id)?;
        page.type_into(field, value);
    }

    let report = match args.form.as_deref() {
        Some(id) => {
            let form = wired_form(&page, id)?;
            PageReport {
                forms: page.form_report(form).into_iter().collect(),
            }
        }
        None => page.report(),
    };

    report.print(cli.format);
    if cli.format != Some(OutputFormat::Json) {
        println!("{}", style(report.summary()).dim());
    }

    let blocked = report.blocked().count();
    if args.fail_on_invalid && blocked > 0 {
        Err(FormError::InvalidForms { count: blocked })
    } else {
        Ok(())
    }
}

/// Run the fill command.
fn run_fill(config: &FormcheckConfig, args: FillArgs) -> Result<()> {
    tracing::debug!("Running fill command with args: {:?}", args);

    let mut page = load_page(&args.page, config)?;
    let form = wired_form(&page, &args.form)?;

    if let Some(popup) = page.popup_of(form) {
        page.open_form_modal(popup, form, false);
    }

    let fields = page
        .engine()
        .wired_form(form)
        .map(|wired| wired.fields.clone())
        .unwrap_or_default();

    let theme = ColorfulTheme::default();
    for field in fields {
        let element = page.document().element(field);
        let prompt = element
            .attribute("placeholder")
            .or(element.id.as_deref())
            .unwrap_or("Field")
            .to_string();
        let id = element.id.clone();
        let current = element.value.clone();

        let value: String = Input::with_theme(&theme)
            .with_prompt(prompt)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?;

        page.type_into(field, &value);

        if let Some(field_report) = page
            .form_report(form)
            .and_then(|report| report.fields.into_iter().find(|f| f.id == id))
        {
            println!("  {}", field_report.format());
        }
    }

    let Some(report) = page.form_report(form) else {
        return Ok(());
    };

    println!();
    println!("{}", report.format());

    if !report.can_submit() {
        return Err(FormError::InvalidForms { count: 1 });
    }

    let submit = Confirm::with_theme(&theme)
        .with_prompt("Submit this form?")
        .default(true)
        .interact()?;

    if !submit {
        return Err(FormError::Cancelled);
    }

    let outcome = page.dispatch(&Event::Submit { form });
    if outcome.default_prevented {
        println!("{} Submitted without leaving the page", style("✓").green().bold());
    }

    if let Some(popup) = page.popup_of(form) {
        page.close_modal(popup);
        tracing::debug!("Closed popup {} after submit", popup);
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("formcheck {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::{example_config, example_page};

    tracing::debug!("Running init command with args: {:?}", args);

    let dir = args.dir.unwrap_or_else(|| Path::new(".").to_path_buf());
    std::fs::create_dir_all(&dir)?;
    let files = [
        (dir.join("formcheck.toml"), example_config()),
        (dir.join("page.toml"), example_page()),
    ];

    if !args.force {
        if let Some((path, _)) = files.iter().find(|(path, _)| path.exists()) {
            return Err(FormError::WithContext {
                context: "init".to_string(),
                message: format!(
                    "{} already exists. Use --force to overwrite.",
                    path.display()
                ),
            });
        }
    }

    for (path, content) in &files {
        std::fs::write(path, content).map_err(|e| FormError::WithContext {
            context: "init".to_string(),
            message: format!("Failed to write {}: {}", path.display(), e),
        })?;
        println!("✓ Created {}", path.display());
    }

    Ok(())
}
