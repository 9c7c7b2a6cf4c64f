//! Command execution logic

use std::io::Write;

use clap::CommandFactory;
use tracing::instrument;

use crate::application::services::FillOutcome;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::domain::{Form, FormPatch};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Execute the parsed command against the service container.
pub fn execute_command(cli: Cli, container: &ServiceContainer) -> CliResult<()> {
    match cli.command {
        Some(Commands::New {
            title,
            description,
            multi_step,
        }) => new_form(container, title, description, multi_step),
        Some(Commands::List) => list_forms(container),
        Some(Commands::Show { form_id }) => show_form(container, &form_id),
        Some(Commands::Export { form_id, output }) => {
            export_form(container, &form_id, output.as_deref())
        }
        Some(Commands::Import { file }) => import_form(container, &file),
        Some(Commands::Share { form_id }) => share_form(container, &form_id),
        Some(Commands::Fill { form_id, data }) => fill_form(container, &form_id, &data),
        Some(Commands::Submissions { form }) => list_submissions(container, form.as_deref()),
        Some(Commands::Delete { form_id }) => delete_form(container, &form_id),
        Some(Commands::Config { command }) => config_command(container, command),
        Some(Commands::Completion { shell }) => {
            generate_completion(shell);
            Ok(())
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| CliError::InvalidArgs(e.to_string()))?;
            Ok(())
        }
    }
}

#[instrument(skip(container))]
fn new_form(
    container: &ServiceContainer,
    title: Option<String>,
    description: Option<String>,
    multi_step: bool,
) -> CliResult<()> {
    let mut form = Form::new();
    form.update(FormPatch {
        title,
        description,
        ..Default::default()
    });
    if multi_step {
        form.set_multi_step(true);
    }
    let id = container.forms.save(&form)?;
    output::success(&format!("Created form '{}'", form.title));
    output::detail(&format!("id: {}", id));
    Ok(())
}

fn list_forms(container: &ServiceContainer) -> CliResult<()> {
    let summaries = container.forms.list()?;
    if summaries.is_empty() {
        output::info("No forms saved.");
        return Ok(());
    }
    output::header(&format!("Forms ({})", summaries.len()));
    for summary in summaries {
        let shape = if summary.is_multi_step {
            "multi-step"
        } else {
            "single-step"
        };
        output::detail(&format!(
            "{}  {} ({} fields, {})",
            summary.id, summary.title, summary.field_count, shape
        ));
    }
    Ok(())
}

fn show_form(container: &ServiceContainer, form_id: &str) -> CliResult<()> {
    let form = container.forms.load(form_id)?;

    output::header(&form.title);
    if let Some(description) = &form.description {
        output::info(description);
    }
    output::detail(&format!("id: {}", form.id));
    output::detail(&format!(
        "submit button: '{}', progress bar: {}",
        form.settings.submit_text, form.settings.show_progress_bar
    ));
    if let Some(url) = &form.settings.redirect_url {
        output::detail(&format!("redirect: {}", url));
    }
    println!();

    for step_index in 0..form.total_steps() {
        if form.is_multi_step {
            let label = form
                .steps
                .get(step_index)
                .map(|s| s.title.as_str())
                .unwrap_or("(unnamed)");
            output::header(&format!("Step {}: {}", step_index + 1, label));
        }
        for field in form.fields_for_step(step_index) {
            let required = if field.required { " (required)" } else { "" };
            output::detail(&format!(
                "[{}] {}{}",
                field.field_type.name(),
                field.label,
                required
            ));
            if let Some(options) = &field.options {
                output::detail(&format!("    options: {}", options.join(", ")));
            }
        }
    }
    Ok(())
}

fn export_form(
    container: &ServiceContainer,
    form_id: &str,
    out: Option<&std::path::Path>,
) -> CliResult<()> {
    let form = container.forms.load(form_id)?;
    match out {
        Some(path) => {
            container.forms.export_file(&form, path)?;
            output::action("Exported", &path.display());
        }
        None => {
            let json = container.forms.export_json(&form)?;
            output::info(&json);
        }
    }
    Ok(())
}

fn import_form(container: &ServiceContainer, file: &std::path::Path) -> CliResult<()> {
    let form = container.forms.import_file(file)?;
    let id = container.forms.save(&form)?;
    output::success(&format!("Imported form '{}'", form.title));
    output::detail(&format!("id: {}", id));
    Ok(())
}

fn share_form(container: &ServiceContainer, form_id: &str) -> CliResult<()> {
    // Share links are derivable for unsaved ids too; loading first keeps
    // the command honest about what can actually be filled.
    let form = container.forms.load(form_id)?;
    let link = container
        .forms
        .share_link(&container.settings.origin, &form.id);
    output::info(&link);
    Ok(())
}

#[instrument(skip(container))]
fn fill_form(
    container: &ServiceContainer,
    form_id: &str,
    data: &std::path::Path,
) -> CliResult<()> {
    let form = container.forms.load(form_id)?;
    let json = std::fs::read_to_string(data)
        .map_err(|e| InfraError::io(format!("read answers file {}", data.display()), e))?;
    let answers = serde_json::from_str(&json).map_err(|e| {
        CliError::InvalidArgs(format!("answers must be a JSON object of field values: {}", e))
    })?;

    match container.submissions.submit_answers(&form, &answers)? {
        FillOutcome::Submitted(record) => {
            output::success(&format!("Submitted '{}'", record.title));
            output::detail(&format!("submission id: {}", record.id));
            Ok(())
        }
        FillOutcome::Blocked { step, errors } => {
            output::warning(&format!(
                "Validation failed on step {} of {}",
                step + 1,
                form.total_steps()
            ));
            for (field_id, failure) in &errors {
                let label = form
                    .field(field_id)
                    .map(|f| f.label.as_str())
                    .unwrap_or(field_id.as_str());
                output::failure(&format!("{}: {}", label, failure.message));
            }
            Err(CliError::ValidationFailed(errors.len()))
        }
    }
}

fn list_submissions(container: &ServiceContainer, form_id: Option<&str>) -> CliResult<()> {
    let records = container.submissions.list(form_id)?;
    if records.is_empty() {
        output::info("No submissions recorded.");
        return Ok(());
    }
    output::header(&format!("Submissions ({})", records.len()));
    for record in records {
        output::detail(&format!(
            "{}  {}  '{}' ({} answers)",
            record.submitted_at.to_rfc3339(),
            record.form_id,
            record.title,
            record.data.len()
        ));
    }
    Ok(())
}

fn delete_form(container: &ServiceContainer, form_id: &str) -> CliResult<()> {
    container.forms.delete(form_id)?;
    output::action("Deleted", &form_id);
    Ok(())
}

fn config_command(container: &ServiceContainer, command: ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let toml = container.settings.to_toml()?;
            output::info(&toml);
            Ok(())
        }
        ConfigCommands::Init => init_config(),
        ConfigCommands::Path => {
            match crate::config::global_config_path() {
                Some(path) => {
                    let status = if path.exists() { "exists" } else { "not created" };
                    output::info(&format!("{} ({})", path.display(), status));
                }
                None => output::warning("no home directory; global config unavailable"),
            }
            Ok(())
        }
    }
}

fn init_config() -> CliResult<()> {
    let path = crate::config::global_config_path().ok_or_else(|| {
        CliError::InvalidArgs("no home directory; cannot place global config".to_string())
    })?;
    if path.exists() {
        output::warning(&format!("config already exists at {}", path.display()));
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
    }
    std::fs::write(&path, crate::config::Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    output::action("Created", &path.display());
    Ok(())
}

fn generate_completion(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    let _ = std::io::stdout().flush();
}
