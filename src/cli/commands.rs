//! Command dispatch: maps parsed arguments onto application calls

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::DemoService;
use crate::application::{ApplicationError, IoResultExt, Reference};
use crate::cli::args::{Cli, Commands, ConfigCommands, OperationArg, TypeArg};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Object, ParentBehavior, TypeTag};

/// Execute the parsed command, writing results to stdout.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    execute_command_with(cli, &mut io::stdout())
}

/// Execute the parsed command, writing results to `out`.
pub fn execute_command_with(cli: &Cli, out: &mut dyn Write) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    let global_config = cli.config_file.clone().or_else(global_config_path);

    match &cli.command {
        None => cmd_demo(&project_dir, global_config.as_deref(), None, None, out),
        Some(Commands::Demo {
            explain,
            no_explain,
            check,
            no_check,
        }) => cmd_demo(
            &project_dir,
            global_config.as_deref(),
            flag(*explain, *no_explain),
            flag(*check, *no_check),
            out,
        ),
        Some(Commands::Call {
            operation,
            dynamic,
            declared,
        }) => cmd_call(*operation, *dynamic, declared.unwrap_or(*dynamic), out),
        Some(Commands::Is { dynamic, target }) => cmd_is(*dynamic, *target, out),
        Some(Commands::Cast { dynamic, to }) => cmd_cast(*dynamic, *to, out),
        Some(Commands::Config { command }) => {
            cmd_config(command, &project_dir, global_config.as_deref(), out)
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "dispatch-demo", out);
            Ok(())
        }
    }
}

/// `--x` / `--no-x` pair; `None` when neither was given.
fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(dir) => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        None => Ok(std::env::current_dir().with_context("resolve current directory")?),
    }
}

#[instrument(skip(out))]
fn cmd_demo(
    project_dir: &Path,
    global_config: Option<&Path>,
    explain: Option<bool>,
    check: Option<bool>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let settings =
        Settings::load_layers(global_config, Some(project_dir))?.with_overrides(explain, check);
    debug!("settings: {:?}", settings);

    let service = DemoService::new(settings.check);
    let report = service.run_with(out, |step, sink| {
        if settings.explain {
            output::header(sink, step)?;
        }
        Ok(())
    })?;

    if settings.check {
        output::success(&format!("{} lines matched", report.lines));
    }
    Ok(())
}

/// A `Child` declaration over a `Parent` instance is treated as a narrowing
/// and fails the same way.
#[instrument(skip(out))]
fn cmd_call(
    operation: OperationArg,
    dynamic: TypeArg,
    declared: TypeArg,
    out: &mut dyn Write,
) -> CliResult<()> {
    let reference =
        Reference::bind(dynamic.into(), declared.into()).map_err(ApplicationError::from)?;
    reference.invoke(operation.into(), out)?;
    Ok(())
}

#[instrument(skip(out))]
fn cmd_is(dynamic: TypeArg, target: TypeArg, out: &mut dyn Write) -> CliResult<()> {
    let object = Object::new(dynamic.into());
    let result = object.is_instance_of(target.into());
    writeln!(out, "{}", result).with_context("write result")?;
    Ok(())
}

#[instrument(skip(out))]
fn cmd_cast(dynamic: TypeArg, to: TypeArg, out: &mut dyn Write) -> CliResult<()> {
    let dynamic: TypeTag = dynamic.into();
    let reference = Reference::bind(dynamic, dynamic).map_err(ApplicationError::from)?;
    let converted = match TypeTag::from(to) {
        TypeTag::Parent => reference.upcast(),
        TypeTag::Child => reference.narrow().map_err(ApplicationError::from)?,
    };
    writeln!(out, "{} -> {}: ok", converted.dynamic(), converted.declared())
        .with_context("write result")?;
    Ok(())
}

fn cmd_config(
    command: &ConfigCommands,
    project_dir: &Path,
    global_config: Option<&Path>,
    out: &mut dyn Write,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load_layers(global_config, Some(project_dir))?;
            write!(out, "{}", settings.to_toml()?).with_context("write config")?;
        }
        ConfigCommands::Path => {
            match global_config {
                Some(path) => output::action(out, "global", &path.display()),
                None => output::action(out, "global", "(unavailable)"),
            }
            .with_context("write config path")?;
            output::action(out, "local", &local_config_path(project_dir).display())
                .with_context("write config path")?;
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config.map(Path::to_path_buf).ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".into())
                })?
            } else {
                local_config_path(project_dir)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context("create config directory")?;
            }
            std::fs::write(&path, Settings::template()).with_context("write config template")?;
            output::success(&format!("Created {}", path.display()));
        }
    }
    Ok(())
}
