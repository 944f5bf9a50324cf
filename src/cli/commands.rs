//! Command dispatch: one handler per subcommand

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::session::Session;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings, TextLoadPolicy};
use crate::domain::Forest;
use crate::infrastructure::ServiceContainer;

/// Directory searched for `.forestry.toml`: `--dir` or the working directory.
fn local_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().map_err(|e| {
            CliError::from(ApplicationError::ResourceUnavailable {
                context: "read current directory".into(),
                source: e,
            })
        }),
    }
}

/// Build the service container for a command line.
///
/// `--dir` selects both the local config directory and the snapshot directory.
pub fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let mut settings = Settings::load(Some(&local_dir(cli)?))?;
    if let Some(dir) = &cli.dir {
        settings.snapshot_dir = dir.clone();
    }
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `forestry --help`".into(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let container = build_container(cli)?;
    match command {
        Commands::New { name, random } => cmd_new(&container, name, *random),
        Commands::Import {
            name,
            file,
            partial,
        } => cmd_import(&container, name, file, *partial),
        Commands::Show { name } => cmd_show(&container, name),
        Commands::Add { name, count } => cmd_add(&container, name, *count),
        Commands::Cut { name, index } => cmd_cut(&container, name, *index),
        Commands::Grow { name, years } => cmd_grow(&container, name, *years),
        Commands::Reap { name, height } => cmd_reap(&container, name, *height),
        Commands::Export { name, file } => cmd_export(&container, name, file),
        Commands::Shell { name } => cmd_shell(&container, name),
        Commands::Config { command } => cmd_config(&container, &local_dir(cli)?, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn save(container: &ServiceContainer, forest: &Forest) -> CliResult<()> {
    let path = container.forests.save_snapshot(forest)?;
    output::action("Saved", &path.display());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_new(container: &ServiceContainer, name: &str, random: usize) -> CliResult<()> {
    let mut forest = Forest::new(name);
    let mut rng = rand::thread_rng();
    for _ in 0..random {
        forest.add_random_tree(&mut rng);
    }
    save(container, &forest)?;
    output::success(&format!("Created forest '{}' with {} trees", name, forest.len()));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_import(
    container: &ServiceContainer,
    name: &str,
    file: &Path,
    partial: bool,
) -> CliResult<()> {
    let policy = if partial {
        TextLoadPolicy::Partial
    } else {
        container.settings.text_load
    };
    let mut forest = container.forests.open_or_new(name)?;
    let before = forest.len();

    let result = container.forests.load_text_with(&mut forest, file, policy);
    if let Err(e) = result {
        if forest.len() > before {
            output::warning(&format!(
                "kept {} trees read before the error",
                forest.len() - before
            ));
            save(container, &forest)?;
        }
        return Err(e.into());
    }

    save(container, &forest)?;
    output::success(&format!(
        "Imported {} trees into '{}'",
        forest.len() - before,
        name
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, name: &str) -> CliResult<()> {
    let forest = container.forests.open(name)?;
    output::report(&forest);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_add(container: &ServiceContainer, name: &str, count: usize) -> CliResult<()> {
    let mut forest = container.forests.open_or_new(name)?;
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let tree = forest.add_random_tree(&mut rng);
        output::action("Planted", tree);
    }
    save(container, &forest)
}

#[instrument(skip(container))]
fn cmd_cut(container: &ServiceContainer, name: &str, index: usize) -> CliResult<()> {
    let mut forest = container.forests.open(name)?;
    let tree = forest.remove_at(index)?;
    output::action("Cut down", &tree);
    save(container, &forest)
}

#[instrument(skip(container))]
fn cmd_grow(container: &ServiceContainer, name: &str, years: u32) -> CliResult<()> {
    let mut forest = container.forests.open(name)?;
    for _ in 0..years {
        forest.simulate_year();
    }
    output::success(&format!(
        "Simulated {} years, average height now {:?}",
        years,
        forest.average_height()
    ));
    save(container, &forest)
}

#[instrument(skip(container))]
fn cmd_reap(container: &ServiceContainer, name: &str, height: f64) -> CliResult<()> {
    if height.is_nan() {
        return Err(CliError::InvalidArgs("height must be a number".into()));
    }
    let mut forest = container.forests.open(name)?;
    let reapings = forest.reap_and_replace(height, &mut rand::thread_rng());
    for reaping in &reapings {
        output::reaping(reaping);
    }
    if reapings.is_empty() {
        output::info(&format!("No tree is taller than {}", height));
    }
    save(container, &forest)
}

#[instrument(skip(container))]
fn cmd_export(container: &ServiceContainer, name: &str, file: &Path) -> CliResult<()> {
    let forest = container.forests.open(name)?;
    let count = container.forests.export_text(&forest, file)?;
    output::action(
        "Exported",
        &format!("{} trees to {}", count, file.display()),
    );
    Ok(())
}

#[instrument(skip(container))]
fn cmd_shell(container: &ServiceContainer, name: &str) -> CliResult<()> {
    let forest = container.forests.open_or_new(name)?;
    let mut session = Session::new(&container.forests, forest, rand::thread_rng());
    let stdin = io::stdin();
    session
        .run(stdin.lock(), &mut io::stdout())
        .map_err(|e| ApplicationError::ResourceUnavailable {
            context: "terminal session".into(),
            source: e,
        })?;
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    local_dir: &Path,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "<no config directory>"),
            }
            output::action("local", &local_config_path(local_dir).display());
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
