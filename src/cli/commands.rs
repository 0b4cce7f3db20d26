//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, OrderArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{render, write_ascii, BinaryTree, RenderStyle};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = resolve_settings(cli)?;
    match &cli.command {
        Commands::Show { file, style } => {
            _show(file, &settings, style.map(Into::into).unwrap_or(settings.style))
        }
        Commands::Traverse { file, order } => _traverse(file, &settings, *order),
        Commands::Height { file } => _height(file, &settings),
        Commands::Info { file } => _info(file, &settings),
        Commands::Encode { file, output } => _encode(file, &settings, output.as_deref()),
        Commands::Config => _config(&settings),
        Commands::Completion { shell } => _completion(*shell),
    }
}

/// Settings from config layers, with command-line flags on top.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(truncation) = cli.truncation {
        settings.truncation = truncation.into();
    }
    if let Some(trailing) = cli.trailing {
        settings.trailing = trailing.into();
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(level = "debug")]
pub fn load_tree(file: &Path, settings: &Settings) -> CliResult<BinaryTree> {
    let mut tree = BinaryTree::new();
    tree.build_from_path(file, &settings.build_options())?;
    Ok(tree)
}

#[instrument]
fn _show(file: &Path, settings: &Settings, style: RenderStyle) -> CliResult<()> {
    let tree = load_tree(file, settings)?;
    match style {
        RenderStyle::Ascii => {
            let mut stdout = io::stdout().lock();
            write_ascii(&tree, &mut stdout).map_err(|e| CliError::io("write stdout", e))?;
        }
        RenderStyle::Unicode => print!("{}", render(&tree, style)),
    }
    Ok(())
}

#[instrument]
fn _traverse(file: &Path, settings: &Settings, order: OrderArg) -> CliResult<()> {
    let tree = load_tree(file, settings)?;
    match order {
        OrderArg::All => {
            for traversal in order.traversals() {
                output::action(traversal.label(), &output::format_keys(&tree.traverse(traversal)));
            }
        }
        _ => {
            for traversal in order.traversals() {
                output::info(&output::format_keys(&tree.traverse(traversal)));
            }
        }
    }
    Ok(())
}

#[instrument]
fn _height(file: &Path, settings: &Settings) -> CliResult<()> {
    let tree = load_tree(file, settings)?;
    output::info(&tree.height());
    Ok(())
}

#[instrument]
fn _info(file: &Path, settings: &Settings) -> CliResult<()> {
    let tree = load_tree(file, settings)?;
    output::header(&file.display());
    output::detail(&format!("empty:  {}", tree.is_empty()));
    output::detail(&format!("nodes:  {}", tree.len()));
    output::detail(&format!("height: {}", tree.height()));
    Ok(())
}

#[instrument]
fn _encode(file: &Path, settings: &Settings, target: Option<&Path>) -> CliResult<()> {
    let tree = load_tree(file, settings)?;
    match target {
        Some(path) => tree
            .save(path)
            .map_err(|e| CliError::io(format!("write {}", path.display()), e))?,
        None => output::info(&tree.encode()),
    }
    Ok(())
}

#[instrument]
fn _config(settings: &Settings) -> CliResult<()> {
    print!("{}", settings.to_toml()?);
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
