use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, info, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::display::render;
use crate::domain::traversal::DynVisitor;
use crate::domain::{Order, SearchTree};

/// Input of the scripted walkthrough; repeats are dropped on construction.
pub const DEMO_VALUES: [i64; 14] = [1, 7, 4, 23, 8, 9, 4, 3, 5, 7, 9, 67, 6345, 324];

const BANNER_WIDTH: usize = 48;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "effective settings");

    match &cli.command {
        Some(Commands::Show { values }) => _show(values, &settings),
        Some(Commands::Walk { values, order }) => _walk(values, order.unwrap_or(settings.order), &settings),
        Some(Commands::Insert {
            values,
            add,
            rebalance,
        }) => _insert(values, add, *rebalance, &settings),
        Some(Commands::Remove { values, drop }) => _remove(values, drop, &settings),
        Some(Commands::Find { target, values }) => _find(*target, values, &settings),
        Some(Commands::Stats { values }) => _stats(values),
        Some(Commands::Demo) => _demo(&settings),
        Some(Commands::Config) => _config(&settings),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

/// Values of `tree` in `order`, joined by `separator`.
pub fn traversal_line(tree: &SearchTree<i64>, order: Order, separator: &str) -> CliResult<String> {
    let mut values = Vec::with_capacity(tree.len());
    let visitor: &mut DynVisitor<'_, i64> = &mut |value, _, _| values.push(value.to_string());
    tree.traverse(order, Some(visitor))?;
    Ok(values.join(separator))
}

fn require_values(values: &[i64]) -> CliResult<()> {
    if values.is_empty() {
        return Err(CliError::InvalidArgs("no values given".into()));
    }
    Ok(())
}

fn print_tree(tree: &SearchTree<i64>, settings: &Settings) {
    output::info(render(tree.root(), settings.style).trim_end());
}

fn print_balance(tree: &SearchTree<i64>) {
    if tree.is_balanced() {
        output::success("balanced");
    } else {
        output::failure("not balanced");
    }
}

#[instrument(skip(settings))]
fn _show(values: &[i64], settings: &Settings) -> CliResult<()> {
    let tree = SearchTree::from_elements(values.iter().copied());
    print_tree(&tree, settings);
    Ok(())
}

#[instrument(skip(settings))]
fn _walk(values: &[i64], order: Order, settings: &Settings) -> CliResult<()> {
    let tree = SearchTree::from_elements(values.iter().copied());
    output::info(&traversal_line(&tree, order, &settings.separator)?);
    Ok(())
}

#[instrument(skip(settings))]
fn _insert(values: &[i64], add: &[i64], rebalance: bool, settings: &Settings) -> CliResult<()> {
    let mut tree = SearchTree::from_elements(values.iter().copied());
    for value in add {
        if !tree.insert(*value) {
            output::failure(&format!("{value} already present"));
        }
    }
    if rebalance {
        info!("rebalancing {} values", tree.len());
        tree.rebalance();
    }
    print_tree(&tree, settings);
    print_balance(&tree);
    Ok(())
}

#[instrument(skip(settings))]
fn _remove(values: &[i64], drop: &[i64], settings: &Settings) -> CliResult<()> {
    let mut tree = SearchTree::from_elements(values.iter().copied());
    for value in drop {
        if tree.remove_value(value) {
            output::success(&format!("removed {value}"));
        } else {
            output::failure(&format!("{value} not found"));
        }
    }
    print_tree(&tree, settings);
    print_balance(&tree);
    Ok(())
}

#[instrument(skip(settings))]
fn _find(target: i64, values: &[i64], settings: &Settings) -> CliResult<()> {
    let tree = SearchTree::from_elements(values.iter().copied());
    let Some(node) = tree.find(&target) else {
        output::failure(&format!("{target} not found"));
        return Ok(());
    };
    output::info(render(Some(node), settings.style).trim_end());
    output::field("height", &node.height());
    if let Some(depth) = tree.depth(&target) {
        output::field("depth", &depth);
    }
    Ok(())
}

#[instrument]
fn _stats(values: &[i64]) -> CliResult<()> {
    require_values(values)?;
    let tree = SearchTree::from_elements(values.iter().copied());
    output::field("size", &tree.len());
    output::field("height", &tree.root().map_or(-1, |root| root.height()));
    output::field("balanced", &tree.is_balanced());
    if let (Some(min), Some(max)) = (tree.min(), tree.max()) {
        output::field("min", min);
        output::field("max", max);
    }
    Ok(())
}

#[instrument(skip_all)]
fn _demo(settings: &Settings) -> CliResult<()> {
    let mut tree = SearchTree::from_elements(DEMO_VALUES);
    print_tree(&tree, settings);

    output::header(&output::banner("Inserting", BANNER_WIDTH));
    tree.insert(144);
    print_tree(&tree, settings);

    output::header(&output::banner("Deleting", BANNER_WIDTH));
    tree.remove_value(&144);
    print_tree(&tree, settings);

    output::header(&output::banner("Finding", BANNER_WIDTH));
    output::info(render(tree.find(&67), settings.style).trim_end());

    output::header(&output::banner("Level Order, Pre/In/Postorder", BANNER_WIDTH));
    print_tree(&tree, settings);
    for order in Order::ALL {
        output::field(order.as_str(), &traversal_line(&tree, order, &settings.separator)?);
    }
    Ok(())
}

fn _config(settings: &Settings) -> CliResult<()> {
    output::info(settings.to_toml()?.trim_end());
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
