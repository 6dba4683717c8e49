//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::Order;

/// Binary search tree playground: balanced construction, traversals and rebalancing
#[derive(Parser, Debug)]
#[command(name = "rsbst")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global settings
    #[arg(short, long, global = true, env = "RSBST_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a balanced tree and print it
    Show {
        /// Values, comma or space separated
        #[arg(value_delimiter = ',', allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Print the values in one traversal order
    Walk {
        /// Values, comma or space separated
        #[arg(value_delimiter = ',', allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Traversal order: level, pre, in, post (default from settings)
        #[arg(short, long)]
        order: Option<Order>,
    },

    /// Insert values into a balanced tree
    Insert {
        /// Initial values, comma or space separated
        #[arg(value_delimiter = ',', allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Values to insert, in order
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        add: Vec<i64>,
        /// Rebalance after inserting
        #[arg(short, long)]
        rebalance: bool,
    },

    /// Remove values from a balanced tree
    Remove {
        /// Initial values, comma or space separated
        #[arg(value_delimiter = ',', allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Values to remove, in order
        #[arg(short = 'x', long = "drop", value_delimiter = ',', allow_negative_numbers = true, required = true)]
        drop: Vec<i64>,
    },

    /// Locate a value and report its height and depth
    Find {
        /// Value to look up
        #[arg(allow_negative_numbers = true)]
        target: i64,
        /// Values, comma or space separated
        #[arg(value_delimiter = ',', allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Size, height and balance of a tree
    Stats {
        /// Values, comma or space separated
        #[arg(value_delimiter = ',', allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Run the scripted walkthrough: build, insert, remove, find, traverse
    Demo,

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
