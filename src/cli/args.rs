//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::{RenderStyle, TrailingPolicy, Traversal, TruncationPolicy};

/// Binary trees from pre-order symbol files: queries, traversals and structure views
#[derive(Parser, Debug)]
#[command(name = "bintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "BINTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// How to treat a source that ends mid-tree
    #[arg(long, global = true, value_enum)]
    pub truncation: Option<TruncationArg>,

    /// How to treat symbols after a complete tree
    #[arg(long, global = true, value_enum)]
    pub trailing: Option<TrailingArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tree structure
    Show {
        /// Serialized tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Structure view
        #[arg(short, long, value_enum)]
        style: Option<StyleArg>,
    },

    /// Print keys in traversal order
    Traverse {
        /// Serialized tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Traversal order
        #[arg(short, long, value_enum, default_value_t = OrderArg::All)]
        order: OrderArg,
    },

    /// Print the tree height (-1 for an empty tree)
    Height {
        /// Serialized tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show emptiness, node count and height
    Info {
        /// Serialized tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Re-encode a tree in canonical form
    Encode {
        /// Serialized tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationArg {
    Strict,
    Lenient,
}

impl From<TruncationArg> for TruncationPolicy {
    fn from(arg: TruncationArg) -> Self {
        match arg {
            TruncationArg::Strict => TruncationPolicy::Strict,
            TruncationArg::Lenient => TruncationPolicy::Lenient,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingArg {
    Ignore,
    Reject,
}

impl From<TrailingArg> for TrailingPolicy {
    fn from(arg: TrailingArg) -> Self {
        match arg {
            TrailingArg::Ignore => TrailingPolicy::Ignore,
            TrailingArg::Reject => TrailingPolicy::Reject,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleArg {
    Ascii,
    Unicode,
}

impl From<StyleArg> for RenderStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Ascii => RenderStyle::Ascii,
            StyleArg::Unicode => RenderStyle::Unicode,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Pre,
    In,
    Post,
    Level,
    /// All four orders, one per line
    All,
}

impl OrderArg {
    pub fn traversals(&self) -> Vec<Traversal> {
        match self {
            OrderArg::Pre => vec![Traversal::Pre],
            OrderArg::In => vec![Traversal::In],
            OrderArg::Post => vec![Traversal::Post],
            OrderArg::Level => vec![Traversal::Level],
            OrderArg::All => Traversal::ALL.to_vec(),
        }
    }
}
