//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::application::Operation;
use crate::domain::TypeTag;

/// Method overriding and dynamic dispatch between a Parent and a Child type
#[derive(Parser, Debug)]
#[command(name = "dispatch-demo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug logging to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Project directory for local config (default: cwd)
    #[arg(short = 'C', long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Global config file (default: $XDG_CONFIG_HOME/dispatch-demo/dispatch-demo.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the demonstration sequence (default)
    Demo {
        /// Print a header before each step
        #[arg(long, overrides_with = "no_explain")]
        explain: bool,
        /// Never print step headers, even if configured
        #[arg(long, overrides_with = "explain")]
        no_explain: bool,
        /// Verify every line against its expected text
        #[arg(long, overrides_with = "no_check")]
        check: bool,
        /// Skip verification, even if configured
        #[arg(long, overrides_with = "check")]
        no_check: bool,
    },

    /// Invoke one operation through a reference
    Call {
        /// Operation to invoke
        #[arg(value_enum)]
        operation: OperationArg,
        /// Dynamic type of the new instance
        #[arg(long = "new", value_enum)]
        dynamic: TypeArg,
        /// Declared type of the reference (default: same as --new)
        #[arg(long = "as", value_enum)]
        declared: Option<TypeArg>,
    },

    /// Instance-of check
    Is {
        /// Dynamic type of the new instance
        #[arg(long = "new", value_enum)]
        dynamic: TypeArg,
        /// Type to test against
        #[arg(value_enum)]
        target: TypeArg,
    },

    /// Convert a reference to another declared type
    Cast {
        /// Dynamic type of the new instance
        #[arg(long = "new", value_enum)]
        dynamic: TypeArg,
        /// Target declared type
        #[arg(long, value_enum)]
        to: TypeArg,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeArg {
    Parent,
    Child,
}

impl From<TypeArg> for TypeTag {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Parent => TypeTag::Parent,
            TypeArg::Child => TypeTag::Child,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationArg {
    Method1,
    Method2,
    Method3,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Method1 => Operation::Method1,
            OperationArg::Method2 => Operation::Method2,
            OperationArg::Method3 => Operation::Method3,
        }
    }
}
