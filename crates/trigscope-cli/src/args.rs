//! Command-line argument definitions for the trigscope CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the map file, configuration and opcode
//! definitions, logging verbosity and the command to run.

use clap::{Parser, Subcommand};

use trigscope::semantic::NodeFilter;

/// Command-line arguments for the trigscope map analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input map file
    #[arg(help = "Path to the input map file")]
    pub input: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to an opcode definition file (JSON), overriding the configuration
    #[arg(short, long)]
    pub definitions: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the trigger graph as JSON
    Graph {
        /// Output file; standard output when omitted
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the JSON document
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print node and edge counts and all warnings
    Summary,

    /// Print the detail report of a trigger or variable
    Show {
        /// Node ID, e.g. 01000000 or L3
        id: String,
    },

    /// Print a section merged across all its occurrences, with its script and task force
    Inspect {
        /// Section ID, e.g. a team ID
        id: String,
    },

    /// List triggers whose name or ID contains the text
    Search {
        /// Text to look for, ignoring case
        query: String,
    },
}

/// Node filter switches for graph export
#[derive(clap::Args, Debug, Default, Clone, Copy)]
pub struct FilterArgs {
    /// Leave out triggers that do not touch a variable
    #[arg(long)]
    pub hide_triggers: bool,

    /// Leave out variables
    #[arg(long)]
    pub hide_variables: bool,

    /// Leave out triggers enabled on easy only
    #[arg(long)]
    pub no_easy: bool,

    /// Leave out triggers enabled on normal only
    #[arg(long)]
    pub no_normal: bool,

    /// Leave out triggers enabled on hard only
    #[arg(long)]
    pub no_hard: bool,
}

impl FilterArgs {
    pub fn node_filter(&self) -> NodeFilter {
        NodeFilter {
            triggers: !self.hide_triggers,
            variables: !self.hide_variables,
            easy: !self.no_easy,
            normal: !self.no_normal,
            hard: !self.no_hard,
        }
    }
}
