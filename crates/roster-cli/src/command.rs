//! Command-line arguments

use clap::{Parser, Subcommand};
use roster_core::traits::Id;

#[derive(Debug, Parser)]
#[command(name = "duty-roster", version)]
#[command(about = "Maintenance and inspection of stored duty rosters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create the roster tables when missing
    Migrate,
    /// Stored rosters, newest first
    List {
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..))]
        page: i64,

        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..=100))]
        per_page: i64,
    },
    /// Calendar and assignments of a roster
    Show {
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: Id,
    },
    /// Lock a roster
    Finalize {
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: Id,
    },
    /// Unlock a roster
    Reopen {
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: Id,
    },
    /// Delete an unlocked roster
    Delete {
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: Id,
    },
}
