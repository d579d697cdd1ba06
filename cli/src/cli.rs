//! Clap derive structures for the `restaurantes` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

use restaurantes_core::DEFAULT_BASE_URL;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// restaurantes -- manage the restaurants of the reservation backend
#[derive(Debug, Parser)]
#[command(
    name = "restaurantes",
    version,
    about = "Manage restaurants from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL
    #[arg(
        long,
        env = "RESTAURANTES_API_URL",
        default_value = DEFAULT_BASE_URL,
        global = true
    )]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout: u64,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List restaurants, optionally filtered by a server-side search
    #[command(alias = "ls")]
    List(ListArgs),

    /// Create a restaurant
    New(FormArgs),

    /// Edit a restaurant, by id or by its `/restaurantes/editar/{id}` route
    Edit {
        /// Restaurant id or front-end route
        target: String,

        #[command(flatten)]
        fields: FormArgs,
    },

    /// Delete a restaurant and everything that depends on it
    #[command(alias = "rm")]
    Delete {
        /// Restaurant id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Match against name or address
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

/// Form fields. On edit, only the fields given replace the loaded values.
#[derive(Debug, Default, Args)]
pub struct FormArgs {
    #[arg(long)]
    pub nombre: Option<String>,

    #[arg(long)]
    pub direccion: Option<String>,

    #[arg(long)]
    pub telefono: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Maximum capacity; an empty value clears it
    #[arg(long)]
    pub capacidad: Option<String>,

    #[arg(long)]
    pub tipo_cocina: Option<String>,
}
