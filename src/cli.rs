//! Command-line interface for the `csm-core` binary.

use clap::{Parser, Subcommand};

/// Customer service management web app.
#[derive(Parser)]
#[command(name = "csm-core", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default).
    Serve,

    /// Create a technician account.
    AddTechnician {
        /// Login email of the technician.
        #[arg(long)]
        email: String,

        /// Initial password; falls back to the TECHNICIAN_PASSWORD variable.
        #[arg(long, env = "TECHNICIAN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}
