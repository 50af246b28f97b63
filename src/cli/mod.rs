//! CLI module for AuthGate
//!
//! Provides command-line interface parsing and handling for the authgate-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AuthGate - username/password login with HS256 bearer tokens
#[derive(Parser, Debug)]
#[command(
    name = "authgate-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "AuthGate - minimal JWT authentication gateway",
    long_about = "Issues HS256 bearer tokens for username/password logins and guards\n\
                  protected routes by token validity and role.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a configuration.",
    after_help = "EXAMPLES:\n    \
                  authgate-server init                      # Write authgate.toml and .env.example\n    \
                  authgate-server                           # Start the server (requires authgate.toml)\n    \
                  authgate-server --config my.toml          # Use a custom config file\n    \
                  authgate-server hash-password 's3cret'    # Print an Argon2 hash\n    \
                  authgate-server config --validate         # Check the configuration"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "authgate.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default when no subcommand is given)
    Serve,

    /// Initialize a new AuthGate configuration
    ///
    /// Creates authgate.toml, .env.example and the data/ directory.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "8080")]
        port: u16,
    },

    /// Print the Argon2 hash of a password
    HashPassword {
        /// Plaintext password to hash
        password: String,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file, including the JWT secret
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
