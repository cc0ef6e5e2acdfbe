// ABOUTME: Command-line interface for Salesgem administration and profile editing
// ABOUTME: Manages invites, courses, roster imports, accounts, and gem generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

//! # Salesgem CLI
//!
//! Administration and profile tooling for Salesgem. Admin subcommands (invite,
//! course, import) need the remote store and an allow-listed issuer; profile
//! editing and gem generation also work local-only.
//!
//! ## Usage
//!
//! ```bash
//! # Issue an invite for a course
//! cargo run --bin salesgem-cli -- invite create taro@example.com "Taro Yamada" \
//!     --course course_1712800000000 --issuer admin@example.com
//!
//! # Import a roster (one "course,student,email" line per student)
//! cargo run --bin salesgem-cli -- import roster.csv --issuer admin@example.com
//!
//! # Register with an invite code, then generate gems
//! cargo run --bin salesgem-cli -- signup taro@example.com secret-password --code AB12CD
//! cargo run --bin salesgem-cli -- gems
//!
//! # Verbose output
//! cargo run --bin salesgem-cli -- -v status
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use uuid::Uuid;

use salesgem::auth::AuthGate;
use salesgem::config::environment::ServerConfig;
use salesgem::courses::CourseService;
use salesgem::database::RemoteStore;
use salesgem::errors::{AppError, AppResult};
use salesgem::invites::InviteService;
use salesgem::local_cache::LocalCache;
use salesgem::profile_store::ProfileStore;

mod commands;

#[derive(Parser)]
#[command(
    name = "salesgem-cli",
    about = "Salesgem administration and profile tools",
    long_about = "Manage invite codes, courses, and accounts, edit the sales profile, and generate prompt gems"
)]
struct Cli {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage invite codes
    Invite {
        #[command(subcommand)]
        command: InviteCommands,
    },
    /// Manage courses
    Course {
        #[command(subcommand)]
        command: CourseCommands,
    },
    /// Import a student roster, creating courses and invites as needed
    Import {
        /// Roster file with one "course,student,email" line per student
        file: PathBuf,
        /// Issuing admin email (defaults to the signed-in account)
        #[arg(long)]
        issuer: Option<String>,
    },
    /// Create an account using an invite code
    Signup {
        /// Email address the invite was issued to
        email: String,
        /// Password (at least 8 characters)
        password: String,
        /// Invite code
        #[arg(long)]
        code: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign in with email and password
    Login {
        /// Email address
        email: String,
        /// Password
        password: String,
    },
    /// Sign out and forget the cached session
    Logout,
    /// Show the current session
    Status,
    /// Show or edit the sales profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Generate prompt gems from the stored profile
    Gems {
        /// Emit JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum InviteCommands {
    /// Issue a new single-use invite code
    Create {
        /// Recipient email
        email: String,
        /// Recipient name
        name: String,
        /// Course id the invite belongs to
        #[arg(long)]
        course: Option<String>,
        /// Issuing admin email (defaults to the signed-in account)
        #[arg(long)]
        issuer: Option<String>,
    },
    /// List invite codes, optionally for one course
    List {
        /// Restrict to a course id
        #[arg(long)]
        course: Option<String>,
        /// Issuing admin email (defaults to the signed-in account)
        #[arg(long)]
        issuer: Option<String>,
    },
    /// Delete an invite code
    Revoke {
        /// Invite id
        id: String,
        /// Issuing admin email (defaults to the signed-in account)
        #[arg(long)]
        issuer: Option<String>,
    },
}

#[derive(Subcommand)]
enum CourseCommands {
    /// Register a course, reusing it if the name already exists
    Create {
        /// Course name, optionally starting with its date ("2026/04/11 Sales 101")
        name: String,
        /// Issuing admin email (defaults to the signed-in account)
        #[arg(long)]
        issuer: Option<String>,
    },
    /// List registered courses
    List {
        /// Issuing admin email (defaults to the signed-in account)
        #[arg(long)]
        issuer: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Print the stored profile as JSON
    Show,
    /// Update profile fields
    Set(commands::profile::SetArgs),
    /// Remove the locally cached profile
    Clear,
}

/// Shared handles for command execution
struct AppContext {
    config: ServerConfig,
    remote: RemoteStore,
    cache: LocalCache,
}

impl AppContext {
    fn invites(&self) -> InviteService {
        InviteService::new(self.remote.clone(), self.config.clone())
    }

    fn courses(&self) -> CourseService {
        CourseService::new(self.remote.clone(), self.config.clone())
    }

    fn auth(&self) -> AuthGate {
        AuthGate::new(self.remote.clone(), self.cache.clone(), self.config.clone())
    }

    fn profiles(&self) -> ProfileStore {
        ProfileStore::new(self.remote.clone(), self.cache.clone())
    }

    /// Issuer email for admin operations: the explicit flag, else the
    /// signed-in account
    async fn resolve_issuer(&self, flag: Option<String>) -> AppResult<String> {
        if let Some(issuer) = flag {
            return Ok(issuer);
        }
        self.auth()
            .observe_session()
            .await
            .map(|session| session.email)
            .ok_or_else(|| AppError::invalid_input("Provide --issuer or sign in first"))
    }

    /// Account id for profile scoping, if a session is active
    async fn session_user(&self) -> Option<Uuid> {
        self.auth()
            .observe_session()
            .await
            .map(|session| session.user_id)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code.as_str(), "Command failed: {e}");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(url) = cli.database_url {
        config.database_url = Some(url);
    }

    let remote = RemoteStore::connect(config.database_url.as_deref()).await?;
    let cache = LocalCache::new(&config)?;
    let ctx = AppContext {
        config,
        remote,
        cache,
    };

    match cli.command {
        Commands::Invite { command } => match command {
            InviteCommands::Create {
                email,
                name,
                course,
                issuer,
            } => {
                let issuer = ctx.resolve_issuer(issuer).await?;
                commands::invite::create(&ctx.invites(), &issuer, &name, &email, course.as_deref())
                    .await
            }
            InviteCommands::List { course, issuer } => {
                let issuer = ctx.resolve_issuer(issuer).await?;
                commands::invite::list(&ctx.invites(), &issuer, course.as_deref()).await
            }
            InviteCommands::Revoke { id, issuer } => {
                let issuer = ctx.resolve_issuer(issuer).await?;
                commands::invite::revoke(&ctx.invites(), &issuer, &id).await
            }
        },
        Commands::Course { command } => match command {
            CourseCommands::Create { name, issuer } => {
                let issuer = ctx.resolve_issuer(issuer).await?;
                commands::course::create(&ctx.courses(), &issuer, &name).await
            }
            CourseCommands::List { issuer } => {
                let issuer = ctx.resolve_issuer(issuer).await?;
                commands::course::list(&ctx.courses(), &issuer).await
            }
        },
        Commands::Import { file, issuer } => {
            let issuer = ctx.resolve_issuer(issuer).await?;
            commands::import::run(&ctx.invites(), &ctx.courses(), &issuer, &file).await
        }
        Commands::Signup {
            email,
            password,
            code,
            name,
        } => commands::auth::signup(&ctx.auth(), email, password, code, name).await,
        Commands::Login { email, password } => {
            commands::auth::login(&ctx.auth(), email, password).await
        }
        Commands::Logout => commands::auth::logout(&ctx.auth()).await,
        Commands::Status => commands::auth::status(&ctx.auth()).await,
        Commands::Profile { command } => {
            let user_id = ctx.session_user().await;
            match command {
                ProfileCommands::Show => commands::profile::show(&ctx.profiles(), user_id).await,
                ProfileCommands::Set(args) => {
                    commands::profile::set(&ctx.profiles(), user_id, args).await
                }
                ProfileCommands::Clear => commands::profile::clear(&ctx.cache).await,
            }
        }
        Commands::Gems { json } => {
            let user_id = ctx.session_user().await;
            commands::gems::generate(&ctx.profiles(), user_id, json).await
        }
    }
}
