use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{carts, contents, reviews, templates, ConfigArgs};

#[derive(Parser)]
#[command(name = "vmd")]
#[command(about = "VideoMaster admin CLI", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> env -> local).
    /// Defaults apply when none are given.
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    /// Fail instead of warn when the config carries keys this command ignores.
    #[arg(long, global = true, default_value_t = false)]
    strict_config: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// List courses for the content-order selector
    Courses,

    /// Course content ordering
    Contents {
        #[command(subcommand)]
        cmd: ContentsCmd,
    },

    /// Abandoned-cart recovery
    Carts {
        #[command(subcommand)]
        cmd: CartsCmd,
    },

    /// Review moderation
    Reviews {
        #[command(subcommand)]
        cmd: ReviewsCmd,
    },

    /// Email templates (admin-key authenticated)
    Templates {
        #[command(subcommand)]
        cmd: TemplatesCmd,
    },
}

#[derive(Subcommand)]
enum ContentsCmd {
    /// Print the current order of a course
    Show {
        #[arg(long)]
        course: i64,
    },

    /// Apply reorder ops in sequence, then save the full order
    Reorder {
        #[arg(long)]
        course: i64,

        /// drag:FROM:TO | up:INDEX | down:INDEX (0-based, repeatable)
        #[arg(long = "op", required = true)]
        ops: Vec<String>,

        /// Print the request body without saving
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum CartsCmd {
    /// List abandoned orders
    List {
        /// all | 1hour | 24hour | 72hour
        #[arg(long, default_value = "all")]
        stage: String,
    },

    /// Recovery statistics
    Stats,

    /// Send every recovery email that is due
    Trigger,

    /// Send one recovery email manually
    Send {
        #[arg(long)]
        order: i64,

        /// send1 | send2 | send3
        #[arg(long, default_value = "send1")]
        stage: String,
    },
}

#[derive(Subcommand)]
enum ReviewsCmd {
    /// List reviews with stats
    List {
        /// all | pending | approved | hidden
        #[arg(long, default_value = "all")]
        status: String,

        /// Case-insensitive match on author, title or content
        #[arg(long)]
        search: Option<String>,
    },

    /// Toggle approval (sends the negation of --current)
    Approve {
        #[arg(long)]
        id: i64,

        /// Current approval state
        #[arg(long, action = clap::ArgAction::Set)]
        current: bool,
    },

    /// Toggle visibility (sends the negation of --current)
    Visibility {
        #[arg(long)]
        id: i64,

        /// Current visibility state
        #[arg(long, action = clap::ArgAction::Set)]
        current: bool,
    },

    /// Delete a review permanently
    Delete {
        #[arg(long)]
        id: i64,

        /// Acknowledge the deletion cannot be undone.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TemplatesCmd {
    /// List templates
    List,

    /// Create any missing default templates
    Seed,

    /// Update fields of one template; unspecified fields keep their value
    Update {
        #[arg(long)]
        name: String,

        #[arg(long)]
        display_name: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        /// Read html_content from this file
        #[arg(long)]
        html_file: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Render a template with sample placeholder values
    Preview {
        #[arg(long)]
        name: String,
    },
}

fn init_tracing() {
    // stdout carries key=value results; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Dev convenience: load .env.local if present. Missing file is fine.
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();
    let cfg = ConfigArgs {
        paths: cli.config_paths,
        strict: cli.strict_config,
    };

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = vmd_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Courses => contents::courses(&cfg).await?,

        Commands::Contents { cmd } => match cmd {
            ContentsCmd::Show { course } => contents::show(&cfg, course).await?,
            ContentsCmd::Reorder {
                course,
                ops,
                dry_run,
            } => contents::reorder(&cfg, course, &ops, dry_run).await?,
        },

        Commands::Carts { cmd } => match cmd {
            CartsCmd::List { stage } => carts::list(&cfg, &stage).await?,
            CartsCmd::Stats => carts::stats(&cfg).await?,
            CartsCmd::Trigger => carts::trigger(&cfg).await?,
            CartsCmd::Send { order, stage } => carts::send(&cfg, order, &stage).await?,
        },

        Commands::Reviews { cmd } => match cmd {
            ReviewsCmd::List { status, search } => {
                reviews::list(&cfg, &status, search.as_deref()).await?
            }
            ReviewsCmd::Approve { id, current } => reviews::approve(&cfg, id, current).await?,
            ReviewsCmd::Visibility { id, current } => {
                reviews::visibility(&cfg, id, current).await?
            }
            ReviewsCmd::Delete { id, yes } => reviews::delete(&cfg, id, yes).await?,
        },

        Commands::Templates { cmd } => match cmd {
            TemplatesCmd::List => templates::list(&cfg).await?,
            TemplatesCmd::Seed => templates::seed(&cfg).await?,
            TemplatesCmd::Update {
                name,
                display_name,
                subject,
                html_file,
                description,
            } => {
                templates::update(
                    &cfg,
                    &name,
                    templates::UpdateFields {
                        display_name,
                        subject,
                        html_file,
                        description,
                    },
                )
                .await?
            }
            TemplatesCmd::Preview { name } => templates::preview(&cfg, &name).await?,
        },
    }

    Ok(())
}
