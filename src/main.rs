use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use itunes_importer::{stats, store};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "itunes-importer")]
#[command(about = "Import Apple Music library exports and report listening stats", long_about = None)]
struct Args {
    /// Path to the SQLite database
    #[arg(long, default_value = store::DEFAULT_DB_PATH)]
    database: String,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Register {
        /// Account email address
        #[arg(long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Parse a Library.xml export and store its tracks
    Import {
        /// Path to the exported Library.xml
        library: PathBuf,

        /// Owning account email
        #[arg(long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Print listening-behavior statistics
    Stats {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in the database path and make sure its directory exists
    let db_path = PathBuf::from(shellexpand::tilde(&args.database).as_ref());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory {:?}", parent))?;
    }
    let pool = store::open(&store::db_url(&db_path)).await?;

    match args.command {
        Command::Register { email, password } => {
            let password = password_or_prompt(password)?;
            let user = store::create_user(&pool, &email, &password).await?;
            log::info!("Created account {} (user {})", user.email, user.id);
            println!("Account {} registered", user.email);
        }

        Command::Import {
            library,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let user = store::authenticate_user(&pool, &email, &password).await?;

            log::info!("Parsing library export {:?}", library);
            let parsed = itunes_importer::parse_library(&library)
                .with_context(|| format!("Failed to parse library export {:?}", library))?;
            log::info!("Parsed {} tracks", parsed.track_count());

            let imported = store::import_tracks(&pool, user.id, &parsed).await?;
            println!("Imported {} of {} tracks", imported, parsed.track_count());
        }

        Command::Stats { email, password } => {
            let password = password_or_prompt(password)?;
            let user = store::authenticate_user(&pool, &email, &password).await?;

            let report = stats::render_report(&pool, user.id).await?;
            print!("{}", report);
        }
    }

    Ok(())
}

/// Use the --password flag when given, otherwise ask on stdin.
fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
