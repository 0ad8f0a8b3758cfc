use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppConfig, AppServices, AuthService, CatalogService, Clock, CvService, GuaranteeService,
    JobsService, SubscriptionService, TrainingService,
};
use signcode_core::AccessPolicy;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://signcode.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPolicy { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPolicy { raw } => {
                write!(f, "invalid --policy value: {raw} (expected ranked or exact)")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn policy(&self) -> AccessPolicy {
        self.services.policy()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn subscriptions(&self) -> Arc<SubscriptionService> {
        self.services.subscriptions()
    }

    fn training(&self) -> Arc<TrainingService> {
        self.services.training()
    }

    fn guarantees(&self) -> Arc<GuaranteeService> {
        self.services.guarantees()
    }

    fn jobs(&self) -> Arc<JobsService> {
        self.services.jobs()
    }

    fn cvs(&self) -> Arc<CvService> {
        self.services.cvs()
    }
}

struct Args {
    db: DbTarget,
    policy: AccessPolicy,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>] [--policy ranked|exact]");
    eprintln!("  cargo run -p app -- seed [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --policy ranked");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SIGNCODE_DB_URL, SIGNCODE_ACCESS_POLICY");
    eprintln!("  SIGNCODE_BACKEND_URL, SIGNCODE_BACKEND_KEY  (offline demo accounts when unset)");
    eprintln!("  SIGNCODE_CHECKOUT_URL");
    eprintln!("  RUST_LOG  (default: info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        config: &AppConfig,
    ) -> Result<Self, ArgsError> {
        let mut db = DbTarget::parse(config.db_url.as_deref().unwrap_or(DEFAULT_DB_URL))?;
        let mut policy = config.policy;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    db = DbTarget::parse(&require_value(args, "--db")?)?;
                }
                "--policy" => {
                    let value = require_value(args, "--policy")?;
                    policy = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPolicy { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db, policy })
    }
}

/// Where the app keeps its `SQLite` database.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DbTarget {
    Memory,
    File(PathBuf),
}

impl DbTarget {
    /// Accepts `sqlite::memory:`, `sqlite://<path>`, `sqlite:<path>` or a bare
    /// path. Relative paths resolve against the working directory.
    fn parse(raw: &str) -> Result<Self, ArgsError> {
        let trimmed = raw.trim();
        if trimmed == "sqlite::memory:" {
            return Ok(Self::Memory);
        }

        let path = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);
        let path = path.split('?').next().unwrap_or(path);
        if path.is_empty() {
            return Err(ArgsError::InvalidDbUrl {
                raw: raw.to_owned(),
            });
        }

        let path = Path::new(path);
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(path)
        };
        Ok(Self::File(absolute))
    }

    fn url(&self) -> String {
        match self {
            Self::Memory => "sqlite::memory:".to_owned(),
            Self::File(path) => format!("sqlite://{}", path.display()),
        }
    }

    /// sqlx will not create a missing database file, so make sure it exists.
    fn prepare(&self) -> std::io::Result<()> {
        let Self::File(path) = self else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(false)
                .open(path)?;
        }
        Ok(())
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    init_tracing();

    let mut config = AppConfig::from_env()?;
    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, &config).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    config.policy = parsed.policy;

    // Services never touch the filesystem; the binary creates the file.
    parsed.db.prepare()?;
    let db_url = parsed.db.url();
    let services = AppServices::new_sqlite(&db_url, Clock::system(), &config).await?;

    match cmd {
        Command::Ui => {
            info!(db = %db_url, policy = %parsed.policy, "launching desktop ui");
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // Some dev setups default the window to always-on-top.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Sign-to-Code")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let catalog = services.catalog().load_catalog().await?;
            println!("seeded {} courses into {db_url}", catalog.len());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
