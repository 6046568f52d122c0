use std::io::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use miette::{miette, Context, IntoDiagnostic, Result};

use attache_core::{
    AttacheConfig, BloodGroup, BloodRequest, ContactMessage, DonorProfile, Record, RecordKind,
    StockEntry, Urgency, DEFAULT_CONFIG,
};
use attache_intent::{best_match, respond, Corpus};
use attache_session::{verify_admin, Identity, Session, SessionFile, SessionSource};
use attache_store::{RecordStore, StoredRecord, TieredStore};

#[derive(Parser)]
#[command(
    name = "attache",
    version,
    about = "Support-desk assistant toolkit",
    long_about = "attache answers portal FAQ questions from a keyword-scored corpus and \
                  manages the portal's records and sessions.\n\n\
                  Examples:\n  \
                    attache ask 'what services do you offer?'   One-shot question\n  \
                    attache chat                                Interactive REPL\n  \
                    attache submit message --name Ada --email ada@example.com --message hi\n  \
                    attache login demo                          Start a demo session\n  \
                    attache records list --kind message         Admin: list stored records\n  \
                    attache doctor                              Check setup and environment"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (default: attache.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a default attache.toml in the current directory
    Init,
    /// Ask the assistant a single question
    #[command(long_about = "Ask the assistant a single question.\n\n\
        The question is matched against the corpus by case-insensitive keyword\n\
        containment; the best-scoring entry's answer is printed, or the fallback\n\
        when nothing matches.\n\n\
        Examples:\n  attache ask 'how much does a website cost?'\n  \
        attache ask --explain 'do you build mobile apps?'")]
    Ask {
        /// The question to match
        question: String,

        /// Also print the matched entry id and score to stderr
        #[arg(long)]
        explain: bool,
    },
    /// Chat with the assistant interactively
    #[command(long_about = "Chat with the assistant interactively.\n\n\
        Reads questions line by line from stdin; empty lines are skipped. A short\n\
        simulated reply delay (assistant.reply_delay_ms) is applied before each\n\
        answer. Exit with 'exit', 'quit', or end of input.")]
    Chat,
    /// Submit a portal record
    Submit {
        #[command(subcommand)]
        record: SubmitRecord,
    },
    /// Inspect or manage stored records (admin session required)
    Records {
        #[command(subcommand)]
        action: RecordsAction,
    },
    /// Start a session
    Login {
        #[command(subcommand)]
        method: LoginMethod,
    },
    /// End the current session
    Logout,
    /// Show the current session
    Whoami,
    /// Check setup and environment
    Doctor,
}

#[derive(Subcommand)]
enum SubmitRecord {
    /// Contact-form message
    Message {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// Donor registration
    Donor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Blood group (A+, A-, B+, B-, AB+, AB-, O+, O-)
        #[arg(long)]
        blood_group: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        mobile: String,
        /// Age in years (18-65)
        #[arg(long)]
        age: u8,
    },
    /// Blood request on a patient's behalf
    Request {
        #[arg(long)]
        patient: String,
        /// Required blood group (A+, A-, B+, B-, AB+, AB-, O+, O-)
        #[arg(long)]
        blood_group: String,
        #[arg(long)]
        hospital: String,
        #[arg(long)]
        location: String,
        /// Urgency: normal, urgent, or critical
        #[arg(long, default_value = "normal")]
        urgency: String,
        #[arg(long)]
        contact: String,
    },
    /// Blood availability row
    Stock {
        /// Blood group (A+, A-, B+, B-, AB+, AB-, O+, O-)
        #[arg(long)]
        group: String,
        #[arg(long)]
        units: u32,
        #[arg(long)]
        location: String,
    },
}

#[derive(Subcommand)]
enum RecordsAction {
    /// List records of one kind
    List {
        /// Record kind: message, donor, request, or stock
        #[arg(long)]
        kind: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Delete one record by id
    Delete {
        /// Record kind: message, donor, request, or stock
        #[arg(long)]
        kind: String,

        /// Record id as shown by `records list`
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum LoginMethod {
    /// Start a mock demo session
    Demo,
    /// Record an identity-provider login
    Provider {
        #[arg(long)]
        uid: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Grant admin rights to the current (or a new demo) session
    Admin {
        #[arg(long, default_value = "admin")]
        user: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("attache.toml"));

    match cli.command {
        Command::Init => run_init(&config_path),
        command => {
            let config = AttacheConfig::load_or_default(&config_path)
                .into_diagnostic()
                .wrap_err("loading configuration")?;
            match command {
                Command::Init => unreachable!("handled above"),
                Command::Ask { question, explain } => run_ask(&config, &question, explain),
                Command::Chat => run_chat(&config).await,
                Command::Submit { record } => run_submit(&config, record).await,
                Command::Records { action } => run_records(&config, action).await,
                Command::Login { method } => run_login(&config, method),
                Command::Logout => run_logout(&config),
                Command::Whoami => run_whoami(&config),
                Command::Doctor => run_doctor(&config, &config_path),
            }
        }
    }
}

fn run_init(path: &PathBuf) -> Result<()> {
    if path.exists() {
        return Err(miette!("{} already exists", path.display()));
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .into_diagnostic()
        .wrap_err("writing config")?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn load_corpus(config: &AttacheConfig) -> Result<Corpus> {
    match &config.assistant.corpus_path {
        Some(path) => Corpus::from_file(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("loading corpus from {}", path.display())),
        None => Ok(Corpus::builtin()),
    }
}

fn run_ask(config: &AttacheConfig, question: &str, explain: bool) -> Result<()> {
    let corpus = load_corpus(config)?;
    match best_match(&corpus, question) {
        Some(m) => {
            println!("{}", m.entry.answer);
            if explain {
                eprintln!("[matched '{}' with {} keyword hit(s)]", m.entry.id, m.score);
            }
        }
        None => {
            println!("{}", attache_intent::FALLBACK_ANSWER);
            if explain {
                eprintln!("[no keyword hits; fallback]");
            }
        }
    }
    Ok(())
}

async fn run_chat(config: &AttacheConfig) -> Result<()> {
    let corpus = load_corpus(config)?;
    let delay = std::time::Duration::from_millis(config.assistant.reply_delay_ms);

    println!("Hello! Ask me anything about our services. Type 'exit' to leave.");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().into_diagnostic()?;

        let mut line = String::new();
        let read = stdin.read_line(&mut line).into_diagnostic()?;
        if read == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        // The delay is a display affordance, not part of the matcher contract.
        if !delay.is_zero() {
            let spinner = indicatif::ProgressBar::new_spinner();
            spinner.enable_steady_tick(std::time::Duration::from_millis(80));
            tokio::time::sleep(delay).await;
            spinner.finish_and_clear();
        }
        println!("{}", respond(&corpus, question));
    }
    println!("Goodbye!");
    Ok(())
}

fn build_record(record: SubmitRecord) -> Result<Record> {
    let record = match record {
        SubmitRecord::Message {
            name,
            email,
            message,
        } => Record::Message(ContactMessage::new(&name, &email, &message).into_diagnostic()?),
        SubmitRecord::Donor {
            name,
            email,
            blood_group,
            city,
            mobile,
            age,
        } => {
            let group = BloodGroup::from_str(&blood_group).into_diagnostic()?;
            Record::Donor(
                DonorProfile::new(&name, &email, group, &city, &mobile, age).into_diagnostic()?,
            )
        }
        SubmitRecord::Request {
            patient,
            blood_group,
            hospital,
            location,
            urgency,
            contact,
        } => {
            let group = BloodGroup::from_str(&blood_group).into_diagnostic()?;
            let urgency = Urgency::from_str(&urgency).into_diagnostic()?;
            Record::Request(
                BloodRequest::new(&patient, group, &hospital, &location, urgency, &contact)
                    .into_diagnostic()?,
            )
        }
        SubmitRecord::Stock {
            group,
            units,
            location,
        } => {
            let group = BloodGroup::from_str(&group).into_diagnostic()?;
            Record::Stock(StockEntry::new(group, units, &location).into_diagnostic()?)
        }
    };
    Ok(record)
}

async fn run_submit(config: &AttacheConfig, record: SubmitRecord) -> Result<()> {
    let record = build_record(record)?;
    let store = TieredStore::from_config(&config.storage).into_diagnostic()?;
    let ack = store
        .write(&record)
        .await
        .into_diagnostic()
        .wrap_err("storing record")?;
    println!(
        "Stored {} record (id {}, tier {})",
        record.kind(),
        ack.id,
        ack.tier
    );
    Ok(())
}

fn require_admin(config: &AttacheConfig) -> Result<Session> {
    let session = SessionFile::new(&config.session.session_path)
        .load()
        .into_diagnostic()?
        .ok_or_else(|| miette!("no active session; run 'attache login admin' first"))?;
    if !session.admin {
        return Err(miette!(
            "session for {} is not an admin session; run 'attache login admin'",
            session.identity.display_name
        ));
    }
    Ok(session)
}

async fn run_records(config: &AttacheConfig, action: RecordsAction) -> Result<()> {
    require_admin(config)?;
    let store = TieredStore::from_config(&config.storage).into_diagnostic()?;

    match action {
        RecordsAction::List { kind, format } => {
            let kind = RecordKind::from_str(&kind).into_diagnostic()?;
            let records = store.list(kind).await.into_diagnostic()?;
            print_records(&records, format)?;
        }
        RecordsAction::Delete { kind, id } => {
            let kind = RecordKind::from_str(&kind).into_diagnostic()?;
            store.delete(kind, &id).await.into_diagnostic()?;
            println!("Deleted {kind} record {id}");
        }
    }
    Ok(())
}

fn print_records(records: &[StoredRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(records).into_diagnostic()?;
            println!("{json}");
        }
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No records.");
                return Ok(());
            }
            for record in records {
                println!(
                    "{}  {}  {}",
                    record.id,
                    record.created_at.format("%Y-%m-%d %H:%M:%S"),
                    record.body
                );
            }
            println!("{} record(s)", records.len());
        }
    }
    Ok(())
}

fn run_login(config: &AttacheConfig, method: LoginMethod) -> Result<()> {
    let file = SessionFile::new(&config.session.session_path);
    let current = file.load().into_diagnostic()?;

    let session = match method {
        LoginMethod::Demo => {
            // A provider identity from an earlier login survives as the
            // bootstrap's second candidate; demo takes precedence.
            let provider = current
                .filter(|s| s.source == SessionSource::Provider)
                .map(|s| s.identity);
            Session::bootstrap(Some(Identity::demo()), provider)
                .ok_or_else(|| miette!("bootstrap produced no session"))?
        }
        LoginMethod::Provider { uid, name, email } => {
            let demo = current
                .filter(|s| s.source == SessionSource::Demo)
                .map(|s| s.identity);
            let session = Session::bootstrap(demo, Some(Identity::provider(&uid, &name, &email)))
                .ok_or_else(|| miette!("bootstrap produced no session"))?;
            if session.source == SessionSource::Demo {
                eprintln!(
                    "note: an active demo session takes precedence; logout to use the provider identity"
                );
            }
            session
        }
        LoginMethod::Admin { user, password } => {
            verify_admin(&config.session, &user, &password).into_diagnostic()?;
            let base = match current {
                Some(session) => session,
                None => Session::bootstrap(Some(Identity::demo()), None)
                    .ok_or_else(|| miette!("bootstrap produced no session"))?,
            };
            base.with_admin()
        }
    };

    file.save(&session).into_diagnostic()?;
    println!(
        "Logged in as {} ({} session{})",
        session.identity.display_name,
        session.source,
        if session.admin { ", admin" } else { "" }
    );
    Ok(())
}

fn run_logout(config: &AttacheConfig) -> Result<()> {
    SessionFile::new(&config.session.session_path)
        .clear()
        .into_diagnostic()?;
    println!("Logged out.");
    Ok(())
}

fn run_whoami(config: &AttacheConfig) -> Result<()> {
    match SessionFile::new(&config.session.session_path)
        .load()
        .into_diagnostic()?
    {
        Some(session) => {
            println!(
                "{} <{}>: {} session{}, since {}",
                session.identity.display_name,
                session.identity.email,
                session.source,
                if session.admin { " (admin)" } else { "" },
                session.issued_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        None => println!("No active session."),
    }
    Ok(())
}

struct CheckResult {
    name: &'static str,
    status: &'static str,
    detail: String,
    hint: Option<String>,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: "pass",
            detail: detail.into(),
            hint: None,
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name,
            status: "fail",
            detail: detail.into(),
            hint: Some(hint.into()),
        }
    }

    fn info(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: "info",
            detail: detail.into(),
            hint: None,
        }
    }

    fn symbol(&self) -> &'static str {
        match self.status {
            "pass" => "\u{2713}",
            "fail" => "\u{2717}",
            _ => "~",
        }
    }
}

fn run_doctor(config: &AttacheConfig, config_path: &PathBuf) -> Result<()> {
    let mut checks: Vec<CheckResult> = Vec::new();

    // 1. Config file
    if config_path.exists() {
        checks.push(CheckResult::pass(
            "config_file",
            format!("{} found", config_path.display()),
        ));
    } else {
        checks.push(CheckResult::info(
            "config_file",
            format!(
                "{} not found, using defaults (run 'attache init' to create one)",
                config_path.display()
            ),
        ));
    }

    // 2. Corpus
    match load_corpus(config) {
        Ok(corpus) => {
            let source = match &config.assistant.corpus_path {
                Some(path) => path.display().to_string(),
                None => "built-in".to_string(),
            };
            checks.push(CheckResult::pass(
                "corpus",
                format!("{} entries ({source})", corpus.len()),
            ));
        }
        Err(e) => checks.push(CheckResult::fail(
            "corpus",
            format!("failed to load: {e}"),
            "fix assistant.corpus_path or the corpus file",
        )),
    }

    // 3. Local store
    match attache_store::LocalStore::open(&config.storage.local_path) {
        Ok(_) => checks.push(CheckResult::pass(
            "local_store",
            format!("{} opens", config.storage.local_path.display()),
        )),
        Err(e) => checks.push(CheckResult::fail(
            "local_store",
            format!("cannot open: {e}"),
            "check storage.local_path and directory permissions",
        )),
    }

    // 4. Remote store
    match &config.storage.remote_url {
        Some(url) => checks.push(CheckResult::pass(
            "remote_store",
            format!("configured: {url}"),
        )),
        None => checks.push(CheckResult::info(
            "remote_store",
            "not configured (local-only mode)",
        )),
    }

    // 5. Admin login
    if config.session.admin_password_sha256.is_some() {
        checks.push(CheckResult::pass("admin_login", "digest configured"));
    } else {
        checks.push(CheckResult::info(
            "admin_login",
            "disabled (no admin_password_sha256)",
        ));
    }

    // 6. Session
    match SessionFile::new(&config.session.session_path).load() {
        Ok(Some(session)) => checks.push(CheckResult::pass(
            "session",
            format!(
                "{} ({} session{})",
                session.identity.display_name,
                session.source,
                if session.admin { ", admin" } else { "" }
            ),
        )),
        Ok(None) => checks.push(CheckResult::info("session", "no active session")),
        Err(e) => checks.push(CheckResult::fail(
            "session",
            format!("unreadable: {e}"),
            "delete the session file and log in again",
        )),
    }

    let mut failed = false;
    for check in &checks {
        println!("{} {:<14} {}", check.symbol(), check.name, check.detail);
        if let Some(hint) = &check.hint {
            println!("    hint: {hint}");
        }
        failed = failed || check.status == "fail";
    }
    if failed {
        return Err(miette!("one or more checks failed"));
    }
    Ok(())
}
