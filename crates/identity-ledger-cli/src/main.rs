//! IdentityLedger CLI — `idl` command.
//!
//! Drives the issuer-gated and open-create stores from a terminal. Each
//! invocation loads a snapshot, performs one operation, prints the events it
//! emitted, and saves the snapshot back.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use identity_ledger::storage::{load_snapshot, save_snapshot, Snapshot};
use identity_ledger::time::{now_secs, secs_to_rfc3339};
use identity_ledger::{
    Address, IdentityRecord, IssuerGatedStore, LedgerEvent, OpenCreateStore, ProfileRecord,
    StoreConfig,
};

// ── Directory helpers ─────────────────────────────────────────────────────────

fn ledger_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| anyhow!("HOME not set; pass --store"))?;
    Ok(PathBuf::from(home).join(".identity-ledger"))
}

/// Resolve the snapshot path: `--store` if given, else the per-variant default.
fn store_path(store: Option<&Path>, variant: &str) -> Result<PathBuf> {
    match store {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(ledger_dir()?.join(format!("{variant}.json"))),
    }
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// IdentityLedger CLI — manage identity records and third-party profiles.
#[derive(Parser, Debug)]
#[command(
    name = "idl",
    about = "IdentityLedger CLI",
    version,
    long_about = "idl — IdentityLedger CLI\n\nCreate, update and delete identity records in an issuer-gated or\nopen-create ledger, and attach third-party profiles to subjects."
)]
struct Cli {
    /// Snapshot file (default: ~/.identity-ledger/{issuer,open}.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operate on the issuer-gated ledger
    Issuer {
        #[command(subcommand)]
        subcommand: IssuerCommands,
    },

    /// Operate on the open-create ledger
    Open {
        #[command(subcommand)]
        subcommand: OpenCommands,
    },

    /// Print a freshly generated random address
    NewAddress,
}

/// Fields of an identity record write.
#[derive(Args, Debug)]
struct RecordArgs {
    /// Account performing the operation
    #[arg(long)]
    caller: Address,

    /// Subject address the record describes
    #[arg(long)]
    subject: Address,

    /// Subject label
    #[arg(long)]
    label: String,

    /// Reference URL
    #[arg(long, default_value = "")]
    url: String,

    /// Reference number
    #[arg(long, default_value = "0")]
    number: u64,

    /// Update timestamp in Unix seconds (default: now)
    #[arg(long)]
    timestamp: Option<u64>,
}

impl RecordArgs {
    fn record(&self) -> IdentityRecord {
        IdentityRecord::new(
            self.label.clone(),
            self.url.clone(),
            self.number,
            self.timestamp.unwrap_or_else(now_secs),
        )
    }
}

#[derive(Subcommand, Debug)]
enum IssuerCommands {
    /// Create a new, empty issuer-gated ledger
    Init {
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        /// The issuer account
        #[arg(long)]
        issuer: Address,
    },
    /// Create a subject's identity record (issuer only)
    Create(RecordArgs),
    /// Replace a subject's identity record (issuer only)
    Update(RecordArgs),
    /// Remove a subject's identity record (issuer or the subject)
    Remove {
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        subject: Address,
    },
    /// Print whether a subject has a record
    Exists {
        #[arg(long)]
        subject: Address,
    },
    /// Show a subject's record
    Show {
        #[arg(long)]
        subject: Address,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// List subjects with a record
    List,
}

#[derive(Subcommand, Debug)]
enum OpenCommands {
    /// Create a new, empty open-create ledger
    Init {
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        /// The operator account
        #[arg(long)]
        operator: Address,
    },
    /// Create a subject's identity record (operator only)
    Create(RecordArgs),
    /// Replace a subject's identity record (operator only)
    Update(RecordArgs),
    /// Delete a subject's record and all its profiles (operator only)
    Delete {
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        subject: Address,
    },
    /// Print whether a subject has a record
    Exists {
        #[arg(long)]
        subject: Address,
    },
    /// Show a subject's record
    Show {
        #[arg(long)]
        subject: Address,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// List subjects with a record
    List,
    /// Manage third-party profiles
    Profile {
        #[command(subcommand)]
        subcommand: ProfileCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommands {
    /// Attach the caller's profile to a subject
    Create {
        /// Profiling account
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        subject: Address,
        #[arg(long)]
        label: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "0")]
        score: u64,
        /// Timestamp in Unix seconds (default: now)
        #[arg(long)]
        timestamp: Option<u64>,
    },
    /// Remove a profile (the profiler itself or the operator)
    Delete {
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        profiler: Address,
        #[arg(long)]
        subject: Address,
    },
    /// Show one profile
    Show {
        #[arg(long)]
        profiler: Address,
        #[arg(long)]
        subject: Address,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Print whether a profile exists
    Exists {
        #[arg(long)]
        profiler: Address,
        #[arg(long)]
        subject: Address,
    },
    /// List profilers on a subject
    List {
        #[arg(long)]
        subject: Address,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;
    let store = cli.store.as_deref();

    let result = match cli.command {
        Commands::Issuer { subcommand } => {
            store_path(store, "issuer").and_then(|path| run_issuer(&path, subcommand, verbose))
        }
        Commands::Open { subcommand } => {
            store_path(store, "open").and_then(|path| run_open(&path, subcommand, verbose))
        }
        Commands::NewAddress => {
            println!("{}", Address::random());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

fn run_issuer(path: &Path, command: IssuerCommands, verbose: bool) -> Result<()> {
    if let IssuerCommands::Init {
        name,
        symbol,
        issuer,
    } = command
    {
        let store = IssuerGatedStore::new(StoreConfig::new(name, symbol), issuer);
        return cmd_init(&store, path, &issuer.to_string(), verbose);
    }

    let mut store: IssuerGatedStore = load_store(path)?;

    match command {
        IssuerCommands::Init { .. } => unreachable!("handled above"),
        IssuerCommands::Create(args) => {
            store.create_token(&args.caller, args.subject, args.record())?;
            commit(&mut store, path, IssuerGatedStore::drain_events)
        }
        IssuerCommands::Update(args) => {
            store.update_identity_data(&args.caller, args.subject, args.record())?;
            commit(&mut store, path, IssuerGatedStore::drain_events)
        }
        IssuerCommands::Remove { caller, subject } => {
            store.remove_token(&caller, subject)?;
            commit(&mut store, path, IssuerGatedStore::drain_events)
        }
        IssuerCommands::Exists { subject } => {
            println!("{}", store.is_identity_exists(&subject));
            Ok(())
        }
        IssuerCommands::Show { subject, json } => print_record(
            &subject,
            store.is_identity_exists(&subject),
            &store.get_identity_data(&subject),
            json,
            verbose,
        ),
        IssuerCommands::List => {
            print_subjects(store.name(), store.symbol(), &store.subjects());
            Ok(())
        }
    }
}

fn run_open(path: &Path, command: OpenCommands, verbose: bool) -> Result<()> {
    if let OpenCommands::Init {
        name,
        symbol,
        operator,
    } = command
    {
        let store = OpenCreateStore::new(StoreConfig::new(name, symbol), operator);
        return cmd_init(&store, path, &operator.to_string(), verbose);
    }

    let mut store: OpenCreateStore = load_store(path)?;

    match command {
        OpenCommands::Init { .. } => unreachable!("handled above"),
        OpenCommands::Create(args) => {
            store.create_token(&args.caller, args.subject, args.record())?;
            commit(&mut store, path, OpenCreateStore::drain_events)
        }
        OpenCommands::Update(args) => {
            store.update_token(&args.caller, args.subject, args.record())?;
            commit(&mut store, path, OpenCreateStore::drain_events)
        }
        OpenCommands::Delete { caller, subject } => {
            store.delete_token(&caller, subject)?;
            commit(&mut store, path, OpenCreateStore::drain_events)
        }
        OpenCommands::Exists { subject } => {
            println!("{}", store.token_exists(&subject));
            Ok(())
        }
        OpenCommands::Show { subject, json } => print_record(
            &subject,
            store.token_exists(&subject),
            &store.get_token_data(&subject),
            json,
            verbose,
        ),
        OpenCommands::List => {
            print_subjects(store.name(), store.symbol(), &store.subjects());
            Ok(())
        }
        OpenCommands::Profile { subcommand } => run_profile(&mut store, path, subcommand, verbose),
    }
}

fn run_profile(
    store: &mut OpenCreateStore,
    path: &Path,
    command: ProfileCommands,
    verbose: bool,
) -> Result<()> {
    match command {
        ProfileCommands::Create {
            caller,
            subject,
            label,
            url,
            score,
            timestamp,
        } => {
            let record = ProfileRecord::new(label, url, score, timestamp.unwrap_or_else(now_secs));
            store.create_profile(&caller, subject, record)?;
            commit(store, path, OpenCreateStore::drain_events)
        }
        ProfileCommands::Delete {
            caller,
            profiler,
            subject,
        } => {
            store.delete_profile(&caller, profiler, subject)?;
            commit(store, path, OpenCreateStore::drain_events)
        }
        ProfileCommands::Show {
            profiler,
            subject,
            json,
        } => {
            let exists = store.profile_exists(&profiler, &subject);
            let profile = store.get_profile_data(&profiler, &subject);
            if json {
                let out = ProfileOutput {
                    profiler,
                    subject,
                    exists,
                    profile,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }
            if !exists {
                return Err(anyhow!("no profile by {profiler} on {subject}"));
            }
            println!("Profile by {profiler} on {subject}");
            println!("  Label:     {}", profile.label);
            println!("  URL:       {}", profile.url);
            println!("  Score:     {}", profile.score);
            println!("  Timestamp: {}", profile.timestamp);
            if verbose {
                println!("  Time:      {}", secs_to_rfc3339(profile.timestamp));
            }
            Ok(())
        }
        ProfileCommands::Exists { profiler, subject } => {
            println!("{}", store.profile_exists(&profiler, &subject));
            Ok(())
        }
        ProfileCommands::List { subject } => {
            let profilers = store.list_profiles(&subject);
            if profilers.is_empty() {
                println!("No profiles on {subject}.");
                return Ok(());
            }
            for profiler in profilers {
                println!("{profiler}");
            }
            Ok(())
        }
    }
}

/// `idl {issuer,open} init ...`
fn cmd_init<S: Snapshot>(store: &S, path: &Path, holder: &str, verbose: bool) -> Result<()> {
    if path.exists() {
        return Err(anyhow!("ledger already exists at {}", path.display()));
    }
    save_snapshot(store, path).context("failed to save ledger")?;

    println!("Created {} ledger", S::KIND);
    println!("  File:   {}", path.display());
    if verbose {
        println!("  Holder: {holder}");
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_store<S: Snapshot>(path: &Path) -> Result<S> {
    if !path.exists() {
        return Err(anyhow!(
            "no ledger at {} (run `init` first)",
            path.display()
        ));
    }
    log::debug!("loading ledger from {}", path.display());
    load_snapshot(path).with_context(|| format!("failed to load ledger {}", path.display()))
}

/// Print the events of the operation just performed and save the store.
fn commit<S: Snapshot>(
    store: &mut S,
    path: &Path,
    drain: fn(&mut S) -> Vec<LedgerEvent>,
) -> Result<()> {
    for event in drain(store) {
        println!("{event}");
    }
    save_snapshot(store, path).context("failed to save ledger")
}

#[derive(Serialize)]
struct RecordOutput<'a> {
    subject: &'a Address,
    exists: bool,
    record: &'a IdentityRecord,
}

#[derive(Serialize)]
struct ProfileOutput {
    profiler: Address,
    subject: Address,
    exists: bool,
    profile: ProfileRecord,
}

fn print_record(
    subject: &Address,
    exists: bool,
    record: &IdentityRecord,
    json: bool,
    verbose: bool,
) -> Result<()> {
    if json {
        let out = RecordOutput {
            subject,
            exists,
            record,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if !exists {
        return Err(anyhow!("no record for {subject}"));
    }

    println!("Subject: {subject}");
    println!("  Label:   {}", record.subject_label);
    println!("  URL:     {}", record.reference_url);
    println!("  Number:  {}", record.reference_number);
    println!("  Updated: {}", record.last_updated);
    if verbose {
        println!("  Time:    {}", secs_to_rfc3339(record.last_updated));
    }
    Ok(())
}

fn print_subjects(name: &str, symbol: &str, subjects: &[Address]) {
    if subjects.is_empty() {
        println!("{name} ({symbol}): no records.");
        return;
    }
    println!("{name} ({symbol}): {} record(s)", subjects.len());
    for subject in subjects {
        println!("  {subject}");
    }
}
