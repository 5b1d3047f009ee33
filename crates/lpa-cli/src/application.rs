//! # Application Subcommand
//!
//! Create, import, reconcile and inspect file-backed applications.
//!
//! ## Subcommands
//!
//! - `create` — Create a new, empty application.
//! - `import` — Load an application from a JSON file and write it.
//! - `reconcile` — Normalise decisions, refresh task states and write if changed.
//! - `confirm-check` — Record the donor's check-your-lpa confirmation.
//! - `status` — Show task states and completion.
//! - `hash` — Show the change hashes and whether they are current.
//! - `list` — List stored applications.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use lpa_core::{hash_hex, LpaId};
use lpa_donor::{HashError, Provided};
use lpa_task::State;

use crate::store::{load, open_store, validate_lpa_id, FileDataClient};

/// Arguments for the `lpa application` subcommand.
#[derive(Args, Debug)]
pub struct ApplicationArgs {
    #[command(subcommand)]
    pub command: ApplicationCommand,
}

/// Application subcommands.
#[derive(Subcommand, Debug)]
pub enum ApplicationCommand {
    /// Create a new, empty application.
    Create {
        /// Application id. A random id is generated when omitted.
        #[arg(long)]
        id: Option<String>,
    },

    /// Load an application from a JSON file, reconcile it and write it.
    Import {
        /// Path to the application JSON.
        file: PathBuf,
    },

    /// Normalise decisions and refresh task states, writing if anything changed.
    Reconcile {
        #[arg(long)]
        id: String,
    },

    /// Record that the donor has checked and confirmed their application.
    ConfirmCheck {
        #[arg(long)]
        id: String,
    },

    /// Show task states and completion.
    Status {
        #[arg(long)]
        id: String,
    },

    /// Show the change hashes and whether each is current.
    Hash {
        #[arg(long)]
        id: String,
    },

    /// List stored applications.
    List,
}

/// Execute the application subcommand.
pub fn run_application(args: &ApplicationArgs, state_dir: &Path) -> Result<u8> {
    match &args.command {
        ApplicationCommand::Create { id } => cmd_create(state_dir, id.as_deref()),
        ApplicationCommand::Import { file } => cmd_import(state_dir, file),
        ApplicationCommand::Reconcile { id } => cmd_reconcile(state_dir, id),
        ApplicationCommand::ConfirmCheck { id } => cmd_confirm_check(state_dir, id),
        ApplicationCommand::Status { id } => cmd_status(state_dir, id),
        ApplicationCommand::Hash { id } => cmd_hash(state_dir, id),
        ApplicationCommand::List => cmd_list(state_dir),
    }
}

fn cmd_create(state_dir: &Path, id: Option<&str>) -> Result<u8> {
    let lpa_id = match id {
        Some(id) => {
            validate_lpa_id(id)?;
            LpaId(id.to_string())
        }
        None => LpaId::new(),
    };

    let store = open_store(state_dir);
    if store.get(&lpa_id)?.is_some() {
        bail!("application already exists: {lpa_id}");
    }

    let provided = store.create(lpa_id, chrono::Utc::now())?;
    println!("OK: created application {}", provided.lpa_id);
    Ok(0)
}

fn cmd_import(state_dir: &Path, file: &Path) -> Result<u8> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let mut provided: Provided = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    validate_lpa_id(provided.lpa_id.as_str())?;

    let now = chrono::Utc::now();
    if provided.pk.is_empty() {
        provided.pk = format!("LPA#{}", provided.lpa_id);
        provided.sk = "DONOR".to_string();
    }
    if provided.created_at.is_none() {
        provided.created_at = Some(now);
    }
    provided.reconcile();

    let written = open_store(state_dir).put(&mut provided, now)?;
    report_write(&provided, written);
    Ok(0)
}

fn cmd_reconcile(state_dir: &Path, id: &str) -> Result<u8> {
    let store = open_store(state_dir);
    let mut provided = load(&store, id)?;
    if !provided.can_change() {
        tracing::info!(lpa_id = %provided.lpa_id, "application is signed; section one is locked");
    }

    provided.reconcile();
    let written = store.put_as_donor(&mut provided, chrono::Utc::now())?;
    report_write(&provided, written);
    Ok(0)
}

fn cmd_confirm_check(state_dir: &Path, id: &str) -> Result<u8> {
    let store = open_store(state_dir);
    let mut provided = load(&store, id)?;
    provided.reconcile();

    if !provided.section_one_completed_before_check() {
        bail!("application {id} is not ready to be checked: section one is incomplete");
    }

    let now = chrono::Utc::now();
    provided.tasks.check_your_lpa = State::Completed;
    provided.checked_at = Some(now);
    provided.update_checked_hash()?;

    let written = store.put_as_donor(&mut provided, now)?;
    report_write(&provided, written);
    Ok(0)
}

fn cmd_status(state_dir: &Path, id: &str) -> Result<u8> {
    let provided = load(&open_store(state_dir), id)?;
    let t = &provided.tasks;

    println!("application {}", provided.lpa_id);
    let rows: [(&str, &str); 14] = [
        ("your-details", t.your_details.as_str()),
        ("choose-attorneys", t.choose_attorneys.as_str()),
        ("choose-replacement-attorneys", t.choose_replacement_attorneys.as_str()),
        ("when-can-the-lpa-be-used", t.when_can_the_lpa_be_used.as_str()),
        ("life-sustaining-treatment", t.life_sustaining_treatment.as_str()),
        ("restrictions", t.restrictions.as_str()),
        ("certificate-provider", t.certificate_provider.as_str()),
        ("people-to-notify", t.people_to_notify.as_str()),
        ("add-correspondent", t.add_correspondent.as_str()),
        ("choose-your-signatory", t.choose_your_signatory.as_str()),
        ("check-your-lpa", t.check_your_lpa.as_str()),
        ("pay-for-lpa", t.pay_for_lpa.as_str()),
        ("confirm-your-identity", t.confirm_your_identity.as_str()),
        ("sign-the-lpa", t.sign_the_lpa.as_str()),
    ];
    for (task, state) in rows {
        println!("  {task:<30} {state}");
    }
    println!("section one completed: {}", provided.section_one_completed());
    println!("all tasks completed:   {}", provided.completed_all_tasks());
    if t.certificate_provider.is_completed() && provided.certificate_provider_shares_details() {
        println!("warning: certificate provider shares details with the donor or an attorney");
    }
    Ok(0)
}

fn cmd_hash(state_dir: &Path, id: &str) -> Result<u8> {
    let provided = load(&open_store(state_dir), id)?;

    print_hash("main", provided.hash, provided.generate_hash(), provided.hash_changed());
    print_hash(
        "checked",
        provided.checked_hash,
        provided.generate_checked_hash(),
        provided.checked_hash_changed(),
    );
    print_hash(
        "certificate-provider-not-related",
        provided.certificate_provider_not_related_confirmed_hash,
        provided.generate_certificate_provider_not_related_confirmed_hash(),
        provided.certificate_provider_not_related_confirmed_hash_changed(),
    );
    Ok(0)
}

fn print_hash(scope: &str, stored: u64, current: Result<u64, HashError>, changed: bool) {
    match current {
        Ok(current) => println!(
            "{scope:<34} stored {} current {} {}",
            hash_hex(stored),
            hash_hex(current),
            if changed { "changed" } else { "unchanged" }
        ),
        Err(e) => println!("{scope:<34} stored {} error: {e}", hash_hex(stored)),
    }
}

fn cmd_list(state_dir: &Path) -> Result<u8> {
    let ids = FileDataClient::new(state_dir).list()?;
    if ids.is_empty() {
        println!("no applications");
    }
    for id in ids {
        println!("{id}");
    }
    Ok(0)
}

fn report_write(provided: &Provided, written: bool) {
    if written {
        println!("OK: wrote application {}", provided.lpa_id);
    } else {
        println!("OK: application {} unchanged", provided.lpa_id);
    }
}
