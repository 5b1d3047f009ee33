//! # Witness Subcommand
//!
//! Issue and verify witness codes for a file-backed application. There is
//! no SMS gateway here: the code is printed instead of sent.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use lpa_donor::{verify_witness_code, SmsClient, WitnessActor, WitnessCodeSender};
use lpa_witness::WitnessCodeConfig;

use crate::store::{load, open_store};

/// Arguments for the `lpa witness` subcommand.
#[derive(Args, Debug)]
pub struct WitnessArgs {
    #[command(subcommand)]
    pub command: WitnessCommand,
}

/// Witness subcommands.
#[derive(Subcommand, Debug)]
pub enum WitnessCommand {
    /// Issue a code to a witness and print it.
    Send {
        #[arg(long)]
        id: String,
        /// `certificate-provider` or `independent-witness`.
        #[arg(long)]
        actor: String,
    },

    /// Check a code the donor entered.
    Verify {
        #[arg(long)]
        id: String,
        /// `certificate-provider` or `independent-witness`.
        #[arg(long)]
        actor: String,
        #[arg(long)]
        code: String,
    },
}

/// Prints witness codes to stdout.
#[derive(Debug, Default)]
pub struct StdoutSmsClient;

impl SmsClient for StdoutSmsClient {
    fn send_witness_code(&self, mobile: &str, lpa_uid: &str, code: &str) -> Result<(), String> {
        println!("sms to {mobile:?} for {lpa_uid:?}: witness code {code}");
        Ok(())
    }
}

/// Execute the witness subcommand.
pub fn run_witness(args: &WitnessArgs, state_dir: &Path, config: &WitnessCodeConfig) -> Result<u8> {
    let store = open_store(state_dir);

    match &args.command {
        WitnessCommand::Send { id, actor } => {
            let actor = parse_actor(actor)?;
            let mut provided = load(&store, id)?;
            let sender = WitnessCodeSender::new(config.clone(), store, Arc::new(StdoutSmsClient));

            match sender.send(&mut provided, actor, chrono::Utc::now()) {
                Ok(()) => {
                    println!("OK: sent witness code to {actor}");
                    Ok(0)
                }
                Err(e) if e.is_too_many_requests() => {
                    println!("a code was sent to {actor} less than a minute ago; try again shortly");
                    Ok(1)
                }
                Err(e) => Err(e.into()),
            }
        }

        WitnessCommand::Verify { id, actor, code } => {
            let actor = parse_actor(actor)?;
            let mut provided = load(&store, id)?;
            if provided.witness_codes(actor).is_empty() {
                bail!("no witness code has been sent to {actor}");
            }

            let now = chrono::Utc::now();
            let result = verify_witness_code(&mut provided, actor, code, now, config);
            store.put(&mut provided, now)?;

            println!("{result}");
            Ok(if result.is_valid() { 0 } else { 1 })
        }
    }
}

fn parse_actor(actor: &str) -> Result<WitnessActor> {
    actor
        .parse()
        .with_context(|| format!("unknown witness {actor:?}"))
}
