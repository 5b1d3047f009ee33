//! # Journey Subcommand
//!
//! Ask the navigation guard whether a page or URL is open for an
//! application. Exits 0 when allowed and 1 when denied, so it can be used
//! from scripts.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use lpa_journey::{can_go_to, Path as Page};

use crate::store::{load, open_store};

/// Arguments for the `lpa journey` subcommand.
#[derive(Args, Debug)]
pub struct JourneyArgs {
    #[command(subcommand)]
    pub command: JourneyCommand,
}

/// Journey subcommands.
#[derive(Subcommand, Debug)]
pub enum JourneyCommand {
    /// Check whether a page may be visited, e.g. `/check-your-lpa`.
    CanVisit {
        #[arg(long)]
        id: String,
        /// Page path suffix, including the leading slash.
        #[arg(long)]
        page: String,
    },

    /// Check whether a URL may be followed, e.g. `/lpa/abc/task-list?from=x`.
    CanGoTo {
        #[arg(long)]
        id: String,
        #[arg(long)]
        url: String,
    },

    /// List every page currently open to the donor.
    Open {
        #[arg(long)]
        id: String,
    },
}

/// Execute the journey subcommand.
pub fn run_journey(args: &JourneyArgs, state_dir: &Path) -> Result<u8> {
    let store = open_store(state_dir);

    match &args.command {
        JourneyCommand::CanVisit { id, page } => {
            let provided = load(&store, id)?;
            let page: Page = page.parse().with_context(|| format!("unknown page {page:?}"))?;
            Ok(report(page.as_str(), page.can_visit(&provided)))
        }

        JourneyCommand::CanGoTo { id, url } => {
            let provided = load(&store, id)?;
            Ok(report(url, can_go_to(&provided, url)))
        }

        JourneyCommand::Open { id } => {
            let provided = load(&store, id)?;
            for page in Page::ALL.iter().filter(|p| p.can_visit(&provided)) {
                println!("{}", page.format(provided.lpa_id.as_str()));
            }
            Ok(0)
        }
    }
}

fn report(target: &str, allowed: bool) -> u8 {
    if allowed {
        println!("allowed: {target}");
        0
    } else {
        println!("denied: {target}");
        1
    }
}
