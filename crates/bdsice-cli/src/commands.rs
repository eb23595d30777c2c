use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use bdsice_cli::render::{render_matches, render_rebuild, render_series_info};
use bdsice_cli::settings::Settings;
use bdsice_store::{RebuildPolicy, StoreError, load_index, load_series, rebuild};
use tracing::{info, info_span};

use crate::cli::{InfoArgs, RebuildArgs, SearchArgs};

fn rebuild_policy(args: &RebuildArgs, settings: &Settings) -> RebuildPolicy {
    if args.strict {
        RebuildPolicy::Abort
    } else if args.skip_invalid {
        RebuildPolicy::SkipInvalid
    } else {
        RebuildPolicy::from_skip_invalid(settings.skip_invalid)
    }
}

pub fn run_rebuild(db: &Path, args: &RebuildArgs, settings: &Settings) -> Result<()> {
    let policy = rebuild_policy(args, settings);
    let report = rebuild(db, policy)
        .with_context(|| format!("rebuild database in {}", db.display()))?;
    print!("{}", render_rebuild(&report));
    Ok(())
}

pub fn run_search(db: &Path, args: &SearchArgs) -> Result<()> {
    let _search_guard = info_span!("search").entered();
    let index = load_index(db).context("load index")?;
    let terms: Vec<_> = args.terms.iter().map(|t| t.as_encoded_bytes()).collect();
    let matches = index.search(terms).context("search index")?;
    info!(matches = matches.len(), "search finished");
    io::stdout()
        .write_all(render_matches(&matches).as_bytes())
        .context("write results")?;
    Ok(())
}

/// Print every requested series. Unknown codes are reported and skipped.
///
/// Returns the number of codes that were not found.
pub fn run_info(db: &Path, args: &InfoArgs) -> Result<usize> {
    let mut missing = 0;
    for code in &args.codes {
        match load_series(db, code) {
            Ok(series) => println!("{}", render_series_info(&series)),
            Err(StoreError::SeriesNotFound { .. }) => {
                eprintln!("Serie code {code} does not exist in the BDSICE database.");
                missing += 1;
            }
            Err(error) => {
                return Err(error).with_context(|| format!("load series {code}"));
            }
        }
    }
    Ok(missing)
}

pub fn run_random(db: &Path) -> Result<()> {
    let index = load_index(db).context("load index")?;
    let code = index
        .random_code(&mut rand::thread_rng())
        .context("the index is empty, run `bdsice rebuild` first")?;
    let series = load_series(db, code).with_context(|| format!("load series {code}"))?;
    println!("{}", render_series_info(&series));
    Ok(())
}
