use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use hiring_cli::pipeline::{
    Freshness, auth_for, freshness, load_config, load_round, open_service,
};
use hiring_ingest::read_rows;

use crate::cli::{SaveArgs, ShowArgs, StatsArgs, StoreArgs};
use crate::summary::{print_snapshot_header, print_stats};

pub fn run_stats(args: &StatsArgs) -> Result<()> {
    let round = load_round(&args.rows, &args.config)?;
    let span = info_span!("stats", round_id = round.config.round_id);
    let _guard = span.enter();
    let stats = round.compute();
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("serialize statistics")?
        );
    } else {
        print_stats(&stats, &round.config.display);
    }
    Ok(())
}

pub fn run_save(args: &SaveArgs) -> Result<()> {
    let round = load_round(&args.rows, &args.store.config)?;
    let span = info_span!("snapshot_save", round_id = round.config.round_id);
    let _guard = span.enter();
    let service = open_service(&args.store.store, &round.config)?;
    let request = round.save_request(args.name.as_deref());
    let outcome = service.put(
        auth_for(&round.config, args.store.project),
        round.config.round_id,
        request,
    )?;
    info!(
        snapshot_id = outcome.snapshot.id,
        created = outcome.created,
        "snapshot stored"
    );
    let verb = if outcome.created { "Saved" } else { "Replaced" };
    println!(
        "{verb} snapshot '{}' for round {}",
        outcome.snapshot.name, outcome.snapshot.round_id
    );
    println!("Store: {}", service.store().root().display());
    print_stats(&outcome.snapshot.stats, &outcome.snapshot.config.display);
    Ok(())
}

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let config = load_config(&args.store.config)?;
    let service = open_service(&args.store.store, &config)?;
    let snapshot = service.get(auth_for(&config, args.store.project), config.round_id)?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("serialize snapshot")?
        );
    } else {
        print_snapshot_header(&snapshot);
        print_stats(&snapshot.stats, &snapshot.config.display);
    }
    if let Some(rows_path) = &args.rows {
        let table = read_rows(rows_path)
            .with_context(|| format!("read rows {}", rows_path.display()))?;
        match freshness(&snapshot, &table) {
            Freshness::Current => println!("Snapshot matches {}", rows_path.display()),
            Freshness::Stale => {
                warn!(round_id = config.round_id, "saved snapshot is stale");
                println!(
                    "Snapshot is stale: {} has changed since it was calculated",
                    rows_path.display()
                );
            }
            Freshness::Unknown => println!("Snapshot has no source fingerprint"),
        }
    }
    Ok(())
}

pub fn run_delete(args: &StoreArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let service = open_service(&args.store, &config)?;
    let removed = service.delete(auth_for(&config, args.project), config.round_id)?;
    if removed == 0 {
        println!("Round {}: nothing to delete", config.round_id);
    } else {
        println!("Round {}: deleted saved calculation", config.round_id);
    }
    Ok(())
}
