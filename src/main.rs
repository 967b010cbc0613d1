// MerkleRedeem Claim Replay
//
// Reads newline-delimited JSON events (as emitted by the host's log decoder),
// runs them through the claim handlers against an in-memory store, and
// optionally writes a bincode snapshot of the resulting records.
//
// Usage:
//   replay events.jsonl --snapshot store.bin [--log-json]
//   REPLAY_INPUT=events.jsonl REPLAY_SNAPSHOT=store.bin replay

use clap::Parser;
use eyre::WrapErr;
use merkle_redeem_indexer::{
    config::{init_tracing, ReplayConfig},
    id::global_total_id,
    replay::replay,
    store::{EntityKind, MemoryStore},
};
use std::fs::File;
use std::io::BufReader;
use tracing::info;

fn main() -> eyre::Result<()> {
    let config = ReplayConfig::parse();
    init_tracing(config.log_json);

    info!("Replaying events from {}", config.input.display());

    let file = File::open(&config.input)
        .wrap_err_with(|| format!("Failed to open {}", config.input.display()))?;
    let mut store = MemoryStore::new();
    let stats = replay(BufReader::new(file), &mut store)?;

    info!(
        "Replay complete: {} events ({} claims), last block {:?}",
        stats.events_processed, stats.claims_processed, stats.last_block
    );
    info!(
        "Records: {} claims, {} period entries, {} senders, {} recipients",
        store.count(EntityKind::Claimed),
        store.count(EntityKind::ClaimedByPeriod),
        store.count(EntityKind::ClaimedTotalByFrom),
        store.count(EntityKind::ClaimedTotalByRecipient)
    );

    if let Some(total) = store.total(EntityKind::ClaimedTotal, &global_total_id()) {
        println!(
            "{}",
            serde_json::to_string_pretty(total).wrap_err("Failed to encode global total")?
        );
    }

    if let Some(path) = &config.snapshot {
        std::fs::write(path, store.to_bincode()?)
            .wrap_err_with(|| format!("Failed to write snapshot to {}", path.display()))?;
        info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
