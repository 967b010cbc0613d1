// Event Replay
//
// Feeds newline-delimited JSON events through the handlers in file order.
// Blank lines are skipped; any parse or handler error stops the run.

use crate::events::MerkleRedeemEvent;
use crate::handlers::handle_event;
use crate::store::Store;
use eyre::{Result, WrapErr};
use std::io::BufRead;
use tracing::info;

/// How often to log progress
const PROGRESS_INTERVAL: u64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events_processed: u64,
    pub claims_processed: u64,
    pub last_block: Option<u64>,
}

/// Replay every event in `reader` into `store`
pub fn replay<R: BufRead, S: Store>(reader: R, store: &mut S) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.wrap_err_with(|| format!("Failed to read line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let event: MerkleRedeemEvent = serde_json::from_str(&line)
            .wrap_err_with(|| format!("Invalid event on line {}", line_no + 1))?;

        handle_event(store, &event).wrap_err_with(|| {
            format!("{} on line {} could not be processed", event.name(), line_no + 1)
        })?;

        stats.events_processed += 1;
        if matches!(event, MerkleRedeemEvent::Claimed(_)) {
            stats.claims_processed += 1;
        }
        stats.last_block = Some(event.context().block_number);

        if stats.events_processed % PROGRESS_INTERVAL == 0 {
            info!(
                "Stats: {} events processed ({} claims), last block {}",
                stats.events_processed,
                stats.claims_processed,
                event.context().block_number
            );
        }
    }

    Ok(stats)
}
