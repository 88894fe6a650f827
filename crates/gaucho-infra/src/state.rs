//! Loading conversation state snapshots from disk.

use std::path::Path;

use anyhow::Context;

use gaucho_core::opener::history::StateSnapshot;

/// Read a JSON [`StateSnapshot`] from `path`.
pub async fn load_state_snapshot(path: &Path) -> anyhow::Result<StateSnapshot> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    let snapshot: StateSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("invalid state file {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        turns = snapshot.history.len(),
        "loaded conversation state"
    );
    Ok(snapshot)
}
