//! Fire-and-forget interaction recording.
//!
//! Search and click events feed popularity stats. Recording must never
//! block or fail a user request: the send is spawned, failures are logged
//! and dropped, and there is no retry.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::config::config;

static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("Failed to create HTTP client")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Search,
    Click,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub spot_id: String,
    pub kind: InteractionKind,
}

/// Record an interaction without waiting for the result.
pub fn record(interaction: Interaction) {
    tokio::spawn(async move {
        if let Err(err) = send(&interaction).await {
            log::warn!(
                "Dropped interaction ({:?} on {}): {:#}",
                interaction.kind,
                interaction.spot_id,
                err
            );
        }
    });
}

async fn send(interaction: &Interaction) -> Result<()> {
    CLIENT
        .post(&config().interactions_url)
        .json(interaction)
        .send()
        .await
        .context("Failed to reach interaction endpoint")?
        .error_for_status()
        .context("Interaction endpoint rejected event")?;
    Ok(())
}
