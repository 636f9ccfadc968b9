use anyhow::Context;
use derive_more::Display;
use sea_orm::prelude::Uuid;
use sea_orm::TransactionTrait;
use std::path::Path;

use crate::report;
use crate::selection::Selection;
use crate::upload::{self, UploadError, UploadSummary};

/// Why a single report was not stored. Never aborts the batch.
#[derive(Debug, Display)]
pub enum Failure {
    #[display(fmt = "failed to read report: {}", _0)]
    Read(std::io::Error),
    #[display(fmt = "malformed report: {}", _0)]
    Malformed(report::Error),
    #[display(fmt = "upload failed: {}", _0)]
    Upload(UploadError),
}

impl std::error::Error for Failure {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ingested {
    pub game_unique_id: Uuid,
    pub map_name: String,
    pub summary: UploadSummary,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Display)]
#[display(
    fmt = "{} reports selected, {} uploaded, {} unreadable, {} malformed, {} failed to upload",
    selected,
    uploaded,
    unreadable,
    malformed,
    upload_failures
)]
pub struct BatchSummary {
    pub selected: usize,
    pub uploaded: usize,
    pub unreadable: usize,
    pub malformed: usize,
    pub upload_failures: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &Result<Ingested, Failure>) {
        match outcome {
            Ok(_) => self.uploaded += 1,
            Err(Failure::Read(_)) => self.unreadable += 1,
            Err(Failure::Malformed(_)) => self.malformed += 1,
            Err(Failure::Upload(_)) => self.upload_failures += 1,
        }
    }
}

/// Reads, parses and uploads a single report file.
pub async fn ingest_file<C: TransactionTrait>(
    db: &C,
    path: impl AsRef<Path>,
) -> Result<Ingested, Failure> {
    let path = path.as_ref();
    let content = tokio::fs::read(path).await.map_err(Failure::Read)?;
    let modified = tokio::fs::metadata(path)
        .await
        .and_then(|m| m.modified())
        .map_err(Failure::Read)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let report = report::parse(&content, &filename, modified).map_err(Failure::Malformed)?;
    let game_unique_id = report.game.game_unique_id;
    let map_name = report.game.map_name.clone();
    let summary = upload::upload(db, report)
        .await
        .map_err(Failure::Upload)?;
    Ok(Ingested {
        game_unique_id,
        map_name,
        summary,
    })
}

/// Ingests every selected report of `reports_dir`, one transaction each.
///
/// Per-report failures are logged and counted; only a failure to list the
/// directory is returned as an error.
pub async fn run<C: TransactionTrait>(
    db: &C,
    reports_dir: impl AsRef<Path>,
    selection: &Selection,
) -> anyhow::Result<BatchSummary> {
    let reports_dir = reports_dir.as_ref();
    let reports = selection
        .list_reports(reports_dir)
        .await
        .context(format!(
            "Failed to list reports in {}",
            reports_dir.display()
        ))?;
    let mut summary = BatchSummary {
        selected: reports.len(),
        ..Default::default()
    };
    log::info!(
        "Found {} reports in {}",
        reports.len(),
        reports_dir.display()
    );
    for path in reports {
        log::info!("Processing {}", path.display());
        let outcome = ingest_file(db, &path).await;
        match &outcome {
            Ok(ingested) => {
                if ingested.summary.game_existed {
                    log::warn!(
                        "Game {} was already stored; its {} players were inserted again",
                        ingested.game_unique_id,
                        ingested.summary.players
                    );
                }
                log::info!(
                    "Uploaded game {} ({}) successfully: {} players, {} medals, {} custom stats",
                    ingested.game_unique_id,
                    ingested.map_name,
                    ingested.summary.players,
                    ingested.summary.medals,
                    ingested.summary.custom_stats
                );
            }
            Err(e) => log::error!("Failed to process {}: {e}", path.display()),
        }
        summary.record(&outcome);
    }
    Ok(summary)
}
