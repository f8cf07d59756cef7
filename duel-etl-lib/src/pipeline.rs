//! Parallel scan of all bundle directories into one merged dataset.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use duel_etl_core::{ContainerReader, Dataset};

use crate::error::PipelineError;
use crate::merge::merge_dataset;
use crate::partition::chunkify;
use crate::progress::ScanProgress;
use crate::scanner::{DirectoryRef, scan_directory};
use crate::worker_pool::WorkerPool;

/// Scan `directories` with `worker_count` workers and merge the results.
///
/// The directory list is split into `worker_count` balanced chunks. Each
/// worker scans one chunk on a blocking thread and merges its directories
/// in list order. Chunk results are then merged in chunk-index order, so
/// the output depends only on the directory list and worker count.
///
/// Any worker failure aborts the run. When several chunks fail, the error
/// of the lowest chunk index is returned.
pub async fn run(
    directories: Vec<DirectoryRef>,
    worker_count: usize,
    reader: Arc<dyn ContainerReader>,
    progress: Arc<dyn ScanProgress>,
) -> Result<Dataset, PipelineError> {
    if worker_count == 0 {
        return Err(PipelineError::NoWorkers);
    }

    let total = directories.len();
    progress.on_phase(&format!(
        "Scanning {} directories with {} workers",
        total, worker_count
    ));

    let chunks: Vec<(usize, Vec<DirectoryRef>)> = chunkify(&directories, worker_count)
        .into_iter()
        .enumerate()
        .collect();
    let done = Arc::new(AtomicUsize::new(0));

    let worker_progress = progress.clone();
    let mut pool = WorkerPool::start(worker_count, chunks, move |(index, chunk)| {
        let reader = reader.clone();
        let progress = worker_progress.clone();
        let done = done.clone();
        async move {
            let scanned = tokio::task::spawn_blocking(move || {
                scan_chunk(&chunk, reader.as_ref(), progress.as_ref(), &done, total)
            })
            .await;
            match scanned {
                Ok(result) => (index, result),
                Err(e) => {
                    log::error!("Worker for chunk {} failed: {}", index, e);
                    (index, Err(PipelineError::WorkerLost { chunk: index }))
                }
            }
        }
    });

    let mut slots: Vec<Option<Result<Dataset, PipelineError>>> =
        (0..worker_count).map(|_| None).collect();
    while let Some((index, result)) = pool.recv().await {
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(result);
        }
    }

    let mut global = Dataset::new();
    for (index, slot) in slots.into_iter().enumerate() {
        let partial = slot.ok_or(PipelineError::WorkerLost { chunk: index })??;
        merge_dataset(&mut global, partial);
    }

    progress.on_complete(&format!(
        "Scanned {} directories: {} cards, {} sleeves, {} playmats, {} characters",
        total,
        global.card.len(),
        global.sleeve.len(),
        global.playmat.len(),
        global.character.len()
    ));
    Ok(global)
}

fn scan_chunk(
    chunk: &[DirectoryRef],
    reader: &dyn ContainerReader,
    progress: &dyn ScanProgress,
    done: &AtomicUsize,
    total: usize,
) -> Result<Dataset, PipelineError> {
    let mut local = Dataset::new();
    for dir in chunk {
        let partial = scan_directory(dir, reader)?;
        merge_dataset(&mut local, partial);
        let current = done.fetch_add(1, Ordering::Relaxed) + 1;
        progress.on_directory(current, total, &dir.label());
    }
    Ok(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentProgress;
    use duel_etl_core::MemoryReader;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn zero_workers_is_rejected() {
        let err = run(
            Vec::new(),
            0,
            Arc::new(MemoryReader::new()),
            Arc::new(SilentProgress),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PipelineError::NoWorkers));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn empty_listing_yields_empty_dataset() {
        let data = run(
            Vec::new(),
            3,
            Arc::new(MemoryReader::new()),
            Arc::new(SilentProgress),
        )
        .await
        .unwrap();
        assert!(data.is_empty());
    }
}
