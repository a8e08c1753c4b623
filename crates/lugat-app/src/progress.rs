use kanal::AsyncReceiver;
use lugat_types::ImportEvent;

/// Print pipeline events until the channel closes.
pub async fn progress_loop(rx: AsyncReceiver<ImportEvent>) {
    while let Ok(event) = rx.recv().await {
        match event {
            ImportEvent::Progress { percent, status } => {
                tracing::info!("[{percent:>3}%] {status}");
            }
            ImportEvent::WordSkipped { word, reason } => {
                tracing::warn!("Skipped {word:?}: {reason}");
            }
            ImportEvent::ChapterCommitted {
                chapter,
                processed,
                total,
            } => {
                tracing::info!("Chapter {} committed ({processed}/{total})", chapter + 1);
            }
            ImportEvent::Completed { imported, skipped } => {
                tracing::info!("Import complete: {imported} cards ({skipped} skipped)");
            }
            ImportEvent::Failed { message, resumable } => {
                if resumable {
                    tracing::error!("Import failed (resumable): {message}");
                } else {
                    tracing::error!("Import failed: {message}");
                }
            }
        }
    }
}
