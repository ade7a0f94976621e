//! Process-wide wiring: one bootstrap scan after the settle delay, then a
//! rescan per mutation notification, for the lifetime of the page.

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

use crate::annotator::SharedAnnotator;
use crate::bus::DomEvent;
use crate::dom::SharedDocument;

/// Grace period before the bootstrap scan, letting initial content settle.
pub const BOOTSTRAP_DELAY: Duration = Duration::from_millis(500);

/// Drive the annotator from the document's mutation stream until `shutdown`
/// flips true, its sender is dropped, or the document goes away.
///
/// The subscription is taken before the bootstrap delay so mutations during
/// the settle window are not lost. A lagged receiver just rescans; the scan
/// is idempotent, so a dropped batch costs nothing.
pub fn spawn(
    doc: SharedDocument,
    annotator: SharedAnnotator,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut changes = doc.lock().await.changes();

        sleep(BOOTSTRAP_DELAY).await;
        run_scan(&doc, &annotator).await;

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                changed = shutdown.changed() => {
                    // A closed channel means the owner is gone; stop too.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                event = changes.recv() => match event {
                    Ok(DomEvent::SubtreeChanged) => run_scan(&doc, &annotator).await,
                    Err(RecvError::Lagged(_)) => run_scan(&doc, &annotator).await,
                    Err(RecvError::Closed) => break,
                }
            }
        }
    })
}

// Lock order everywhere is annotator, then document.
async fn run_scan(doc: &SharedDocument, annotator: &SharedAnnotator) {
    let mut annotator = annotator.lock().await;
    let mut doc = doc.lock().await;
    annotator.scan(&mut doc);
}
