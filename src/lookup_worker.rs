use crate::dictionary::{DefinitionProvider, LookupMode, fetch_all};
use crate::logger;
use crate::models::{LookupRequest, LookupResponse};
use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::sync::Arc;
use std::thread;

/// Runs definition lookups off the UI thread.
///
/// Each `Fetch` is answered with zero or more `Progress` messages and one
/// `Complete`. The worker exits when the request channel disconnects.
pub fn spawn_lookup_worker(
    provider: Arc<dyn DefinitionProvider>,
    mode: LookupMode,
    lookup_tx: Sender<LookupResponse>,
    lookup_rx: Receiver<LookupRequest>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("vocab-drill::lookup_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Lookup worker failed to start runtime: {}", e));
                    return;
                }
            };

            while let Ok(LookupRequest::Fetch { generation, words }) = lookup_rx.recv() {
                logger::log(&format!(
                    "Worker fetching {} words (generation {})",
                    words.len(),
                    generation
                ));

                let entries = rt.block_on(fetch_all(
                    provider.as_ref(),
                    &words,
                    mode,
                    |done, total| {
                        let _ = lookup_tx.send(LookupResponse::Progress {
                            generation,
                            done,
                            total,
                        });
                    },
                ));

                if lookup_tx
                    .send(LookupResponse::Complete {
                        generation,
                        entries,
                    })
                    .is_err()
                {
                    break;
                }
            }
            logger::log("Lookup worker channel disconnected, exiting");
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::provider::mock::MockProvider;
    use crate::models::NO_DEFINITIONS;
    use crossbeam_channel::unbounded;
    use std::time::Duration;

    #[test]
    fn test_worker_reports_progress_then_complete() {
        let provider = Arc::new(MockProvider::new(&[("gato", &["a cat animal"])]));
        let (req_tx, req_rx) = unbounded();
        let (resp_tx, resp_rx) = unbounded();
        let handle =
            spawn_lookup_worker(provider, LookupMode::Sequential, resp_tx, req_rx).unwrap();

        req_tx
            .send(LookupRequest::Fetch {
                generation: 4,
                words: vec!["gato".into(), "perro".into()],
            })
            .unwrap();

        let mut progress = Vec::new();
        let entries = loop {
            match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                LookupResponse::Progress {
                    generation,
                    done,
                    total,
                } => {
                    assert_eq!(generation, 4);
                    progress.push((done, total));
                }
                LookupResponse::Complete {
                    generation,
                    entries,
                } => {
                    assert_eq!(generation, 4);
                    break entries;
                }
            }
        };

        assert_eq!(progress, vec![(1, 2), (2, 2)]);
        assert_eq!(entries[0].definitions, vec!["a cat animal"]);
        assert_eq!(entries[1].definitions, vec![NO_DEFINITIONS]);

        drop(req_tx);
        handle.join().unwrap();
    }
}
