use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::athlete_fetch::{AthleteApi, DetailOutcome, JsonSource};
use crate::state::{Delta, ProviderCommand};

/// Serve fetch commands until the command channel closes. Each fetch runs on
/// the worker pool and reports back through `tx` tagged with its sequence.
pub fn spawn_provider<S>(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    api: Arc<AthleteApi<S>>,
    threads: usize,
) -> thread::JoinHandle<()>
where
    S: JsonSource + 'static,
{
    thread::spawn(move || {
        let pool = build_fetch_pool(threads);
        if pool.is_none() {
            let _ = tx.send(Delta::Log(
                "[WARN] Fetch pool unavailable; using one thread per request".to_string(),
            ));
        }

        while let Ok(cmd) = cmd_rx.recv() {
            let tx = tx.clone();
            let api = api.clone();
            let job = move || run_command(&api, &tx, cmd);
            if let Some(pool) = pool.as_ref() {
                pool.spawn(job);
            } else {
                thread::spawn(job);
            }
        }
    })
}

/// Perform one command synchronously and send the resulting deltas.
pub fn run_command<S: JsonSource>(api: &AthleteApi<S>, tx: &Sender<Delta>, cmd: ProviderCommand) {
    match cmd {
        ProviderCommand::FetchListing { seq, filters } => match api.fetch_athletes(&filters) {
            Ok(page) => {
                let _ = tx.send(Delta::SetListing { seq, page });
            }
            Err(err) => {
                let _ = tx.send(Delta::ListingFailed {
                    seq,
                    error: format!("{err:#}"),
                });
            }
        },
        ProviderCommand::FetchAthlete { seq, identifier } => {
            match api.fetch_athlete_by_identifier(&identifier) {
                DetailOutcome::Found(athlete) => {
                    let _ = tx.send(Delta::SetAthlete { seq, athlete });
                }
                DetailOutcome::NotFound { reason } => {
                    let _ = tx.send(Delta::AthleteNotFound {
                        seq,
                        identifier,
                        reason,
                    });
                }
            }
        }
    }
}

fn build_fetch_pool(threads: usize) -> Option<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.clamp(1, 16))
        .thread_name(|idx| format!("futscout-fetch-{idx}"))
        .build()
        .ok()
}
