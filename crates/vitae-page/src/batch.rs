//! Batch Renderer
//!
//! Encodes top-level composers, distributes them over the pool, and
//! blocks until every index is filled. Per-block failures become inline,
//! visually distinguished error blocks; only a batch where nothing could
//! even be submitted surfaces as an error.

use std::sync::mpsc;

use vitae_compose::{encode, escape_html, Composer};
use vitae_pool::{Task, TaskOutcome, TaskResult, UnitError, WorkerPool};

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("no block in the batch could be rendered")]
    BatchFailed,
    #[error(transparent)]
    Locale(#[from] crate::locale::LocaleError),
    #[error(transparent)]
    Pool(#[from] vitae_pool::PoolError),
    #[error("failed to write {path}: {source}")]
    Output {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

fn failure_block(message: &str) -> String {
    format!(
        r#"<div class="render-error" style="color: red">[Error rendering block: {}]</div>"#,
        escape_html(message)
    )
}

/// What the pool callbacks feed back to the collection loop. `UnitLost`
/// lets the loop notice a dead pool instead of waiting on tasks that can
/// never run.
enum BatchEvent {
    Result(TaskResult),
    UnitLost,
}

fn fill_slot(slots: &mut [Option<String>], filled: &mut usize, result: TaskResult) {
    let index = result.index;
    if index >= slots.len() || slots[index].is_some() {
        tracing::warn!(index, "spurious result ignored");
        return;
    }
    slots[index] = Some(match result.outcome {
        TaskOutcome::Html(html) => html,
        TaskOutcome::Failed(message) => {
            tracing::error!(index, %message, "block failed to render, placeholder spliced");
            failure_block(&message)
        }
    });
    *filled += 1;
}

/// Render `composers` through `pool`, returning one HTML string per
/// input, in input order. Registers the pool callbacks, so the pool must
/// not be shared with another batch in flight.
pub fn render_batch(composers: &[Composer], pool: &WorkerPool) -> Result<Vec<String>, PageError> {
    if composers.is_empty() {
        return Ok(Vec::new());
    }

    let total = composers.len();
    let mut slots: Vec<Option<String>> = vec![None; total];
    let (results_tx, results_rx) = mpsc::channel();

    pool.on_task_complete({
        let results_tx = results_tx.clone();
        move |result| {
            let _ = results_tx.send(BatchEvent::Result(result));
        }
    });
    // A crashed unit never reports completion; convert the crash into a
    // failed result so its index still resolves, and flag the lost unit
    // so a fully dead pool cannot strand the rest of the queue.
    pool.on_error(move |error| match error {
        UnitError::Crashed { index, message, .. } => {
            let _ = results_tx.send(BatchEvent::Result(TaskResult {
                index,
                outcome: TaskOutcome::Failed(message),
            }));
            let _ = results_tx.send(BatchEvent::UnitLost);
        }
        lost @ UnitError::InitFailed { .. } => {
            tracing::warn!(error = %lost, "unit lost during batch render");
            let _ = results_tx.send(BatchEvent::UnitLost);
        }
        other => tracing::warn!(error = %other, "unit error during batch render"),
    });

    let mut submitted = 0usize;
    for (index, composer) in composers.iter().enumerate() {
        match encode(composer) {
            Ok(payload) => {
                pool.submit_task(Task::new(index, payload));
                submitted += 1;
            }
            Err(error) => {
                tracing::error!(index, %error, "failed to encode block, marked failed");
                slots[index] = Some(failure_block(&error.to_string()));
            }
        }
    }
    if submitted == 0 {
        return Err(PageError::BatchFailed);
    }

    let mut filled = slots.iter().filter(|slot| slot.is_some()).count();
    let mut live = pool.live_units();
    while filled < total && live > 0 {
        let event = results_rx.recv().map_err(|_| PageError::BatchFailed)?;
        match event {
            BatchEvent::Result(result) => fill_slot(&mut slots, &mut filled, result),
            BatchEvent::UnitLost => live = live.saturating_sub(1),
        }
    }

    // Reached with open slots only when every unit is gone. Results that
    // made it out are already buffered on the channel; anything still
    // unfilled after draining was stranded in the queue and degrades to a
    // placeholder in place.
    while filled < total {
        match results_rx.try_recv() {
            Ok(BatchEvent::Result(result)) => fill_slot(&mut slots, &mut filled, result),
            Ok(BatchEvent::UnitLost) => {}
            Err(_) => break,
        }
    }
    for slot in slots.iter_mut() {
        if slot.is_none() {
            tracing::error!("block stranded by a dead pool, placeholder spliced");
            *slot = Some(failure_block("no live worker units remain"));
        }
    }

    Ok(slots.into_iter().flatten().collect())
}
