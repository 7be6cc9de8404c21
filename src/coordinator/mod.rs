//! Bounded-concurrency plan execution
//!
//! Tasks start in plan order, at most `max_concurrent` at a time. Each task
//! holds a semaphore permit for its whole lifetime and releases it by drop,
//! so success, adapter error, timeout and panic all free the slot. Outcomes
//! land in a slot vector indexed by task position, which keeps the output in
//! plan order whatever the completion order.
//!
//! Spawned tasks live in a `JoinSet`, so dropping the `execute` future (a
//! caller-side deadline, for one) aborts everything still in flight.

mod outcome;

pub use outcome::{ExecutionOutcome, ExecutionReport};

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::{SearchError, TaskError};
use crate::plan::SearchPlan;
use crate::web_search::EngineRegistry;

/// Run every task of `plan` through `registry`.
///
/// Returns exactly one outcome per task, in task order. Per-task failures
/// are recorded in the outcome, never returned as `Err`.
///
/// # Errors
///
/// `InvalidConfiguration` if `max_concurrent` is zero. Nothing runs in that
/// case.
pub async fn execute(
    plan: &SearchPlan,
    max_concurrent: usize,
    registry: &EngineRegistry,
) -> Result<Vec<ExecutionOutcome>, SearchError> {
    if max_concurrent < 1 {
        return Err(SearchError::InvalidConfiguration(format!(
            "max_concurrent must be at least 1, got {max_concurrent}"
        )));
    }

    let total = plan.tasks.len();
    info!(
        topic = %plan.topic,
        tasks = total,
        max_concurrent,
        "Executing search plan"
    );

    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let mut slots: Vec<Option<ExecutionOutcome>> = vec![None; total];
    let mut in_flight = JoinSet::new();

    for (index, task) in plan.tasks.iter().enumerate() {
        let Some(search) = registry.get(task.engine) else {
            warn!(engine = %task.engine, keyword = %task.keyword, "No adapter registered");
            slots[index] = Some(ExecutionOutcome::failure(
                task.clone(),
                TaskError::EngineFailure(format!("No adapter registered for engine '{}'", task.engine)),
            ));
            continue;
        };

        // Waiting here is what keeps start order equal to plan order
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|e| SearchError::InvalidConfiguration(format!("Semaphore closed: {e}")))?;

        let request = task.to_request();
        let timeout = task.options.timeout;
        let keyword = task.keyword.clone();
        let engine = task.engine;

        in_flight.spawn(async move {
            let _permit = permit;
            debug!(index, %engine, %keyword, "Task started");
            let run = AssertUnwindSafe(tokio::time::timeout(timeout, search(request)));
            let result = match run.catch_unwind().await {
                Ok(Ok(Ok(results))) => Ok(results),
                Ok(Ok(Err(e))) => Err(TaskError::from(e)),
                Ok(Err(_)) => Err(TaskError::Timeout { after: timeout }),
                Err(panic) => Err(TaskError::EngineFailure(format!(
                    "Search task panicked: {}",
                    panic_message(&*panic)
                ))),
            };
            (index, result)
        });
    }

    while let Some(joined) = in_flight.join_next().await {
        // Panics are caught inside the task and nothing aborts the set here,
        // so a JoinError leaves its slot empty for the fallback below
        let (index, result) = match joined {
            Ok(done) => done,
            Err(join_error) => {
                warn!("Search task lost: {join_error}");
                continue;
            }
        };
        let task = plan.tasks[index].clone();
        let outcome = match result {
            Ok(results) => {
                debug!(index, engine = %task.engine, keyword = %task.keyword, results = results.len(), "Task finished");
                ExecutionOutcome::success(task, results)
            }
            Err(error) => {
                warn!(index, engine = %task.engine, keyword = %task.keyword, %error, "Task failed");
                ExecutionOutcome::failure(task, error)
            }
        };
        slots[index] = Some(outcome);
    }

    let outcomes: Vec<ExecutionOutcome> = slots
        .into_iter()
        .zip(&plan.tasks)
        .map(|(slot, task)| {
            slot.unwrap_or_else(|| {
                ExecutionOutcome::failure(
                    task.clone(),
                    TaskError::EngineFailure("Task produced no outcome".to_string()),
                )
            })
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    info!(
        tasks = total,
        succeeded = total - failed,
        failed,
        "Search plan finished"
    );

    Ok(outcomes)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

/// [`execute`] plus elapsed time and success/error counts
pub async fn execute_plan(
    plan: &SearchPlan,
    max_concurrent: usize,
    registry: &EngineRegistry,
) -> Result<ExecutionReport, SearchError> {
    let start = Instant::now();
    let outcomes = execute(plan, max_concurrent, registry).await?;
    Ok(ExecutionReport::new(outcomes, start.elapsed()))
}
