use std::{
    thread,
    time::{Duration, Instant},
};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::task::{TaskDescriptor, TaskError};

/// Opaque reference to a submitted task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    pub id: String,
}

impl TaskHandle {
    pub fn new(id: impl Into<String>) -> Self {
        TaskHandle { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Done,
    /// Terminal failure reported by the service
    Error(String),
}

/// Remote task API.
///
/// Implementations own transport, authentication and retries of single
/// calls; polling cadence is driven by [`wait_task`].
pub trait TaskService {
    fn submit_task(&self, descriptor: &TaskDescriptor) -> Result<TaskHandle, TaskError>;

    fn poll_task(&self, handle: &TaskHandle) -> Result<TaskStatus, TaskError>;

    /// Raw result rows of a finished task.
    fn fetch_result(&self, handle: &TaskHandle) -> Result<Vec<Value>, TaskError>;
}

/// Poll cadence and overall deadline for [`wait_task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(600),
        }
    }
}

/// Blocks until the task reaches a terminal status.
///
/// The status is checked once immediately, then every `policy.interval`.
/// Once `policy.timeout` has elapsed without a terminal status the wait
/// fails with [`TaskError::Timeout`]; the remote task is left running.
pub fn wait_task(
    service: &impl TaskService,
    handle: &TaskHandle,
    policy: &PollPolicy,
) -> Result<(), TaskError> {
    let started = Instant::now();
    let mut polls = 0u32;

    loop {
        polls += 1;
        match service.poll_task(handle)? {
            TaskStatus::Done => {
                info!(task = %handle.id, polls, elapsed = ?started.elapsed(), "task finished");
                return Ok(());
            }
            TaskStatus::Error(message) => {
                warn!(task = %handle.id, %message, "task failed");
                return Err(TaskError::Failed {
                    task_id: handle.id.clone(),
                    message,
                });
            }
            TaskStatus::Pending => debug!(task = %handle.id, polls, "task pending"),
        }

        let elapsed = started.elapsed();
        if elapsed >= policy.timeout {
            warn!(task = %handle.id, polls, ?elapsed, "gave up waiting for task");
            return Err(TaskError::Timeout {
                task_id: handle.id.clone(),
                timeout: policy.timeout,
            });
        }
        thread::sleep(policy.interval.min(policy.timeout - elapsed));
    }
}

/// Submits a descriptor, waits for it, and fetches the raw rows.
pub fn run_task(
    service: &impl TaskService,
    descriptor: &TaskDescriptor,
    policy: &PollPolicy,
) -> Result<Vec<Value>, TaskError> {
    let handle = service.submit_task(descriptor)?;
    info!(task = %handle.id, name = descriptor.name(), "task submitted");

    wait_task(service, &handle, policy)?;
    let rows = service.fetch_result(&handle)?;
    debug!(task = %handle.id, rows = rows.len(), "task result fetched");
    Ok(rows)
}
