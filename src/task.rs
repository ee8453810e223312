//! # Report Tasks
//!
//! Glue around the remote reporting API: filters become part of a task
//! descriptor, the descriptor is submitted, the task is polled until it
//! finishes, and the raw rows are flattened into a table.
//!
//! - **[descriptor]** - Task descriptor builder and its JSON rendering
//! - **[service]** - Task service trait, handles, and the polling loop
//! - **[shape]** - Raw rows to table
//!
//! No HTTP client ships with this crate; callers implement
//! [`TaskService`] over whatever transport they use.
//!
//! ## Example
//!
//! ```
//! use crossweb_filter::parse;
//! use crossweb_filter::task::{ReportType, TaskDescriptor};
//!
//! let task = TaskDescriptor::builder(ReportType::Media, "Ivi M35-44")
//!     .date_range("2021-09-01", "2021-09-30")
//!     .usage_types([1, 2, 3])
//!     .demo_filter(parse("sex = 1 AND ageGroup = 4").unwrap())
//!     .media_filter(parse("crossMediaResourceId = 1067").unwrap())
//!     .slices(["researchMonth", "crossMediaResourceId"])
//!     .statistic("reach")
//!     .build()
//!     .unwrap();
//!
//! let body = task.to_json();
//! assert_eq!(body["filter"]["demoFilter"], "sex = 1 AND ageGroup = 4");
//! ```

pub mod descriptor;
pub mod service;
pub mod shape;

use std::{fmt, time::Duration};

use thiserror::Error;

use crate::validator::ValidationError;

pub use descriptor::{DateRange, ReportType, TaskDescriptor, TaskDescriptorBuilder};
pub use service::{PollPolicy, TaskHandle, TaskService, TaskStatus, run_task, wait_task};
pub use shape::{LABEL_COLUMN, ShapeError, Table, shape_result};

/// Which filter slot of a descriptor an expression occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRole {
    Geography,
    Demography,
    Media,
}

impl FilterRole {
    /// Key of the filter inside the descriptor's `filter` object.
    pub fn json_key(self) -> &'static str {
        match self {
            FilterRole::Geography => "geoFilter",
            FilterRole::Demography => "demoFilter",
            FilterRole::Media => "martFilter",
        }
    }
}

impl fmt::Display for FilterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterRole::Geography => f.write_str("geography"),
            FilterRole::Demography => f.write_str("demography"),
            FilterRole::Media => f.write_str("media"),
        }
    }
}

/// Task-side failures, kept apart from local filter errors so a caller can
/// tell "fix the filter" from "retry the call".
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("invalid task descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("{role} filter is invalid: {source}")]
    InvalidFilter {
        role: FilterRole,
        source: ValidationError,
    },

    #[error("task submission rejected: {0}")]
    Submission(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("task {task_id} failed: {message}")]
    Failed { task_id: String, message: String },

    #[error("task {task_id} did not finish within {timeout:?}")]
    Timeout { task_id: String, timeout: Duration },
}

impl TaskError {
    /// Transient failures worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TaskError::Network(_) | TaskError::Timeout { .. })
    }
}
