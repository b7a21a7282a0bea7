//! Scheduled task validation
//!
//! Tasks are validated here and then handed to whatever persists them.
//! Schedules are only checked for syntax; nothing here runs them.

use crate::types::RoboError;
use chrono::Utc;
use cron::Schedule;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const TASK_ID_MAX: usize = 100;
pub const TASK_NAME_MAX: usize = 200;
pub const SCHEDULE_MAX: usize = 100;

/// A validated scheduled job definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: String,
    pub name: String,
    pub schedule: String,
    pub enabled: bool,
}

impl ScheduledTask {
    /// Validate name and schedule and assign a fresh id.
    pub fn new(name: &str, schedule: &str) -> Result<Self, RoboError> {
        let name = validate_task_name(name)?;
        let schedule = validate_schedule(schedule)?;
        let id = format!("task-{}", Utc::now().timestamp_millis());
        validate_task_id(&id)?;

        Ok(Self {
            id,
            name,
            schedule,
            enabled: true,
        })
    }

    /// Re-check a task that came back from storage.
    pub fn validate(&self) -> Result<(), RoboError> {
        validate_task_id(&self.id)?;
        validate_task_name(&self.name)?;
        validate_schedule(&self.schedule)?;
        Ok(())
    }
}

/// Ensures task IDs are safe and well-formed.
pub fn validate_task_id(task_id: &str) -> Result<(), RoboError> {
    if task_id.is_empty() {
        return Err(RoboError::Schedule("Task ID cannot be empty".to_string()));
    }

    if task_id.len() > TASK_ID_MAX {
        return Err(RoboError::Schedule(format!(
            "Task ID too long: {} chars (max: {})",
            task_id.len(),
            TASK_ID_MAX
        )));
    }

    // Only allow alphanumeric, hyphen, underscore
    if !task_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(RoboError::Schedule(format!(
            "Task ID contains invalid characters: '{}'",
            task_id
        )));
    }

    Ok(())
}

/// Trimmed task name, rejected if empty, oversized or containing control characters.
pub fn validate_task_name(name: &str) -> Result<String, RoboError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RoboError::Schedule("Task name cannot be empty".to_string()));
    }
    if trimmed.chars().count() > TASK_NAME_MAX {
        return Err(RoboError::Schedule(format!(
            "Task name too long (max: {} chars)",
            TASK_NAME_MAX
        )));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(RoboError::Schedule(
            "Task name contains control characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Trimmed cron expression, checked for syntax.
///
/// Accepts the common five-field form (`min hour dom month dow`) as well as
/// the six/seven-field form with seconds (and year).
///
/// ```
/// use robokit::schedule::validate_schedule;
///
/// assert!(validate_schedule("*/5 * * * *").is_ok());
/// assert!(validate_schedule("every tuesday").is_err());
/// ```
pub fn validate_schedule(schedule: &str) -> Result<String, RoboError> {
    let trimmed = schedule.trim();
    if trimmed.is_empty() {
        return Err(RoboError::Schedule("Schedule cannot be empty".to_string()));
    }
    if trimmed.len() > SCHEDULE_MAX {
        return Err(RoboError::Schedule(format!(
            "Schedule too long (max: {} chars)",
            SCHEDULE_MAX
        )));
    }

    Schedule::from_str(&to_cron_syntax(trimmed))
        .map_err(|e| RoboError::Schedule(format!("Invalid schedule '{}': {}", trimmed, e)))?;

    Ok(trimmed.to_string())
}

/// The `cron` crate expects a leading seconds field.
fn to_cron_syntax(expr: &str) -> String {
    if expr.split_whitespace().count() == 5 {
        format!("0 {}", expr)
    } else {
        expr.to_string()
    }
}
