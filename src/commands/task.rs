//! `validate-task` command

use crate::schedule::ScheduledTask;
use crate::types::RoboError;

use super::print_json;

pub fn run(name: &str, schedule: &str, json: bool) -> Result<ScheduledTask, RoboError> {
    let task = ScheduledTask::new(name, schedule)?;
    if json {
        print_json(&task)?;
    } else {
        println!("Task '{}' is valid", task.name);
        println!("  Id:       {}", task.id);
        println!("  Schedule: {}", task.schedule);
    }
    Ok(task)
}
