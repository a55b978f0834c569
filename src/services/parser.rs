// src/services/parser.rs

//! Turns a homework record into the notification text.

use crate::error::{AppError, Result};
use crate::models::{HomeworkRecord, verdict_for};

/// Format the notification for one reviewed homework.
///
/// Fails with `MalformedRecord` when `homework_name` or `status` is absent,
/// and with `UnknownStatus` when the status is not in the catalog.
pub fn parse_homework_status(record: &HomeworkRecord) -> Result<String> {
    let name = record
        .name
        .as_deref()
        .ok_or(AppError::MalformedRecord {
            missing: "homework_name",
        })?;
    let status = record
        .status
        .as_deref()
        .ok_or(AppError::MalformedRecord { missing: "status" })?;
    let verdict = verdict_for(status)?;

    Ok(format!("У вас проверили работу \"{name}\"!\n\n{verdict}"))
}
