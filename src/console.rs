//! Console transcript: interval echoes, per-task summaries, confirmation
//! prompts, and the result printer.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::pipeline::{UploadJob, UploadPipeline};
use crate::timelog::{minutes_to_hours, Aggregation, DurationMinutes, Interval, TaskTotal};
use crate::Result;

/// Echo line for one attributed interval.
#[must_use]
pub fn format_interval(interval: &Interval) -> String {
    format!(
        "{:4} to {:4} {:>10} {:5} mins",
        interval.start, interval.end, interval.task, interval.minutes
    )
}

/// Summary line for one task's total.
#[must_use]
pub fn format_total(task: &str, total: &TaskTotal) -> String {
    format!(
        "{task:>10} {:5} mins   {:5.2} h started at {:4}",
        total.total_minutes,
        minutes_to_hours(total.total_minutes),
        total.first_start
    )
}

/// Confirmation question asked before uploading a task.
#[must_use]
pub fn format_prompt(task: &str, minutes: DurationMinutes) -> String {
    format!("Log {:.2} h to {task} (y/N)? ", minutes_to_hours(minutes))
}

/// Write the interval echoes and per-task summaries.
///
/// # Errors
///
/// Returns `AppError::Io` if writing to `out` fails.
pub fn write_summary<W: Write>(aggregation: &Aggregation, out: &mut W) -> Result<()> {
    for interval in &aggregation.intervals {
        writeln!(out, "{}", format_interval(interval))?;
    }
    writeln!(out)?;

    for (task, total) in aggregation.sorted_totals() {
        writeln!(out, "{}", format_total(task, &total))?;
    }
    writeln!(out)?;
    Ok(())
}

/// Read one answer line; only a leading `y` or `Y` confirms.
///
/// End of input and read errors count as "no".
pub async fn read_confirmation<R: AsyncBufRead + Unpin>(input: &mut R) -> bool {
    let mut answer = String::new();
    match input.read_line(&mut answer).await {
        Ok(0) => false,
        Ok(_) => answer.starts_with(['y', 'Y']),
        Err(err) => {
            warn!(%err, "failed to read confirmation");
            false
        }
    }
}

/// Ask about every task and launch an upload for each confirmed one.
///
/// Uploads start as soon as their task is confirmed, so they overlap with
/// the remaining questions. Returns the number of launched uploads.
///
/// # Errors
///
/// Returns `AppError::Io` if writing a prompt to `out` fails.
pub async fn confirm_and_launch<R, W>(
    aggregation: &Aggregation,
    input: &mut R,
    out: &mut W,
    pipeline: &UploadPipeline,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut launched = 0;
    for (task, total) in aggregation.sorted_totals() {
        write!(out, "{}", format_prompt(task, total.total_minutes))?;
        out.flush()?;

        if !read_confirmation(input).await {
            debug!(task, "upload skipped");
            continue;
        }

        pipeline.launch(UploadJob {
            task: task.to_owned(),
            minutes: total.total_minutes,
            first_start: total.first_start,
        });
        launched += 1;
    }
    Ok(launched)
}

/// Print every result line as it arrives until the stream closes.
///
/// Returns the number of lines printed.
///
/// # Errors
///
/// Returns `AppError::Io` if writing to `out` fails.
pub async fn print_results<W: Write>(
    mut results: mpsc::UnboundedReceiver<String>,
    out: &mut W,
) -> Result<usize> {
    let mut printed = 0;
    while let Some(line) = results.recv().await {
        writeln!(out, "{line}")?;
        out.flush()?;
        printed += 1;
    }
    Ok(printed)
}
