//! Plain-text rendering of controller views.

use std::fmt::Write;

use chrono::Local;

use crate::domain::{AssignmentLog, AssignmentStatus};
use crate::simulation::SimulationController;

const BAR_WIDTH: usize = 20;

/// Servers, queue, statistics and the next action.
pub fn render_state(controller: &SimulationController) -> String {
    let view = controller.view();
    let mut out = String::new();

    let step = view.step.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "{} | step {} ({}/{}){}",
        if view.running { "running" } else { "paused" },
        step,
        view.cursor.map(|c| c + 1).unwrap_or(0),
        view.history_len,
        if view.viewing_history { " [viewing history]" } else { "" }
    );

    for server in &view.servers {
        let filled = ((server.load_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        let tasks: Vec<String> = server.tasks.iter().map(|t| t.label()).collect();
        let _ = writeln!(
            out,
            "Server {:<3} [{}{}] {:>5.1}% {:>4}/{:<4} {:?} {}",
            server.id,
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            server.load_percent,
            server.load,
            server.capacity,
            server.level,
            tasks.join(" ")
        );
    }

    let queue: Vec<String> = view.queue.iter().map(|t| format!("{}({})", t.label(), t.weight())).collect();
    let _ = writeln!(
        out,
        "Queue: {}",
        if queue.is_empty() { "empty".to_string() } else { queue.join(" ") }
    );
    let _ = writeln!(
        out,
        "Total: {}  Completed: {}  Average load: {:.1}  Pending: {}",
        view.statistics.total_tasks,
        view.statistics.completed_tasks,
        view.statistics.average_load,
        view.queue.len()
    );
    let _ = write!(out, "Next: {}", view.next_action.describe());
    out
}

/// The `limit` most recent log entries, newest first.
pub fn render_log(log: &AssignmentLog, limit: usize) -> String {
    if log.is_empty() {
        return "No assignments yet.".to_string();
    }

    let mut out = String::new();
    for entry in log.iter().take(limit) {
        let status = match entry.status {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Completed => "completed",
        };
        let _ = writeln!(
            out,
            "{}  T{:<4} {:>3} units  Server {:<3} {:>5.1}% -> {:>5.1}%  {}",
            entry.timestamp.with_timezone(&Local).format("%H:%M:%S"),
            entry.task_id,
            entry.task_weight,
            entry.server_id,
            entry.load_before_pct,
            entry.load_after_pct,
            status
        );
    }
    out.trim_end().to_string()
}
