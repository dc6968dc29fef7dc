//! HTML rendering of a recipient's task digest.

use taskping_core::types::Task;

/// Subject line for every reminder mail.
pub const REMINDER_SUBJECT: &str = "Remaining tasks";

/// Format tasks into an HTML unordered list, one entry per task.
///
/// Task names are inserted verbatim — the exact output bytes are part of the
/// contract with existing mail clients, so no escaping happens here.
pub fn render_task_list(tasks: &[Task]) -> String {
    let mut html = String::from("<ul>");
    for task in tasks {
        html.push_str("<li>");
        html.push_str(&task.name);
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}
