use crate::trace::TraceEntry;

pub struct TraceTableFormatter {
    step_width: usize,
    action_width: usize,
    target_width: usize,
    detail_width: usize,
}

impl TraceTableFormatter {
    pub fn new(entries: &[TraceEntry]) -> Self {
        let target_width = entries
            .iter()
            .filter_map(|e| e.target.as_ref().map(|t| t.chars().count()))
            .max()
            .unwrap_or(6)
            .clamp(6, 30);
        let detail_width = entries
            .iter()
            .map(|e| e.detail.chars().count())
            .max()
            .unwrap_or(6)
            .clamp(6, 60);

        Self {
            step_width: 4,
            action_width: 11,
            target_width,
            detail_width,
        }
    }

    pub fn print_table(&self, entries: &[TraceEntry]) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!(
            "{}",
            self.row("Step", "Action", "Target", "Detail")
        );
        println!("{}", self.border('├', '┼', '┤'));
        for entry in entries {
            println!(
                "{}",
                self.row(
                    &entry.step.to_string(),
                    &entry.action,
                    entry.target.as_deref().unwrap_or("-"),
                    &entry.detail,
                )
            );
        }
        println!("{}", self.border('└', '┴', '┘'));
    }

    fn row(&self, step: &str, action: &str, target: &str, detail: &str) -> String {
        format!(
            "│ {} │ {} │ {} │ {} │",
            truncate(step, self.step_width),
            truncate(action, self.action_width),
            truncate(target, self.target_width),
            truncate(detail, self.detail_width),
        )
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        format!(
            "{left}{}{mid}{}{mid}{}{mid}{}{right}",
            "─".repeat(self.step_width + 2),
            "─".repeat(self.action_width + 2),
            "─".repeat(self.target_width + 2),
            "─".repeat(self.detail_width + 2),
        )
    }
}

pub fn print_trace(entries: &[TraceEntry]) {
    if entries.is_empty() {
        println!("No refresher activity.");
        return;
    }
    TraceTableFormatter::new(entries).print_table(entries);
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Counts characters, not bytes, so multi-byte names are cut safely.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_pads_short_strings() {
        assert_eq!(truncate("stop", 6), "stop  ");
    }

    #[test]
    fn test_truncate_cuts_long_strings() {
        assert_eq!(truncate("pipeline-dashboard", 10), "pipelin...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("ダッシュボード", 5), "ダッ...");
    }

    #[test]
    fn test_border_widths_match_rows() {
        let formatter = TraceTableFormatter {
            step_width: 4,
            action_width: 11,
            target_width: 6,
            detail_width: 6,
        };
        let border = formatter.border('┌', '┬', '┐');
        let row = formatter.row("1", "stop", "A", "done");
        assert_eq!(border.chars().count(), row.chars().count());
    }
}
