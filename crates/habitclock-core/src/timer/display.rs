use super::Phase;

/// `MM:SS`. Minutes are not wrapped into hours, so a 120 minute interval
/// reads `120:00`.
pub fn format_remaining(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Work => "Work",
        Phase::Break => "Break",
    }
}
