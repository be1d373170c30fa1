use chrono::NaiveDateTime;

/// Truncate a string to a maximum length in characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Kickoff as shown in page captions, or a dash when unknown
pub fn format_kickoff(kickoff: Option<NaiveDateTime>) -> String {
    match kickoff {
        Some(ts) => ts.format("%b %d, %Y %H:%M").to_string(),
        None => "-".to_string(),
    }
}
