use crate::models::Report;

/// Format a count with thousands separators.
///
/// # Examples
///
/// ```
/// use pulse_core::formatting::format_count;
///
/// assert_eq!(format_count(7), "7");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

/// Render a report as a fixed-width text table followed by the headline
/// summary and the frequent-user list.
///
/// ```text
/// Date        Active  Joined
/// 2021-03-26       0       0
/// ...
/// ```
pub fn format_report_table(report: &Report) -> String {
    let mut out = format!("{:<10}  {:>6}  {:>6}\n", "Date", "Active", "Joined");
    for (i, date) in report.dates.iter().enumerate() {
        let active = report.message_counts.get(i).copied().unwrap_or(0);
        let joined = report.join_counts.get(i).copied().unwrap_or(0);
        out.push_str(&format!(
            "{:<10}  {:>6}  {:>6}\n",
            date,
            format_count(active),
            format_count(joined)
        ));
    }

    let summary = report.summary();
    out.push_str(&format!(
        "\nActive (sum of days): {}\n",
        format_count(summary.total_active)
    ));
    out.push_str(&format!("Joined: {}\n", format_count(summary.total_joined)));
    out.push_str(&format!(
        "Average per day: {}\n",
        format_count(summary.average_daily)
    ));
    match summary.peak_date {
        Some(date) => out.push_str(&format!(
            "Peak: {} on {}\n",
            format_count(summary.peak_active),
            date
        )),
        None => out.push_str("Peak: none\n"),
    }

    out.push('\n');
    if report.frequent_users.is_empty() {
        out.push_str("Active on 4+ days: none\n");
    } else {
        out.push_str(&format!(
            "Active on 4+ days ({}):\n",
            format_count(summary.frequent_user_count)
        ));
        for user in &report.frequent_users {
            out.push_str(&format!("  {}\n", user));
        }
    }

    out
}

/// Insert `,` every three digits from the right.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
