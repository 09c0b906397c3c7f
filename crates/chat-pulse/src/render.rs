use pulse_core::formatting::format_report_table;
use pulse_core::models::Report;

/// Render `report` in one of the CLI output formats.
///
/// `"json"` is the single-line response body, `"pretty"` the same body
/// indented, and `"table"` a plain-text table. Unknown formats fall back to
/// `"json"`; clap already restricts the accepted values.
pub fn render(report: &Report, format: &str) -> serde_json::Result<String> {
    match format {
        "table" => Ok(format_report_table(report)),
        "pretty" => report.to_json(true),
        _ => report.to_json(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn report() -> Report {
        Report {
            dates: vec!["2021-04-01".into(); 7],
            message_counts: vec![0, 0, 0, 0, 0, 0, 1],
            join_counts: vec![0; 7],
            frequent_users: BTreeSet::new(),
        }
    }

    #[test]
    fn test_render_json_is_single_line() {
        let out = render(&report(), "json").unwrap();
        assert!(!out.contains('\n'));
        assert!(out.starts_with("{\"dates\""));
        assert!(out.contains("\"active_users_count\":[0,0,0,0,0,0,1]"));
    }

    #[test]
    fn test_render_pretty_parses_back() {
        let out = render(&report(), "pretty").unwrap();
        let parsed: Report = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, report());
    }

    #[test]
    fn test_render_table() {
        let out = render(&report(), "table").unwrap();
        assert!(out.starts_with("Date"));
    }
}
