/// Formats a byte count the way the upload UI displays it
///
/// Examples:
/// - 0 bytes: "0 Bytes"
/// - 512 bytes: "512 Bytes"
/// - 1536 bytes: "1.5 KB"
/// - 5 * 1024 * 1024 bytes: "5 MB"
pub fn format_file_size(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    const K: f64 = 1024.0;

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= K && unit < UNITS.len() - 1 {
        value /= K;
        unit += 1;
    }

    let mut formatted = format!("{:.2}", value);
    if formatted.contains('.') {
        formatted = formatted.trim_end_matches('0').trim_end_matches('.').to_string();
    }

    format!("{} {}", formatted, UNITS[unit])
}

/// Formats a minute total for the dashboard report
///
/// Examples:
/// - 0: "0 min"
/// - 45: "45 min"
/// - 135: "2 h 15 min"
/// - 120: "2 h"
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours == 0 {
        format!("{} min", rest)
    } else if rest == 0 {
        format!("{} h", hours)
    } else {
        format!("{} h {} min", hours, rest)
    }
}
