use chrono::Local;

/// Local wall-clock time as shown next to loaded tables.
pub fn current_human_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
