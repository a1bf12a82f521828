//! Numeric and string helpers shared by the evaluators and the renderer

const ELLIPSIS: &str = "...";

/// One decimal place
pub fn fmt1(value: f64) -> String {
  format!("{:.1}", value)
}

/// Seconds (per km or per 100m) as m:ss
pub fn format_pace(seconds: f64) -> String {
  let total = seconds.max(0.0).round() as u64;
  format!("{}:{:02}", total / 60, total % 60)
}

/// Seconds as h:mm:ss
pub fn format_duration(seconds: u32) -> String {
  let hours = seconds / 3600;
  let minutes = (seconds % 3600) / 60;
  let secs = seconds % 60;
  format!("{}:{:02}:{:02}", hours, minutes, secs)
}

/// Arithmetic mean, or None for an empty sequence
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
  let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
  (count > 0).then(|| sum / count as f64)
}

/// Flatten whitespace and cap free text at `max_len` characters.
/// Truncated text ends with "..." and still fits in `max_len`.
pub fn truncate(text: &str, max_len: usize) -> String {
  let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");

  if flat.chars().count() <= max_len {
    return flat;
  }

  let keep = max_len.saturating_sub(ELLIPSIS.len());
  let mut out: String = flat.chars().take(keep).collect();
  out.truncate(out.trim_end().len());
  if max_len >= ELLIPSIS.len() {
    out.push_str(ELLIPSIS);
  }
  out
}
