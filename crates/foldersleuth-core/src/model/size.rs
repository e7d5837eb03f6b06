/// Size formatting utilities — human-readable byte counts.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// The unit a byte count is displayed in. Frontends key colors off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl SizeUnit {
    /// Pick the largest unit the value reaches. GB is the ceiling.
    pub fn for_bytes(bytes: u64) -> Self {
        if bytes >= GB {
            SizeUnit::Gigabytes
        } else if bytes >= MB {
            SizeUnit::Megabytes
        } else if bytes >= KB {
            SizeUnit::Kilobytes
        } else {
            SizeUnit::Bytes
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeUnit::Bytes => "B",
            SizeUnit::Kilobytes => "KB",
            SizeUnit::Megabytes => "MB",
            SizeUnit::Gigabytes => "GB",
        }
    }

    fn divisor(self) -> u64 {
        match self {
            SizeUnit::Bytes => 1,
            SizeUnit::Kilobytes => KB,
            SizeUnit::Megabytes => MB,
            SizeUnit::Gigabytes => GB,
        }
    }
}

/// Format a byte count into a human-readable string with appropriate unit.
///
/// Uses binary units (1 KB = 1024 B). Plain bytes have no decimals; larger
/// units are shown with one.
pub fn format_size(bytes: u64) -> String {
    let unit = SizeUnit::for_bytes(bytes);
    match unit {
        SizeUnit::Bytes => format!("{bytes} B"),
        _ => format!("{:.1} {}", bytes as f64 / unit.divisor() as f64, unit.label()),
    }
}

/// Format an item count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
