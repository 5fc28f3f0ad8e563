/// Size formatting and parsing for human-readable byte counts.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

const BINARY_UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Format a byte count with binary prefixes and one decimal place.
///
/// Divides by 1024 per step (`B`, `KiB`, `MiB`, `GiB`, `TiB`, `PiB`).
/// Values beyond the PiB range stay in PiB rather than inventing a unit.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let last = BINARY_UNITS.len() - 1;
    for (i, unit) in BINARY_UNITS.iter().enumerate() {
        if value < 1024.0 || i == last {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    // The loop always returns on the last unit.
    format!("{bytes} B")
}

/// Format a file count with thousand separators.
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

/// Parse a human-ish size like `10M`, `2GiB`, or `500kB` into bytes.
///
/// - A plain integer is a byte count.
/// - Suffixes are case-insensitive: `b`; `kb`, `mb`, `gb`, `tb` (powers of
///   1000); `kib`, `mib`, `gib`, `tib` (powers of 1024).
/// - The short forms `k`, `m`, `g`, `t` mean the 1024-based units.
///
/// Whitespace around the number and between number and unit is ignored.
pub fn parse_size(text: &str) -> Result<u64, String> {
    let s = text.trim();
    if s.is_empty() {
        return Err("empty size string".to_string());
    }

    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if digits_end == 0 {
        return Err(format!("cannot parse size: {text:?}"));
    }
    let number: u64 = s[..digits_end]
        .parse()
        .map_err(|_| format!("size out of range: {text:?}"))?;
    let unit = s[digits_end..].trim().to_ascii_lowercase();

    let multiplier: u64 = match unit.as_str() {
        "" | "b" => 1,
        "kb" => 1_000,
        "mb" => 1_000_000,
        "gb" => 1_000_000_000,
        "tb" => 1_000_000_000_000,
        "k" | "kib" => 1 << 10,
        "m" | "mib" => 1 << 20,
        "g" | "gib" => 1 << 30,
        "t" | "tib" => 1 << 40,
        _ => return Err(format!("unknown size unit in {text:?}")),
    };

    number
        .checked_mul(multiplier)
        .ok_or_else(|| format!("size out of range: {text:?}"))
}
