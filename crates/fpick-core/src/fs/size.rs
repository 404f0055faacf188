//! Human-readable size labels.

const UNITS: [&str; 3] = ["KB", "MB", "GB"];

/// Formats a byte count as a short label such as `"1.50 KB"`.
///
/// The value is divided by 1024 while it is at least 1024, up to gigabytes.
/// Whole numbers render without decimals (`"1 MB"`), anything else with two.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut label = "B";

    for unit in UNITS {
        if size >= 1024.0 {
            size /= 1024.0;
            label = unit;
        }
    }

    if size.fract() == 0.0 {
        format!("{} {label}", size as u64)
    } else {
        format!("{size:.2} {label}")
    }
}

/// Label used for a directory once its children have been counted.
pub fn format_item_count(count: usize) -> String {
    format!("{count} items")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_size(0), "0 B");
    }

    #[test]
    fn below_one_kilobyte_stays_in_bytes() {
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn exact_kilobyte_has_no_decimals() {
        assert_eq!(format_size(1024), "1 KB");
    }

    #[test]
    fn fractional_kilobytes_use_two_decimals() {
        assert_eq!(format_size(1536), "1.50 KB");
    }

    #[test]
    fn exact_megabyte() {
        assert_eq!(format_size(1_048_576), "1 MB");
    }

    #[test]
    fn fractional_gigabytes() {
        assert_eq!(format_size(3 * 1024 * 1024 * 1024 / 2), "1.50 GB");
    }

    #[test]
    fn gigabytes_is_the_largest_unit() {
        assert_eq!(format_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn item_count_label() {
        assert_eq!(format_item_count(0), "0 items");
        assert_eq!(format_item_count(12), "12 items");
    }
}
