//! Human-readable byte counts.

use std::fmt;

/// Binary unit labels, one per power of 1024. `EB` covers all of `i64`.
const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

const STEP: u64 = 1024;

/// A byte count that displays in human-readable units.
///
/// ```rust
/// use volpath_core::ByteSize;
///
/// assert_eq!(ByteSize(1536).to_string(), "1.5 kB");
/// assert_eq!(ByteSize(-3).to_string(), "0 B");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteSize(pub i64);

impl ByteSize {
    /// Index into the unit table: `floor(log1024(bytes))`.
    fn unit_index(bytes: u64) -> usize {
        let mut index = 0;
        let mut threshold = STEP;
        while index + 1 < UNITS.len() && bytes >= threshold {
            index += 1;
            threshold = match threshold.checked_mul(STEP) {
                Some(next) => next,
                None => break,
            };
        }
        index
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 <= 0 {
            return write!(f, "0 B");
        }

        let bytes = self.0 as u64;
        let index = Self::unit_index(bytes);
        let scaled = bytes as f64 / (STEP as f64).powi(index as i32);
        let tenths = (scaled * 10.0).round_ties_even() as u64;

        write!(f, "{}", group_thousands(tenths / 10))?;
        if tenths % 10 != 0 {
            write!(f, ".{}", tenths % 10)?;
        }
        write!(f, " {}", UNITS[index])
    }
}

/// Render a byte count, e.g. `1536 -> "1.5 kB"`. Non-positive input is `"0 B"`.
pub fn format_size(bytes: i64) -> String {
    ByteSize(bytes).to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_is_zero() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(-1), "0 B");
        assert_eq!(format_size(i64::MIN), "0 B");
    }

    #[test]
    fn bytes_below_one_kib() {
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(999), "999 B");
        assert_eq!(format_size(1023), "1,023 B");
    }

    #[test]
    fn fractional_units() {
        assert_eq!(format_size(1024), "1 kB");
        assert_eq!(format_size(1536), "1.5 kB");
        assert_eq!(format_size(1_048_576), "1 MB");
        assert_eq!(format_size(1_073_741_824), "1 GB");
        assert_eq!(format_size(5 * 1_099_511_627_776 / 2), "2.5 TB");
    }

    #[test]
    fn rounds_half_to_even() {
        // 1.25 kB and 1.75 kB are exact in binary.
        assert_eq!(format_size(1280), "1.2 kB");
        assert_eq!(format_size(1792), "1.8 kB");
    }

    #[test]
    fn groups_thousands_before_next_unit() {
        // 1023.99 kB rounds up but stays in kB.
        assert_eq!(format_size(1_048_575), "1,024 kB");
    }

    #[test]
    fn beyond_terabytes() {
        assert_eq!(format_size(1_125_899_906_842_624), "1 PB");
        assert_eq!(format_size(i64::MAX), "8 EB");
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
