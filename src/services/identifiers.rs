//! Synthetic identifier formatting.
//!
//! Student ids and National Identification Numbers (NICs) are pure functions of a
//! sequence index, so uniqueness within and across runs comes entirely from the
//! counters never repeating an index. The NICs only match the Sri Lankan format
//! shape; they are not checksummed and may coincide with real numbers.

use regex::Regex;
use std::sync::LazyLock;

/// Prefix of every generated student id
pub const STUDENT_ID_PREFIX: &str = "STUDENT-ID";

/// Shortest name accepted by the upload template
pub const MIN_NAME_LEN: usize = 3;

/// Longest name accepted by the upload template
pub const MAX_NAME_LEN: usize = 50;

/// Appended to names shorter than [`MIN_NAME_LEN`]
pub const NAME_PAD_SUFFIX: &str = "son";

/// Accepted NIC shapes: 9 digits plus V/X, or 12 digits.
pub const NIC_PATTERN: &str = r"^(?:[0-9]{9}[VXvx]|[0-9]{12})$";

static NIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NIC_PATTERN).expect("Invalid NIC regex"));

/// The two NIC layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NicFormat {
    /// 12 digits: 4-digit year, 3-digit day, 5-digit serial
    New,
    /// 9 digits and a V/X letter: 2-digit year, 3-digit day, 4-digit serial
    Old,
}

/// Even indices use the new layout, odd indices the old one.
pub fn nic_format_for(index: u64) -> NicFormat {
    if index % 2 == 0 {
        NicFormat::New
    } else {
        NicFormat::Old
    }
}

/// `STUDENT-ID` followed by `index` padded to at least 5 digits.
///
/// Indices of 100000 and above simply produce a wider number.
pub fn generate_student_id(index: u64) -> String {
    format!("{}{:05}", STUDENT_ID_PREFIX, index)
}

/// Serial widths for each layout
const NEW_SERIAL_MODULUS: u64 = 100_000;
const OLD_SERIAL_MODULUS: u64 = 10_000;

/// Format a NIC for `index`.
///
/// The serial is the index padded to 5 digits (new) or 4 digits (old). Once the index
/// outgrows that width only its low-order digits are kept, so the result always fits
/// [`NIC_PATTERN`]; NICs start repeating at that point.
pub fn generate_nic(index: u64) -> String {
    let day_of_year = index % 365 + 1;

    match nic_format_for(index) {
        NicFormat::New => {
            let year = 2000 + index % 24;
            let serial = index % NEW_SERIAL_MODULUS;
            format!("{}{:03}{:05}", year, day_of_year, serial)
        }
        NicFormat::Old => {
            let year = 91 + index % 9;
            let serial = index % OLD_SERIAL_MODULUS;
            let suffix = if index % 3 == 0 { 'X' } else { 'V' };
            format!("{:02}{:03}{:04}{}", year, day_of_year, serial, suffix)
        }
    }
}

/// Check a NIC against [`NIC_PATTERN`].
pub fn is_valid_nic(nic: &str) -> bool {
    NIC_REGEX.is_match(nic)
}

/// Make a generated name acceptable to the upload template.
///
/// Drops everything except ASCII letters and whitespace, trims, cuts names longer than
/// [`MAX_NAME_LEN`] and pads names shorter than [`MIN_NAME_LEN`] with [`NAME_PAD_SUFFIX`].
/// A name with no letters at all becomes `"son"`. Applying it twice changes nothing.
pub fn sanitize_name(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();

    // Cutting can expose inner whitespace at the end, so trim again afterwards.
    let mut sanitized: String = filtered.trim().chars().take(MAX_NAME_LEN).collect();
    sanitized.truncate(sanitized.trim_end().len());

    if sanitized.chars().count() < MIN_NAME_LEN {
        sanitized.push_str(NAME_PAD_SUFFIX);
    }

    sanitized
}
