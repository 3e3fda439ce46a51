// crates/cli/src/parsers.rs
use std::fmt::Display;
use std::str::FromStr;

/// A byte count with an optional binary suffix (e.g. `512K`, `50MiB`, `1g`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeArg(pub u64);

impl FromStr for SizeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().replace('_', "").to_ascii_lowercase();
        let (digits, multiplier) = split_suffix(&cleaned);
        let count: u64 = digits
            .parse()
            .map_err(|_| format!("invalid size '{s}'"))?;
        count
            .checked_mul(multiplier)
            .map(Self)
            .ok_or_else(|| format!("size '{s}' is too large"))
    }
}

fn split_suffix(s: &str) -> (&str, u64) {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;
    const SUFFIXES: &[(&[&str], u64)] = &[
        (&["gib", "gb", "g"], GIB),
        (&["mib", "mb", "m"], MIB),
        (&["kib", "kb", "k"], KIB),
        (&["b"], 1),
    ];
    for (suffixes, multiplier) in SUFFIXES {
        for suffix in *suffixes {
            if let Some(stripped) = s.strip_suffix(suffix) {
                return (stripped.trim(), *multiplier);
            }
        }
    }
    (s, 1)
}

fn parse_bounded_number<T>(s: &str, min: T) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    Ok(value)
}

/// Parse a positive `usize` (>= 1) from CLI input.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is less than 1.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1)
}
