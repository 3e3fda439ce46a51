// crates/cli/src/presentation.rs
use crate::error::Result;
use crate::options::OutputFormat;
use city_stats_engine::{StatsTable, Summary};
use std::io::Write;

/// Write the final table in the requested format, followed by a newline.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn write_results<W: Write>(
    out: &mut W,
    table: &StatsTable,
    format: OutputFormat,
) -> Result<()> {
    let summary = Summary::from_table(table);
    match format {
        OutputFormat::Text => writeln!(out, "{summary}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &summary)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use city_stats_engine::tokenizer::tokenize;
    use serde_json::{Value, json};

    fn rendered(format: OutputFormat) -> String {
        let table = tokenize(b"Paris;12.3\nParis;15.0\nLondon;-2.5\n");
        let mut out = Vec::new();
        write_results(&mut out, &table, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_output() {
        assert_eq!(
            rendered(OutputFormat::Text),
            "{London=-2.5/-2.5/-2.5, Paris=12.3/13.7/15.0}\n"
        );
    }

    #[test]
    fn json_output() {
        let value: Value = serde_json::from_str(&rendered(OutputFormat::Json)).unwrap();
        assert_eq!(
            value,
            json!([
                {"key": "London", "min": -2.5, "mean": -2.5, "max": -2.5, "count": 1},
                {"key": "Paris", "min": 12.3, "mean": 13.7, "max": 15.0, "count": 2}
            ])
        );
    }

    #[test]
    fn empty_table_outputs() {
        let mut out = Vec::new();
        write_results(&mut out, &StatsTable::new(), OutputFormat::Text).unwrap();
        assert_eq!(out, b"{}\n");

        let mut out = Vec::new();
        write_results(&mut out, &StatsTable::new(), OutputFormat::Json).unwrap();
        assert_eq!(out, b"[]\n");
    }
}
