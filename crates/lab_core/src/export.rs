//! CSV export of a sample series.

use std::io::Write;

use crate::Series;

pub const CSV_HEADER: &str = "time_s,temperature_c,conc_cu2,conc_zn2";

/// Write the header and one row per sample.
pub fn write_series_csv(writer: &mut impl Write, series: &Series) -> std::io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for sample in series {
        writeln!(
            writer,
            "{},{:.2},{:.3},{:.3}",
            sample.time,
            sample.temperature,
            sample.concentration_oxidizer,
            sample.concentration_reduced_product,
        )?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReactionConfig, ReactionEngine};

    #[test]
    fn csv_has_header_and_fixed_precision_rows() {
        let mut engine = ReactionEngine::new(ReactionConfig::default());
        engine.start();
        for _ in 0..10 {
            engine.tick();
        }
        let mut buf = Vec::new();
        write_series_csv(&mut buf, engine.series()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "0,20.00,1.000,0.000");
        assert_eq!(lines[11], "10,20.70,0.861,0.139");
    }
}
