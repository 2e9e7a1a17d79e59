use super::{MergedDistrictRecord, Result};
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;

/// Column order of the merged table.
pub const OUTPUT_COLUMNS: [&str; 11] = [
    "region",
    "price",
    "academy_count",
    "infant",
    "elementary",
    "adolescent",
    "ratio_infant",
    "ratio_elem",
    "ratio_adol",
    "ratio_total_youth",
    "total_pop",
];

pub fn write_merged<W: Write>(writer: W, records: &[MergedDistrictRecord]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    if records.is_empty() {
        wtr.write_record(OUTPUT_COLUMNS)?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_merged_csv<P: AsRef<Path>>(path: P, records: &[MergedDistrictRecord]) -> Result<()> {
    let file = std::fs::File::create(&path)?;
    write_merged(file, records)?;
    log::info!("Wrote {} rows to {}", records.len(), path.as_ref().display());
    Ok(())
}
