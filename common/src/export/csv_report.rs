use std::{
    fs,
    path::{Path, PathBuf},
};

use csv::{Terminator, WriterBuilder};
use serde::Serialize;

use crate::{vm_info::VmRecord, Error};

pub const CSV_HEADER: [&str; 4] = ["VM_Name", "Username", "External_IP", "Password"];

#[derive(Serialize)]
struct CsvRow<'a> {
    vm_name: &'a str,
    username: &'a str,
    external_ip: &'a str,
    password: &'a str,
}

impl<'a> From<&'a VmRecord> for CsvRow<'a> {
    fn from(record: &'a VmRecord) -> Self {
        CsvRow {
            vm_name: &record.name,
            username: record.username(),
            external_ip: record.external_ip(),
            password: record.password(),
        }
    }
}

pub fn csv_report_path(directory: impl AsRef<Path>, vm_prefix: &str) -> PathBuf {
    directory.as_ref().join(format!("{vm_prefix}_VM_info.csv"))
}

/// Write `<prefix>_VM_info.csv` in `directory`, one row per record sorted by VM name.
///
/// The directory is created if needed but other files in it are left alone. Records end
/// with CRLF, values are only quoted when they need to be.
pub fn write_csv_report(
    directory: impl AsRef<Path>,
    vm_prefix: &str,
    records: &[VmRecord],
) -> Result<PathBuf, Error> {
    let directory = directory.as_ref();
    fs::create_dir_all(directory)?;

    let path = csv_report_path(directory, vm_prefix);

    // The header is written by hand so an empty report still has one
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_path(&path)?;

    writer.write_record(CSV_HEADER)?;

    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    for record in sorted {
        writer.serialize(CsvRow::from(record))?;
    }

    writer.flush()?;

    Ok(path)
}
