//! Writing merged VM records out for the trainers.

mod csv_report;
mod host_files;

pub use csv_report::{csv_report_path, write_csv_report, CSV_HEADER};
pub use host_files::{write_host_files, HOST_FILE_EXTENSION};
