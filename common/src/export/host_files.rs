use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{vm_info::VmRecord, Error};

pub const HOST_FILE_EXTENSION: &str = "txt";

fn host_file_contents(record: &VmRecord) -> String {
    format!(
        "Username: {}\nPassword: {}\nPublic IP: {}\n",
        record.username(),
        record.password(),
        record.external_ip()
    )
}

/// Empty `directory` then write one `<vm-name>.txt` per record.
///
/// Everything previously in the directory is deleted, the directory is created if needed.
/// Returns the written paths in record order.
pub fn write_host_files(
    directory: impl AsRef<Path>,
    records: &[VmRecord],
) -> Result<Vec<PathBuf>, Error> {
    let directory = directory.as_ref();

    if directory.exists() {
        for entry in fs::read_dir(directory)? {
            let path = entry?.path();
            tracing::debug!("Removing {}", path.display());
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
    } else {
        fs::create_dir_all(directory)?;
    }

    records
        .iter()
        .map(|record| -> Result<PathBuf, Error> {
            let path = directory.join(format!("{}.{HOST_FILE_EXTENSION}", record.name));
            fs::write(&path, host_file_contents(record))?;
            Ok(path)
        })
        .collect()
}
