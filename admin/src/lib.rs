mod export_vm_info;
mod generate_keys;
mod update_ip;
mod update_keys;
mod vm_records;

pub use export_vm_info::{list_vm_info, save_vm_info_csv};
pub use generate_keys::{generate_passwords, read_user_count};
pub use update_ip::update_ip;
pub use update_keys::update_keys;
pub use vm_records::collect_vm_records;

/// Unwrap the result of a script, or print the error with its causes to stderr and exit
/// with status 1.
pub fn exit_on_error<T>(result: anyhow::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            eprintln!("{error:#}");
            std::process::exit(1);
        }
    }
}
