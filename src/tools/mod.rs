mod file_scanner;
mod path_validator;

pub use file_scanner::{FileEntry, scan_directory_files, split_file_name};
pub use path_validator::{PathError, validate_directory_exists};
