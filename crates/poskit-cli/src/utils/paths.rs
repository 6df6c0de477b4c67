use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// `<stem><tag><suffix>` beside `input`, e.g. `POSCAR.vasp` -> `POSCAR_vacuum.vasp`.
pub fn derive_output_path(input: &Path, tag: &str) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or(input.as_os_str()));
    name.push(tag);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// The explicit output if given, otherwise the derived one.
pub fn resolve_output_path(explicit: Option<PathBuf>, input: &Path, tag: &str) -> PathBuf {
    explicit.unwrap_or_else(|| derive_output_path(input, tag))
}
