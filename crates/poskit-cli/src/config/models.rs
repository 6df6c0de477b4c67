use std::path::PathBuf;

/// Settings after merging defaults, the config file and `--set` overrides.
///
/// Subcommand arguments take precedence over these values.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub potcar_directory: PathBuf,
    pub interpolate_images: usize,
    pub interpolate_output_directory: PathBuf,
    pub freeze_preserve_unspecified: bool,
    /// Skip writing output files.
    pub no_write: bool,
    /// Hide progress display.
    pub quiet: bool,
}

#[cfg(test)]
impl AppConfig {
    pub fn for_tests(no_write: bool) -> Self {
        Self {
            potcar_directory: PathBuf::from("./potcar"),
            interpolate_images: 1,
            interpolate_output_directory: PathBuf::from("."),
            freeze_preserve_unspecified: false,
            no_write,
            quiet: true,
        }
    }
}
