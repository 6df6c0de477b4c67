use std::path::PathBuf;

/// Built-in values used when neither the config file nor `--set` provides one.
pub struct DefaultsConfig {
    pub potcar_directory: PathBuf,
    pub interpolate_images: usize,
    pub interpolate_output_directory: PathBuf,
    pub freeze_preserve_unspecified: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            potcar_directory: PathBuf::from("./potcar"),
            interpolate_images: 1,
            interpolate_output_directory: PathBuf::from("."),
            freeze_preserve_unspecified: false,
        }
    }
}
