use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// Merges defaults, the optional config file and `--set` overrides into an [`AppConfig`].
pub fn build_config(cli: &Cli) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let file_config = apply_set_values(file_config, &cli.set_values)?;

    let potcar = file_config.potcar.unwrap_or_default();
    let interpolate = file_config.interpolate.unwrap_or_default();
    let freeze = file_config.freeze.unwrap_or_default();

    Ok(AppConfig {
        potcar_directory: potcar.directory.unwrap_or(defaults.potcar_directory),
        interpolate_images: interpolate.images.unwrap_or(defaults.interpolate_images),
        interpolate_output_directory: interpolate
            .output_directory
            .unwrap_or(defaults.interpolate_output_directory),
        freeze_preserve_unspecified: freeze
            .preserve_unspecified
            .unwrap_or(defaults.freeze_preserve_unspecified),
        no_write: cli.no_write,
        quiet: cli.quiet,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key.trim() {
            "potcar.directory" => {
                config.potcar.get_or_insert_with(Default::default).directory =
                    Some(PathBuf::from(value));
            }
            "interpolate.images" => {
                config.interpolate.get_or_insert_with(Default::default).images =
                    Some(parse_value(key, value, "integer")?);
            }
            "interpolate.output-directory" => {
                config
                    .interpolate
                    .get_or_insert_with(Default::default)
                    .output_directory = Some(PathBuf::from(value));
            }
            "freeze.preserve-unspecified" => {
                config
                    .freeze
                    .get_or_insert_with(Default::default)
                    .preserve_unspecified = Some(parse_value(key, value, "boolean")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
