use super::{WorkflowError, load, store};
use crate::core::models::ion::SelectiveFlags;
use crate::core::models::structure::Structure;
use crate::engine::config::SelectionBox;
use crate::engine::freeze::apply_selective_dynamics;
use crate::engine::select::select_box;
use std::path::Path;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct FreezeConfig {
    pub selection: SelectionBox,
    pub flags: SelectiveFlags,
    pub preserve_unspecified: bool,
}

#[derive(Debug, Clone)]
pub struct FreezeResult {
    pub structure: Structure,
    /// Indices of the ions inside the box.
    pub selected: Vec<usize>,
}

/// Reads `input`, applies `config.flags` to ions inside the box and writes the result.
#[instrument(skip_all, name = "freeze_workflow")]
pub fn run(
    input: &Path,
    config: &FreezeConfig,
    output: Option<&Path>,
) -> Result<FreezeResult, WorkflowError> {
    let structure = load(input)?;
    let mode = config.selection.mode.unwrap_or(structure.mode());
    debug!("Interpreting selection box in {} coordinates", mode);

    let selected = select_box(&structure, &config.selection)?;
    info!(
        "Applying selective dynamics {:?} to {} of {} ions",
        config.flags,
        selected.len(),
        structure.len()
    );
    let frozen = apply_selective_dynamics(
        &structure,
        &selected,
        config.flags,
        config.preserve_unspecified,
    )?;

    if let Some(path) = output {
        store(&frozen, path)?;
        info!("Changes written to {}", path.display());
    }
    Ok(FreezeResult {
        structure: frozen,
        selected,
    })
}
