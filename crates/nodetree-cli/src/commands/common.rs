//! Shared CLI helpers used across multiple commands.

use std::path::Path;

use anyhow::Context;
use nodetree_config::{
    AuthoringTree, FreezeOptions, OptionsSource, default_options_path, resolve_options,
};
use nodetree_core::{Socket, TreeBuilder, VirtualTree};

/// Load a tree file without validating it.
pub fn load_tree(path: &Path) -> anyhow::Result<AuthoringTree> {
    nodetree_config::load_tree(path)
        .with_context(|| format!("cannot load tree '{}'", path.display()))
}

/// Resolve freeze options: `--options`, then the user config file, then defaults.
pub fn load_options(explicit: Option<&Path>) -> anyhow::Result<(FreezeOptions, OptionsSource)> {
    let fallbacks = [default_options_path()];
    let (options, source) = resolve_options(explicit, &fallbacks).context("cannot load options")?;
    match &source {
        OptionsSource::File(path) => tracing::debug!(path = %path.display(), "options loaded"),
        OptionsSource::Defaults => tracing::debug!("no options file, using defaults"),
    }
    Ok((options, source))
}

/// Build and freeze `tree` with `options`.
pub fn freeze<'a>(
    tree: &'a AuthoringTree,
    options: &FreezeOptions,
) -> anyhow::Result<VirtualTree<'a>> {
    let mut builder = TreeBuilder::new();
    builder
        .add_all_of_tree(tree)
        .with_context(|| format!("cannot build tree '{}'", tree.name))?;
    builder
        .freeze_and_index_with(options)
        .with_context(|| format!("cannot freeze tree '{}'", tree.name))
}

/// `node.identifier` label for a socket.
pub fn describe(socket: Socket<'_, '_>) -> String {
    format!("{}.{}", socket.node().name(), socket.identifier())
}

/// Human-readable name of an options source.
pub fn source_label(source: &OptionsSource) -> String {
    match source {
        OptionsSource::File(path) => path.display().to_string(),
        OptionsSource::Defaults => "defaults".to_string(),
    }
}
