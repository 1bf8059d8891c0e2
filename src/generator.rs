// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Entry points that turn a MIB tree and a generator configuration into
//! exporter modules.
//!
//! Every run normalizes the tree once, indexes the normalized copy and then
//! resolves and emits each module independently. Output order depends only
//! on the inputs, so identical inputs render byte-identical configuration.

use std::{fs, path::Path};

use tracing::info;

use crate::{
    config::{GeneratorConfig, ModuleConfig},
    emitter::emit_metrics,
    error::{self, Error},
    index::NodeIndex,
    module::{ExporterConfig, Module},
    node::Node,
    normalizer::prepare_tree,
    resolver::resolve_walks,
};

/// Loads the MIB tree exported by the MIB compiler as JSON.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and
/// [`Error::TreeParse`] when it is not a valid node tree.
pub fn load_tree(path: &Path,) -> Result<Node, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_tree(&contents,)
}

/// Parses a MIB tree from a JSON document string.
///
/// # Errors
///
/// Returns [`Error::TreeParse`] when the document is not a valid node tree.
pub fn parse_tree(contents: &str,) -> Result<Node, Error,>
{
    Ok(serde_json::from_str(contents,)?,)
}

/// Generates a single module from a raw (not yet normalized) tree.
///
/// # Errors
///
/// Propagates normalization, resolution and emission failures.
///
/// # Examples
///
/// ```
/// use snmpgen::{Access, ModuleConfig, Node, NodeType, generate_module};
///
/// let tree = Node::new("1", "root",).with_access(Access::ReadOnly,).with_type(NodeType::Integer,);
/// let config = ModuleConfig {
///     walk: vec!["root".to_owned()],
///     ..ModuleConfig::default()
/// };
/// let module = generate_module(&config, &tree,).expect("module generates",);
/// assert_eq!(module.walk, ["1"]);
/// assert_eq!(module.metrics[0].help, " - 1");
/// ```
pub fn generate_module(config: &ModuleConfig, tree: &Node,) -> Result<Module, Error,>
{
    let normalized = prepare_tree(tree,)?;
    let index = NodeIndex::build(&normalized,);
    build_module(config, &index,)
}

/// Generates every module of `config` from a raw tree.
///
/// # Errors
///
/// Returns the first failure, wrapped in [`Error::Module`] when it belongs
/// to a specific module.
pub fn generate(config: &GeneratorConfig, tree: &Node,) -> Result<ExporterConfig, Error,>
{
    let normalized = prepare_tree(tree,)?;
    let index = NodeIndex::build(&normalized,);
    info!("Indexed {} MIB nodes", index.len());

    let mut output = ExporterConfig::new();
    for (name, module_config,) in &config.modules {
        let module = build_module(module_config, &index,).map_err(|error| error.in_module(name,),)?;
        info!("Generated module {}: {} walks, {} metrics", name, module.walk.len(), module.metrics.len());
        output.insert(name.clone(), module,);
    }
    Ok(output,)
}

fn build_module(config: &ModuleConfig, index: &NodeIndex<'_,>,) -> Result<Module, Error,>
{
    let plan = resolve_walks(config, index,)?;
    let metrics = emit_metrics(&plan, index, &config.overrides,)?;
    Ok(Module {
        walk: plan.walk,
        metrics,
    },)
}
