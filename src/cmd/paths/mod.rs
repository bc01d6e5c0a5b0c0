use std::collections::BTreeMap;
use std::path::PathBuf;

use polydecode::decode::{DecodeOptions, PathSummary, SchemaPath, scan_paths};

use crate::cmd::util::{emit_json, read_tree};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Key holding each object's variant name.
	#[arg(long)]
	pub discriminator: Option<String>,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
}

/// List every schema path in a document with the node kinds and variants found there.
pub fn run(args: Args) -> polydecode::decode::Result<()> {
	let Args {
		file: path,
		discriminator,
		json,
		max_depth,
	} = args;

	let mut options = DecodeOptions::default();
	if let Some(max_depth) = max_depth {
		options.max_depth = max_depth;
	}

	let tree = read_tree(&path)?;
	let paths = scan_paths(&tree, discriminator.as_deref(), &options)?;
	let rows = path_rows(&paths);

	if json {
		let payload = PathsJson {
			path: path.display().to_string(),
			discriminator,
			paths: rows,
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("paths: {}", rows.len());
	println!();
	println!("schema_path\tcount\tnodes\tvariants\tuntagged");
	for row in &rows {
		let variants = if row.variants.is_empty() { "-".to_owned() } else { row.variants.join(",") };
		println!("{}\t{}\t{}\t{}\t{}", row.schema_path, row.count, row.nodes.join(","), variants, row.untagged);
	}

	Ok(())
}

pub(crate) fn path_rows(paths: &BTreeMap<SchemaPath, PathSummary>) -> Vec<PathRowJson> {
	paths
		.iter()
		.map(|(path, summary)| PathRowJson {
			schema_path: path.label(),
			count: summary.count,
			nodes: summary.node_kinds.iter().map(|kind| kind.as_str().to_owned()).collect(),
			variants: summary.variants.iter().cloned().collect(),
			untagged: summary.untagged,
		})
		.collect()
}

#[derive(serde::Serialize)]
struct PathsJson {
	path: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	discriminator: Option<String>,
	paths: Vec<PathRowJson>,
}

#[derive(serde::Serialize)]
pub(crate) struct PathRowJson {
	pub(crate) schema_path: String,
	pub(crate) count: usize,
	pub(crate) nodes: Vec<String>,
	pub(crate) variants: Vec<String>,
	pub(crate) untagged: usize,
}
