use std::fmt::Write as _;
use std::path::PathBuf;

use polydecode::decode::Value;

use crate::cmd::util::{emit_json, read_tree, truncate};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Key whose string value is shown next to each object.
	#[arg(long)]
	pub discriminator: Option<String>,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-array")]
	pub max_array: Option<usize>,
}

/// Output truncation limits for printed trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single object.
	pub max_fields_per_object: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested arrays/objects.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_object: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Parse a document and print its tree.
pub fn run(args: Args) -> polydecode::decode::Result<()> {
	let Args {
		file: path,
		discriminator,
		json,
		max_depth,
		max_array,
	} = args;

	let tree = read_tree(&path)?;

	if json {
		let payload = ShowJson {
			path: path.display().to_string(),
			root: tree.kind_name().to_owned(),
			kind: discriminator.as_deref().and_then(|key| root_kind(&tree, key)).map(str::to_owned),
			value: serde_json::Value::from(&tree),
		};
		return emit_json(&payload);
	}

	let mut options = PrintOptions::default();
	if let Some(max_depth) = max_depth {
		options.max_print_depth = max_depth;
	}
	if let Some(max_array) = max_array {
		options.max_array_items = max_array;
	}

	println!("path: {}", path.display());
	println!("root: {}", tree.kind_name());
	println!("value:");
	let mut out = String::new();
	render_value(&tree, 0, 0, &PrintCtx { options, discriminator: discriminator.as_deref() }, &mut out);
	print!("{out}");

	Ok(())
}

/// Per-call rendering settings.
pub(crate) struct PrintCtx<'a> {
	pub(crate) options: PrintOptions,
	pub(crate) discriminator: Option<&'a str>,
}

pub(crate) fn render_value(value: &Value, indent: usize, depth: u32, ctx: &PrintCtx<'_>, out: &mut String) {
	let pad = " ".repeat(indent);
	let options = ctx.options;
	match value {
		Value::Null => line(out, format_args!("{pad}null")),
		Value::Bool(v) => line(out, format_args!("{pad}{v}")),
		Value::I64(v) => line(out, format_args!("{pad}{v}")),
		Value::U64(v) => line(out, format_args!("{pad}{v}")),
		Value::F64(v) => line(out, format_args!("{pad}{v}")),
		Value::String(v) => line(out, format_args!("{pad}\"{}\"", truncate(v, options.max_string_len))),
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				line(out, format_args!("{pad}[... {} items]", items.len()));
				return;
			}
			line(out, format_args!("{pad}["));
			for item in items.iter().take(options.max_array_items) {
				render_value(item, indent + 2, depth + 1, ctx, out);
			}
			if items.len() > options.max_array_items {
				line(out, format_args!("{pad}  ... {} more", items.len() - options.max_array_items));
			}
			line(out, format_args!("{pad}]"));
		}
		Value::Map(map) => {
			let label = match ctx.discriminator.and_then(|key| root_kind(value, key)) {
				Some(kind) => format!("{kind} "),
				None => String::new(),
			};
			if depth >= options.max_print_depth {
				line(out, format_args!("{pad}{label}{{ ... }}"));
				return;
			}
			line(out, format_args!("{pad}{label}{{"));
			for (key, item) in map.iter().take(options.max_fields_per_object) {
				if ctx.discriminator == Some(key) {
					continue;
				}
				let _ = write!(out, "{pad}  {key} = ");
				if matches!(item, Value::Map(_) | Value::Array(_)) {
					out.push('\n');
					render_value(item, indent + 4, depth + 1, ctx, out);
				} else {
					render_value(item, 0, depth + 1, ctx, out);
				}
			}
			if map.len() > options.max_fields_per_object {
				line(out, format_args!("{pad}  ... {} more fields", map.len() - options.max_fields_per_object));
			}
			line(out, format_args!("{pad}}}"));
		}
	}
}

fn root_kind<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
	value.as_map()?.get(key)?.as_str()
}

fn line(out: &mut String, args: std::fmt::Arguments<'_>) {
	let _ = out.write_fmt(args);
	out.push('\n');
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	root: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	kind: Option<String>,
	value: serde_json::Value,
}
