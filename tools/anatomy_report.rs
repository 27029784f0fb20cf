// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Anatomy Report Tool

Loads both hierarchies as configured and prints one of them.

Usage:
  cargo run --bin anatomy_report -- [options] [--debug-<crate>]

Options:
  --config <path>     Configuration file (default: search for anatomy_configuration.toml)
  --data-dir <dir>    Override data.data_dir
  --policy <name>     equal_leaf_depth | uniform_edge_length
  --kind <kind>       part_of (default) | is_a
  --show <view>       summary (default) | outline | newick | drawing
  --search <text>     List concepts whose name contains <text>
*/

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;

use anatomy::config::load_config;
use anatomy::hierarchy::{to_newick, HierarchyKind};
use anatomy::observability::{debug_flags_help, parse_debug_flags};
use anatomy::{init_logging_from_config, AnatomySession};

struct Options {
    config_path: Option<PathBuf>,
    overrides: HashMap<String, String>,
    kind: HierarchyKind,
    show: String,
    search: Option<String>,
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config_path: None,
        overrides: HashMap::new(),
        kind: HierarchyKind::PartOf,
        show: "summary".to_string(),
        search: None,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg.starts_with("--debug-") {
            continue;
        }
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {}", arg))
        };
        match arg.as_str() {
            "--config" => options.config_path = Some(PathBuf::from(value()?)),
            "--data-dir" => {
                options.overrides.insert("data_dir".to_string(), value()?);
            }
            "--policy" => {
                options.overrides.insert("layout_policy".to_string(), value()?);
            }
            "--kind" => options.kind = value()?.parse()?,
            "--show" => options.show = value()?,
            "--search" => options.search = Some(value()?),
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("Usage: {} [options] [--debug-<crate>]\n", args[0]);
        println!("{}", debug_flags_help());
        return Ok(());
    }

    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(reason) => {
            eprintln!("Error: {}", reason);
            eprintln!("Run with --help for usage.");
            process::exit(2);
        }
    };

    let config = load_config(options.config_path.as_deref(), Some(&options.overrides))?;
    let _logging = init_logging_from_config(&parse_debug_flags(), &config)?;

    let session = AnatomySession::from_config(&config)?;
    let hierarchy = session.hierarchy(options.kind);

    if let Some(query) = &options.search {
        for id in hierarchy.search_by_name(query) {
            println!("{}", hierarchy.node(id));
        }
        return Ok(());
    }

    match options.show.as_str() {
        "summary" => {
            let summary = hierarchy.summary();
            println!("Hierarchy:    {}", options.kind);
            println!("Root:         {}", hierarchy.root());
            println!("Nodes:        {}", summary.node_count);
            println!("Edges:        {}", summary.edge_count);
            println!("Leaves:       {}", summary.leaf_count);
            println!("Max depth:    {}", summary.max_depth);
            println!("Re-parented:  {}", hierarchy.overwritten_parent_links());
        }
        "outline" => print!("{}", hierarchy.render_paths()),
        "newick" => println!("{}", to_newick(hierarchy)),
        "drawing" => println!("{}", serde_json::to_string_pretty(&session.drawing(options.kind))?),
        other => {
            eprintln!("Error: unknown view '{}'", other);
            process::exit(2);
        }
    }

    Ok(())
}
