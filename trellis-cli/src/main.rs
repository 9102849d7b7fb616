//! Trellis CLI
//!
//! Loads a JSON box description, runs the measure and layout passes
//! against a viewport and prints the rectangles every box received.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;
use trellis_common::warning::clear_warnings;
use trellis_layout::{
    Axis, BoxDescription, BoxId, BoxTree, DescribedTree, LayoutOutcome, NodeKind, NullHost, Rect,
    Size, SizeFillConflictResolver, ZOrderSorter,
};

/// Trellis: pin-based composite layout from the command line
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out a description in a 320x480 viewport
    trellis layout screen.json

    # Custom viewport, machine-readable output
    trellis layout screen.json --width 1024 --height 768 --json

    # Validate a description without laying it out
    trellis check screen.json
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Measure and lay out a description, then print every rectangle
    Layout {
        /// Path to a JSON box description
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Viewport width in pixels
        #[arg(long, default_value = "320")]
        width: i32,

        /// Viewport height in pixels
        #[arg(long, default_value = "480")]
        height: i32,

        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Validate a description and summarise its shape
    Check {
        /// Path to a JSON box description
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Layout {
            file,
            width,
            height,
            json,
        } => run_layout(&file, Size::new(width, height), json),
        Command::Check { file } => run_check(&file),
    }
}

/// Read and build a description file.
fn load(path: &Path) -> anyhow::Result<DescribedTree> {
    clear_warnings();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let description: BoxDescription = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    BoxTree::from_description(&description)
        .with_context(|| format!("building the box tree from {}", path.display()))
}

/// One box in `--json` output.
#[derive(Serialize)]
struct Placement {
    id: usize,
    name: Option<String>,
    parent: Option<usize>,
    measured: Size,
    rect: Rect,
    absolute: Rect,
}

fn run_layout(path: &Path, viewport: Size, json: bool) -> anyhow::Result<()> {
    let mut described = load(path)?;
    let outcome = described
        .container
        .run(viewport, &mut NullHost)
        .context("laying out the box tree")?;
    if outcome == LayoutOutcome::Aborted {
        anyhow::bail!("layout pass was aborted by the host");
    }

    if json {
        let tree = described.container.tree();
        let placements = described
            .container
            .positions()
            .into_iter()
            .map(|(id, rect)| {
                Ok(Placement {
                    id: id.0,
                    name: described.names.get(&id).cloned(),
                    parent: tree.parent(id).map(|p| p.0),
                    measured: tree.measured(id)?,
                    rect,
                    absolute: tree.absolute_rect(id)?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&placements)?);
    } else {
        println!(
            "=== Layout (viewport: {}x{}) ===\n",
            viewport.width, viewport.height
        );
        print_box(&described, described.container.root(), 0)?;
    }
    Ok(())
}

/// Print `id` and its subtree, one box per line.
fn print_box(described: &DescribedTree, id: BoxId, indent: usize) -> anyhow::Result<()> {
    let tree = described.container.tree();
    let node = tree.node(id)?;
    let rect = node.rect();
    let kind = match node.kind() {
        NodeKind::Leaf { .. } => String::new(),
        NodeKind::Container(state) => format!(" [{}]", state.arrangement()),
    };
    println!(
        "{}{}{} {} {}",
        "  ".repeat(indent),
        described.display_name(id).cyan(),
        kind.dimmed(),
        format!(
            "({}, {}) - ({}, {})",
            rect.left, rect.top, rect.right, rect.bottom
        )
        .green(),
        format!("{}x{}", rect.width(), rect.height()).dimmed(),
    );
    for &child in tree.children(id) {
        print_box(described, child, indent + 1)?;
    }
    Ok(())
}

fn run_check(path: &Path) -> anyhow::Result<()> {
    let mut described = load(path)?;
    let root = described.container.root();

    let mut containers = Vec::new();
    let mut leaves = 0usize;
    let mut depth = 0usize;
    let mut stack = vec![(root, 0usize)];
    while let Some((id, level)) = stack.pop() {
        depth = depth.max(level);
        if described.container.tree().is_container(id) {
            containers.push(id);
        } else {
            leaves += 1;
        }
        stack.extend(
            described
                .container
                .tree()
                .children(id)
                .iter()
                .map(|&child| (child, level + 1)),
        );
    }

    for &container in &containers {
        ZOrderSorter::sort(described.container.tree_mut(), container)
            .with_context(|| format!("sorting {}", described.display_name(container)))?;
    }

    let tree = described.container.tree();
    let conflicts: Vec<String> = containers
        .iter()
        .filter(|&&id| id != root)
        .filter_map(|&id| {
            let report = SizeFillConflictResolver::resolve(tree, id);
            let axes: Vec<&str> = [(Axis::Horizontal, "width"), (Axis::Vertical, "height")]
                .into_iter()
                .filter(|(axis, _)| report.has_conflict(*axis))
                .map(|(_, name)| name)
                .collect();
            (!axes.is_empty()).then(|| {
                format!(
                    "{} sizes to content but holds a filling container ({})",
                    described.display_name(id),
                    axes.join(", ")
                )
            })
        })
        .collect();

    println!("{} {}", "✓".green(), path.display());
    println!("  boxes:      {}", containers.len() + leaves);
    println!("  containers: {}", containers.len());
    println!("  leaves:     {leaves}");
    println!("  depth:      {depth}");
    if !conflicts.is_empty() {
        println!("\n=== Size/fill conflicts ===");
        for conflict in &conflicts {
            println!("  - {}", conflict.yellow());
        }
    }
    Ok(())
}
