//! CLI commands.

use crate::config::GridConfig;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use connect::TcpConnector;
use corelib::object::{HintKey, ObjectDescriptor, Operation};
use routing::{resource_redirect, Disposition, SessionContext};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OpArg {
    Create,
    Open,
    Write,
    Unlink,
}

impl From<OpArg> for Operation {
    fn from(op: OpArg) -> Self {
        match op {
            OpArg::Create => Operation::Create,
            OpArg::Open => Operation::Open,
            OpArg::Write => Operation::Write,
            OpArg::Unlink => Operation::Unlink,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "grid-route", about = "Routing decisions for a federated storage grid")]
pub struct Cli {
    /// Grid description file (tree, hosts, seed catalog).
    #[arg(long, global = true, default_value = "grid.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve an object path and print the dispatch decision.
    Resolve {
        /// Logical object path.
        #[arg(long)]
        path: String,
        #[arg(long, value_enum, default_value = "open")]
        op: OpArg,
        /// Destination-resource hint.
        #[arg(long)]
        dest_resc: Option<String>,
    },
    /// Print the resource topology.
    Tree,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let grid = GridConfig::load(&self.config)?;
        match self.command {
            Command::Resolve { path, op, dest_resc } => resolve(&grid, &path, op, dest_resc),
            Command::Tree => print_tree(&grid),
        }
    }
}

fn resolve(grid: &GridConfig, path: &str, op: OpArg, dest_resc: Option<String>) -> anyhow::Result<()> {
    let tree = Arc::new(grid.tree.build().context("building resource tree")?);
    let registry = Arc::new(
        connect::HostRegistry::from_config(&grid.registry).context("building host registry")?,
    );
    let catalog = Arc::new(grid.catalog()?);

    let session = SessionContext::new(
        tree,
        registry,
        catalog,
        Arc::new(TcpConnector::default()),
        grid.local_host.as_deref(),
        "cli",
    )?;

    let mut descriptor = ObjectDescriptor::new(path);
    if let Some(dest) = dest_resc {
        descriptor.hints.set(HintKey::DestResc, dest);
    }

    let redirect = resource_redirect(op.into(), &descriptor, &session)?;
    match &redirect.hierarchy {
        Some(hier) => println!("hierarchy:   {}", hier),
        None => println!("hierarchy:   (none)"),
    }
    println!(
        "disposition: {}",
        match redirect.disposition {
            Disposition::Local => "local",
            Disposition::Remote => "remote",
        }
    );
    if let Some(handle) = &redirect.handle {
        println!("peer:        {}", handle.peer());
    }

    session.close();
    Ok(())
}

fn print_tree(grid: &GridConfig) -> anyhow::Result<()> {
    let tree = grid.tree.build().context("building resource tree")?;
    let mut roots: Vec<_> = tree.nodes().filter(|n| n.parent_name().is_none()).collect();
    roots.sort_by_key(|n| n.name().to_owned());
    for root in roots {
        print_subtree(&tree, root.name(), 0)?;
    }
    Ok(())
}

fn print_subtree(tree: &corelib::ResourceTree, name: &str, depth: usize) -> anyhow::Result<()> {
    let node = tree.lookup(name)?;
    println!(
        "{}{} [{}] @ {}",
        "  ".repeat(depth),
        node.name(),
        node.policy().name(),
        node.host()
    );
    for child in node.children() {
        print_subtree(tree, child, depth + 1)?;
    }
    Ok(())
}
