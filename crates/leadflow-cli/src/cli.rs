//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use leadflow::FieldKey;
use std::path::PathBuf;

/// Leadflow: preview, map and import lead files
#[derive(Parser)]
#[command(name = "leadflow")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Import configuration file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview a lead file: detected columns, suggested mapping and validation
    Inspect {
        /// Path to the lead file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Override the suggested mapping (e.g. --map phone="Work Phone", or phone= to unmap)
        #[arg(short, long, value_name = "FIELD=HEADER")]
        map: Vec<MappingOverride>,
    },

    /// Run the full import and write normalized leads
    Import {
        /// Path to the lead file (CSV or XLS)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for imported leads (default: <file>.leads.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the suggested mapping (e.g. --map phone="Work Phone", or phone= to unmap)
        #[arg(short, long, value_name = "FIELD=HEADER")]
        map: Vec<MappingOverride>,

        /// Run every stage but do not write any leads
        #[arg(long)]
        dry_run: bool,
    },

    /// List the canonical lead fields and the headers recognized for each
    Fields {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A `field=Header` mapping override. An empty header unmaps the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingOverride {
    pub field: FieldKey,
    pub header: Option<String>,
}

impl std::str::FromStr for MappingOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, header) = s
            .split_once('=')
            .ok_or_else(|| format!("Invalid mapping '{}'. Use FIELD=HEADER, e.g. phone=Mobile.", s))?;

        let field = FieldKey::parse(field).ok_or_else(|| {
            let names: Vec<_> = FieldKey::ALL.iter().map(|k| k.as_str()).collect();
            format!("Unknown field: {}. Use one of: {}.", field.trim(), names.join(", "))
        })?;

        let header = header.trim();
        Ok(MappingOverride {
            field,
            header: (!header.is_empty()).then(|| header.to_string()),
        })
    }
}

impl std::fmt::Display for MappingOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.field.as_str(), self.header.as_deref().unwrap_or(""))
    }
}
