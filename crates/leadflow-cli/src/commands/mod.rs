//! CLI command implementations.

pub mod fields;
pub mod import;
pub mod inspect;

use std::path::Path;

use colored::Colorize;
use leadflow::{
    CANONICAL_FIELDS, ImportConfig, ImportWorkflow, LeadCommitter, ValidationReport,
};

use crate::cli::MappingOverride;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<ImportConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ImportConfig::load(path)?),
        None => Ok(ImportConfig::default()),
    }
}

/// Apply `--map` overrides to a workflow in the mapping stage.
///
/// A column requested for one field is first released by whichever field
/// currently owns it.
pub fn apply_overrides<C: LeadCommitter>(
    workflow: &mut ImportWorkflow<C>,
    overrides: &[MappingOverride],
) -> leadflow::Result<()> {
    for o in overrides {
        if let Some(header) = o.header.as_deref() {
            let owner = workflow.session().mapping().owner_of(header);
            if let Some(owner) = owner.filter(|owner| *owner != o.field) {
                workflow.update_mapping(owner, None)?;
            }
        }
        workflow.update_mapping(o.field, o.header.as_deref())?;
    }
    Ok(())
}

/// Print the current mapping, one canonical field per line.
pub fn print_mapping<C: LeadCommitter>(workflow: &ImportWorkflow<C>) {
    let mapping = workflow.session().mapping();

    println!("{}", "Mapping:".yellow().bold());
    for field in &CANONICAL_FIELDS {
        let marker = if field.required { "*" } else { " " };
        match mapping.source_for(field.key) {
            Some(header) => println!("  {}{:15} <- {}", marker, field.label, header.white()),
            None if field.required => {
                println!("  {}{:15} {}", marker, field.label, "(not mapped)".red())
            }
            None => println!("  {}{:15} {}", marker, field.label, "(not mapped)".dimmed()),
        }
    }
}

/// Print a validation report in human-readable form.
pub fn print_report(report: &ValidationReport) {
    println!("{}", "Validation:".yellow().bold());
    println!("  Total rows:     {}", report.total_rows.to_string().white().bold());
    println!("  Valid (est.):   {}", report.valid_rows.to_string().green());
    println!("  Invalid (est.): {}", report.invalid_rows.to_string().red());
    println!("  Duplicates:     {}", report.duplicate_rows.to_string().yellow());

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Errors:".red().bold());
        for error in &report.errors {
            println!("  {} {}", error.field_label.red(), error.message);
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("{}", "Warnings:".yellow().bold());
        for warning in &report.warnings {
            println!("  {} {}", warning.field_label.yellow(), warning.message);
        }
    }

    if report.is_clean() {
        println!();
        println!("{}", "No issues found - ready to import!".green());
    }
}
