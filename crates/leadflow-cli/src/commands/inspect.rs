//! Inspect command - preview a lead file without importing it.

use std::path::PathBuf;

use colored::Colorize;
use leadflow::{
    ImportConfig, ImportWorkflow, MappingValidator, MockCommitter, SelectedFile, ValidationReport,
};

use super::{CommandResult, apply_overrides, print_mapping, print_report};
use crate::cli::MappingOverride;

pub fn run(
    file: PathBuf,
    json_output: bool,
    overrides: Vec<MappingOverride>,
    config: ImportConfig,
    verbose: bool,
) -> CommandResult {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let selected = SelectedFile::from_path(&file)?;
    if !selected.kind().supports_mapping() {
        return Err(format!(
            "'{}' has no column preview; run 'leadflow import {}' to upload it directly",
            selected.name,
            file.display()
        )
        .into());
    }
    // Surface encoding problems here instead of letting the workflow fall back.
    selected.text()?;

    let fingerprint = selected.fingerprint();
    let size = selected.size_bytes();
    let validator = MappingValidator::with_config(config.validator.clone());

    // The mock committer is never reached: inspect stops at the mapping stage.
    let mut workflow = ImportWorkflow::with_config(MockCommitter::new(), config);
    workflow.select_file(selected)?;
    workflow.advance()?;
    apply_overrides(&mut workflow, &overrides)?;

    let session = workflow.session();
    let report = validator.validate(session.columns(), session.mapping(), session.row_count());

    if json_output {
        let output = serde_json::json!({
            "file": file.display().to_string(),
            "size_bytes": size,
            "fingerprint": fingerprint,
            "row_count": session.row_count(),
            "columns": session.columns(),
            "mapping": session.mapping(),
            "report": report,
            "can_commit": report.can_commit(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        file.display().to_string().white()
    );
    if verbose {
        println!("  {} bytes, {}", size, fingerprint.dimmed());
    }
    println!();

    println!(
        "Detected {} columns and {} data rows",
        session.columns().len().to_string().white().bold(),
        session.row_count().to_string().white().bold()
    );
    if verbose {
        for column in session.columns() {
            println!(
                "  {:20} {}",
                column.header,
                column.sample_values.join(", ").dimmed()
            );
        }
    }
    println!();

    print_mapping(&workflow);
    println!();
    print_report(&report);
    print_next_step(&report, &file);

    Ok(())
}

fn print_next_step(report: &ValidationReport, file: &std::path::Path) {
    println!();
    if report.can_commit() {
        println!(
            "Run {} to import",
            format!("leadflow import {}", file.display()).cyan().bold()
        );
    } else {
        println!(
            "Map the required fields with {} and try again",
            "--map FIELD=HEADER".cyan().bold()
        );
    }
}
