//! Import command - run the full workflow and write the imported leads.

use std::path::{Path, PathBuf};

use colored::Colorize;
use leadflow::{
    CsvFileCommitter, ImportConfig, ImportStage, ImportWorkflow, LeadCommitter, MockCommitter,
    SelectedFile, UploadProgress, UploadStatus,
};

use super::{CommandResult, apply_overrides, print_mapping, print_report};
use crate::cli::MappingOverride;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    overrides: Vec<MappingOverride>,
    dry_run: bool,
    config: ImportConfig,
) -> CommandResult {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let selected = SelectedFile::from_path(&file)?;
    println!(
        "{} {}",
        "Importing".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    if dry_run {
        let workflow = ImportWorkflow::with_config(MockCommitter::new(), config);
        drive(workflow, selected, &overrides)?;
        println!();
        println!("{}", "Dry run - no leads were written".yellow());
        return Ok(());
    }

    let output_path = output.unwrap_or_else(|| default_output(&file));
    let committer = CsvFileCommitter::new(&output_path)
        .with_overrides(overrides.iter().map(|o| (o.field, o.header.clone())));
    let workflow = ImportWorkflow::with_config(committer, config);
    drive(workflow, selected, &overrides)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

/// `<stem>.leads.csv` next to the input file.
fn default_output(file: &Path) -> PathBuf {
    let mut p = file.to_path_buf();
    let stem = p.file_stem().unwrap_or_default().to_string_lossy().into_owned();
    p.set_file_name(format!("{}.leads.csv", stem));
    p
}

/// Drive the workflow from file selection to a terminal commit status.
fn drive<C: LeadCommitter>(
    mut workflow: ImportWorkflow<C>,
    file: SelectedFile,
    overrides: &[MappingOverride],
) -> Result<UploadProgress, Box<dyn std::error::Error>> {
    workflow.select_file(file)?;
    let mut stage = workflow.advance()?;

    if stage == ImportStage::Mapping {
        apply_overrides(&mut workflow, overrides)?;
        print_mapping(&workflow);
        println!();
        stage = workflow.advance()?;
    } else if !overrides.is_empty() {
        println!(
            "{}",
            "Mapping overrides ignored: this file is uploaded without a column preview".yellow()
        );
    }

    if stage == ImportStage::Validation {
        if let Some(report) = workflow.session().report() {
            print_report(report);
            println!();
        }
        workflow.advance()?;
    }

    let progress = workflow
        .session()
        .progress()
        .cloned()
        .ok_or("import did not start")?;

    match progress.status {
        UploadStatus::Completed => println!(
            "{} {} of {} leads",
            "Imported".green().bold(),
            progress.valid_leads.to_string().white().bold(),
            progress.total_leads
        ),
        UploadStatus::Error => {
            let message = progress.error.clone().unwrap_or_else(|| "import failed".to_string());
            return Err(message.into());
        }
        status => println!("Import {}", status.label()),
    }

    Ok(progress)
}
