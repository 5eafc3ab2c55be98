//! Fields command - list canonical fields and recognized headers.

use colored::Colorize;
use leadflow::CANONICAL_FIELDS;
use leadflow::mapping::FIELD_SYNONYMS;

use super::CommandResult;

pub fn run(json_output: bool) -> CommandResult {
    if json_output {
        let fields: Vec<_> = CANONICAL_FIELDS
            .iter()
            .zip(FIELD_SYNONYMS.iter())
            .map(|(field, synonyms)| {
                serde_json::json!({
                    "key": field.key,
                    "label": field.label,
                    "description": field.description,
                    "required": field.required,
                    "synonyms": synonyms.synonyms,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    println!("{}", "Lead fields:".cyan().bold());
    println!();
    for (field, synonyms) in CANONICAL_FIELDS.iter().zip(FIELD_SYNONYMS.iter()) {
        let required = if field.required {
            "required".red().to_string()
        } else {
            "optional".dimmed().to_string()
        };
        println!(
            "  {:10} {:15} {}",
            field.key.as_str().white().bold(),
            field.label,
            required
        );
        println!("    {}", field.description);
        println!("    Headers: {}", synonyms.synonyms.join(", ").dimmed());
    }

    Ok(())
}
