//! Types command - list the semantic types the engine can assign.

use augur::SemanticType;
use colored::Colorize;

const ALL_TYPES: [SemanticType; 8] = [
    SemanticType::Boolean,
    SemanticType::Complex,
    SemanticType::Integer,
    SemanticType::Float,
    SemanticType::Datetime,
    SemanticType::Timedelta,
    SemanticType::Categorical,
    SemanticType::Text,
];

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let catalog: Vec<serde_json::Value> = ALL_TYPES
            .iter()
            .map(|t| {
                serde_json::json!({
                    "internal_name": t.as_str(),
                    "display_name": t.display_name(),
                    "description": t.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for t in ALL_TYPES {
        println!(
            "  {:12} {:16} {}",
            t.as_str().green(),
            t.display_name().bold(),
            t.description()
        );
    }

    Ok(())
}
