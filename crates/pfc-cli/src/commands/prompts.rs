//! Prompt library commands

use anyhow::{anyhow, Result};
use pfc_core::prompts::{PromptId, PromptLibrary};

/// List all available prompts and their override status
pub fn cmd_prompts_list(library: &mut PromptLibrary) -> Result<()> {
    println!("Available Prompts:\n");

    println!("{:<20} {:>7}  {:<10}  {}", "ID", "VERSION", "SOURCE", "DESCRIPTION");
    println!("{}", "-".repeat(80));

    for info in library.list() {
        let source = if info.has_override { "✓ Custom" } else { "Default" };
        println!(
            "{:<20} {:>7}  {:<10}  {}",
            info.id, info.version, source, info.description
        );
    }

    println!();
    println!(
        "Override directory: {}",
        library
            .override_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not available)".to_string())
    );
    println!();
    println!("To customize a prompt:");
    println!("  1. Save the output of `pfc prompts show <ID>` as <ID>.md in the override directory");
    println!("  2. Edit the file, keeping the frontmatter and the {{{{user_name}}}} placeholders");

    Ok(())
}

/// Show the content of a specific prompt
pub fn cmd_prompts_show(library: &mut PromptLibrary, prompt_id: &str) -> Result<()> {
    let id: PromptId = prompt_id.parse().map_err(|e: String| {
        let known: Vec<&str> = PromptId::all().iter().map(|id| id.as_str()).collect();
        anyhow!("{} (available: {})", e, known.join(", "))
    })?;

    let prompt = library.get(id)?;

    println!("---");
    println!("id: {}", prompt.metadata.id);
    println!("version: {}", prompt.metadata.version);
    if !prompt.metadata.description.is_empty() {
        println!("description: {}", prompt.metadata.description);
    }
    println!("---");
    println!();
    println!("{}", prompt.content);

    if let Some(ref path) = prompt.override_path {
        eprintln!();
        eprintln!("(override loaded from {})", path.display());
    }

    Ok(())
}

/// Show the path where prompt overrides should be placed
pub fn cmd_prompts_path(library: &PromptLibrary) -> Result<()> {
    match library.override_dir() {
        Some(path) => {
            println!("{}", path.display());

            if !path.exists() {
                eprintln!();
                eprintln!("Note: This directory does not exist yet.");
                eprintln!("Create it to start adding custom prompts.");
            }
        }
        None => {
            eprintln!("Could not determine prompts directory.");
            eprintln!("The data directory is not available on this system.");
        }
    }

    Ok(())
}
