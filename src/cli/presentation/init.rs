//! Init command presentation: preview and summary formatters.

use crate::init::{InitPreview, InitSummary};

pub fn format_init_preview(preview: &InitPreview) -> String {
    let mut output = String::from("Initialization Preview:\n\n");

    if let Some(seed) = &preview.seed {
        output.push_str(&format!("Would write seed: {}\n", seed.display()));
    }
    if let Some(config) = &preview.config {
        output.push_str(&format!("Would write config: {}\n", config.display()));
    }

    if preview.seed.is_none() && preview.config.is_none() {
        output.push_str("Seed and config already exist.\n");
    } else {
        output.push_str("\nRun 'reponest init' to perform initialization.\n");
    }
    output
}

pub fn format_init_summary(summary: &InitSummary, force: bool) -> String {
    let mut output = String::from("Initializing reponest workspace...\n\n");

    for path in &summary.created {
        if force {
            output.push_str(&format!("  ✓ {} (overwritten if present)\n", path.display()));
        } else {
            output.push_str(&format!("  ✓ {}\n", path.display()));
        }
    }
    for path in &summary.skipped {
        output.push_str(&format!("  ⊘ {} (already exists, skipped)\n", path.display()));
    }

    if !summary.skipped.is_empty() && !force {
        output.push_str("\nUse --force to overwrite the seed.\n");
    }
    output
}
