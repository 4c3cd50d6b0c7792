//! Rules command implementation.

use owo_colors::OwoColorize;

use crate::cli::RulesArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Print the loaders a file passes through, in the order they run.
pub fn execute(args: RulesArgs) -> Result<()> {
    let loaded = utils::load_config(&args.config)?;
    let module = &loaded.config.module;

    let matching = module.matching(&args.file);
    if matching.is_empty() {
        ui::warning(&format!(
            "No module rule matches {}; it is bundled as-is",
            args.file.display()
        ));
        return Ok(());
    }

    for rule in &matching {
        ui::info(&format!("matched /{}/", rule.test));
    }

    for (step, loader) in module.pipeline_for(&args.file).into_iter().enumerate() {
        let options = if loader.options.is_empty() {
            String::new()
        } else {
            format!(" {}", serde_json::Value::Object(loader.options.clone()))
        };
        if ui::colors_enabled() {
            println!("{}. {}{}", step + 1, loader.loader.bold(), options.dimmed());
        } else {
            println!("{}. {}{}", step + 1, loader.loader, options);
        }
    }
    Ok(())
}
