//! Classification preview command

use anyhow::Result;
use expense_core::models::classification_text;
use expense_core::RuleSet;

pub fn cmd_classify(rules: &RuleSet, merchant: &str, note: Option<&str>) -> Result<()> {
    let classification = rules.explain(&classification_text(merchant, note));

    match classification.keyword {
        Some(keyword) => println!(
            "🏷️  {} (matched \"{}\")",
            classification.category, keyword
        ),
        None => println!("🏷️  {} (no keyword matched)", classification.category),
    }

    Ok(())
}
