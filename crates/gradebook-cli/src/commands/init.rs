//! The `gradebook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradebook.toml").exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write("gradebook.toml", SAMPLE_CONFIG)?;
        println!("Created gradebook.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: gradebook register --id s1 --name \"Asha\" --batch 2024A");
    println!("  2. Run: gradebook add-term --id s1 --term T1 --mark math=90 --mark science=80");
    println!("  3. Run: gradebook report --id s1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

# JSON file holding all student records
data_file = "gradebook.json"

# "any-score": a term where everyone averages 0 still has a topper
# "above-zero": the topper must average more than 0
topper_policy = "any-score"
"#;
