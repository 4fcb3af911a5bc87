//! Walking the tables of a parsed document.
//!
//! Run with: cargo run --example table_discovery

use std::error::Error;
use toml_tree::{parse_str, TableKind};

const TOML: &str = r#"
[a.b.c]
str = "hello"

[a.d]
str = "world"

[d]
number = 5

[d.a]
list = [1, 2, 3]

[[products]]
name = "Hammer"

[[products]]
name = "Nail"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let file = parse_str(TOML)?;

    println!("All tables:");
    for table in file.tables() {
        let kind = match table.kind() {
            TableKind::Primitive => String::from("table"),
            TableKind::ArrayElement { index } => format!("array element #{}", index),
        };
        let origin = if table.is_synthetic() { "synthetic" } else { "declared" };
        println!(
            "  [{}] {} ({}), line {}",
            table.full_name(),
            kind,
            origin,
            table.line()
        );
    }

    let declared: Vec<&str> = file.real_tables().map(|t| t.full_name()).collect();
    println!("\nDeclared tables: {:?}", declared);

    println!("\nAs JSON:\n{}", serde_json::to_string_pretty(&file)?);

    Ok(())
}
