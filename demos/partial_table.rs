//! Keeping only one table of a document.
//!
//! Run with: cargo run --example partial_table

use std::error::Error;
use toml_tree::{partial_str, Error as TomlError};

const TOML: &str = r#"
[table1]
a = 1
b = 2

[table2]
c = 1
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let table1 = partial_str(TOML, "table1")?;
    for node in table1.children() {
        println!("line {}: {}", node.line(), node.content());
    }

    match partial_str(TOML, "table3") {
        Err(TomlError::MissingRequiredProperty { table }) => {
            println!("\n<{}> is not in the document, as expected", table);
        }
        other => println!("\nunexpected result: {:?}", other),
    }

    Ok(())
}
