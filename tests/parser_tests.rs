use toml_tree::{
    parse_lines, parse_str, partial_str, Error, File, Node, TableKind, TomlConfig, TomlParser,
    Value,
};

const COMPLEX_TABLES: &str = r#"
[a.b.c]
    str = "hello"

[a.d]
    str = "world"

[d]
    number = 5

[d.a]
    str = "deep"
"#;

const SIMPLE_EXAMPLE: &str = r#"
# This is a TOML document. Boom.

title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00 # First class dates

[database]
server = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
enabled = true

[servers.alpha]
ip = "10.0.0.1"
dc = "eqdc10"

[servers.beta]
ip = "10.0.0.2"
dc = "eqdc10"
"#;

fn real_names(file: &File) -> Vec<&str> {
    file.real_tables().map(|t| t.full_name()).collect()
}

#[test]
fn test_table_discovery() {
    let file = parse_str(COMPLEX_TABLES).unwrap();
    assert_eq!(real_names(&file), ["a.b.c", "a.d", "d", "d.a"]);

    let all: Vec<&str> = file.tables().map(|t| t.full_name()).collect();
    assert_eq!(all, ["a", "a.b", "a.b.c", "a.d", "d", "d.a"]);
    assert!(file.find_table("a").unwrap().is_synthetic());
    assert!(file.find_table("a.b").unwrap().is_synthetic());
}

#[test]
fn test_top_level_tables() {
    let file = parse_str(SIMPLE_EXAMPLE).unwrap();
    let top: Vec<&str> = file
        .children()
        .iter()
        .filter_map(Node::as_table)
        .filter(|t| !t.is_synthetic())
        .map(|t| t.full_name())
        .collect();
    assert_eq!(top, ["owner", "database"]);
    assert!(file.find_table("servers").unwrap().is_synthetic());
    assert_eq!(
        real_names(&file),
        ["owner", "database", "servers.alpha", "servers.beta"]
    );
}

#[test]
fn test_simple_example_values() {
    let file = parse_str(SIMPLE_EXAMPLE).unwrap();
    assert_eq!(
        file.get("title"),
        Some(&Value::BasicString("TOML Example".to_string()))
    );

    let owner = file.find_table("owner").unwrap();
    assert!(owner.get("dob").unwrap().as_date_time().unwrap().is_offset());

    let database = file.find_table("database").unwrap();
    assert_eq!(
        database.get("ports").unwrap().as_array().unwrap(),
        [
            Value::Integer(8001),
            Value::Integer(8001),
            Value::Integer(8002)
        ]
    );
    assert_eq!(database.get("enabled"), Some(&Value::Boolean(true)));
    assert_eq!(
        file.find_table("servers.beta").unwrap().get("ip"),
        Some(&Value::BasicString("10.0.0.2".to_string()))
    );
}

#[test]
fn test_dotted_keys_equal_nested_headers() {
    let dotted = parse_str("a.b.c = 1").unwrap();
    let nested = parse_str("[a.b]\nc = 1").unwrap();

    for file in [&dotted, &nested] {
        let table = file.find_table("a.b").unwrap();
        assert_eq!(table.get("c"), Some(&Value::Integer(1)));
        assert_eq!(table.key_values().count(), 1);
    }
    assert_eq!(
        serde_json::to_value(&dotted).unwrap(),
        serde_json::to_value(&nested).unwrap()
    );
    assert!(real_names(&dotted).is_empty());
    assert_eq!(real_names(&nested), ["a.b"]);
}

#[test]
fn test_dotted_keys_inside_table() {
    let file = parse_str("[fruit]\napple.color = 'red'\napple.taste.sweet = true").unwrap();
    let apple = file.find_table("fruit.apple").unwrap();
    assert!(apple.is_synthetic());
    assert_eq!(apple.get("color").and_then(Value::as_str), Some("red"));
    assert_eq!(
        file.find_table("fruit.apple.taste").unwrap().get("sweet"),
        Some(&Value::Boolean(true))
    );
}

#[test]
fn test_quoted_keys_and_headers() {
    let file = parse_str("[\"a.b\".c]\n'key.with.dots' = 1").unwrap();
    let table = file.tables().last().unwrap();
    assert_eq!(table.path(), ["a.b", "c"]);
    assert_eq!(table.get("key.with.dots"), Some(&Value::Integer(1)));
}

#[test]
fn test_array_of_tables_siblings() {
    let file = parse_str(
        "[[products]]\nname = \"Hammer\"\nsku = 738594937\n\n[[products]]\n\n[[products]]\nname = \"Nail\"",
    )
    .unwrap();

    let products: Vec<_> = file.children().iter().filter_map(Node::as_table).collect();
    assert_eq!(products.len(), 3);
    for (i, product) in products.iter().enumerate() {
        assert_eq!(product.full_name(), "products");
        assert_eq!(product.kind(), TableKind::ArrayElement { index: i });
    }
    assert_eq!(products[0].key_values().count(), 2);
    assert_eq!(products[1].key_values().count(), 0);
    assert_eq!(products[2].get("name").and_then(Value::as_str), Some("Nail"));
}

#[test]
fn test_nested_array_of_tables() {
    let file = parse_str(
        r#"
[[fruit]]
name = "apple"

[fruit.physical]
color = "red"

[[fruit.variety]]
name = "red delicious"

[[fruit.variety]]
name = "granny smith"

[[fruit]]
name = "banana"

[[fruit.variety]]
name = "plantain"
"#,
    )
    .unwrap();

    let fruits: Vec<_> = file.children().iter().filter_map(Node::as_table).collect();
    assert_eq!(fruits.len(), 2);

    let apple: Vec<&str> = fruits[0].sub_tables().map(|t| t.name()).collect();
    assert_eq!(apple, ["physical", "variety", "variety"]);
    let banana: Vec<_> = fruits[1].sub_tables().collect();
    assert_eq!(banana.len(), 1);
    assert_eq!(banana[0].index(), Some(0));
    assert_eq!(banana[0].get("name").and_then(Value::as_str), Some("plantain"));
}

#[test]
fn test_inline_tables_are_expanded() {
    let file = parse_str("[owner]\nname = { first = \"Tom\", last = \"Preston-Werner\" }").unwrap();
    let name = file.find_table("owner.name").unwrap();
    assert!(!name.is_synthetic());
    assert_eq!(name.get("first").and_then(Value::as_str), Some("Tom"));
    assert!(file
        .tables()
        .flat_map(|t| t.key_values())
        .all(|kv| !kv.value().is_inline_table()));
    assert!(parse_str("[owner.name]\nx = 1\n[owner]\nname = { a = 1 }").is_err());
}

#[test]
fn test_inline_tables_in_arrays_stay_values() {
    let file = parse_str("points = [ { x = 1, y = 2 }, { x = 3, y = 4 } ]").unwrap();
    let points = file.get("points").unwrap().as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert!(points.iter().all(Value::is_inline_table));
}

#[test]
fn test_partial_extraction() {
    let toml = "[table1]\na=1\nb=2\n[table2]\nc=1";
    let file = partial_str(toml, "table1").unwrap();

    assert_eq!(file.children().len(), 2);
    assert_eq!(file.get("a"), Some(&Value::Integer(1)));
    assert_eq!(file.get("b"), Some(&Value::Integer(2)));
    assert!(file.find_table("table2").is_none());
    assert_eq!(file.get("c"), None);
}

#[test]
fn test_partial_extraction_of_nested_table() {
    let file = partial_str(COMPLEX_TABLES, "d").unwrap();
    assert_eq!(file.get("number"), Some(&Value::Integer(5)));
    let inner: Vec<&str> = file.tables().map(|t| t.full_name()).collect();
    assert_eq!(inner, ["d.a"]);
}

#[test]
fn test_partial_extraction_missing_table() {
    let err = partial_str("[table1]\na=1", "table3").unwrap_err();
    assert_eq!(
        err,
        Error::MissingRequiredProperty {
            table: "table3".to_string()
        }
    );
    assert_eq!(err.line(), None);
    assert!(err.to_string().contains("<table3>"));
}

#[test]
fn test_redeclared_table_conflict() {
    let err = parse_str("[a]\nb = 1\n\n[a]\nc = 2").unwrap_err();
    assert!(matches!(err, Error::StructuralConflict { line: 4, .. }));
}

#[test]
fn test_implied_table_can_be_declared_once() {
    let file = parse_str("[x.y.z]\n[x]\nk = 1").unwrap();
    assert!(!file.find_table("x").unwrap().is_synthetic());
    assert!(parse_str("[x.y.z]\n[x]\n[x]").is_err());
}

#[test]
fn test_duplicate_keys_conflict() {
    assert!(matches!(
        parse_str("a = 1\na = 2"),
        Err(Error::StructuralConflict { line: 2, .. })
    ));
    assert!(matches!(
        parse_str("a = 1\n[a]"),
        Err(Error::StructuralConflict { line: 2, .. })
    ));
    assert!(matches!(
        parse_str("a.b = 1\na.b.c = 2"),
        Err(Error::StructuralConflict { line: 2, .. })
    ));
}

#[test]
fn test_date_time_separators() {
    let file = parse_str(
        "odt1 = 1979-05-27T07:32:00-08:00\nodt2 = 1979-05-27 07:32:00-08:00\nldt = 1979-05-27 07:32:00\nld = 1979-05-27",
    )
    .unwrap();

    assert_eq!(file.get("odt1"), file.get("odt2"));
    assert!(file.get("odt1").unwrap().as_date_time().unwrap().is_offset());
    assert!(file.get("ldt").unwrap().as_date_time().unwrap().is_local());
    assert!(file.get("ld").unwrap().as_date_time().unwrap().is_local_date());
}

#[test]
fn test_malformed_escape() {
    let err = parse_str("a = \"\\q\"").unwrap_err();
    assert!(matches!(err, Error::Parse { line: 1, .. }));
}

#[test]
fn test_unbalanced_quote_in_array() {
    let err = parse_str("a = [1, \"a]").unwrap_err();
    assert!(matches!(err, Error::Parse { line: 1, .. }));
    assert!(err.to_string().contains("closing quote"));
}

#[test]
fn test_stray_header_brackets() {
    let err = parse_str("[a]\nx = 1\n[a.b]]").unwrap_err();
    assert!(matches!(err, Error::Parse { line: 3, .. }));
    assert!(parse_str("[[fruit]]]").is_err());
}

#[test]
fn test_bare_quote_in_literal_string() {
    let err = parse_str("a = 1\nb = 'ab'cd'").unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, .. }));
}

#[test]
fn test_error_line_numbers() {
    let err = parse_str("[a]\nb = 1\nc = nope").unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert!(err.to_string().starts_with("Parse error at line 3"));
}

#[test]
fn test_comments_everywhere() {
    let file = parse_str("# header\n[t] # table\nk = \"#1\" # trailing\n  # indented").unwrap();
    let table = file.find_table("t").unwrap();
    assert_eq!(table.get("k").and_then(Value::as_str), Some("#1"));
    assert_eq!(table.children().len(), 1);
}

#[test]
fn test_parse_lines_matches_parse_str() {
    let lines: Vec<&str> = SIMPLE_EXAMPLE.lines().collect();
    assert_eq!(parse_lines(lines).unwrap(), parse_str(SIMPLE_EXAMPLE).unwrap());
}

#[test]
fn test_config_toggles() {
    let strict = TomlParser::new(
        TomlConfig::new()
            .with_allow_null_values(false)
            .with_allow_empty_values(false)
            .with_allow_escaped_quotes_in_literal_strings(false),
    );
    assert!(strict.parse_str("a = nil").is_err());
    assert!(strict.parse_str("a =").is_err());
    assert_eq!(
        strict.parse_str(r"a = 'it\'s'").unwrap().get("a"),
        Some(&Value::LiteralString(r"it\'s".to_string()))
    );

    let lenient = TomlParser::default();
    assert_eq!(lenient.parse_str("a =").unwrap().get("a"), Some(&Value::Null));
    assert_eq!(
        lenient.parse_str(r"a = 'it\'s'").unwrap().get("a"),
        Some(&Value::LiteralString("it's".to_string()))
    );
}

#[test]
fn test_node_lines_and_content() {
    let file = parse_str("\n[server]\nport = 8080  # http").unwrap();
    let server = &file.children()[0];
    assert_eq!(server.line(), 2);
    assert_eq!(server.content(), "[server]");
    let port = &server.children()[0];
    assert_eq!(port.line(), 3);
    assert_eq!(port.content(), "port = 8080");
    assert_eq!(port.name(), "port");
}
