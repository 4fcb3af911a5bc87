use toml_tree::array::{parse_array, split_array};
use toml_tree::datetime::DateTime;
use toml_tree::{parse_str, parse_value, Key, TomlConfig, Value};

fn value(raw: &str) -> toml_tree::Result<Value> {
    parse_value(raw, 1, &TomlConfig::default())
}

#[test]
fn test_string_variants() {
    assert_eq!(
        value(r#""C:\\Users\\nodejs""#).unwrap(),
        Value::BasicString(r"C:\Users\nodejs".to_string())
    );
    assert_eq!(
        value(r"'C:\Users\nodejs'").unwrap(),
        Value::LiteralString(r"C:\Users\nodejs".to_string())
    );
    assert_eq!(
        value(r#""snowman \u2603""#).unwrap().as_str(),
        Some("snowman \u{2603}")
    );
}

#[test]
fn test_string_errors() {
    assert!(value(r#""unterminated"#).is_err());
    assert!(value(r#""in"side""#).is_err());
    assert!(value(r#""bad \x escape""#).is_err());
    assert!(value(r#""short \u12""#).is_err());
}

#[test]
fn test_numbers() {
    assert_eq!(value("+99").unwrap(), Value::Integer(99));
    assert_eq!(value("-17").unwrap(), Value::Integer(-17));
    assert_eq!(value("0").unwrap(), Value::Integer(0));
    assert_eq!(value("5_349_221").unwrap(), Value::Integer(5_349_221));
    assert_eq!(value("0xff").unwrap(), Value::Integer(255));
    assert_eq!(value("6.626e-34").unwrap(), Value::Float(6.626e-34));
    assert_eq!(value("-2E-2").unwrap(), Value::Float(-0.02));
    assert_eq!(value("+inf").unwrap(), Value::Float(f64::INFINITY));
    assert!(value("1__000").is_err());
}

#[test]
fn test_date_time_variants() {
    let expected = [
        ("1979-05-27T07:32:00Z", "offset"),
        ("1979-05-27T00:32:00.999999-07:00", "offset"),
        ("1979-05-27 07:32:00Z", "offset"),
        ("1979-05-27T07:32:00", "local"),
        ("1979-05-27 00:32:00.5", "local"),
        ("1979-05-27", "date"),
    ];
    for (raw, kind) in expected {
        let parsed = value(raw).unwrap();
        let dt = parsed.as_date_time().unwrap();
        let actual = match dt {
            DateTime::Offset(_) => "offset",
            DateTime::Local(_) => "local",
            DateTime::LocalDate(_) => "date",
        };
        assert_eq!(actual, kind, "{}", raw);
    }
}

#[test]
fn test_nested_arrays() {
    let values = parse_array("[[1,2],[3]]", 1, &TomlConfig::default()).unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(
        values[0],
        Value::Array(vec![Value::Integer(1), Value::Integer(2)])
    );
    assert_eq!(values[1], Value::Array(vec![Value::Integer(3)]));
}

#[test]
fn test_mixed_arrays() {
    let parsed = value(r#"[ "a", 'b', 1, 2.5, true, 1979-05-27, [ ], { k = 'v' } ]"#).unwrap();
    let kinds: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(Value::type_name)
        .collect();
    assert_eq!(
        kinds,
        [
            "basic string",
            "literal string",
            "integer",
            "float",
            "boolean",
            "date-time",
            "array",
            "inline table"
        ]
    );
}

#[test]
fn test_split_array_never_yields_phantom_element() {
    assert!(split_array("[]").is_empty());
    assert!(split_array("[ \t ]").is_empty());
    assert_eq!(split_array("[ 'a' ]"), ["'a'"]);
    assert_eq!(split_array(r#"["[", "]"]"#), [r#""[""#, r#""]""#]);
}

#[test]
fn test_inline_table_values() {
    let parsed = value("{ name = 'x', point.x = 1, nested = { y = [1, 2] } }").unwrap();
    let pairs = parsed.as_inline_table().unwrap();
    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.raw()).collect();
    assert_eq!(keys, ["name", "point.x", "nested"]);
    assert!(value("{ a = 1, }").is_err());
    assert!(value("{ a }").is_err());
}

#[test]
fn test_null_spellings() {
    for raw in ["null", "nil", "NULL", "NIL"] {
        let file = parse_str(&format!("a = {}", raw)).unwrap();
        assert_eq!(file.get("a"), Some(&Value::Null), "{}", raw);
    }
    assert!(value("Null").is_err());
}

#[test]
fn test_keys() {
    let key = Key::parse(r#" site."google.com" . 'x y' "#, 1).unwrap();
    assert_eq!(key.parts(), ["site", "google.com", "x y"]);
    assert_eq!(key.to_string(), r#"site."google.com" . 'x y'"#);
    assert!(Key::parse("", 1).is_err());
}

#[test]
fn test_display_renders_toml_syntax() {
    let parsed = value(r#"[ "a\tb", 'c', 1.5, { x = 1 } ]"#).unwrap();
    assert_eq!(parsed.to_string(), r#"["a\tb", 'c', 1.5, { x = 1 }]"#);
}
