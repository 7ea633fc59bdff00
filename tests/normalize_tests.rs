use medai::normalize::{normalize, normalize_ref, render_value};
use serde_json::{json, Value};

fn sample_trees() -> Vec<Value>
{   vec![
      json!(null)
    , json!(42)
    , json!("plain text")
    , json!("5")
    , json!("\"quoted\"")
    , json!("\"\\\"7\\\"\"")
    , json!({"a": "5", "b": "text", "c": "[1,2]"})
    , json!({"outer": "{\"inner\": \"[1,2,3]\"}"})
    , json!([["{\"deep\": \"true\"}"], {"k": ["null", "x"]}])
    , json!({"report": {"age": "56", "notes": "n/a", "meds": "[\"a\", \"b\"]"}})
    ]
}

#[test]
fn test_string_coercion()
{   let value = json!({"a": "5", "b": "text", "c": "[1,2]"});
    assert_eq!(
      normalize(value),
      json!({"a": 5, "b": "text", "c": [1, 2]})
    );
}

#[test]
fn test_nested_coercion()
{   let value = json!({"outer": "{\"inner\": \"[1,2,3]\"}"});
    assert_eq!(
      normalize(value),
      json!({"outer": {"inner": [1, 2, 3]}})
    );
}

#[test]
fn test_non_string_passthrough()
{   assert_eq!(normalize(json!(42)), json!(42));
    assert_eq!(normalize(json!(4.5)), json!(4.5));
    assert_eq!(normalize(json!(true)), json!(true));
    assert_eq!(normalize(Value::Null), Value::Null);
}

#[test]
fn test_invalid_json_strings_stay()
{   assert_eq!(normalize(json!("hello")), json!("hello"));
    assert_eq!(normalize(json!("")), json!(""));
    assert_eq!(normalize(json!("{not json")), json!("{not json"));
}

#[test]
fn test_scalar_looking_strings_convert()
{   assert_eq!(normalize(json!("true")), json!(true));
    assert_eq!(normalize(json!("null")), Value::Null);
    assert_eq!(normalize(json!(" 12 ")), json!(12));
}

#[test]
fn test_quoted_string_unwraps_fully()
{   // each layer of quoting is peeled until the number is reached
    assert_eq!(normalize(json!("\"\\\"7\\\"\"")), json!(7));
    assert_eq!(normalize(json!("\"quoted\"")), json!("quoted"));
}

#[test]
fn test_array_order_preserved()
{   let value = json!(["3", "b", "[\"x\"]", 1]);
    assert_eq!(normalize(value), json!([3, "b", ["x"], 1]));
}

#[test]
fn test_object_key_order_preserved()
{   let value = json!({"zeta": "1", "alpha": "2", "mid": "x"});
    let keys: Vec<String> = normalize(value)
      .as_object()
      .unwrap()
      .keys()
      .cloned()
      .collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_idempotence()
{   for tree in sample_trees()
    {   let once = normalize(tree.clone());
        let twice = normalize(once.clone());
        assert_eq!(once, twice, "not idempotent for {}", tree);
    }
}

#[test]
fn test_no_json_string_leaf_survives()
{   fn check(value: &Value)
    {   match value
        {   Value::String(s) => {
              assert!(
                serde_json::from_str::<Value>(s).is_err(),
                "string leaf {:?} still parses", s
              );
            }
          , Value::Array(items) => items.iter().for_each(check)
          , Value::Object(map) => map.values().for_each(check)
          , _ => {}
        }
    }
    for tree in sample_trees()
    {   check(&normalize(tree));
    }
}

#[test]
fn test_normalize_ref_leaves_input_untouched()
{   let input = json!({"a": "[1]"});
    let output = normalize_ref(&input);
    assert_eq!(input, json!({"a": "[1]"}));
    assert_eq!(output, json!({"a": [1]}));
}

#[test]
fn test_render_value()
{   assert_eq!(render_value(&Value::Null), "");
    assert_eq!(render_value(&json!("Fatigue")), "Fatigue");
    assert_eq!(render_value(&json!(56)), "56");
    assert_eq!(render_value(&json!(false)), "false");
    assert_eq!(render_value(&json!({"a": [1, 2]})), "{\"a\":[1,2]}");
}
