// Module declarations
pub mod command;
pub mod error;
pub mod params;
pub mod row;
pub mod value;

// Re-exports for convenience
pub use command::{CommandKind, CommandSet};
pub use error::{AdapterError, Result};
pub use params::{ParamKey, Params};
pub use row::Row;
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Real(3.5).to_string(), "3.5");
        assert_eq!(Value::Text("hello".to_string()).to_string(), "hello");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Bytea(vec![0xde, 0xad]).to_string(), "\\xdead");
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".to_string()));
    }

    #[test]
    fn test_value_to_json() {
        assert_eq!(Value::Integer(7).to_json(), serde_json::json!(7));
        assert_eq!(Value::Json("{\"a\":1}".to_string()).to_json(), serde_json::json!({"a": 1}));
        assert_eq!(Value::Json("not json".to_string()).to_json(), serde_json::json!("not json"));
        assert_eq!(Value::Null.to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_row_lookup_prefers_last_duplicate() {
        let row = Row::new(
            vec!["id".to_string(), "name".to_string(), "id".to_string()],
            vec![Value::Integer(1), Value::from("Alice"), Value::Integer(2)],
        );
        assert_eq!(row.get("id"), Some(&Value::Integer(2)));
        assert_eq!(row.get("name").and_then(Value::as_text), Some("Alice"));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_row_serializes_as_map_in_column_order() {
        let row = Row::new(
            vec!["id".to_string(), "email".to_string(), "id".to_string()],
            vec![Value::Integer(1), Value::from("a@b.com"), Value::Integer(9)],
        );
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"email":"a@b.com","id":9}"#);
    }

    #[test]
    fn test_scalar_params_are_single_positional() {
        assert_eq!(Params::from(3), Params::from(vec![3]));
        assert_eq!(Params::from("x"), Params::Positional(vec![Value::from("x")]));
    }

    #[test]
    fn test_infer_positional_when_all_keys_are_indexes() {
        let params = Params::infer([(ParamKey::Index(1), "b"), (ParamKey::Index(0), "a")]);
        assert_eq!(params, Params::positional(["a", "b"]));
    }

    #[test]
    fn test_infer_named_when_any_key_is_a_name() {
        let params = Params::infer([(ParamKey::Index(0), 1), (ParamKey::from("id"), 2)]);
        match params {
            Params::Named(pairs) => {
                assert_eq!(pairs[0], (":0".to_string(), Value::Integer(1)));
                assert_eq!(pairs[1], (":id".to_string(), Value::Integer(2)));
            }
            other => panic!("expected named params, got {other:?}"),
        }
    }

    #[test]
    fn test_infer_empty_is_none() {
        assert!(Params::infer(Vec::<(ParamKey, Value)>::new()).is_none());
    }

    #[test]
    fn test_named_params_gain_colon_prefix() {
        let params = Params::named([("email", "a@b.com"), (":pw", "h")]);
        let Params::Named(pairs) = params else {
            panic!("expected named params");
        };
        assert_eq!(pairs[0].0, ":email");
        assert_eq!(pairs[1].0, ":pw");
    }

    #[test]
    fn test_map_params_are_named() {
        let mut map = HashMap::new();
        map.insert(":id".to_string(), 5);
        assert_eq!(Params::from(map), Params::named([(":id", 5)]));
    }

    #[test]
    fn test_command_set_overwrites() {
        let mut commands = CommandSet::new();
        assert_eq!(commands.get(CommandKind::Select), None);
        commands.set(CommandKind::Select, "SELECT 1".to_string());
        let previous = commands.set(CommandKind::Select, "SELECT 2".to_string());
        assert_eq!(previous.as_deref(), Some("SELECT 1"));
        assert_eq!(commands.get(CommandKind::Select), Some("SELECT 2"));
        assert_eq!(commands.get(CommandKind::Delete), None);
    }

    #[test]
    fn test_command_kind_parse() {
        assert_eq!("SELECT".parse::<CommandKind>(), Ok(CommandKind::Select));
        assert!("merge".parse::<CommandKind>().is_err());
        assert!(CommandKind::Select.is_query());
        assert!(!CommandKind::Insert.is_query());
    }
}
