use serde::de::{Deserialize, DeserializeOwned, Deserializer, Error};
use serde_json::{Map, Value};

/// Derived struct deserializers also accept a JSON array of field values in
/// order. PagerDuty resources are always objects, so anything else is
/// malformed.
pub fn only_object<'a, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'a>,
    T: DeserializeOwned,
{
    Map::<String, Value>::deserialize(deserializer)
        .and_then(|m| T::deserialize(Value::Object(m)).map_err(Error::custom))
}

/// As [only_object] for a list of resources. `null` is an empty list.
pub fn only_objects<'a, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'a>,
    T: DeserializeOwned,
{
    Option::<Vec<Map<String, Value>>>::deserialize(deserializer).and_then(|xs| {
        xs.unwrap_or_default()
            .into_iter()
            .map(|m| T::deserialize(Value::Object(m)).map_err(Error::custom))
            .collect()
    })
}

#[cfg(test)]
#[derive(Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(default)]
struct Pair {
    a: String,
    b: String,
}

#[test]
fn test_only_object() {
    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct T {
        #[serde(deserialize_with = "only_object")]
        val: Pair,
    }

    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": {"a": "x"}}"#).unwrap(),
        T {
            val: Pair {
                a: "x".into(),
                b: "".into(),
            }
        },
    );

    assert!(serde_json::from_str::<T>(r#"{"val": ["x", "y"]}"#).is_err());
    assert!(serde_json::from_str::<T>(r#"{"val": 5}"#).is_err());
    assert!(serde_json::from_str::<T>(r#"{"val": null}"#).is_err());
}

#[test]
fn test_only_objects() {
    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct T {
        #[serde(default, deserialize_with = "only_objects")]
        val: Vec<Pair>,
    }

    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": [{"b": "y"}]}"#).unwrap(),
        T {
            val: vec![Pair {
                a: "".into(),
                b: "y".into(),
            }]
        },
    );

    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": null}"#).unwrap(),
        T { val: vec![] },
    );
    assert_eq!(serde_json::from_str::<T>("{}").unwrap(), T { val: vec![] });

    assert!(serde_json::from_str::<T>(r#"{"val": [["x", "y"]]}"#).is_err());
}
