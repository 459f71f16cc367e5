//! JSON decoding without serde_json's nesting cap.
//!
//! A roadmap is as deep as the model makes it, and every roadmap level costs
//! two JSON levels (the node object and its `children` array). Decoding runs
//! with the recursion limit off and grows the stack on demand instead.

use serde::de::DeserializeOwned;
use serde::Deserialize;

pub fn from_slice_unbounded<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::models::roadmap::RoadmapNode;

    fn deep_roadmap_json(levels: usize) -> String {
        let mut raw = String::new();
        for i in 0..levels {
            raw.push_str(&format!(r#"{{"name":"step {i}","children":["#));
        }
        raw.push_str(r#"{"name":"goal"}"#);
        raw.push_str(&"]}".repeat(levels));
        raw
    }

    #[test]
    fn test_decodes_past_default_nesting_limit() {
        let raw = deep_roadmap_json(500);
        assert!(serde_json::from_str::<Value>(&raw).is_err());

        let node: RoadmapNode = from_slice_unbounded(raw.as_bytes()).unwrap();
        assert_eq!(node.node_count(), 501);
        assert_eq!(node.name, "step 0");
    }

    #[test]
    fn test_rejects_trailing_garbage() {
        assert!(from_slice_unbounded::<Value>(br#"{"name":"a"} x"#).is_err());
        assert_eq!(
            from_slice_unbounded::<Value>(br#" {"name":"a"} "#).unwrap(),
            json!({"name": "a"})
        );
    }
}
