//! Generic document tree consumed by the applicator.
//!
//! YAML documents are built from the parser's event stream and keep every
//! scalar as written. JSON documents go through the [`Deserialize`] impl
//! below; JSON numbers keep their integer or float form. Typing is decided by
//! the schema, not by the parser.

use crate::error::CoercionError;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A node of a parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Leaf value in its textual form.
    Scalar(String),
    /// Named children; names are unique.
    Mapping(Vec<(String, Node)>),
    /// Ordered children.
    Sequence(Vec<Node>),
}

impl Node {
    /// Build a scalar from anything printable.
    pub fn scalar(value: impl fmt::Display) -> Self {
        Node::Scalar(value.to_string())
    }

    /// Build a mapping; a repeated name replaces the earlier entry.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        let mut children: Vec<(String, Node)> = Vec::new();
        for (name, node) in entries {
            let name = name.into();
            match children.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = node,
                None => children.push((name, node)),
            }
        }
        Node::Mapping(children)
    }

    /// Build a sequence.
    pub fn sequence(items: impl IntoIterator<Item = Node>) -> Self {
        Node::Sequence(items.into_iter().collect())
    }

    /// Named child of a mapping; `None` for other node kinds or unknown names.
    pub fn find_child(&self, name: &str) -> Option<&Node> {
        match self {
            Node::Mapping(children) => children
                .iter()
                .find(|(child, _)| child == name)
                .map(|(_, node)| node),
            Node::Scalar(_) | Node::Sequence(_) => None,
        }
    }

    /// Indexed child of a sequence.
    pub fn get(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Sequence(items) => items.get(index),
            Node::Scalar(_) | Node::Mapping(_) => None,
        }
    }

    /// Number of direct children (zero for scalars).
    pub fn len(&self) -> usize {
        match self {
            Node::Scalar(_) => 0,
            Node::Mapping(children) => children.len(),
            Node::Sequence(items) => items.len(),
        }
    }

    /// True when the node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for mappings.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    /// True iff the node is a sequence whose every element is a mapping, so
    /// each element can address one array slot.
    pub fn is_indexable_sequence(&self) -> bool {
        match self {
            Node::Sequence(items) => items.iter().all(Node::is_mapping),
            Node::Scalar(_) | Node::Mapping(_) => false,
        }
    }

    /// Text of a scalar node.
    pub fn as_scalar(&self) -> Result<&str, CoercionError> {
        match self {
            Node::Scalar(text) => Ok(text),
            Node::Mapping(_) | Node::Sequence(_) => Err(CoercionError::NotScalar),
        }
    }

    /// Parse the scalar as a decimal or `0x` hexadecimal integer.
    pub fn coerce_to_integer(&self) -> Result<i64, CoercionError> {
        let text = self.as_scalar()?;
        parse_integer(text).ok_or_else(|| CoercionError::NotInteger(text.to_string()))
    }

    /// Parse the scalar as a floating point number.
    pub fn coerce_to_double(&self) -> Result<f64, CoercionError> {
        let text = self.as_scalar()?;
        text.parse::<f64>()
            .map_err(|_| CoercionError::NotNumber(text.to_string()))
    }

    /// Accept exactly `true` or `false`.
    pub fn coerce_to_bool(&self) -> Result<bool, CoercionError> {
        match self.as_scalar()? {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(CoercionError::NotBool(other.to_string())),
        }
    }

    /// Render the tree as YAML text.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let hex = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"));
    match hex {
        Some(hex) if !hex.is_empty() && !hex.starts_with(['+', '-']) => {
            let magnitude = i128::from_str_radix(hex, 16).ok()?;
            let value = if negative { -magnitude } else { magnitude };
            i64::try_from(value).ok()
        }
        Some(_) => None,
        None => text.parse::<i64>().ok(),
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(text) => {
                if let Ok(flag) = self.coerce_to_bool() {
                    serializer.serialize_bool(flag)
                } else if let Ok(value) = text.parse::<i64>() {
                    serializer.serialize_i64(value)
                } else if let Some(value) = text.parse::<f64>().ok().filter(|v| v.is_finite()) {
                    serializer.serialize_f64(value)
                } else {
                    serializer.serialize_str(text)
                }
            }
            Node::Mapping(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (name, node) in children {
                    map.serialize_entry(name, node)?;
                }
                map.end()
            }
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, mapping or sequence")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Node, E> {
        Ok(Node::scalar(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Node, E> {
        Ok(Node::scalar(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Node, E> {
        Ok(Node::scalar(value))
    }

    // `Debug` keeps a fraction or exponent, so `100.0` never reads as an integer.
    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Node, E> {
        Ok(Node::Scalar(format!("{value:?}")))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Node, E> {
        Ok(Node::Scalar(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Node, E> {
        Ok(Node::Scalar(value))
    }

    // `key:` with no value keeps an empty scalar, which no field accepts.
    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Scalar(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut children: Vec<(String, Node)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<Node>()? {
            let Node::Scalar(name) = key else {
                return Err(de::Error::custom("mapping keys must be scalars"));
            };
            if children.iter().any(|(existing, _)| *existing == name) {
                return Err(de::Error::custom(format!("duplicate key `{name}`")));
            }
            let value = map.next_value::<Node>()?;
            children.push((name, value));
        }
        Ok(Node::Mapping(children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::parse_yaml;
    use pretty_assertions::assert_eq;

    /// Child lookup only succeeds on mappings.
    #[test]
    fn find_child_only_searches_mappings() {
        let node = Node::mapping([("a", Node::scalar(1))]);
        assert_eq!(node.find_child("a"), Some(&Node::scalar(1)));
        assert_eq!(node.find_child("b"), None);
        assert_eq!(Node::scalar("a").find_child("a"), None);
        assert_eq!(Node::sequence([node.clone()]).find_child("a"), None);
    }

    /// Indexable sequences hold mappings only.
    #[test]
    fn indexable_sequence_requires_mapping_elements() {
        let element = Node::mapping([("index", Node::scalar(0))]);
        assert!(Node::sequence([element.clone(), element.clone()]).is_indexable_sequence());
        assert!(Node::sequence([]).is_indexable_sequence());
        assert!(!Node::sequence([element.clone(), Node::scalar(3)]).is_indexable_sequence());
        assert!(!element.is_indexable_sequence());
    }

    /// Booleans accept exactly `true` and `false`.
    #[test]
    fn bool_coercion_is_case_sensitive() {
        assert_eq!(Node::scalar("true").coerce_to_bool(), Ok(true));
        assert_eq!(Node::scalar("false").coerce_to_bool(), Ok(false));
        assert!(Node::scalar("True").coerce_to_bool().is_err());
        assert!(Node::scalar("1").coerce_to_bool().is_err());
        assert!(Node::scalar("").coerce_to_bool().is_err());
    }

    /// Integers accept decimal and `0x` hexadecimal text.
    #[test]
    fn integer_coercion_accepts_decimal_and_hex() {
        assert_eq!(Node::scalar("42").coerce_to_integer(), Ok(42));
        assert_eq!(Node::scalar("-7").coerce_to_integer(), Ok(-7));
        assert_eq!(Node::scalar("0x10").coerce_to_integer(), Ok(16));
        assert_eq!(Node::scalar("-0x10").coerce_to_integer(), Ok(-16));
        assert!(Node::scalar("0x").coerce_to_integer().is_err());
        assert!(Node::scalar("1.5").coerce_to_integer().is_err());
        assert!(Node::scalar("ten").coerce_to_integer().is_err());
        assert_eq!(
            Node::sequence([]).coerce_to_integer(),
            Err(CoercionError::NotScalar)
        );
    }

    /// Doubles reject non-numeric text.
    #[test]
    fn double_coercion_rejects_text() {
        assert_eq!(Node::scalar("0.35").coerce_to_double(), Ok(0.35));
        assert_eq!(Node::scalar("-1").coerce_to_double(), Ok(-1.0));
        assert!(Node::scalar("high").coerce_to_double().is_err());
    }

    /// Parsed YAML scalars keep their source text.
    #[test]
    fn yaml_scalars_keep_their_text() {
        let node = parse_yaml("a: 100\nb: \"0x1f\"\nc: false\nd:\ne: [1, x]\n").expect("yaml");
        assert_eq!(node.find_child("a"), Some(&Node::scalar("100")));
        assert_eq!(node.find_child("b"), Some(&Node::scalar("0x1f")));
        assert_eq!(node.find_child("c"), Some(&Node::scalar("false")));
        assert_eq!(node.find_child("d"), Some(&Node::scalar("")));
        assert_eq!(
            node.find_child("e"),
            Some(&Node::sequence([Node::scalar(1), Node::scalar("x")]))
        );
    }

    /// Sequence children are reachable by position.
    #[test]
    fn get_reads_sequence_children() {
        let node = Node::sequence([Node::scalar("a"), Node::scalar("b")]);
        assert_eq!(node.get(1), Some(&Node::scalar("b")));
        assert_eq!(node.get(2), None);
        assert_eq!(Node::mapping([("a", Node::scalar(1))]).get(0), None);
    }

    /// JSON numbers keep their integer or float form.
    #[test]
    fn json_numbers_keep_their_kind() {
        let node: Node = serde_json::from_str(r#"{"i": 100, "f": 100.0, "n": -0.35}"#).expect("json");
        assert_eq!(node.find_child("i"), Some(&Node::scalar("100")));
        assert_eq!(node.find_child("f"), Some(&Node::scalar("100.0")));
        assert_eq!(node.find_child("n"), Some(&Node::scalar("-0.35")));
        assert!(node.find_child("f").expect("f").coerce_to_integer().is_err());
    }

    /// Repeated JSON keys reject the document.
    #[test]
    fn duplicate_json_keys_are_rejected() {
        let result: Result<Node, _> = serde_json::from_str(r#"{"a": 1, "a": 2}"#);
        assert!(result.is_err());
    }

    /// YAML output writes typed scalars that parse back to the same tree.
    #[test]
    fn yaml_output_is_typed() {
        let node = Node::mapping([
            ("flag", Node::scalar(true)),
            ("count", Node::scalar(3)),
            ("level", Node::scalar(0.5)),
            ("name", Node::scalar("tdc")),
        ]);
        let text = node.to_yaml().expect("yaml");
        assert_eq!(text, "flag: true\ncount: 3\nlevel: 0.5\nname: tdc\n");
        let parsed = parse_yaml(&text).expect("parse");
        assert_eq!(parsed, node);
    }
}
