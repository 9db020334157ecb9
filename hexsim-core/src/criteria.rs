//! Boolean criteria trees for building eligibility.
//!
//! Three independent grammars, all sharing the same wire shape: a JSON object
//! with exactly one operator key (`{"AND": [...]}`). The original evaluator
//! dispatched on `Object.keys(criteria)[0]` at runtime; here each grammar is a
//! closed sum type parsed once, and an object with zero keys is the explicit
//! [`TextCriteria::Unrestricted`] (etc.) variant meaning "no restriction".
//! More than one top-level key, or an unknown operator, is a parse error,
//! rejected instead of silently misinterpreted.
//!
//! Evaluation semantics are deliberately asymmetric, matching the source:
//! empty criteria are vacuously true, text matching is case-insensitive on
//! trimmed values, and anything malformed never reaches evaluation.

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Defined parse errors for criteria objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("criteria object has {0} top-level operators, exactly one expected")]
    MultipleOperators(usize),
    #[error("unknown criteria operator \"{0}\"")]
    UnknownOperator(String),
    #[error("operator {operator} expects {expected} operand(s), got {got}")]
    OperandArity {
        operator: &'static str,
        expected: usize,
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// Text-set criteria
// ---------------------------------------------------------------------------

/// Criteria over a set of strings (landscapes, culture, climate, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum TextCriteria {
    /// `{}` on the wire: no restriction, always true.
    Unrestricted,
    And(Vec<TextNode>),
    Or(Vec<TextNode>),
    /// Exactly one operand true.
    Xor(Vec<TextNode>),
    Nand(Vec<TextNode>),
    Nor(Vec<TextNode>),
    /// Exactly one operand, negated.
    Not(Box<TextNode>),
}

/// An operand of a text criteria node: a literal to look up in the value set,
/// or a nested subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextNode {
    Literal(String),
    Nested(TextCriteria),
}

impl TextCriteria {
    /// Evaluates against a province's value list. Values are normalized by
    /// trimming and upper-casing, so matching is case-insensitive.
    pub fn evaluate(&self, values: &[String]) -> bool {
        let normalized: Vec<String> = values.iter().map(|v| v.trim().to_uppercase()).collect();
        self.eval(&normalized)
    }

    fn eval(&self, normalized: &[String]) -> bool {
        let node = |n: &TextNode| match n {
            TextNode::Literal(lit) => {
                let lit = lit.trim().to_uppercase();
                normalized.iter().any(|v| *v == lit)
            }
            TextNode::Nested(c) => c.eval(normalized),
        };
        match self {
            Self::Unrestricted => true,
            Self::And(items) => items.iter().all(node),
            Self::Or(items) => items.iter().any(node),
            Self::Xor(items) => items.iter().filter(|n| node(n)).count() == 1,
            Self::Nand(items) => !items.iter().all(node),
            Self::Nor(items) => !items.iter().any(node),
            Self::Not(item) => !node(item),
        }
    }
}

impl<'de> Deserialize<'de> for TextCriteria {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct TextVisitor;

        impl<'de> Visitor<'de> for TextVisitor {
            type Value = TextCriteria;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a single-operator criteria object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let Some(operator) = map.next_key::<String>()? else {
                    return Ok(TextCriteria::Unrestricted);
                };
                let parsed = match operator.to_uppercase().as_str() {
                    "AND" => TextCriteria::And(map.next_value()?),
                    "OR" => TextCriteria::Or(map.next_value()?),
                    "XOR" => TextCriteria::Xor(map.next_value()?),
                    "NAND" => TextCriteria::Nand(map.next_value()?),
                    "NOR" => TextCriteria::Nor(map.next_value()?),
                    "NOT" => {
                        let mut operands: Vec<TextNode> = map.next_value()?;
                        if operands.len() != 1 {
                            return Err(de::Error::custom(CriteriaError::OperandArity {
                                operator: "NOT",
                                expected: 1,
                                got: operands.len(),
                            }));
                        }
                        TextCriteria::Not(Box::new(operands.remove(0)))
                    }
                    other => {
                        return Err(de::Error::custom(CriteriaError::UnknownOperator(
                            other.to_string(),
                        )))
                    }
                };
                reject_extra_operators(&mut map)?;
                Ok(parsed)
            }
        }

        de.deserialize_map(TextVisitor)
    }
}

impl Serialize for TextCriteria {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(if matches!(self, Self::Unrestricted) {
            0
        } else {
            1
        }))?;
        match self {
            Self::Unrestricted => {}
            Self::And(items) => map.serialize_entry("AND", items)?,
            Self::Or(items) => map.serialize_entry("OR", items)?,
            Self::Xor(items) => map.serialize_entry("XOR", items)?,
            Self::Nand(items) => map.serialize_entry("NAND", items)?,
            Self::Nor(items) => map.serialize_entry("NOR", items)?,
            Self::Not(item) => map.serialize_entry("NOT", std::slice::from_ref(item.as_ref()))?,
        }
        map.end()
    }
}

impl fmt::Display for TextCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrestricted => write!(f, "anything"),
            Self::And(items) => write!(f, "{}", join_nodes(items, " and ")),
            Self::Or(items) => write!(f, "{}", join_nodes(items, " or ")),
            Self::Xor(items) => write!(f, "exactly one of {}", join_nodes(items, ", ")),
            Self::Nand(items) => write!(f, "not all of {}", join_nodes(items, ", ")),
            Self::Nor(items) => write!(f, "none of {}", join_nodes(items, ", ")),
            Self::Not(item) => write!(f, "not {item}"),
        }
    }
}

impl fmt::Display for TextNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "{s}"),
            Self::Nested(c) => write!(f, "({c})"),
        }
    }
}

fn join_nodes(items: &[TextNode], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

// ---------------------------------------------------------------------------
// Numeric criteria
// ---------------------------------------------------------------------------

/// Criteria comparing a numeric province field against an operand.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberCriteria {
    /// `{}` on the wire: no restriction, always true.
    Unrestricted,
    GreaterThan(f64),
    LessThan(f64),
    EqualTo(f64),
    GreaterOrEqualTo(f64),
    LessOrEqualTo(f64),
    /// Inclusive on both ends.
    Between(f64, f64),
}

impl NumberCriteria {
    pub fn evaluate(&self, current: f64) -> bool {
        match *self {
            Self::Unrestricted => true,
            Self::GreaterThan(v) => current > v,
            Self::LessThan(v) => current < v,
            Self::EqualTo(v) => current == v,
            Self::GreaterOrEqualTo(v) => current >= v,
            Self::LessOrEqualTo(v) => current <= v,
            Self::Between(min, max) => current >= min && current <= max,
        }
    }
}

impl<'de> Deserialize<'de> for NumberCriteria {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct NumberVisitor;

        impl<'de> Visitor<'de> for NumberVisitor {
            type Value = NumberCriteria;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a single-operator numeric criteria object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let Some(operator) = map.next_key::<String>()? else {
                    return Ok(NumberCriteria::Unrestricted);
                };
                let parsed = match operator.to_uppercase().as_str() {
                    "GREATER_THAN" => NumberCriteria::GreaterThan(map.next_value()?),
                    "LESS_THAN" => NumberCriteria::LessThan(map.next_value()?),
                    "EQUAL_TO" => NumberCriteria::EqualTo(map.next_value()?),
                    "GREATER_OR_EQUAL_TO" => NumberCriteria::GreaterOrEqualTo(map.next_value()?),
                    "LESS_OR_EQUAL_TO" => NumberCriteria::LessOrEqualTo(map.next_value()?),
                    "BETWEEN" => {
                        let bounds: Vec<f64> = map.next_value()?;
                        if bounds.len() != 2 {
                            return Err(de::Error::custom(CriteriaError::OperandArity {
                                operator: "BETWEEN",
                                expected: 2,
                                got: bounds.len(),
                            }));
                        }
                        NumberCriteria::Between(bounds[0], bounds[1])
                    }
                    other => {
                        return Err(de::Error::custom(CriteriaError::UnknownOperator(
                            other.to_string(),
                        )))
                    }
                };
                reject_extra_operators(&mut map)?;
                Ok(parsed)
            }
        }

        de.deserialize_map(NumberVisitor)
    }
}

impl Serialize for NumberCriteria {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(if matches!(self, Self::Unrestricted) {
            0
        } else {
            1
        }))?;
        match *self {
            Self::Unrestricted => {}
            Self::GreaterThan(v) => map.serialize_entry("GREATER_THAN", &v)?,
            Self::LessThan(v) => map.serialize_entry("LESS_THAN", &v)?,
            Self::EqualTo(v) => map.serialize_entry("EQUAL_TO", &v)?,
            Self::GreaterOrEqualTo(v) => map.serialize_entry("GREATER_OR_EQUAL_TO", &v)?,
            Self::LessOrEqualTo(v) => map.serialize_entry("LESS_OR_EQUAL_TO", &v)?,
            Self::Between(min, max) => map.serialize_entry("BETWEEN", &[min, max])?,
        }
        map.end()
    }
}

impl fmt::Display for NumberCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Unrestricted => write!(f, "anything"),
            Self::GreaterThan(v) => write!(f, "greater than {v}"),
            Self::LessThan(v) => write!(f, "less than {v}"),
            Self::EqualTo(v) => write!(f, "equal to {v}"),
            Self::GreaterOrEqualTo(v) => write!(f, "at least {v}"),
            Self::LessOrEqualTo(v) => write!(f, "at most {v}"),
            Self::Between(min, max) => write!(f, "between {min} and {max}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Building-count criteria
// ---------------------------------------------------------------------------

/// Criteria over a `building_name -> count` map, used for province- and
/// state-level building prerequisites.
#[derive(Debug, Clone, PartialEq)]
pub enum CountCriteria {
    /// `{}` on the wire: no restriction, always true.
    Unrestricted,
    And(Vec<CountCriteria>),
    Or(Vec<CountCriteria>),
    /// True when no child criteria holds.
    Not(Vec<CountCriteria>),
    /// Every listed building must reach its threshold.
    MinCount(BTreeMap<String, i64>),
    /// No listed building may exceed its threshold.
    MaxCount(BTreeMap<String, i64>),
    /// Both buildings present, or both absent.
    Xnor(String, String),
    /// If the antecedent exists, the consequent must too.
    Implies(String, String),
}

impl CountCriteria {
    pub fn evaluate(&self, counts: &dyn Fn(&str) -> i64) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::And(items) => items.iter().all(|c| c.evaluate(counts)),
            Self::Or(items) => items.iter().any(|c| c.evaluate(counts)),
            Self::Not(items) => !items.iter().any(|c| c.evaluate(counts)),
            Self::MinCount(thresholds) => thresholds.iter().all(|(name, min)| counts(name) >= *min),
            Self::MaxCount(thresholds) => thresholds.iter().all(|(name, max)| counts(name) <= *max),
            Self::Xnor(a, b) => (counts(a) > 0) == (counts(b) > 0),
            Self::Implies(antecedent, consequent) => {
                counts(antecedent) <= 0 || counts(consequent) > 0
            }
        }
    }
}

impl<'de> Deserialize<'de> for CountCriteria {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct CountVisitor;

        fn pair<'de, A: MapAccess<'de>>(
            map: &mut A,
            operator: &'static str,
        ) -> Result<(String, String), A::Error> {
            let mut names: Vec<String> = map.next_value()?;
            if names.len() != 2 {
                return Err(de::Error::custom(CriteriaError::OperandArity {
                    operator,
                    expected: 2,
                    got: names.len(),
                }));
            }
            let second = names.remove(1);
            Ok((names.remove(0), second))
        }

        impl<'de> Visitor<'de> for CountVisitor {
            type Value = CountCriteria;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a single-operator building-count criteria object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let Some(operator) = map.next_key::<String>()? else {
                    return Ok(CountCriteria::Unrestricted);
                };
                let parsed = match operator.to_uppercase().as_str() {
                    "AND" => CountCriteria::And(map.next_value()?),
                    "OR" => CountCriteria::Or(map.next_value()?),
                    "NOT" => CountCriteria::Not(map.next_value()?),
                    "MIN_COUNT" => CountCriteria::MinCount(map.next_value()?),
                    "MAX_COUNT" => CountCriteria::MaxCount(map.next_value()?),
                    "XNOR" => {
                        let (a, b) = pair(&mut map, "XNOR")?;
                        CountCriteria::Xnor(a, b)
                    }
                    "IMPLIES" => {
                        let (a, b) = pair(&mut map, "IMPLIES")?;
                        CountCriteria::Implies(a, b)
                    }
                    other => {
                        return Err(de::Error::custom(CriteriaError::UnknownOperator(
                            other.to_string(),
                        )))
                    }
                };
                reject_extra_operators(&mut map)?;
                Ok(parsed)
            }
        }

        de.deserialize_map(CountVisitor)
    }
}

impl Serialize for CountCriteria {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(if matches!(self, Self::Unrestricted) {
            0
        } else {
            1
        }))?;
        match self {
            Self::Unrestricted => {}
            Self::And(items) => map.serialize_entry("AND", items)?,
            Self::Or(items) => map.serialize_entry("OR", items)?,
            Self::Not(items) => map.serialize_entry("NOT", items)?,
            Self::MinCount(thresholds) => map.serialize_entry("MIN_COUNT", thresholds)?,
            Self::MaxCount(thresholds) => map.serialize_entry("MAX_COUNT", thresholds)?,
            Self::Xnor(a, b) => map.serialize_entry("XNOR", &[a, b])?,
            Self::Implies(a, b) => map.serialize_entry("IMPLIES", &[a, b])?,
        }
        map.end()
    }
}

impl fmt::Display for CountCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |items: &[CountCriteria], sep: &str| {
            items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(sep)
        };
        match self {
            Self::Unrestricted => write!(f, "anything"),
            Self::And(items) => write!(f, "{}", join(items, " and ")),
            Self::Or(items) => write!(f, "{}", join(items, " or ")),
            Self::Not(items) => write!(f, "none of ({})", join(items, "; ")),
            Self::MinCount(thresholds) => {
                let parts: Vec<String> = thresholds
                    .iter()
                    .map(|(name, min)| format!("at least {min} x {name}"))
                    .collect();
                write!(f, "{}", parts.join(", "))
            }
            Self::MaxCount(thresholds) => {
                let parts: Vec<String> = thresholds
                    .iter()
                    .map(|(name, max)| format!("at most {max} x {name}"))
                    .collect();
                write!(f, "{}", parts.join(", "))
            }
            Self::Xnor(a, b) => write!(f, "{a} and {b} together or neither"),
            Self::Implies(a, b) => write!(f, "{b} wherever {a} exists"),
        }
    }
}

/// A criteria object carries exactly one operator; anything more is rejected
/// so it can never be silently misread as a different expression.
fn reject_extra_operators<'de, A: MapAccess<'de>>(map: &mut A) -> Result<(), A::Error> {
    let mut extra = 0usize;
    while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {
        extra += 1;
    }
    if extra > 0 {
        return Err(de::Error::custom(CriteriaError::MultipleOperators(
            1 + extra,
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(json: &str) -> TextCriteria {
        serde_json::from_str(json).unwrap()
    }

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_and_is_case_insensitive() {
        let c = text(r#"{"AND": ["A", "B"]}"#);
        assert!(c.evaluate(&values(&["a", "b", "c"])));
        assert!(!text(r#"{"AND": ["A", "D"]}"#).evaluate(&values(&["a", "b"])));
    }

    #[test]
    fn test_empty_object_is_unrestricted() {
        assert_eq!(text("{}"), TextCriteria::Unrestricted);
        assert!(text("{}").evaluate(&[]));
        let n: NumberCriteria = serde_json::from_str("{}").unwrap();
        assert!(n.evaluate(-100.0));
        let k: CountCriteria = serde_json::from_str("{}").unwrap();
        assert!(k.evaluate(&|_| 0));
    }

    #[test]
    fn test_nested_text_operators() {
        let c = text(r#"{"OR": ["steppe", {"AND": ["forest", {"NOT": ["swamp"]}]}]}"#);
        assert!(c.evaluate(&values(&["forest", "hills"])));
        assert!(!c.evaluate(&values(&["forest", "swamp"])));
        assert!(c.evaluate(&values(&["steppe", "swamp"])));
    }

    #[test]
    fn test_xor_requires_exactly_one() {
        let c = text(r#"{"XOR": ["A", "B"]}"#);
        assert!(c.evaluate(&values(&["a"])));
        assert!(!c.evaluate(&values(&["a", "b"])));
        assert!(!c.evaluate(&values(&["c"])));
    }

    #[test]
    fn test_nand_nor() {
        assert!(!text(r#"{"NAND": ["A", "B"]}"#).evaluate(&values(&["a", "b"])));
        assert!(text(r#"{"NAND": ["A", "B"]}"#).evaluate(&values(&["a"])));
        assert!(text(r#"{"NOR": ["A", "B"]}"#).evaluate(&values(&["c"])));
        assert!(!text(r#"{"NOR": ["A", "B"]}"#).evaluate(&values(&["b"])));
    }

    #[test]
    fn test_not_arity_enforced() {
        let err = serde_json::from_str::<TextCriteria>(r#"{"NOT": ["A", "B"]}"#).unwrap_err();
        assert!(err.to_string().contains("NOT"));
    }

    #[test]
    fn test_multiple_operators_rejected() {
        let err =
            serde_json::from_str::<TextCriteria>(r#"{"AND": ["A"], "OR": ["B"]}"#).unwrap_err();
        assert!(err.to_string().contains("top-level operators"));
        let err = serde_json::from_str::<NumberCriteria>(
            r#"{"GREATER_THAN": 1, "LESS_THAN": 5}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("top-level operators"));
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let err = serde_json::from_str::<TextCriteria>(r#"{"MAYBE": ["A"]}"#).unwrap_err();
        assert!(err.to_string().contains("MAYBE"));
        let err = serde_json::from_str::<CountCriteria>(r#"{"NOPE": []}"#).unwrap_err();
        assert!(err.to_string().contains("NOPE"));
    }

    #[test]
    fn test_between_inclusive() {
        let c: NumberCriteria = serde_json::from_str(r#"{"BETWEEN": [10, 20]}"#).unwrap();
        assert!(c.evaluate(15.0));
        assert!(c.evaluate(10.0));
        assert!(c.evaluate(20.0));
        assert!(!c.evaluate(25.0));
        assert!(!c.evaluate(9.999));
    }

    #[test]
    fn test_between_arity_enforced() {
        let err = serde_json::from_str::<NumberCriteria>(r#"{"BETWEEN": [10]}"#).unwrap_err();
        assert!(err.to_string().contains("BETWEEN"));
    }

    #[test]
    fn test_number_comparisons() {
        let gt: NumberCriteria = serde_json::from_str(r#"{"GREATER_THAN": 5}"#).unwrap();
        assert!(gt.evaluate(6.0));
        assert!(!gt.evaluate(5.0));
        let le: NumberCriteria = serde_json::from_str(r#"{"less_or_equal_to": 5}"#).unwrap();
        assert!(le.evaluate(5.0));
        assert!(!le.evaluate(5.1));
    }

    #[test]
    fn test_count_min_max() {
        let c: CountCriteria =
            serde_json::from_str(r#"{"MIN_COUNT": {"mine": 2, "sawmill": 1}}"#).unwrap();
        let counts = |name: &str| match name {
            "mine" => 2,
            "sawmill" => 3,
            _ => 0,
        };
        assert!(c.evaluate(&counts));
        let c: CountCriteria = serde_json::from_str(r#"{"MAX_COUNT": {"sawmill": 2}}"#).unwrap();
        assert!(!c.evaluate(&counts));
    }

    #[test]
    fn test_count_xnor_implies() {
        let xnor: CountCriteria =
            serde_json::from_str(r#"{"XNOR": ["dam", "reservoir"]}"#).unwrap();
        assert!(xnor.evaluate(&|_| 0));
        assert!(xnor.evaluate(&|_| 1));
        assert!(!xnor.evaluate(&|name| if name == "dam" { 1 } else { 0 }));

        let implies: CountCriteria =
            serde_json::from_str(r#"{"IMPLIES": ["smelter", "mine"]}"#).unwrap();
        assert!(implies.evaluate(&|_| 0));
        assert!(!implies.evaluate(&|name| if name == "smelter" { 1 } else { 0 }));
        assert!(implies.evaluate(&|_| 1));
    }

    #[test]
    fn test_count_tree_composition() {
        let c: CountCriteria = serde_json::from_str(
            r#"{"AND": [{"MIN_COUNT": {"farm": 1}}, {"NOT": [{"MIN_COUNT": {"fort": 1}}]}]}"#,
        )
        .unwrap();
        assert!(c.evaluate(&|name| if name == "farm" { 1 } else { 0 }));
        assert!(!c.evaluate(&|_| 1));
    }

    #[test]
    fn test_serialization_round_trip() {
        let original = r#"{"OR":["steppe",{"AND":["forest",{"NOT":["swamp"]}]}]}"#;
        let parsed: TextCriteria = serde_json::from_str(original).unwrap();
        let back = serde_json::to_string(&parsed).unwrap();
        assert_eq!(back, original);

        let c = CountCriteria::Implies("smelter".into(), "mine".into());
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"IMPLIES":["smelter","mine"]}"#);
        assert_eq!(serde_json::from_str::<CountCriteria>(&json).unwrap(), c);
    }

    #[test]
    fn test_display_formatting() {
        let c = text(r#"{"AND": ["forest", {"NOT": ["swamp"]}]}"#);
        assert_eq!(c.to_string(), "forest and (not swamp)");
        let n: NumberCriteria = serde_json::from_str(r#"{"BETWEEN": [10, 20]}"#).unwrap();
        assert_eq!(n.to_string(), "between 10 and 20");
        let k: CountCriteria = serde_json::from_str(r#"{"MIN_COUNT": {"mine": 2}}"#).unwrap();
        assert_eq!(k.to_string(), "at least 2 x mine");
    }
}
