//! Entity-to-node mapping.
//!
//! An [`Entity`] declares its node label and the closed set of properties it
//! may carry. Query builders and row decoders only ever iterate that set.

use std::collections::BTreeMap;

use neo4rs::BoltType;
use usergraph_core::{Gender, NodeId, UserProps};

use crate::client::GraphError;

/// Storage type of a declared property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

/// One declared node property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
        }
    }
}

/// A property value as written to or read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
}

impl From<PropertyValue> for BoltType {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Text(s) => s.into(),
            PropertyValue::Integer(i) => i.into(),
        }
    }
}

/// Properties present on a node, keyed by declared field name.
pub type PropertyMap = BTreeMap<&'static str, PropertyValue>;

/// A type stored as a labelled node with a closed property schema.
pub trait Entity: Sized + Send + Sync + 'static {
    /// Node label, e.g. `User`.
    const LABEL: &'static str;

    /// Every property the entity may carry.
    const FIELDS: &'static [Field];

    /// Present (non-empty) properties, in declaration order.
    fn properties(&self) -> Vec<(&'static str, PropertyValue)>;

    /// Rebuild the entity from stored properties. Missing keys are `None`.
    fn from_properties(props: &PropertyMap) -> Result<Self, GraphError>;

    /// Look up a declared field by name.
    fn field(name: &str) -> Option<&'static Field> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }
}

/// An entity paired with the identity of the node it lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<E> {
    pub id: NodeId,
    pub entity: E,
}

impl<E> Record<E> {
    pub fn new(id: NodeId, entity: E) -> Self {
        Self { id, entity }
    }
}

/// Decode a neo4rs node into a typed record.
pub(crate) fn record_from_node<E: Entity>(node: &neo4rs::Node) -> Result<Record<E>, GraphError> {
    let keys = node.keys();
    let mut props = PropertyMap::new();
    for field in E::FIELDS {
        if !keys.contains(&field.name) {
            continue;
        }
        props.insert(field.name, decode_property::<E>(node, field)?);
    }
    Ok(Record::new(NodeId(node.id()), E::from_properties(&props)?))
}

/// Read one present property as its declared kind.
///
/// Integers written by drivers that only have a double type arrive as
/// Float; those are accepted when they hold a whole number.
fn decode_property<E: Entity>(
    node: &neo4rs::Node,
    field: &Field,
) -> Result<PropertyValue, GraphError> {
    let mismatch = || {
        GraphError::Deserialization(format!(
            "{}.{} is not a {:?} value",
            E::LABEL,
            field.name,
            field.kind
        ))
    };
    match field.kind {
        FieldKind::Text => node
            .get::<String>(field.name)
            .map(PropertyValue::Text)
            .map_err(|_| mismatch()),
        FieldKind::Integer => {
            if let Ok(i) = node.get::<i64>(field.name) {
                return Ok(PropertyValue::Integer(i));
            }
            match node.get::<f64>(field.name) {
                Ok(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(PropertyValue::Integer(f as i64))
                }
                _ => Err(mismatch()),
            }
        }
    }
}

// ── User ─────────────────────────────────────────────────────────

const USER_FIELDS: &[Field] = &[
    Field::text("username"),
    Field::text("email"),
    Field::text("firstName"),
    Field::text("lastName"),
    Field::integer("gender"),
];

impl Entity for UserProps {
    const LABEL: &'static str = "User";
    const FIELDS: &'static [Field] = USER_FIELDS;

    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        let texts = [
            ("username", &self.username),
            ("email", &self.email),
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
        ];
        let mut out: Vec<_> = texts
            .into_iter()
            .filter_map(|(name, v)| v.clone().map(|s| (name, PropertyValue::Text(s))))
            .collect();
        if let Some(gender) = self.gender {
            out.push(("gender", PropertyValue::Integer(gender.code())));
        }
        out
    }

    fn from_properties(props: &PropertyMap) -> Result<Self, GraphError> {
        let gender = match props.get("gender") {
            Some(PropertyValue::Integer(code)) => Some(Gender::try_from(*code)?),
            Some(other) => {
                return Err(GraphError::Deserialization(format!(
                    "User.gender must be an integer, got {other:?}"
                )))
            }
            None => None,
        };
        Ok(Self {
            username: text(props, "username"),
            email: text(props, "email"),
            first_name: text(props, "firstName"),
            last_name: text(props, "lastName"),
            gender,
        })
    }
}

fn text(props: &PropertyMap, name: &str) -> Option<String> {
    match props.get(name) {
        Some(PropertyValue::Text(s)) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use neo4rs::{BoltFloat, BoltInteger, BoltList, BoltMap, BoltNode, BoltString};

    use super::*;

    fn ada() -> UserProps {
        UserProps {
            username: Some("ada".to_string()),
            email: Some("a@x.io".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            gender: Some(Gender::Female),
        }
    }

    #[test]
    fn properties_follow_declaration_order() {
        let names: Vec<_> = ada().properties().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["username", "email", "firstName", "lastName", "gender"]);
    }

    #[test]
    fn properties_skip_absent_fields() {
        let props = UserProps {
            email: Some("b@x.io".to_string()),
            ..Default::default()
        };
        assert_eq!(
            props.properties(),
            vec![("email", PropertyValue::Text("b@x.io".to_string()))]
        );
        assert!(UserProps::default().properties().is_empty());
    }

    #[test]
    fn gender_is_stored_as_code() {
        let props = ada().properties();
        assert!(props.contains(&("gender", PropertyValue::Integer(1))));
    }

    #[test]
    fn from_properties_restores_entity() {
        let map: PropertyMap = ada().properties().into_iter().collect();
        assert_eq!(UserProps::from_properties(&map).unwrap(), ada());
    }

    #[test]
    fn from_properties_rejects_unknown_gender_code() {
        let mut map = PropertyMap::new();
        map.insert("gender", PropertyValue::Integer(9));
        let err = UserProps::from_properties(&map).unwrap_err();
        assert!(matches!(err, GraphError::Core(_)));
    }

    fn bolt_user(props: Vec<(&str, BoltType)>) -> neo4rs::Node {
        let mut map = BoltMap::new();
        for (key, value) in props {
            map.put(BoltString::new(key), value);
        }
        let mut labels = BoltList::new();
        labels.push(BoltType::String(BoltString::new("User")));
        neo4rs::Node::new(BoltNode::new(BoltInteger::new(5), labels, map))
    }

    fn text_value(s: &str) -> BoltType {
        BoltType::String(BoltString::new(s))
    }

    #[test]
    fn decodes_integer_gender() {
        let node = bolt_user(vec![
            ("username", text_value("ada")),
            ("gender", BoltType::Integer(BoltInteger::new(2))),
        ]);
        let record = record_from_node::<UserProps>(&node).unwrap();
        assert_eq!(record.id, NodeId(5));
        assert_eq!(record.entity.username.as_deref(), Some("ada"));
        assert_eq!(record.entity.gender, Some(Gender::Male));
    }

    #[test]
    fn decodes_whole_float_gender() {
        let node = bolt_user(vec![
            ("username", text_value("ada")),
            ("gender", BoltType::Float(BoltFloat::new(1.0))),
        ]);
        let record = record_from_node::<UserProps>(&node).unwrap();
        assert_eq!(record.entity.gender, Some(Gender::Female));
    }

    #[test]
    fn fractional_float_gender_is_an_error() {
        let node = bolt_user(vec![("gender", BoltType::Float(BoltFloat::new(1.5)))]);
        let err = record_from_node::<UserProps>(&node).unwrap_err();
        assert!(matches!(err, GraphError::Deserialization(_)));
    }

    #[test]
    fn mistyped_properties_are_errors() {
        let node = bolt_user(vec![("gender", text_value("female"))]);
        assert!(matches!(
            record_from_node::<UserProps>(&node),
            Err(GraphError::Deserialization(_))
        ));

        let node = bolt_user(vec![("email", BoltType::Integer(BoltInteger::new(3)))]);
        assert!(matches!(
            record_from_node::<UserProps>(&node),
            Err(GraphError::Deserialization(_))
        ));
    }

    #[test]
    fn absent_properties_decode_as_none() {
        let node = bolt_user(vec![("email", text_value("a@x.io"))]);
        let record = record_from_node::<UserProps>(&node).unwrap();
        assert_eq!(
            record.entity,
            UserProps {
                email: Some("a@x.io".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn every_property_is_declared() {
        for (name, _) in ada().properties() {
            assert!(UserProps::field(name).is_some(), "{name} not declared");
        }
        assert!(UserProps::field("password").is_none());
    }
}
