//! Cypher statement builders.
//!
//! Builders are pure: they turn an entity into query text plus bound
//! parameters and never touch the network. Property names only ever come
//! from [`Entity::FIELDS`]; anything else is rejected with
//! [`GraphError::UnknownField`].

use neo4rs::{query, Query};
use usergraph_core::NodeId;

use crate::client::GraphError;
use crate::entity::{Entity, PropertyValue};

/// Parameter name carrying the internal node identity.
pub const ID_PARAM: &str = "id";

/// Query text with its parameters, ready to be turned into a neo4rs [`Query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub text: String,
    pub params: Vec<(&'static str, PropertyValue)>,
}

impl Statement {
    fn new(text: String) -> Self {
        Self {
            text,
            params: Vec::new(),
        }
    }

    fn with_id(mut self, id: NodeId) -> Self {
        self.params.push((ID_PARAM, PropertyValue::Integer(id.0)));
        self
    }

    pub fn into_query(self) -> Query {
        self.params
            .into_iter()
            .fold(query(&self.text), |q, (name, value)| q.param(name, value))
    }
}

/// Present properties of `entity`, checked against its declared schema.
fn declared_properties<E: Entity>(
    entity: &E,
) -> Result<Vec<(&'static str, PropertyValue)>, GraphError> {
    let props = entity.properties();
    if let Some((name, _)) = props.iter().find(|(name, _)| E::field(name).is_none()) {
        return Err(GraphError::UnknownField {
            label: E::LABEL,
            field: (*name).to_string(),
        });
    }
    Ok(props)
}

/// `CREATE (n:Label {a: $a, b: $b}) RETURN n`
pub fn create<E: Entity>(entity: &E) -> Result<Statement, GraphError> {
    let props = declared_properties(entity)?;
    let text = if props.is_empty() {
        format!("CREATE (n:{}) RETURN n", E::LABEL)
    } else {
        let clause = props
            .iter()
            .map(|(name, _)| format!("{name}: ${name}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE (n:{} {{{clause}}}) RETURN n", E::LABEL)
    };
    Ok(Statement { text, params: props })
}

/// `MATCH (n:Label) WHERE id(n) = $id RETURN n`
pub fn get<E: Entity>(id: NodeId) -> Statement {
    Statement::new(format!(
        "MATCH (n:{}) WHERE id(n) = ${ID_PARAM} RETURN n",
        E::LABEL
    ))
    .with_id(id)
}

/// `MATCH (n:Label) RETURN n ORDER BY id(n)`
pub fn get_all<E: Entity>() -> Statement {
    Statement::new(format!("MATCH (n:{}) RETURN n ORDER BY id(n)", E::LABEL))
}

/// Match by id, one `SET` line per present property, then return the node.
pub fn update<E: Entity>(id: NodeId, entity: &E) -> Result<Statement, GraphError> {
    let props = declared_properties(entity)?;
    let mut text = format!("MATCH (n:{}) WHERE id(n) = ${ID_PARAM}\n", E::LABEL);
    for (name, _) in &props {
        text.push_str(&format!("SET n.{name} = ${name}\n"));
    }
    text.push_str("RETURN n");
    Ok(Statement { text, params: props }.with_id(id))
}

/// Delete the node by id, returning how many nodes were removed.
pub fn delete<E: Entity>(id: NodeId) -> Statement {
    Statement::new(format!(
        "MATCH (n:{}) WHERE id(n) = ${ID_PARAM} DELETE n RETURN count(*) AS deleted",
        E::LABEL
    ))
    .with_id(id)
}

#[cfg(test)]
mod tests {
    use usergraph_core::{Gender, UserProps};

    use super::*;
    use crate::entity::{Field, PropertyMap};

    fn param<'a>(stmt: &'a Statement, name: &str) -> Option<&'a PropertyValue> {
        stmt.params.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    #[test]
    fn create_lists_present_fields() {
        let props = UserProps {
            username: Some("ada".to_string()),
            gender: Some(Gender::Female),
            ..Default::default()
        };
        let stmt = create(&props).unwrap();
        assert_eq!(
            stmt.text,
            "CREATE (n:User {username: $username, gender: $gender}) RETURN n"
        );
        assert_eq!(
            param(&stmt, "username"),
            Some(&PropertyValue::Text("ada".to_string()))
        );
        assert_eq!(param(&stmt, "gender"), Some(&PropertyValue::Integer(1)));
        assert_eq!(stmt.params.len(), 2);
    }

    #[test]
    fn create_without_fields_omits_property_clause() {
        let stmt = create(&UserProps::default()).unwrap();
        assert_eq!(stmt.text, "CREATE (n:User) RETURN n");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn get_matches_internal_id() {
        let stmt = get::<UserProps>(NodeId(7));
        assert_eq!(stmt.text, "MATCH (n:User) WHERE id(n) = $id RETURN n");
        assert_eq!(stmt.params, vec![("id", PropertyValue::Integer(7))]);
    }

    #[test]
    fn get_all_has_no_params() {
        let stmt = get_all::<UserProps>();
        assert_eq!(stmt.text, "MATCH (n:User) RETURN n ORDER BY id(n)");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn update_emits_one_set_per_field() {
        let props = UserProps {
            email: Some("new@x.io".to_string()),
            last_name: Some("Byron".to_string()),
            ..Default::default()
        };
        let stmt = update(NodeId(3), &props).unwrap();
        assert_eq!(
            stmt.text,
            "MATCH (n:User) WHERE id(n) = $id\n\
             SET n.email = $email\n\
             SET n.lastName = $lastName\n\
             RETURN n"
        );
        assert_eq!(param(&stmt, "id"), Some(&PropertyValue::Integer(3)));
        assert_eq!(stmt.params.len(), 3);
    }

    #[test]
    fn delete_counts_removed_nodes() {
        let stmt = delete::<UserProps>(NodeId(11));
        assert_eq!(
            stmt.text,
            "MATCH (n:User) WHERE id(n) = $id DELETE n RETURN count(*) AS deleted"
        );
        assert_eq!(stmt.params, vec![("id", PropertyValue::Integer(11))]);
    }

    /// Entity whose `properties` leaks a name outside its declared fields.
    struct Leaky;

    impl Entity for Leaky {
        const LABEL: &'static str = "Leaky";
        const FIELDS: &'static [Field] = &[Field::text("name")];

        fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
            vec![
                ("name", PropertyValue::Text("x".to_string())),
                ("admin", PropertyValue::Integer(1)),
            ]
        }

        fn from_properties(_: &PropertyMap) -> Result<Self, GraphError> {
            Ok(Self)
        }
    }

    #[test]
    fn undeclared_fields_are_rejected() {
        let err = create(&Leaky).unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnknownField { label: "Leaky", ref field } if field == "admin"
        ));
        assert!(update(NodeId(1), &Leaky).is_err());
    }
}
