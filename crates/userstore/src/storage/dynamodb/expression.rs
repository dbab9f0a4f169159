//! Expression construction.
//!
//! Builds the `SET` clause, attribute name placeholders and value placeholders
//! for an `UpdateItem` call from a [`UserUpdate`], and the key condition and
//! projection for the email index query.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use userstore_core::user::{UserField, UserUpdate};

use super::conversions::ID_ATTRIBUTE;

/// A ready-to-send update expression with its placeholder maps.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// `SET #a = :a, #b = :b` in field declaration order.
    pub expression: String,
    /// `#name` -> attribute name.
    pub names: HashMap<String, String>,
    /// `:name` -> attribute value.
    pub values: HashMap<String, AttributeValue>,
}

impl UpdateExpression {
    /// Builds the expression for every present field of `update`.
    ///
    /// Returns `None` when `update` is empty, since `SET` with no clauses is
    /// rejected by DynamoDB.
    pub fn from_update(update: &UserUpdate) -> Option<Self> {
        let fields = update.fields();
        if fields.is_empty() {
            return None;
        }

        let mut clauses = Vec::with_capacity(fields.len());
        let mut names = HashMap::with_capacity(fields.len());
        let mut values = HashMap::with_capacity(fields.len());

        for (field, value) in fields {
            let attribute = field.attribute_name();
            let name = format!("#{attribute}");
            let placeholder = format!(":{attribute}");

            clauses.push(format!("{name} = {placeholder}"));
            names.insert(name, attribute.to_string());
            values.insert(placeholder, AttributeValue::S(value.to_string()));
        }

        Some(Self {
            expression: format!("SET {}", clauses.join(", ")),
            names,
            values,
        })
    }
}

/// Key condition and projection for looking a user up by email.
///
/// The projection names the profile attributes explicitly, so the password is
/// never read even when the index projects every attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailQuery {
    pub key_condition: &'static str,
    pub projection: &'static str,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

impl EmailQuery {
    pub fn new(email: &str) -> Self {
        let names = HashMap::from([
            ("#id".to_string(), ID_ATTRIBUTE.to_string()),
            (
                "#email".to_string(),
                UserField::Email.attribute_name().to_string(),
            ),
            (
                "#username".to_string(),
                UserField::Username.attribute_name().to_string(),
            ),
        ]);
        let values = HashMap::from([(":email".to_string(), AttributeValue::S(email.to_string()))]);

        Self {
            key_condition: "#email = :email",
            projection: "#id, #email, #username",
            names,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_fields_produce_two_clauses() {
        let update = UserUpdate::new().with_username("x").with_email("y");

        let expr = UpdateExpression::from_update(&update).unwrap();

        assert_eq!(expr.expression, "SET #username = :username, #email = :email");
        assert_eq!(expr.names.len(), 2);
        assert_eq!(expr.names.get("#username").map(String::as_str), Some("username"));
        assert_eq!(expr.names.get("#email").map(String::as_str), Some("email"));
        assert_eq!(
            expr.values.get(":username"),
            Some(&AttributeValue::S("x".to_string()))
        );
        assert_eq!(
            expr.values.get(":email"),
            Some(&AttributeValue::S("y".to_string()))
        );
        assert!(!expr.names.contains_key("#password"));
    }

    #[test]
    fn test_full_update_orders_by_field() {
        let update = UserUpdate::new()
            .with_password("p")
            .with_email("e")
            .with_username("u");

        let expr = UpdateExpression::from_update(&update).unwrap();

        assert_eq!(
            expr.expression,
            "SET #username = :username, #email = :email, #password = :password"
        );
        assert_eq!(expr.values.len(), 3);
    }

    #[test]
    fn test_empty_update_has_no_expression() {
        assert!(UpdateExpression::from_update(&UserUpdate::new()).is_none());
    }

    #[test]
    fn test_empty_string_value_is_still_written() {
        let update = UserUpdate::new().with_password("");

        let expr = UpdateExpression::from_update(&update).unwrap();

        assert_eq!(expr.expression, "SET #password = :password");
        assert_eq!(
            expr.values.get(":password"),
            Some(&AttributeValue::S(String::new()))
        );
    }

    #[test]
    fn test_email_query_projects_profile_only() {
        let query = EmailQuery::new("ann@example.com");

        assert_eq!(query.key_condition, "#email = :email");
        assert_eq!(query.projection, "#id, #email, #username");
        assert_eq!(query.names.get("#id").map(String::as_str), Some("id"));
        assert_eq!(
            query.names.get("#username").map(String::as_str),
            Some("username")
        );
        assert!(!query.names.values().any(|name| name == "password"));
        assert_eq!(
            query.values.get(":email"),
            Some(&AttributeValue::S("ann@example.com".to_string()))
        );
    }

    #[test]
    fn test_email_query_placeholders_are_all_mapped() {
        let query = EmailQuery::new("x@y.z");

        for placeholder in query
            .projection
            .split(", ")
            .chain(query.key_condition.split(' ').filter(|t| t.starts_with('#')))
        {
            assert!(query.names.contains_key(placeholder), "{placeholder}");
        }
    }
}
