//! Resource operations exposed by the Fortnox API SDK.
//!
//! Each supported resource (article, customer, invoice, order) has a closed
//! operation enum and a handler module. Dispatch happens over typed
//! (resource, operation) pairs resolved by [`Operation::parse`] and matched
//! in [`handle`] — there is no string-keyed branching past the parse step.
//!
//! Handlers receive named parameters as a JSON object (the shape the
//! embedding host collects from its UI) and return an [`OperationOutput`]:
//! a single record, an array of records, or a delete acknowledgement.

pub mod article;
pub mod customer;
pub mod invoice;
pub mod order;
mod schema;

pub use schema::{
    collect_fields, collect_query, object_param, optional_bool, page_limit, require_str,
    FieldKind, FieldSpec,
};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::clients::{FortnoxClient, HttpMethod, RequestError};

pub use article::ArticleOperation;
pub use customer::CustomerOperation;
pub use invoice::InvoiceOperation;
pub use order::OrderOperation;

/// The resources this SDK exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Article register entries.
    Article,
    /// Customer register entries.
    Customer,
    /// Invoices.
    Invoice,
    /// Orders.
    Order,
}

impl Resource {
    /// Returns the resource name as the host spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Customer => "customer",
            Self::Invoice => "invoice",
            Self::Order => "order",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(Self::Article),
            "customer" => Ok(Self::Customer),
            "invoice" => Ok(Self::Invoice),
            "order" => Ok(Self::Order),
            other => Err(OperationError::UnknownResource {
                resource: other.to_string(),
            }),
        }
    }
}

/// A fully resolved (resource, operation) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// An article operation.
    Article(ArticleOperation),
    /// A customer operation.
    Customer(CustomerOperation),
    /// An invoice operation.
    Invoice(InvoiceOperation),
    /// An order operation.
    Order(OrderOperation),
}

impl Operation {
    /// Resolves host-supplied resource and operation names.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::UnknownResource`] or
    /// [`OperationError::UnknownOperation`] when either name is not part of
    /// the supported surface.
    pub fn parse(resource: &str, operation: &str) -> Result<Self, OperationError> {
        let resource: Resource = resource.parse()?;
        match resource {
            Resource::Article => operation.parse().map(Self::Article),
            Resource::Customer => operation.parse().map(Self::Customer),
            Resource::Invoice => operation.parse().map(Self::Invoice),
            Resource::Order => operation.parse().map(Self::Order),
        }
    }

    /// Returns the resource this operation acts on.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        match self {
            Self::Article(_) => Resource::Article,
            Self::Customer(_) => Resource::Customer,
            Self::Invoice(_) => Resource::Invoice,
            Self::Order(_) => Resource::Order,
        }
    }
}

/// The host-facing result of one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationOutput {
    /// A single record.
    Record(Value),
    /// An array of records.
    Records(Vec<Value>),
    /// A delete acknowledgement.
    Deleted,
}

impl OperationOutput {
    /// Converts the output into the JSON value handed back to the host.
    ///
    /// Delete-style operations surface as `{"success": true}`.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Record(value) => value,
            Self::Records(values) => Value::Array(values),
            Self::Deleted => serde_json::json!({ "success": true }),
        }
    }
}

/// Errors produced while resolving or executing an operation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The resource name is not part of the supported surface.
    #[error("Unknown resource '{resource}'.")]
    UnknownResource {
        /// The unrecognized resource name.
        resource: String,
    },

    /// The operation name is not supported for the resource.
    #[error("Operation '{operation}' is not supported for resource '{resource}'.")]
    UnknownOperation {
        /// The resource the operation was requested for.
        resource: Resource,
        /// The unrecognized operation name.
        operation: String,
    },

    /// A required parameter is absent or empty.
    #[error("Missing required parameter '{name}'.")]
    MissingParameter {
        /// The parameter name.
        name: &'static str,
    },

    /// A parameter value does not match its declared field kind.
    #[error("Invalid value for parameter '{name}': expected {expected}.")]
    InvalidParameter {
        /// The parameter name.
        name: &'static str,
        /// What the field kind accepts.
        expected: &'static str,
    },

    /// The underlying API call failed.
    #[error(transparent)]
    Request(#[from] RequestError),
}

// Verify OperationError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OperationError>();
};

/// Executes one resolved operation against the API.
///
/// # Errors
///
/// Propagates parameter validation failures and translated API errors from
/// the resource handler.
pub async fn handle(
    client: &FortnoxClient,
    operation: Operation,
    params: &Map<String, Value>,
) -> Result<OperationOutput, OperationError> {
    match operation {
        Operation::Article(op) => article::handle(client, op, params).await,
        Operation::Customer(op) => customer::handle(client, op, params).await,
        Operation::Invoice(op) => invoice::handle(client, op, params).await,
        Operation::Order(op) => order::handle(client, op, params).await,
    }
}

/// Takes the record nested under `key`, or JSON null when absent.
pub(crate) fn take_record(mut body: Value, key: &str) -> Value {
    body.get_mut(key).map_or(Value::Null, Value::take)
}

/// Shared `getMany` handling: filters, the return-all toggle, and the
/// single-page limit all behave identically across resources.
pub(crate) async fn get_many(
    client: &FortnoxClient,
    path: &str,
    resource_key: &str,
    filter_table: &[FieldSpec],
    params: &Map<String, Value>,
) -> Result<OperationOutput, OperationError> {
    let filters = object_param(params, "filters");
    let query = collect_query(filter_table, &filters)?;

    if optional_bool(params, "returnAll") {
        let records = client
            .fetch_all(HttpMethod::Get, path, resource_key, None, query)
            .await?;
        return Ok(OperationOutput::Records(records));
    }

    let limit = page_limit(params)?;
    let mut query: BTreeMap<String, String> = query;
    query.insert("limit".to_string(), limit.to_string());

    let body = client.execute(HttpMethod::Get, path, None, query).await?;
    let records = body
        .get(resource_key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    Ok(OperationOutput::Records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_parse_round_trip() {
        for resource in [
            Resource::Article,
            Resource::Customer,
            Resource::Invoice,
            Resource::Order,
        ] {
            let parsed: Resource = resource.as_str().parse().unwrap();
            assert_eq!(parsed, resource);
        }
    }

    #[test]
    fn test_unknown_resource_is_rejected() {
        let result: Result<Resource, _> = "supplier".parse();
        assert!(matches!(
            result,
            Err(OperationError::UnknownResource { resource }) if resource == "supplier"
        ));
    }

    #[test]
    fn test_operation_parse_resolves_pairs() {
        let op = Operation::parse("invoice", "bookkeep").unwrap();
        assert_eq!(op, Operation::Invoice(InvoiceOperation::Bookkeep));
        assert_eq!(op.resource(), Resource::Invoice);

        let op = Operation::parse("order", "createInvoice").unwrap();
        assert_eq!(op, Operation::Order(OrderOperation::CreateInvoice));
    }

    #[test]
    fn test_operation_parse_rejects_cross_resource_operations() {
        // bookkeep exists for invoices, not articles
        let result = Operation::parse("article", "bookkeep");
        assert!(matches!(
            result,
            Err(OperationError::UnknownOperation {
                resource: Resource::Article,
                ..
            })
        ));
    }

    #[test]
    fn test_output_into_value() {
        assert_eq!(
            OperationOutput::Record(json!({"a": 1})).into_value(),
            json!({"a": 1})
        );
        assert_eq!(
            OperationOutput::Records(vec![json!(1), json!(2)]).into_value(),
            json!([1, 2])
        );
        assert_eq!(
            OperationOutput::Deleted.into_value(),
            json!({"success": true})
        );
    }

    #[test]
    fn test_take_record() {
        let body = json!({"Invoice": {"DocumentNumber": "9"}});
        assert_eq!(
            take_record(body, "Invoice"),
            json!({"DocumentNumber": "9"})
        );
        assert_eq!(take_record(json!({}), "Invoice"), Value::Null);
    }
}
