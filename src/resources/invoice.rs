//! Invoice operations.
//!
//! Invoices support the full document lifecycle: drafts are created and
//! updated, then finalized with `bookkeep`, after which only `cancel` and
//! `credit` apply. Sending goes through the vendor's email endpoint.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::clients::{FortnoxClient, HttpMethod};
use crate::resources::{
    collect_fields, get_many, object_param, require_str, take_record, FieldKind, FieldSpec,
    OperationError, OperationOutput, Resource,
};

/// Fields accepted on invoice create and update.
const INVOICE_COMMON_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Comments", FieldKind::Text),
    FieldSpec::new("Currency", FieldKind::Text),
    FieldSpec::new("DueDate", FieldKind::Text),
    FieldSpec::new("Freight", FieldKind::Number),
    FieldSpec::new("InvoiceDate", FieldKind::Text),
    FieldSpec::new(
        "InvoiceType",
        FieldKind::Choice(&["CASH", "CREDIT", "INVOICE"]),
    ),
    FieldSpec::new("Language", FieldKind::Choice(&["EN", "SV"])),
    FieldSpec::new("OurReference", FieldKind::Text),
    FieldSpec::new("TermsOfPayment", FieldKind::Text),
    FieldSpec::new("VATIncluded", FieldKind::Bool),
    FieldSpec::new("YourOrderNumber", FieldKind::Text),
    FieldSpec::new("YourReference", FieldKind::Text),
];

/// Fields accepted on update only.
const INVOICE_UPDATE_ONLY_FIELDS: &[FieldSpec] =
    &[FieldSpec::new("CustomerNumber", FieldKind::Text)];

/// List filters for `getMany`.
const INVOICE_FILTERS: &[FieldSpec] = &[
    FieldSpec::new(
        "filter",
        FieldKind::Choice(&["cancelled", "fullypaid", "unbooked", "unpaid", "unpaidoverdue"]),
    ),
    FieldSpec::new("fromdate", FieldKind::Text),
    FieldSpec::new(
        "sortby",
        FieldKind::Choice(&["CustomerName", "CustomerNumber", "DocumentNumber", "OCR", "Total"]),
    ),
    FieldSpec::new("sortorder", FieldKind::Choice(&["ascending", "descending"])),
    FieldSpec::new("todate", FieldKind::Text),
];

/// Operations supported for invoices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvoiceOperation {
    /// Finalize an invoice in accounting.
    Bookkeep,
    /// Cancel an invoice.
    Cancel,
    /// Create a new invoice.
    Create,
    /// Create a credit note for an invoice.
    Credit,
    /// Retrieve an invoice by document number.
    Get,
    /// List invoices with optional filters.
    GetMany,
    /// Send an invoice via email.
    Send,
    /// Update a draft (unbooked) invoice.
    Update,
}

impl FromStr for InvoiceOperation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bookkeep" => Ok(Self::Bookkeep),
            "cancel" => Ok(Self::Cancel),
            "create" => Ok(Self::Create),
            "credit" => Ok(Self::Credit),
            "get" => Ok(Self::Get),
            "getMany" => Ok(Self::GetMany),
            "send" => Ok(Self::Send),
            "update" => Ok(Self::Update),
            other => Err(OperationError::UnknownOperation {
                resource: Resource::Invoice,
                operation: other.to_string(),
            }),
        }
    }
}

pub(crate) async fn handle(
    client: &FortnoxClient,
    operation: InvoiceOperation,
    params: &Map<String, Value>,
) -> Result<OperationOutput, OperationError> {
    match operation {
        InvoiceOperation::Create => {
            let customer_number = require_str(params, "customerNumber")?;

            let mut invoice = Map::new();
            invoice.insert(
                "CustomerNumber".to_string(),
                Value::String(customer_number.to_string()),
            );

            if let Some(rows) = params.get("invoiceRows").and_then(|v| v.get("row")) {
                invoice.insert("InvoiceRows".to_string(), rows.clone());
            }

            let additional = object_param(params, "additionalFields");
            for (key, value) in collect_fields(INVOICE_COMMON_FIELDS, &additional)? {
                invoice.insert(key, value);
            }

            let body = Value::Object(Map::from_iter([(
                "Invoice".to_string(),
                Value::Object(invoice),
            )]));
            let response = client
                .execute(HttpMethod::Post, "/3/invoices", Some(body), BTreeMap::new())
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Invoice")))
        }

        InvoiceOperation::Get => {
            let document_number = require_str(params, "documentNumber")?;
            let response = client
                .execute(
                    HttpMethod::Get,
                    &format!("/3/invoices/{document_number}"),
                    None,
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Invoice")))
        }

        InvoiceOperation::GetMany => {
            get_many(client, "/3/invoices", "Invoices", INVOICE_FILTERS, params).await
        }

        InvoiceOperation::Update => {
            let document_number = require_str(params, "documentNumber")?;
            let update_fields = object_param(params, "updateFields");

            let mut invoice = Map::new();

            // Row collections ride along as a nested fixedCollection; lift
            // the row array out before the generic field copy.
            if let Some(rows) = update_fields.get("InvoiceRows").and_then(|v| v.get("row")) {
                invoice.insert("InvoiceRows".to_string(), rows.clone());
            }

            for (key, value) in collect_fields(INVOICE_UPDATE_ONLY_FIELDS, &update_fields)? {
                invoice.insert(key, value);
            }
            for (key, value) in collect_fields(INVOICE_COMMON_FIELDS, &update_fields)? {
                invoice.insert(key, value);
            }

            let body = Value::Object(Map::from_iter([(
                "Invoice".to_string(),
                Value::Object(invoice),
            )]));
            let response = client
                .execute(
                    HttpMethod::Put,
                    &format!("/3/invoices/{document_number}"),
                    Some(body),
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Invoice")))
        }

        InvoiceOperation::Bookkeep => action(client, params, "bookkeep").await,
        InvoiceOperation::Cancel => action(client, params, "cancel").await,
        InvoiceOperation::Credit => action(client, params, "credit").await,

        InvoiceOperation::Send => {
            let document_number = require_str(params, "documentNumber")?;
            // The Fortnox email endpoint uses GET, not POST
            let response = client
                .execute(
                    HttpMethod::Get,
                    &format!("/3/invoices/{document_number}/email"),
                    None,
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Invoice")))
        }
    }
}

/// Runs a document action (`bookkeep`, `cancel`, `credit`).
///
/// These endpoints use PUT with no request body.
async fn action(
    client: &FortnoxClient,
    params: &Map<String, Value>,
    action: &str,
) -> Result<OperationOutput, OperationError> {
    let document_number = require_str(params, "documentNumber")?;
    let response = client
        .execute(
            HttpMethod::Put,
            &format!("/3/invoices/{document_number}/{action}"),
            None,
            BTreeMap::new(),
        )
        .await?;
    Ok(OperationOutput::Record(take_record(response, "Invoice")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_parse() {
        assert_eq!(
            "bookkeep".parse::<InvoiceOperation>().unwrap(),
            InvoiceOperation::Bookkeep
        );
        assert_eq!(
            "getMany".parse::<InvoiceOperation>().unwrap(),
            InvoiceOperation::GetMany
        );
        assert!(matches!(
            "delete".parse::<InvoiceOperation>(),
            Err(OperationError::UnknownOperation {
                resource: Resource::Invoice,
                ..
            })
        ));
    }

    #[test]
    fn test_filter_table_accepts_documented_statuses() {
        let filter = INVOICE_FILTERS
            .iter()
            .find(|spec| spec.name == "filter")
            .unwrap();
        for status in ["cancelled", "fullypaid", "unbooked", "unpaid", "unpaidoverdue"] {
            assert!(filter.kind.accepts(&Value::String(status.to_string())));
        }
        assert!(!filter.kind.accepts(&Value::String("paid".to_string())));
    }
}
