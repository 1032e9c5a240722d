//! Order operations.
//!
//! Orders follow the same draft/update shape as invoices, with one special
//! action: `createinvoice` turns an order into an invoice, and its response
//! envelope key is `Invoice`, not `Order`.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::clients::{FortnoxClient, HttpMethod};
use crate::resources::{
    collect_fields, get_many, object_param, require_str, take_record, FieldKind, FieldSpec,
    OperationError, OperationOutput, Resource,
};

/// Fields accepted on order create and update.
const ORDER_COMMON_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Address1", FieldKind::Text),
    FieldSpec::new("Address2", FieldKind::Text),
    FieldSpec::new("AdministrationFee", FieldKind::Number),
    FieldSpec::new("City", FieldKind::Text),
    FieldSpec::new("Comments", FieldKind::Text),
    FieldSpec::new("CopyRemarks", FieldKind::Bool),
    FieldSpec::new("CostCenter", FieldKind::Text),
    FieldSpec::new("Country", FieldKind::Text),
    FieldSpec::new("Currency", FieldKind::Text),
    FieldSpec::new("CurrencyRate", FieldKind::Number),
    FieldSpec::new("CurrencyUnit", FieldKind::Number),
    FieldSpec::new("CustomerName", FieldKind::Text),
    FieldSpec::new("DeliveryAddress1", FieldKind::Text),
    FieldSpec::new("DeliveryAddress2", FieldKind::Text),
    FieldSpec::new("DeliveryCity", FieldKind::Text),
    FieldSpec::new("DeliveryCountry", FieldKind::Text),
    FieldSpec::new("DeliveryDate", FieldKind::Text),
    FieldSpec::new("DeliveryName", FieldKind::Text),
    FieldSpec::new("DeliveryZipCode", FieldKind::Text),
    FieldSpec::new("ExternalInvoiceReference1", FieldKind::Text),
    FieldSpec::new("ExternalInvoiceReference2", FieldKind::Text),
    FieldSpec::new("Freight", FieldKind::Number),
    FieldSpec::new("Language", FieldKind::Choice(&["EN", "SV"])),
    FieldSpec::new("NotCompleted", FieldKind::Bool),
    FieldSpec::new("OrderDate", FieldKind::Text),
    FieldSpec::new("OurReference", FieldKind::Text),
    FieldSpec::new("Phone1", FieldKind::Text),
    FieldSpec::new("Phone2", FieldKind::Text),
    FieldSpec::new("PriceList", FieldKind::Text),
    FieldSpec::new("PrintTemplate", FieldKind::Text),
    FieldSpec::new("Project", FieldKind::Text),
    FieldSpec::new("Remarks", FieldKind::Text),
    FieldSpec::new("TermsOfDelivery", FieldKind::Text),
    FieldSpec::new("TermsOfPayment", FieldKind::Text),
    FieldSpec::new("VATIncluded", FieldKind::Bool),
    FieldSpec::new("WayOfDelivery", FieldKind::Text),
    FieldSpec::new("YourOrderNumber", FieldKind::Text),
    FieldSpec::new("YourReference", FieldKind::Text),
    FieldSpec::new("ZipCode", FieldKind::Text),
];

/// List filters for `getMany`.
const ORDER_FILTERS: &[FieldSpec] = &[
    FieldSpec::new(
        "filter",
        FieldKind::Choice(&["cancelled", "expired", "invoicecreated", "invoicenotcreated"]),
    ),
    FieldSpec::new("fromdate", FieldKind::Text),
    FieldSpec::new("lastmodified", FieldKind::Text),
    FieldSpec::new(
        "sortby",
        FieldKind::Choice(&["customername", "customernumber", "documentnumber", "orderdate"]),
    ),
    FieldSpec::new("sortorder", FieldKind::Choice(&["ascending", "descending"])),
    FieldSpec::new("todate", FieldKind::Text),
];

/// Operations supported for orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderOperation {
    /// Cancel an order.
    Cancel,
    /// Create a new order.
    Create,
    /// Create an invoice from an order.
    CreateInvoice,
    /// Retrieve an order by document number.
    Get,
    /// List orders with optional filters.
    GetMany,
    /// Update an order.
    Update,
}

impl FromStr for OrderOperation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cancel" => Ok(Self::Cancel),
            "create" => Ok(Self::Create),
            "createInvoice" => Ok(Self::CreateInvoice),
            "get" => Ok(Self::Get),
            "getMany" => Ok(Self::GetMany),
            "update" => Ok(Self::Update),
            other => Err(OperationError::UnknownOperation {
                resource: Resource::Order,
                operation: other.to_string(),
            }),
        }
    }
}

pub(crate) async fn handle(
    client: &FortnoxClient,
    operation: OrderOperation,
    params: &Map<String, Value>,
) -> Result<OperationOutput, OperationError> {
    match operation {
        OrderOperation::Create => {
            let customer_number = require_str(params, "customerNumber")?;

            let mut order = Map::new();
            order.insert(
                "CustomerNumber".to_string(),
                Value::String(customer_number.to_string()),
            );

            if let Some(rows) = params.get("orderRows").and_then(|v| v.get("row")) {
                order.insert("OrderRows".to_string(), rows.clone());
            }

            let additional = object_param(params, "additionalFields");
            for (key, value) in collect_fields(ORDER_COMMON_FIELDS, &additional)? {
                order.insert(key, value);
            }

            let body =
                Value::Object(Map::from_iter([("Order".to_string(), Value::Object(order))]));
            let response = client
                .execute(HttpMethod::Post, "/3/orders", Some(body), BTreeMap::new())
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Order")))
        }

        OrderOperation::Get => {
            let document_number = require_str(params, "documentNumber")?;
            let response = client
                .execute(
                    HttpMethod::Get,
                    &format!("/3/orders/{document_number}"),
                    None,
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Order")))
        }

        OrderOperation::GetMany => {
            get_many(client, "/3/orders", "Orders", ORDER_FILTERS, params).await
        }

        OrderOperation::Update => {
            let document_number = require_str(params, "documentNumber")?;
            let update_fields = object_param(params, "updateFields");

            let mut order = Map::new();

            if let Some(rows) = update_fields.get("OrderRows").and_then(|v| v.get("row")) {
                order.insert("OrderRows".to_string(), rows.clone());
            }

            for (key, value) in collect_fields(ORDER_COMMON_FIELDS, &update_fields)? {
                order.insert(key, value);
            }

            let body =
                Value::Object(Map::from_iter([("Order".to_string(), Value::Object(order))]));
            let response = client
                .execute(
                    HttpMethod::Put,
                    &format!("/3/orders/{document_number}"),
                    Some(body),
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Order")))
        }

        OrderOperation::Cancel => {
            let document_number = require_str(params, "documentNumber")?;
            let response = client
                .execute(
                    HttpMethod::Put,
                    &format!("/3/orders/{document_number}/cancel"),
                    None,
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Order")))
        }

        OrderOperation::CreateInvoice => {
            let document_number = require_str(params, "documentNumber")?;
            // createinvoice returns { Invoice: {...} }, NOT { Order: {...} }
            let response = client
                .execute(
                    HttpMethod::Put,
                    &format!("/3/orders/{document_number}/createinvoice"),
                    None,
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Invoice")))
        }
    }
}
