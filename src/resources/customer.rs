//! Customer operations.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::clients::{FortnoxClient, HttpMethod};
use crate::resources::{
    collect_fields, get_many, object_param, require_str, take_record, FieldKind, FieldSpec,
    OperationError, OperationOutput, Resource,
};

/// Fields accepted on customer create and update.
const CUSTOMER_COMMON_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Active", FieldKind::Bool),
    FieldSpec::new("Address1", FieldKind::Text),
    FieldSpec::new("Address2", FieldKind::Text),
    FieldSpec::new("City", FieldKind::Text),
    FieldSpec::new("Comments", FieldKind::Text),
    FieldSpec::new("CostCenter", FieldKind::Text),
    FieldSpec::new("CountryCode", FieldKind::Text),
    FieldSpec::new("Currency", FieldKind::Text),
    FieldSpec::new("CustomerNumber", FieldKind::Text),
    FieldSpec::new("DeliveryAddress1", FieldKind::Text),
    FieldSpec::new("DeliveryAddress2", FieldKind::Text),
    FieldSpec::new("DeliveryCity", FieldKind::Text),
    FieldSpec::new("DeliveryCountryCode", FieldKind::Text),
    FieldSpec::new("DeliveryFax", FieldKind::Text),
    FieldSpec::new("DeliveryName", FieldKind::Text),
    FieldSpec::new("DeliveryPhone1", FieldKind::Text),
    FieldSpec::new("DeliveryPhone2", FieldKind::Text),
    FieldSpec::new("DeliveryZipCode", FieldKind::Text),
    FieldSpec::new("Email", FieldKind::Text),
    FieldSpec::new("EmailInvoice", FieldKind::Text),
    FieldSpec::new("EmailInvoiceBCC", FieldKind::Text),
    FieldSpec::new("EmailInvoiceCC", FieldKind::Text),
    FieldSpec::new("EmailOffer", FieldKind::Text),
    FieldSpec::new("EmailOfferBCC", FieldKind::Text),
    FieldSpec::new("EmailOfferCC", FieldKind::Text),
    FieldSpec::new("EmailOrder", FieldKind::Text),
    FieldSpec::new("EmailOrderBCC", FieldKind::Text),
    FieldSpec::new("EmailOrderCC", FieldKind::Text),
    FieldSpec::new("Fax", FieldKind::Text),
    FieldSpec::new("GLN", FieldKind::Text),
    FieldSpec::new("GLNDelivery", FieldKind::Text),
    FieldSpec::new("InvoiceAdministrationFee", FieldKind::Number),
    FieldSpec::new("InvoiceDiscount", FieldKind::Number),
    FieldSpec::new("InvoiceFreight", FieldKind::Number),
    FieldSpec::new("InvoiceRemark", FieldKind::Text),
    FieldSpec::new("OrganisationNumber", FieldKind::Text),
    FieldSpec::new("OurReference", FieldKind::Text),
    FieldSpec::new("Phone1", FieldKind::Text),
    FieldSpec::new("Phone2", FieldKind::Text),
    FieldSpec::new("PriceList", FieldKind::Text),
    FieldSpec::new("Project", FieldKind::Text),
    FieldSpec::new("SalesAccount", FieldKind::Number),
    FieldSpec::new("ShowPriceVATIncluded", FieldKind::Bool),
    FieldSpec::new("TermsOfDelivery", FieldKind::Text),
    FieldSpec::new("TermsOfPayment", FieldKind::Text),
    FieldSpec::new("Type", FieldKind::Choice(&["COMPANY", "PRIVATE"])),
    FieldSpec::new("VATNumber", FieldKind::Text),
    FieldSpec::new(
        "VATType",
        FieldKind::Choice(&["EUREVERSEDVAT", "EUVAT", "EXPORT", "SEREVERSEDVAT", "SEVAT"]),
    ),
    FieldSpec::new("VisitingAddress", FieldKind::Text),
    FieldSpec::new("VisitingCity", FieldKind::Text),
    FieldSpec::new("VisitingCountryCode", FieldKind::Text),
    FieldSpec::new("VisitingZipCode", FieldKind::Text),
    FieldSpec::new("WWW", FieldKind::Text),
    FieldSpec::new("WayOfDelivery", FieldKind::Text),
    FieldSpec::new("YourReference", FieldKind::Text),
    FieldSpec::new("ZipCode", FieldKind::Text),
];

/// List filters for `getMany`.
const CUSTOMER_FILTERS: &[FieldSpec] = &[
    FieldSpec::new("filter", FieldKind::Choice(&["active", "inactive"])),
    FieldSpec::new("lastmodified", FieldKind::Text),
    FieldSpec::new("sortby", FieldKind::Choice(&["customernumber", "name"])),
    FieldSpec::new("sortorder", FieldKind::Choice(&["ascending", "descending"])),
];

/// Operations supported for customers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomerOperation {
    /// Create a new customer.
    Create,
    /// Delete a customer.
    Delete,
    /// Retrieve a customer by customer number.
    Get,
    /// List customers with optional filters.
    GetMany,
    /// Update a customer.
    Update,
}

impl FromStr for CustomerOperation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            "get" => Ok(Self::Get),
            "getMany" => Ok(Self::GetMany),
            "update" => Ok(Self::Update),
            other => Err(OperationError::UnknownOperation {
                resource: Resource::Customer,
                operation: other.to_string(),
            }),
        }
    }
}

pub(crate) async fn handle(
    client: &FortnoxClient,
    operation: CustomerOperation,
    params: &Map<String, Value>,
) -> Result<OperationOutput, OperationError> {
    match operation {
        CustomerOperation::Create => {
            let name = require_str(params, "name")?;

            let mut customer = Map::new();
            customer.insert("Name".to_string(), Value::String(name.to_string()));

            let additional = object_param(params, "additionalFields");
            for (key, value) in collect_fields(CUSTOMER_COMMON_FIELDS, &additional)? {
                customer.insert(key, value);
            }

            let body = Value::Object(Map::from_iter([(
                "Customer".to_string(),
                Value::Object(customer),
            )]));
            let response = client
                .execute(HttpMethod::Post, "/3/customers", Some(body), BTreeMap::new())
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Customer")))
        }

        CustomerOperation::Get => {
            let customer_number = require_str(params, "customerNumber")?;
            let response = client
                .execute(
                    HttpMethod::Get,
                    &format!("/3/customers/{customer_number}"),
                    None,
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Customer")))
        }

        CustomerOperation::GetMany => {
            get_many(client, "/3/customers", "Customers", CUSTOMER_FILTERS, params).await
        }

        CustomerOperation::Update => {
            let customer_number = require_str(params, "customerNumber")?;
            let update_fields = object_param(params, "updateFields");

            let mut customer = Map::new();
            for (key, value) in collect_fields(CUSTOMER_COMMON_FIELDS, &update_fields)? {
                customer.insert(key, value);
            }

            let body = Value::Object(Map::from_iter([(
                "Customer".to_string(),
                Value::Object(customer),
            )]));
            let response = client
                .execute(
                    HttpMethod::Put,
                    &format!("/3/customers/{customer_number}"),
                    Some(body),
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Customer")))
        }

        CustomerOperation::Delete => {
            let customer_number = require_str(params, "customerNumber")?;
            client
                .execute(
                    HttpMethod::Delete,
                    &format!("/3/customers/{customer_number}"),
                    None,
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Deleted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_parse() {
        assert_eq!(
            "delete".parse::<CustomerOperation>().unwrap(),
            CustomerOperation::Delete
        );
        assert!(matches!(
            "send".parse::<CustomerOperation>(),
            Err(OperationError::UnknownOperation {
                resource: Resource::Customer,
                ..
            })
        ));
    }

    #[test]
    fn test_vat_type_choices() {
        let vat_type = CUSTOMER_COMMON_FIELDS
            .iter()
            .find(|spec| spec.name == "VATType")
            .unwrap();
        assert!(vat_type.kind.accepts(&Value::String("SEVAT".to_string())));
        assert!(!vat_type.kind.accepts(&Value::String("NOVAT".to_string())));
    }
}
