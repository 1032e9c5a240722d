//! Article operations.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::clients::{FortnoxClient, HttpMethod};
use crate::resources::{
    collect_fields, get_many, object_param, require_str, take_record, FieldKind, FieldSpec,
    OperationError, OperationOutput, Resource,
};

/// Fields accepted on article create and update.
const ARTICLE_COMMON_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Active", FieldKind::Bool),
    FieldSpec::new("ArticleNumber", FieldKind::Text),
    FieldSpec::new("Bulky", FieldKind::Bool),
    FieldSpec::new("ConstructionAccount", FieldKind::Number),
    FieldSpec::new("Depth", FieldKind::Number),
    FieldSpec::new("Description", FieldKind::Text),
    FieldSpec::new("EAN", FieldKind::Text),
    FieldSpec::new("EUAccount", FieldKind::Number),
    FieldSpec::new("EUVATAccount", FieldKind::Number),
    FieldSpec::new("Expired", FieldKind::Bool),
    FieldSpec::new("ExportAccount", FieldKind::Number),
    FieldSpec::new("Height", FieldKind::Number),
    FieldSpec::new("Housework", FieldKind::Bool),
    FieldSpec::new("HouseworkType", FieldKind::Text),
    FieldSpec::new("Manufacturer", FieldKind::Text),
    FieldSpec::new("ManufacturerArticleNumber", FieldKind::Text),
    FieldSpec::new("Note", FieldKind::Text),
    FieldSpec::new("PurchaseAccount", FieldKind::Number),
    FieldSpec::new("PurchasePrice", FieldKind::Number),
    FieldSpec::new("QuantityInStock", FieldKind::Number),
    FieldSpec::new("SalesAccount", FieldKind::Number),
    FieldSpec::new("StockGoods", FieldKind::Bool),
    FieldSpec::new("StockPlace", FieldKind::Text),
    FieldSpec::new("StockWarning", FieldKind::Number),
    FieldSpec::new("SupplierNumber", FieldKind::Text),
    FieldSpec::new("Type", FieldKind::Choice(&["SERVICE", "STOCK"])),
    FieldSpec::new("Unit", FieldKind::Text),
    FieldSpec::new("VAT", FieldKind::Number),
    FieldSpec::new("WebshopArticle", FieldKind::Bool),
    FieldSpec::new("Weight", FieldKind::Number),
    FieldSpec::new("Width", FieldKind::Number),
];

/// List filters for `getMany`.
const ARTICLE_FILTERS: &[FieldSpec] = &[
    FieldSpec::new("filter", FieldKind::Choice(&["active", "inactive"])),
    FieldSpec::new("lastmodified", FieldKind::Text),
    FieldSpec::new(
        "sortby",
        FieldKind::Choice(&["articlenumber", "quantityinstock", "reservedquantity", "stockvalue"]),
    ),
    FieldSpec::new("sortorder", FieldKind::Choice(&["ascending", "descending"])),
];

/// Operations supported for articles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArticleOperation {
    /// Create a new article.
    Create,
    /// Delete an article.
    Delete,
    /// Retrieve an article by article number.
    Get,
    /// List articles with optional filters.
    GetMany,
    /// Update an article.
    Update,
}

impl FromStr for ArticleOperation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            "get" => Ok(Self::Get),
            "getMany" => Ok(Self::GetMany),
            "update" => Ok(Self::Update),
            other => Err(OperationError::UnknownOperation {
                resource: Resource::Article,
                operation: other.to_string(),
            }),
        }
    }
}

pub(crate) async fn handle(
    client: &FortnoxClient,
    operation: ArticleOperation,
    params: &Map<String, Value>,
) -> Result<OperationOutput, OperationError> {
    match operation {
        ArticleOperation::Create => {
            let description = require_str(params, "description")?;

            let mut article = Map::new();
            article.insert(
                "Description".to_string(),
                Value::String(description.to_string()),
            );

            let additional = object_param(params, "additionalFields");
            for (key, value) in collect_fields(ARTICLE_COMMON_FIELDS, &additional)? {
                article.insert(key, value);
            }

            let body = Value::Object(Map::from_iter([(
                "Article".to_string(),
                Value::Object(article),
            )]));
            let response = client
                .execute(HttpMethod::Post, "/3/articles", Some(body), BTreeMap::new())
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Article")))
        }

        ArticleOperation::Get => {
            let article_number = require_str(params, "articleNumber")?;
            let response = client
                .execute(
                    HttpMethod::Get,
                    &format!("/3/articles/{article_number}"),
                    None,
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Article")))
        }

        ArticleOperation::GetMany => {
            get_many(client, "/3/articles", "Articles", ARTICLE_FILTERS, params).await
        }

        ArticleOperation::Update => {
            let article_number = require_str(params, "articleNumber")?;
            let update_fields = object_param(params, "updateFields");

            let mut article = Map::new();
            for (key, value) in collect_fields(ARTICLE_COMMON_FIELDS, &update_fields)? {
                article.insert(key, value);
            }

            let body = Value::Object(Map::from_iter([(
                "Article".to_string(),
                Value::Object(article),
            )]));
            let response = client
                .execute(
                    HttpMethod::Put,
                    &format!("/3/articles/{article_number}"),
                    Some(body),
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Record(take_record(response, "Article")))
        }

        ArticleOperation::Delete => {
            let article_number = require_str(params, "articleNumber")?;
            client
                .execute(
                    HttpMethod::Delete,
                    &format!("/3/articles/{article_number}"),
                    None,
                    BTreeMap::new(),
                )
                .await?;
            Ok(OperationOutput::Deleted)
        }
    }
}
