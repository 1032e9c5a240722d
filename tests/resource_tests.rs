//! Integration tests for resource operation dispatch.
//!
//! These tests verify path routing, envelope-key extraction, body nesting,
//! and the action-endpoint quirks across all four resources.

use fortnox_api::resources::{handle, Operation, OperationError, OperationOutput};
use fortnox_api::{
    BaseUrl, ClientId, ClientSecret, FortnoxClient, FortnoxConfig, ScopeSet, Session, TenantId,
};
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer) -> FortnoxClient {
    let config = FortnoxConfig::builder()
        .client_id(ClientId::new("test-id").unwrap())
        .client_secret(ClientSecret::new("test-secret").unwrap())
        .tenant_id(TenantId::new("123456").unwrap())
        .api_base(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let session = Session::new("test-token".to_string(), ScopeSet::new(), None);
    FortnoxClient::new(&config, &session)
}

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_invoice_create_nests_body_and_skips_empty_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/3/invoices"))
        .and(body_json(json!({
            "Invoice": {
                "CustomerNumber": "10",
                "InvoiceRows": [
                    { "ArticleNumber": "A1", "DeliveredQuantity": 2, "Price": 100 }
                ],
                "Currency": "SEK"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "Invoice": { "DocumentNumber": "1001", "CustomerNumber": "10" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let operation = Operation::parse("invoice", "create").unwrap();
    let input = params(json!({
        "customerNumber": "10",
        "invoiceRows": {
            "row": [
                { "ArticleNumber": "A1", "DeliveredQuantity": 2, "Price": 100 }
            ]
        },
        "additionalFields": {
            "Currency": "SEK",
            "Comments": ""
        }
    }));

    let output = handle(&client, operation, &input).await.unwrap();
    assert_eq!(
        output.into_value(),
        json!({ "DocumentNumber": "1001", "CustomerNumber": "10" })
    );
}

#[tokio::test]
async fn test_invoice_actions_use_put_without_body() {
    for action in ["bookkeep", "cancel", "credit"] {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(format!("/3/invoices/55/{action}")))
            .and(body_string(String::new()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Invoice": { "DocumentNumber": "55" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&server);
        let operation = Operation::parse("invoice", action).unwrap();
        let input = params(json!({ "documentNumber": "55" }));

        let output = handle(&client, operation, &input).await.unwrap();
        assert_eq!(output.into_value()["DocumentNumber"], "55");
    }
}

#[tokio::test]
async fn test_invoice_send_uses_get_on_email_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/invoices/55/email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Invoice": { "DocumentNumber": "55", "Sent": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let operation = Operation::parse("invoice", "send").unwrap();
    let input = params(json!({ "documentNumber": "55" }));

    let output = handle(&client, operation, &input).await.unwrap();
    assert_eq!(output.into_value()["Sent"], true);
}

#[tokio::test]
async fn test_invoice_get_many_single_page_uses_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/invoices"))
        .and(query_param("limit", "25"))
        .and(query_param("filter", "unpaid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Invoices": [
                { "DocumentNumber": "1" },
                { "DocumentNumber": "2" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let operation = Operation::parse("invoice", "getMany").unwrap();
    let input = params(json!({
        "returnAll": false,
        "limit": 25,
        "filters": { "filter": "unpaid" }
    }));

    let output = handle(&client, operation, &input).await.unwrap();
    match output {
        OperationOutput::Records(records) => assert_eq!(records.len(), 2),
        other => panic!("expected records, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invoice_get_many_return_all_paginates() {
    let server = MockServer::start().await;

    for (page, doc) in [("1", "1"), ("2", "2")] {
        Mock::given(method("GET"))
            .and(path("/3/invoices"))
            .and(query_param("limit", "500"))
            .and(query_param("page", page))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Invoices": [{ "DocumentNumber": doc }],
                "MetaInformation": { "@TotalPages": 2 }
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = create_client(&server);
    let operation = Operation::parse("invoice", "getMany").unwrap();
    let input = params(json!({ "returnAll": true, "filters": {} }));

    let output = handle(&client, operation, &input).await.unwrap();
    match output {
        OperationOutput::Records(records) => assert_eq!(records.len(), 2),
        other => panic!("expected records, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invoice_update_lifts_row_collection() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/3/invoices/60"))
        .and(body_json(json!({
            "Invoice": {
                "InvoiceRows": [{ "ArticleNumber": "A2", "Price": 50 }],
                "Comments": "updated"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Invoice": { "DocumentNumber": "60" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let operation = Operation::parse("invoice", "update").unwrap();
    let input = params(json!({
        "documentNumber": "60",
        "updateFields": {
            "InvoiceRows": { "row": [{ "ArticleNumber": "A2", "Price": 50 }] },
            "Comments": "updated"
        }
    }));

    handle(&client, operation, &input).await.unwrap();
}

#[tokio::test]
async fn test_order_create_invoice_returns_invoice_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/3/orders/80/createinvoice"))
        .and(body_string(String::new()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Invoice": { "DocumentNumber": "2001" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let operation = Operation::parse("order", "createInvoice").unwrap();
    let input = params(json!({ "documentNumber": "80" }));

    let output = handle(&client, operation, &input).await.unwrap();
    // The response envelope key is Invoice, not Order
    assert_eq!(output.into_value()["DocumentNumber"], "2001");
}

#[tokio::test]
async fn test_order_cancel_uses_put_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/3/orders/81/cancel"))
        .and(body_string(String::new()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Order": { "DocumentNumber": "81", "Cancelled": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let operation = Operation::parse("order", "cancel").unwrap();
    let input = params(json!({ "documentNumber": "81" }));

    let output = handle(&client, operation, &input).await.unwrap();
    assert_eq!(output.into_value()["Cancelled"], true);
}

#[tokio::test]
async fn test_customer_delete_returns_success_marker() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/3/customers/10"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let operation = Operation::parse("customer", "delete").unwrap();
    let input = params(json!({ "customerNumber": "10" }));

    let output = handle(&client, operation, &input).await.unwrap();
    assert_eq!(output.into_value(), json!({ "success": true }));
}

#[tokio::test]
async fn test_article_create_requires_description() {
    let server = MockServer::start().await;
    let client = create_client(&server);
    let operation = Operation::parse("article", "create").unwrap();

    let result = handle(&client, operation, &params(json!({}))).await;
    assert!(matches!(
        result,
        Err(OperationError::MissingParameter {
            name: "description"
        })
    ));
}

#[tokio::test]
async fn test_article_delete_routes_by_article_number() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/3/articles/A9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let operation = Operation::parse("article", "delete").unwrap();
    let input = params(json!({ "articleNumber": "A9" }));

    let output = handle(&client, operation, &input).await.unwrap();
    assert_eq!(output.into_value(), json!({ "success": true }));
}

#[tokio::test]
async fn test_customer_update_collects_declared_fields_only() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/3/customers/10"))
        .and(body_json(json!({
            "Customer": { "Email": "new@acme.se", "Type": "COMPANY" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Customer": { "CustomerNumber": "10" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let operation = Operation::parse("customer", "update").unwrap();
    let input = params(json!({
        "customerNumber": "10",
        "updateFields": {
            "Email": "new@acme.se",
            "Type": "COMPANY",
            "NotARealField": "dropped",
            "Phone1": ""
        }
    }));

    handle(&client, operation, &input).await.unwrap();
}
