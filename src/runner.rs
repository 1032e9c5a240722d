//! Sequential batch execution with a continue-on-fail policy.
//!
//! Embedding hosts process a batch of input items against one fixed
//! (resource, operation) pair. This module models that harness: items run
//! strictly in order, each to completion, and the continue-on-fail policy
//! decides whether one item's failure aborts the batch or becomes an error
//! record in its place.

use serde_json::{Map, Value};

use crate::clients::FortnoxClient;
use crate::resources::{handle, Operation, OperationError, OperationOutput};

/// Runs one operation over a batch of per-item parameter maps.
///
/// Items are processed sequentially; an item's paginated fetches and
/// retries finish before the next item starts. Outputs are flattened the
/// way hosts consume them: a record contributes one entry, a record array
/// contributes one entry per record, and a delete acknowledgement
/// contributes `{"success": true}`.
///
/// With `continue_on_fail` enabled, a failed item contributes
/// `{"error": "<message>"}` and processing moves on. Disabled, the first
/// failure aborts the whole batch. Handlers always raise rather than
/// swallow failures, which is what makes this policy effective.
///
/// # Errors
///
/// Returns the first [`OperationError`] when `continue_on_fail` is
/// disabled; never errors otherwise.
pub async fn run_batch(
    client: &FortnoxClient,
    operation: Operation,
    items: &[Map<String, Value>],
    continue_on_fail: bool,
) -> Result<Vec<Value>, OperationError> {
    let mut outputs = Vec::new();

    for (index, params) in items.iter().enumerate() {
        match handle(client, operation, params).await {
            Ok(OperationOutput::Records(records)) => outputs.extend(records),
            Ok(output) => outputs.push(output.into_value()),
            Err(error) => {
                if !continue_on_fail {
                    return Err(error);
                }
                tracing::warn!(
                    item = index,
                    resource = %operation.resource(),
                    %error,
                    "item failed, continuing per policy"
                );
                outputs.push(serde_json::json!({ "error": error.to_string() }));
            }
        }
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{InvoiceOperation, Resource};

    // Behavior over live endpoints is covered by the integration suite;
    // here we pin the pieces that need no network.

    #[test]
    fn test_operation_resource_is_stable_for_logging() {
        let operation = Operation::Invoice(InvoiceOperation::GetMany);
        assert_eq!(operation.resource(), Resource::Invoice);
    }
}
