use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::runtime::contract::StoredRecord;

/// Durable key-value persistence, one table per record kind.
pub trait RecordStore {
    fn put_record(&self, table_name: &str, record: &StoredRecord) -> Result<(), String>;
}

pub struct DynamoDbRecordStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoDbRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }
}

impl RecordStore for DynamoDbRecordStore {
    fn put_record(&self, table_name: &str, record: &StoredRecord) -> Result<(), String> {
        let item = record_to_item(record)?;
        let client = self.client.clone();
        let table_name = table_name.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .set_item(Some(item))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!(
                            "failed to put item into dynamodb: {}",
                            DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}

/// Absent optional fields become NULL attributes rather than being dropped.
pub fn record_to_item(record: &StoredRecord) -> Result<HashMap<String, AttributeValue>, String> {
    serde_dynamo::aws_sdk_dynamodb_1::to_item(record)
        .map_err(|error| format!("failed to encode record as dynamodb item: {error}"))
}
