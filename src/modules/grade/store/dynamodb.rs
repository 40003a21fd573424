use crate::modules::grade::repository::{Error, ErrorKind, GradeRecord, GradeStore, StoredGrade};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::{
    config::Region,
    error::{DisplayErrorContext, SdkError},
    types::AttributeValue,
    Client,
};
use serde_json::{Number, Value};
use std::collections::HashMap;

/// Grades kept in a DynamoDB table.
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub fn new(client: Client, table: String) -> Self {
        Self { client, table }
    }

    pub async fn connect(region: String, table: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .load()
            .await;

        Self::new(Client::new(&config), table)
    }
}

fn from_sdk<E, R>(err: SdkError<E, R>) -> Error
where
    SdkError<E, R>: std::error::Error,
{
    let kind = match &err {
        SdkError::ServiceError(_) => ErrorKind::Rejected,
        _ => ErrorKind::Unavailable,
    };

    Error::new(kind, DisplayErrorContext(err).to_string())
}

fn attribute_to_json(value: &AttributeValue) -> Option<Value> {
    match value {
        AttributeValue::S(text) => Some(Value::String(text.clone())),
        AttributeValue::N(number) => Some(
            number
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(number.clone())),
        ),
        AttributeValue::Bool(flag) => Some(Value::Bool(*flag)),
        AttributeValue::Null(_) => Some(Value::Null),
        _ => None,
    }
}

fn to_stored_grade(item: &HashMap<String, AttributeValue>) -> StoredGrade {
    let student_id = item.get("student_id").and_then(|value| match value {
        AttributeValue::S(text) | AttributeValue::N(text) => Some(text.clone()),
        _ => None,
    });

    let timestamp = item
        .get("timestamp")
        .and_then(|value| value.as_n().ok())
        .and_then(|number| number.parse::<i64>().ok());

    StoredGrade {
        student_id,
        timestamp,
        grade: item.get("grade").and_then(attribute_to_json),
    }
}

#[async_trait]
impl GradeStore for DynamoStore {
    async fn scan(&self) -> Result<Vec<StoredGrade>, Error> {
        let output = self
            .client
            .scan()
            .table_name(&self.table)
            .send()
            .await
            .map_err(|err| {
                let err = from_sdk(err);
                tracing::error!("Failed to scan table {}: {}", self.table, err);
                err
            })?;

        let items = output.items.unwrap_or_default();
        tracing::debug!("Scanned {} items from {}", items.len(), self.table);

        Ok(items.iter().map(to_stored_grade).collect())
    }

    async fn put(&self, record: GradeRecord) -> Result<(), Error> {
        self.client
            .put_item()
            .table_name(&self.table)
            .item("student_id", AttributeValue::S(record.student_id))
            .item("timestamp", AttributeValue::N(record.timestamp.to_string()))
            .item("grade", AttributeValue::N(record.grade.to_string()))
            .send()
            .await
            .map(|_| ())
            .map_err(|err| {
                let err = from_sdk(err);
                tracing::error!("Failed to put item into {}: {}", self.table, err);
                err
            })
    }
}
