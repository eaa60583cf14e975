// ABOUTME: Integration tests for the data store facade
// ABOUTME: Drives insert, batch insert and select end to end against a recording executor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{business_record, init_test_logging, Call, RecordingExecutor};
use rds_data_layer::convert::{OutputShape, SelectOutput};
use rds_data_layer::errors::{DataLayerError, ErrorCode, RemoteExecutionError};
use rds_data_layer::models::{Field, TypedParameter};
use rds_data_layer::parameters::Record;
use rds_data_layer::schema::SchemaRegistry;
use rds_data_layer::statements::{SelectQuery, SortDirection};
use rds_data_layer::store::RdsDataStore;
use serde_json::{json, Value};

const BUSINESS_INSERT: &str = "INSERT INTO business (cpid, business_name, docomokouza_number, access_key, secret_access_key) VALUE (:cpid, :business_name, :docomokouza_number, :access_key, :secret_access_key)";

fn store(executor: &Arc<RecordingExecutor>) -> RdsDataStore {
    init_test_logging();
    RdsDataStore::new(Arc::new(SchemaRegistry::default()), executor.clone())
}

fn string(s: &str) -> Field {
    Field::StringValue(s.to_owned())
}

#[tokio::test]
async fn test_insert_sends_schema_ordered_statement_and_parameters() {
    let executor = Arc::new(RecordingExecutor::new());
    let store = store(&executor);

    let response = store
        .insert("business", &business_record("09999999990"))
        .await
        .unwrap();
    assert_eq!(response.number_of_records_updated, 1);

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    let Call::Execute { sql, parameters } = &calls[0] else {
        panic!("expected a single execute call, got {calls:?}");
    };
    assert_eq!(sql, BUSINESS_INSERT);

    let names: Vec<&str> = parameters
        .as_ref()
        .unwrap()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(
        names,
        ["cpid", "business_name", "docomokouza_number", "access_key", "secret_access_key"]
    );
    assert_eq!(
        parameters.as_ref().unwrap()[0],
        TypedParameter::new("cpid", string("09999999990"))
    );
}

#[tokio::test]
async fn test_insert_null_value_binds_null_tag() {
    let executor = Arc::new(RecordingExecutor::new());
    let store = store(&executor);

    let mut record = business_record("1");
    record.insert("access_key", None);
    store.insert("business", &record).await.unwrap();

    let Call::Execute { parameters, .. } = &executor.calls()[0] else {
        panic!("expected execute");
    };
    let access_key = parameters
        .as_ref()
        .unwrap()
        .iter()
        .find(|p| p.name == "access_key")
        .unwrap();
    assert_eq!(
        serde_json::to_value(access_key).unwrap(),
        json!({"name": "access_key", "value": {"isNull": true}})
    );
}

#[tokio::test]
async fn test_insert_missing_field_performs_no_io() {
    let executor = Arc::new(RecordingExecutor::new());
    let store = store(&executor);

    let record = Record::new().with("cpid", "1");
    let err = store.insert("business", &record).await.unwrap_err();
    assert!(matches!(err, DataLayerError::MissingField { ref column } if column == "business_name"));
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_insert_surfaces_remote_error_unchanged() {
    let remote = RemoteExecutionError::new(
        "ExecuteStatement",
        "BadRequestException",
        "Duplicate entry '1' for key 'PRIMARY'",
    );
    let executor = Arc::new(RecordingExecutor::failing(remote.clone()));
    let store = store(&executor);

    let err = store
        .insert("business", &business_record("1"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RemoteExecution);
    match err {
        DataLayerError::RemoteExecution(inner) => assert_eq!(inner, remote),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(executor.calls().len(), 1);
}

#[tokio::test]
async fn test_insert_many_single_round_trip() {
    let executor = Arc::new(RecordingExecutor::new());
    let store = store(&executor);

    let records = vec![business_record("1"), business_record("2"), business_record("3")];
    let response = store.insert_many("business", &records).await.unwrap();
    assert_eq!(response.update_results.len(), 3);

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    let Call::Batch {
        sql,
        parameter_sets,
    } = &calls[0]
    else {
        panic!("expected a batch call");
    };
    assert_eq!(sql, BUSINESS_INSERT);
    assert_eq!(parameter_sets.len(), 3);
    assert_eq!(parameter_sets[2][0], TypedParameter::new("cpid", string("3")));
}

#[tokio::test]
async fn test_insert_many_rejects_before_io_when_any_record_is_invalid() {
    let executor = Arc::new(RecordingExecutor::new());
    let store = store(&executor);

    let records = vec![business_record("1"), Record::new().with("cpid", "2")];
    let err = store.insert_many("business", &records).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingField);
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_select_dict_shape() {
    let executor = Arc::new(RecordingExecutor::returning(vec![
        vec![string("A"), string("B")],
        vec![string("C"), Field::null()],
    ]));
    let store = store(&executor);

    let query = SelectQuery::new("business", ["cpid", "business_name"]).order_by(["cpid"], None);
    let output = store.select(&query, OutputShape::Dict).await.unwrap();

    assert_eq!(
        serde_json::to_value(&output).unwrap(),
        json!([
            {"cpid": "A", "business_name": "B"},
            {"cpid": "C", "business_name": ""}
        ])
    );
    assert_eq!(
        executor.calls(),
        [Call::Execute {
            sql: "SELECT cpid, business_name FROM business ORDER BY cpid DESC".to_owned(),
            parameters: None,
        }]
    );
}

#[tokio::test]
async fn test_select_queue_shape_with_join() {
    let executor = Arc::new(RecordingExecutor::returning(vec![
        vec![string("A"), string("B")],
        vec![string("C"), string("D")],
    ]));
    let store = store(&executor);

    let query = SelectQuery::new("business", ["business.cpid", "accounts.business_name"])
        .join("accounts", "business.cpid = accounts.cpid")
        .filter("business.cpid <> ''")
        .order_by(["business.cpid"], Some(SortDirection::Asc));
    let output = store.select(&query, OutputShape::QueueMessage).await.unwrap();

    let SelectOutput::Messages(messages) = output else {
        panic!("expected queue messages");
    };
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, "1");
    assert_eq!(messages[1].id, "2");
    assert_eq!(messages[0].group_id, messages[1].group_id);

    let body: Value = serde_json::from_str(&messages[0].body).unwrap();
    assert_eq!(body, json!({"cpid": "A", "business_name": "B"}));

    let Call::Execute { sql, .. } = &executor.calls()[0] else {
        panic!("expected execute");
    };
    assert_eq!(
        sql,
        "SELECT business.cpid, accounts.business_name FROM business JOIN accounts ON business.cpid = accounts.cpid WHERE business.cpid <> '' ORDER BY business.cpid ASC"
    );
}

#[tokio::test]
async fn test_select_empty_result() {
    let executor = Arc::new(RecordingExecutor::new());
    let store = store(&executor);

    let query = SelectQuery::new("business", ["cpid"]);
    let output = store.select(&query, OutputShape::QueueMessage).await.unwrap();
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_select_malformed_rows() {
    let executor = Arc::new(RecordingExecutor::returning(vec![vec![string("only one")]]));
    let store = store(&executor);

    let query = SelectQuery::new("business", ["cpid", "business_name"]);
    let err = store.select(&query, OutputShape::Dict).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::MalformedResultSet);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_store() {
    let executor = Arc::new(RecordingExecutor::new());
    let store = store(&executor);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .insert("business", &business_record(&i.to_string()))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(executor.calls().len(), 8);
}
