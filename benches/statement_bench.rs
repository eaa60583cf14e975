// ABOUTME: Criterion benchmarks for statement building, parameter binding and result conversion
// ABOUTME: Measures the local work done around each remote round trip for growing row counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the local side of the data layer.
//!
//! Everything measured here runs before or after the remote call, so it bounds the
//! overhead the layer adds on top of network latency.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rds_data_layer::convert::{to_queue_messages, to_records};
use rds_data_layer::gateway::RawResultSet;
use rds_data_layer::models::Field;
use rds_data_layer::parameters::{bind, Record};
use rds_data_layer::schema::{SchemaRegistry, BUSINESS_TABLE};
use rds_data_layer::statements::{build_insert, build_select, SelectQuery, SortDirection};

const ROW_COUNTS: [usize; 3] = [10, 100, 1_000];

fn business_rows(count: usize) -> RawResultSet {
    let rows = (0..count)
        .map(|index| {
            vec![
                Field::StringValue(format!("cpid_{index}")),
                Field::StringValue(format!("business_{index}")),
                if index % 3 == 0 {
                    Field::null()
                } else {
                    Field::StringValue(format!("{index:07}"))
                },
            ]
        })
        .collect();
    RawResultSet::new(
        vec![
            "business.cpid".to_owned(),
            "business.business_name".to_owned(),
            "business.docomokouza_number".to_owned(),
        ],
        rows,
    )
}

fn bench_statements(c: &mut Criterion) {
    let mut group = c.benchmark_group("statements");
    let registry = SchemaRegistry::default();
    let columns = registry.table(BUSINESS_TABLE).unwrap().column_names();

    group.bench_function("build_insert", |b| {
        b.iter(|| build_insert(black_box(BUSINESS_TABLE), black_box(columns.as_slice())));
    });

    let query = SelectQuery::new("business", ["business.cpid", "accounts.balance"])
        .join("accounts", "business.cpid = accounts.cpid")
        .filter("accounts.balance > 0")
        .order_by(["business.cpid"], Some(SortDirection::Asc));
    group.bench_function("build_select", |b| {
        b.iter(|| build_select(black_box(&query)));
    });

    group.finish();
}

fn bench_binding(c: &mut Criterion) {
    let registry = SchemaRegistry::default();
    let columns = registry.resolve_columns(BUSINESS_TABLE).unwrap();
    let record = Record::new()
        .with("cpid", "09999999990")
        .with("business_name", "test")
        .with("docomokouza_number", "1234567")
        .with_null("access_key")
        .with("secret_access_key", "secret");

    c.bench_function("bind_business_record", |b| {
        b.iter(|| bind(black_box(columns), black_box(&record)));
    });
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for count in ROW_COUNTS {
        let result = business_rows(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("dict", count), &result, |b, result| {
            b.iter(|| to_records(black_box(result)));
        });
        group.bench_with_input(BenchmarkId::new("queue_message", count), &result, |b, result| {
            b.iter(|| to_queue_messages(black_box(result)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_statements, bench_binding, bench_conversion);
criterion_main!(benches);
