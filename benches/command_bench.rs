//! Performance benchmarks for relay command building.
//!
//! # Run Benchmarks
//!
//! ```sh
//! # Run all command benchmarks
//! cargo bench --bench command_bench
//!
//! # Run a single group
//! cargo bench --bench command_bench -- build
//!
//! # Compare against a saved baseline
//! cargo bench --bench command_bench -- --save-baseline main
//! cargo bench --bench command_bench -- --baseline main
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gatelink_core::SettingsState;
use gatelink_protocol::{
    CommandFields, Operation, build, preview,
    validation::{validate_latch_time, validate_password, validate_phone, validate_serial},
};
use std::hint::black_box;

fn add_user_fields() -> CommandFields {
    CommandFields::new()
        .serial("16")
        .phone("123456")
        .window("2408050800", "2409051000")
}

/// Benchmark building every operation against a default state.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.throughput(Throughput::Elements(1));

    let state = SettingsState::default();
    let cases = vec![
        (
            Operation::RegisterAdmin,
            CommandFields::new().admin_number("0469843459"),
        ),
        (
            Operation::ChangePassword,
            CommandFields::new().new_password("6666"),
        ),
        (Operation::AddUser, add_user_fields()),
        (Operation::DeleteUser, CommandFields::new().serial("2")),
        (Operation::SetAccessMode, CommandFields::new().mode("ALL")),
        (Operation::SetLatchTime, CommandFields::new().latch_time("30")),
        (Operation::RelayOn, CommandFields::new()),
    ];

    for (operation, fields) in cases {
        group.bench_with_input(
            BenchmarkId::new("operation", operation),
            &fields,
            |b, fields| {
                b.iter(|| {
                    let result = build(black_box(operation), black_box(fields), &state);
                    black_box(result)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark early rejection against a successful build.
fn bench_build_rejection(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_rejection");
    group.throughput(Throughput::Elements(1));

    let state = SettingsState::default();
    let scenarios = vec![
        ("valid", add_user_fields()),
        ("bad_serial", CommandFields::new().serial("0").phone("123456")),
        ("empty_phone", CommandFields::new().serial("16")),
        (
            "half_window",
            CommandFields::new()
                .serial("16")
                .phone("123456")
                .start("2408050800"),
        ),
    ];

    for (name, fields) in scenarios {
        group.bench_function(name, |b| {
            b.iter(|| {
                let result = build(Operation::AddUser, black_box(&fields), &state);
                black_box(result)
            });
        });
    }

    group.finish();
}

/// Benchmark the field validators on typical input.
fn bench_validators(c: &mut Criterion) {
    let mut group = c.benchmark_group("validators");
    group.throughput(Throughput::Elements(1));

    group.bench_function("password", |b| {
        b.iter(|| black_box(validate_password(black_box("12-34"))))
    });
    group.bench_function("serial", |b| {
        b.iter(|| black_box(validate_serial(black_box("16"))))
    });
    group.bench_function("phone", |b| {
        b.iter(|| black_box(validate_phone(black_box("+32470000000"))))
    });
    group.bench_function("latch_time", |b| {
        b.iter(|| black_box(validate_latch_time(black_box("1500"))))
    });

    group.finish();
}

/// Benchmark previews as a form is filled in field by field.
fn bench_preview(c: &mut Criterion) {
    let mut group = c.benchmark_group("preview");
    group.throughput(Throughput::Elements(1));

    let state = SettingsState::default();
    let steps = vec![
        ("empty", CommandFields::new()),
        ("serial", CommandFields::new().serial("16")),
        ("complete", add_user_fields()),
    ];

    for (name, fields) in steps {
        group.bench_with_input(BenchmarkId::new("add_user", name), &fields, |b, fields| {
            b.iter(|| black_box(preview(Operation::AddUser, black_box(fields), &state)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_build_rejection,
    bench_validators,
    bench_preview
);
criterion_main!(benches);
