//! Benchmarks for address parsing and the list rules built on it.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fieldcheck_validator::address::{compare_addresses, parse_address};
use fieldcheck_validator::prelude::*;

// ============================================================================
// Parsing
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_address");
    for input in ["10.0.0.1", "255.255.255.255", "::1", "2001:db8:85a3::8a2e:370:7334"] {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, input| {
            b.iter(|| parse_address(black_box(input)));
        });
    }
    group.finish();

    c.bench_function("compare_ipv6", |b| {
        b.iter(|| compare_addresses(black_box("fe80::1"), black_box("fe80::ffff:1")));
    });
}

// ============================================================================
// Predicates and rules
// ============================================================================

fn bench_rules(c: &mut Criterion) {
    c.bench_function("is_valid_ip_mixed", |b| {
        b.iter(|| {
            black_box(is_valid_ip(black_box("192.168.1.1")))
                && black_box(is_valid_ip(black_box("2001:db8::1")))
        });
    });

    let endpoints = ["10.0.0.1:80", "[::1]:443", "192.168.0.10:8080", "[fe80::1]:22"];
    c.bench_function("ip_port_list_4", |b| {
        b.iter(|| ip_port_list(black_box(&endpoints)));
    });

    c.bench_function("end_ip_paired", |b| {
        let rule = FieldRule::new(FieldKind::EndIp);
        b.iter(|| rule.check_paired(black_box("10.0.0.200"), black_box("10.0.0.1")));
    });
}

criterion_group!(benches, bench_parse, bench_rules);
criterion_main!(benches);
