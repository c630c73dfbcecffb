//! Code generation benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use unionforge_codegen::{GeneratorOptions, MAX_SUPPORTED_ARITY, generate_from_xml, generate_up_to};

const STATUS_XML: &str = r#"<unions namespace="crate::status">
    <type name="Active" kind="record" module="crate::cases">
        <constructor name="new">
            <doc><![CDATA[<param name="description">What is running</param>]]></doc>
            <param name="description" type="String"/>
        </constructor>
    </type>
    <type name="Retry" kind="record">
        <constructor implicit="true">
            <param name="attempt" type="u32"/>
        </constructor>
    </type>
    <type name="Aborted" kind="record"/>
    <union name="Status" partial="true">
        <case type="Active"/>
        <case type="Retry"/>
        <case type="Aborted"/>
    </union>
</unions>"#;

fn benchmark_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    for max_arity in [4, 8, MAX_SUPPORTED_ARITY] {
        group.bench_with_input(
            BenchmarkId::from_parameter(max_arity),
            &max_arity,
            |b, &max_arity| b.iter(|| generate_up_to(black_box(max_arity))),
        );
    }
    group.finish();
}

fn benchmark_named_union(c: &mut Criterion) {
    let options = GeneratorOptions::default();

    c.bench_function("named_union_from_xml", |b| {
        b.iter(|| generate_from_xml(black_box(STATUS_XML), "Status", &options))
    });
}

criterion_group!(benches, benchmark_sweep, benchmark_named_union);
criterion_main!(benches);
