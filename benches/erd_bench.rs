use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use schema_erd::graph::{to_mermaid, ErdView};
use schema_erd::relations::{collect_relationships, dedup_relationships, GuessStrategy};
use schema_erd::schema::{Column, ForeignKey, Schema, Table};
use std::hint::black_box;

fn generate_schema(num_tables: usize, columns_per_table: usize) -> Schema {
    let tables = (0..num_tables)
        .map(|t| {
            let mut table = Table::new(format!("table_{}s", t));
            table.columns.push(Column {
                name: "id".to_string(),
                declared_type: "INTEGER".to_string(),
                is_primary_key: true,
            });

            for c in 0..columns_per_table {
                // Every other column references an earlier table by naming convention
                let name = if c % 2 == 0 && t > 0 {
                    format!("table_{}_id", (t + c) % t)
                } else {
                    format!("col_{}", c)
                };
                table.columns.push(Column {
                    name,
                    declared_type: "TEXT".to_string(),
                    is_primary_key: false,
                });
            }

            if t > 0 {
                table.foreign_keys.push(ForeignKey {
                    column: format!("table_{}_id", t - 1),
                    referenced_table: format!("table_{}s", t - 1),
                    referenced_column: None,
                });
            }

            table
        })
        .collect();

    Schema::new(tables)
}

fn bench_relationships(c: &mut Criterion) {
    let mut group = c.benchmark_group("relationships");

    for &tables in &[10, 100, 1000] {
        let schema = generate_schema(tables, 20);
        group.throughput(Throughput::Elements(schema.column_count() as u64));

        group.bench_with_input(BenchmarkId::new("simple", tables), &schema, |b, schema| {
            b.iter(|| {
                let rels = collect_relationships(black_box(schema), Some(GuessStrategy::Simple));
                dedup_relationships(rels)
            })
        });

        group.bench_with_input(BenchmarkId::new("inflected", tables), &schema, |b, schema| {
            b.iter(|| {
                let rels =
                    collect_relationships(black_box(schema), Some(GuessStrategy::Inflected));
                dedup_relationships(rels)
            })
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for &tables in &[10, 100, 1000] {
        let view = ErdView::build(generate_schema(tables, 20), Some(GuessStrategy::Simple));

        group.bench_with_input(BenchmarkId::new("mermaid", tables), &view, |b, view| {
            b.iter(|| to_mermaid(black_box(view)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_relationships, bench_render);
criterion_main!(benches);
