use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use kepler_processor::{HeaderSpec, ReaderOptions, parse_str, read_matrix};
use std::hint::black_box;

fn sample_table(rows: usize) -> String {
    let mut table =
        String::from("kepid,kepler_name,koi_disposition,koi_prad,koi_srad,koi_smass\n");
    for i in 0..rows {
        table.push_str(&format!(
            "{},\"Kepler-{} b, \"\"candidate\"\"\",CONFIRMED,{:.2},1.0,0.98\n",
            10_000_000 + i,
            i,
            0.5 + (i % 100) as f64 / 50.0
        ));
    }
    table
}

fn bench_parse(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let table = sample_table(10_000);
    let input = table.as_str();

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(table.len() as u64));

    group.bench_function("read_matrix", |b| {
        let options = &ReaderOptions::default();
        b.to_async(&runtime).iter(|| async move {
            read_matrix(black_box(input.as_bytes()), options)
                .await
                .unwrap()
        });
    });

    group.bench_function("parse_with_header", |b| {
        let options = &ReaderOptions::default().with_header(HeaderSpec::FirstRow);
        b.to_async(&runtime).iter(|| async move {
            parse_str(black_box(input), options).await.unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
