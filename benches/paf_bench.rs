use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use caduceus::bio::paf;

fn generate_paf(num_lines: usize) -> String {
    let mut content = String::new();
    for i in 0..num_lines {
        let start = (i * 331) % 90_000;
        let end = start + 5_000;
        content.push_str(&format!(
            "ctg{i}\t100000\t{start}\t{end}\t{}\tchr1\t4600000\t{start}\t{end}\t4800\t5000\t{}\ttp:A:P\tcm:i:812\n",
            if i % 2 == 0 { '+' } else { '-' },
            i % 61,
        ));
        if i % 50 == 0 {
            content.push_str("malformed line without enough fields\n");
        }
    }
    content
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("paf/project");

    for num_lines in [100, 1_000, 10_000].iter() {
        let content = generate_paf(*num_lines);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_lines),
            num_lines,
            |b, _| {
                b.iter(|| {
                    let records = paf::project(&content);
                    black_box(records);
                });
            },
        );
    }

    group.finish();
}

fn bench_single_line(c: &mut Criterion) {
    let line = "ctg1\t100000\t150\t5150\t+\tchr1\t4600000\t99000\t104000\t4800\t5000\t60\ttp:A:P";

    c.bench_function("paf/parse_line", |b| {
        b.iter(|| {
            let record = paf::PafRecord::parse(black_box(line));
            black_box(record);
        });
    });
}

criterion_group!(benches, bench_projection, bench_single_line);
criterion_main!(benches);
