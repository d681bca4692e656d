use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examlens_core::parser::parse_table_str;

fn generate_csv(students: usize, questions: usize) -> String {
    let mut s = String::from("Name");
    for q in 0..questions {
        s.push_str(&format!(",Q{q}"));
    }
    s.push('\n');

    for i in 0..students {
        s.push_str(&format!("Student {i}"));
        for q in 0..questions {
            s.push(',');
            s.push(char::from(b'A' + ((i + q) % 4) as u8));
        }
        s.push('\n');
    }
    s
}

fn bench_parse_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_table");

    let small = generate_csv(30, 10);
    let medium = generate_csv(300, 50);
    let large = generate_csv(1000, 100);

    group.bench_function("30x10", |b| {
        b.iter(|| parse_table_str(black_box(&small), black_box("bench.csv".as_ref())))
    });

    group.bench_function("300x50", |b| {
        b.iter(|| parse_table_str(black_box(&medium), black_box("bench.csv".as_ref())))
    });

    group.bench_function("1000x100", |b| {
        b.iter(|| parse_table_str(black_box(&large), black_box("bench.csv".as_ref())))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_table);
criterion_main!(benches);
