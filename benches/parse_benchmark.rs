//! Parse benchmark: Measure script compilation and batch application.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use painter::{Interpreter, Pixmap, Size};

fn script(figures: usize) -> String {
    let mut text = String::from("white\nbgrect 0.1 0.1 0.9 0.9\n");
    for i in 0..figures {
        let c = (i % 10) as f64 / 10.0;
        text.push_str(&format!("figure {c} {c}\nmove 0.01 0.01\n"));
    }
    text.push_str("update\n");
    text
}

fn parse_script(c: &mut Criterion) {
    let text = script(100);

    c.bench_function("parse_100_figures", |b| {
        b.iter(|| {
            let mut interpreter = Interpreter::new();
            black_box(interpreter.parse(black_box(&text)).unwrap())
        })
    });
}

fn apply_batch(c: &mut Criterion) {
    let text = script(20);
    let mut pixmap = Pixmap::new(Size::new(800, 800));

    c.bench_function("apply_20_figures_800x800", |b| {
        b.iter(|| {
            let batch = Interpreter::new().parse(&text).unwrap();
            black_box(batch.apply(&mut pixmap))
        })
    });
}

criterion_group!(benches, parse_script, apply_batch);
criterion_main!(benches);
