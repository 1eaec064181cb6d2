//! Benchmarks for payload extraction.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use scrawl::extract::split_text_and_diagram;

fn bench_split(c: &mut Criterion) {
    let prose = "Here is the architecture I had in mind. ".repeat(200);
    let payload = r##"[{"type":"rectangle","x":0,"y":0,"width":120,"height":60,"strokeColor":"#1e1e1e"},{"type":"text","x":10,"y":20,"text":"service"}]"##;
    let text = format!("{prose}{payload} Let me know what you think.");

    c.bench_function("split_text_and_diagram", |b| {
        b.iter(|| split_text_and_diagram(black_box(&text)))
    });
}

criterion_group!(benches, bench_split);
criterion_main!(benches);
