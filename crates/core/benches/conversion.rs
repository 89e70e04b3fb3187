use criterion::{Criterion, black_box, criterion_group, criterion_main};
use chapterdown_core::{ConvertConfig, Converter, Document, NoSelection, convert_html, tidy};

fn bench_parse(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/chapter.html").unwrap();

    c.bench_function("parse", |b| b.iter(|| Document::parse(black_box(&html))));
}

fn bench_convert(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/chapter.html").unwrap();
    let doc = Document::parse(&html);
    let converter = Converter::new();

    c.bench_function("convert", |b| b.iter(|| converter.run(black_box(&doc), &NoSelection)));
}

fn bench_full_pipeline(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/chapter.html").unwrap();
    let config = ConvertConfig::default();

    c.bench_function("parse_and_convert", |b| b.iter(|| convert_html(black_box(&html), &config)));
}

fn bench_tidy(c: &mut Criterion) {
    let text = "word  \t word   \n\n\n\n".repeat(500);

    c.bench_function("tidy", |b| b.iter(|| tidy(black_box(&text))));
}

criterion_group!(benches, bench_parse, bench_convert, bench_full_pipeline, bench_tidy);
criterion_main!(benches);
