use criterion::{criterion_group, criterion_main, Criterion};
use headsync::{build, Child, DescriptorBuilder, DescriptorMemo, Element};
use std::hint::black_box;
use std::sync::Arc;

fn page_elements(metas: usize) -> Vec<Element> {
    let mut elements = vec![
        Element::new("title").children(vec!["Docs ", "page"]),
        Element::new("base").prop("href", "/docs/"),
        Element::new("script").prop("type", "module").children("init()"),
    ];
    elements.extend((0..metas).map(|i| {
        Element::new("meta")
            .prop("name", format!("name-{i}"))
            .prop("content", format!("content-{i}"))
    }));
    elements.push(Element::new("div").children("ignored"));
    elements
}

fn bench_build(c: &mut Criterion) {
    let small = page_elements(4);
    let large = page_elements(200);

    c.bench_function("build_small", |b| {
        b.iter(|| build(black_box(&small), black_box(Some("%s | Site"))))
    });

    c.bench_function("build_large", |b| {
        b.iter(|| build(black_box(&large), black_box(Some("%s | Site"))))
    });
}

fn bench_memo_hit(c: &mut Criterion) {
    let builder = DescriptorBuilder::new();
    let children: Arc<[Child]> = page_elements(50).into_iter().map(Child::from).collect();
    let mut memo = DescriptorMemo::new();

    c.bench_function("memo_hit", |b| {
        b.iter(|| memo.get_or_build(&builder, black_box(&children), Some("%s | Site")))
    });
}

criterion_group!(benches, bench_build, bench_memo_hit);
criterion_main!(benches);
