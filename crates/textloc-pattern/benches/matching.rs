use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use textloc_pattern::{PatternCache, SearchPattern};

/// Build a flattened page text of roughly `words` words.
fn page_text(words: usize) -> String {
    let vocabulary = [
        "Username", "Password", "Login", "Some", "text", "Marker", "header_1", "row_2", "Total",
        "Submit",
    ];
    (0..words)
        .map(|i| vocabulary[i % vocabulary.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_surrounding(c: &mut Criterion) {
    let mut group = c.benchmark_group("no_of_surrounding_chars_in");

    for words in [10, 100, 1000].iter() {
        let text = page_text(*words);
        let literal = SearchPattern::compile("Marker");
        let wildcard = SearchPattern::compile("Mar*r ?eader_1");

        group.bench_with_input(BenchmarkId::new("literal", words), &text, |b, text| {
            b.iter(|| literal.no_of_surrounding_chars_in(black_box(text)));
        });
        group.bench_with_input(BenchmarkId::new("wildcard", words), &text, |b, text| {
            b.iter(|| wildcard.no_of_surrounding_chars_in(black_box(text)));
        });
    }

    group.finish();
}

fn bench_last_occurence(c: &mut Criterion) {
    let mut group = c.benchmark_group("last_occurence");

    for words in [10, 100, 1000].iter() {
        let text = page_text(*words);
        let pattern = SearchPattern::compile("Some*text");

        group.bench_with_input(BenchmarkId::new("greedy", words), &text, |b, text| {
            b.iter(|| pattern.no_of_chars_after_last_occurence_in(black_box(text)));
        });
        group.bench_with_input(BenchmarkId::new("shortest", words), &text, |b, text| {
            b.iter(|| pattern.no_of_chars_after_last_shortest_occurence_in(black_box(text)));
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for source in ["Username", "User*name", "Us?r*na\\*me"].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(source), source, |b, source| {
            b.iter(|| SearchPattern::compile(black_box(source)));
        });
    }

    let cache = PatternCache::new(16);
    group.bench_function("cached", |b| {
        b.iter(|| cache.get_or_compile(black_box("User*name")));
    });

    group.finish();
}

criterion_group!(benches, bench_surrounding, bench_last_occurence, bench_compile);
criterion_main!(benches);
