//! Benchmarks for keygraph

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keygraph::*;

/// Tokenized, stopword-filtered sample sentences
const SAMPLE_SENTENCES: &[&[&str]] = &[
    &["machine", "learning", "subset", "artificial", "intelligence", "systems", "learn", "experience"],
    &["machine", "learning", "development", "computer", "programs", "data", "learn"],
    &["learning", "observations", "data", "patterns", "data", "decisions"],
    &["computers", "learn", "human", "intervention", "adjust", "actions"],
    &["deep", "learning", "subset", "machine", "learning", "neural", "networks", "representation", "learning"],
    &["deep", "learning", "supervised", "unsupervised"],
    &["deep", "learning", "computer", "vision", "speech", "recognition", "language", "processing"],
    &["natural", "language", "processing", "linguistics", "computer", "science", "artificial", "intelligence"],
    &["language", "processing", "techniques", "human", "language"],
    &["applications", "sentiment", "analysis", "machine", "translation", "text", "summarization"],
];

fn sample_document(repeat: usize) -> Document {
    Document::from_word_lists(
        (0..repeat)
            .flat_map(|_| SAMPLE_SENTENCES.iter())
            .map(|s| s.iter().copied()),
    )
}

fn benchmark_indexing(c: &mut Criterion) {
    let doc = sample_document(1);

    c.bench_function("index_sentences", |b| {
        b.iter(|| TermFrequencyIndex::index_sentences(black_box(&doc), true))
    });

    let mut group = c.benchmark_group("index_by_size");
    for size in [1, 5, 10, 20].iter() {
        let doc = sample_document(*size);
        group.throughput(Throughput::Elements(doc.term_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| TermFrequencyIndex::index_sentences(black_box(doc), true))
        });
    }
    group.finish();
}

fn benchmark_pruning(c: &mut Criterion) {
    // Ring of triangles joined by bridges
    let mut graph: CooccurrenceGraph<u32, u64> = CooccurrenceGraph::new();
    for n in 0..300u32 {
        graph.add_node(n);
    }
    for t in 0..100u32 {
        let base = t * 3;
        graph.add_edge(&base, &(base + 1), 1).unwrap();
        graph.add_edge(&(base + 1), &(base + 2), 1).unwrap();
        graph.add_edge(&base, &(base + 2), 1).unwrap();
        if t > 0 {
            graph.add_edge(&(base - 1), &base, 1).unwrap();
        }
    }

    c.bench_function("prune_weak_edges", |b| {
        b.iter(|| {
            let mut g = graph.clone();
            black_box(g.prune_weak_edges())
        })
    });

    c.bench_function("connected_components", |b| {
        b.iter(|| black_box(&graph).connected_components().len())
    });
}

fn benchmark_extraction(c: &mut Criterion) {
    let extractor = KeyGraph::new();

    let mut group = c.benchmark_group("keygraph_by_size");
    for size in [1, 5, 10].iter() {
        let doc = sample_document(*size);
        group.throughput(Throughput::Elements(doc.term_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| extractor.extract(black_box(doc)))
        });
    }
    group.finish();

    let docs: Vec<Document> = (0..32).map(|_| sample_document(2)).collect();
    let mut group = c.benchmark_group("batch");
    group.bench_function("sequential", |b| {
        b.iter(|| {
            docs.iter()
                .map(|d| extractor.extract(black_box(d)))
                .collect::<Vec<_>>()
        })
    });
    group.bench_function("parallel", |b| {
        let batch = BatchExtractor::new();
        b.iter(|| batch.extract_all(black_box(&docs)))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_indexing,
    benchmark_pruning,
    benchmark_extraction
);
criterion_main!(benches);
