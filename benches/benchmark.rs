//! Benchmarks for rapid_ngram

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rapid_ngram::*;

/// Sample text for benchmarking
const SAMPLE_TEXT: &str = r#"
Machine learning is a subset of artificial intelligence (AI) that provides systems
the ability to automatically learn and improve from experience without being explicitly
programmed. Machine learning focuses on the development of computer programs that can
access data and use it to learn for themselves.

The process of learning begins with observations or data, such as examples, direct
experience, or instruction, in order to look for patterns in data and make better
decisions in the future based on the examples that we provide. The primary aim is to
allow the computers to learn automatically without human intervention or assistance
and adjust actions accordingly.

Deep learning is a subset of machine learning that uses artificial neural networks
with representation learning. The learning can be supervised, semi-supervised or
unsupervised. Deep learning has been applied to various fields including computer
vision, speech recognition, natural language processing, and drug design.

Natural language processing (NLP) is a subfield of linguistics, computer science,
and artificial intelligence concerned with the interactions between computers and
human language. NLP techniques are used to analyze, understand, and generate human
language in a valuable way. Key applications include sentiment analysis, machine
translation, and text summarization.
"#;

fn pipeline_with(config: IndexConfig) -> Pipeline {
    PipelineBuilder::standard()
        .unwrap()
        .with_config(config)
        .build()
        .unwrap()
}

fn benchmark_splitting(c: &mut Criterion) {
    let splitter = UnicodeSentenceSplitter::new();

    c.bench_function("split_sentences", |b| {
        b.iter(|| splitter.split(black_box(SAMPLE_TEXT)))
    });
}

fn benchmark_sanitizing(c: &mut Criterion) {
    let sanitizer = RegexSanitizer::new().unwrap();
    let windows = ["machine learning", "(AI) that", "semi-supervised or", "NLP."];

    c.bench_function("sanitize_windows", |b| {
        b.iter(|| {
            for window in &windows {
                black_box(sanitizer.sanitize(window).unwrap());
            }
        })
    });
}

fn benchmark_extraction(c: &mut Criterion) {
    let splitter = UnicodeSentenceSplitter::new();
    let sanitizer = RegexSanitizer::new().unwrap();

    let mut group = c.benchmark_group("extraction");
    for size in [1, 5, 10].iter() {
        let text = SAMPLE_TEXT.repeat(*size);
        let sentences = splitter.split(&text).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &sentences, |b, sentences| {
            let indexer = NGramIndexer::new(&sanitizer);
            b.iter(|| indexer.index(black_box(sentences)))
        });
    }
    group.finish();
}

fn benchmark_extraction_threads(c: &mut Criterion) {
    let large_text = SAMPLE_TEXT.repeat(10);

    let mut group = c.benchmark_group("extraction_threads");
    for threads in [1, 2, 4].iter() {
        let doc = Document::from_fragments(
            pipeline_with(IndexConfig::default().with_max_threads(*threads)),
            [large_text.as_str()],
        )
        .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(threads), &doc, |b, doc| {
            b.iter(|| doc.extract().unwrap())
        });
    }
    group.finish();
}

fn benchmark_scoring(c: &mut Criterion) {
    let sanitizer = RegexSanitizer::new().unwrap();
    let sentences = UnicodeSentenceSplitter::new()
        .split(&SAMPLE_TEXT.repeat(5))
        .unwrap();
    let frequencies = NGramIndexer::new(&sanitizer).index(&sentences).unwrap();

    c.bench_function("letter_scorer", |b| {
        b.iter(|| LetterScorer.score(black_box("artificial intelligence")))
    });

    let mut group = c.benchmark_group("aggregation");
    group.bench_function("serial", |b| {
        let aggregator = ScoreAggregator::new(&LetterScorer);
        b.iter(|| aggregator.aggregate(black_box(&frequencies)))
    });
    group.bench_function("parallel", |b| {
        let aggregator = ScoreAggregator::new(&LetterScorer).with_parallel(true);
        b.iter(|| aggregator.aggregate(black_box(&frequencies)))
    });
    group.finish();
}

fn benchmark_full_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_document");

    for size in [1, 5, 10].iter() {
        let text = SAMPLE_TEXT.repeat(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            let pipeline = Pipeline::standard().unwrap();
            b.iter(|| Document::new(pipeline.clone(), [black_box(text.as_str())]).unwrap())
        });
    }
    group.finish();
}

fn benchmark_views(c: &mut Criterion) {
    let doc = Document::new(Pipeline::standard().unwrap(), [SAMPLE_TEXT.repeat(5)]).unwrap();

    c.bench_function("sorted_substrings", |b| {
        b.iter(|| black_box(doc.sorted_substrings()))
    });
    c.bench_function("render", |b| b.iter(|| black_box(doc.render())));
    c.bench_function("to_json", |b| b.iter(|| doc.to_json().unwrap()));
}

criterion_group!(
    benches,
    benchmark_splitting,
    benchmark_sanitizing,
    benchmark_extraction,
    benchmark_extraction_threads,
    benchmark_scoring,
    benchmark_full_document,
    benchmark_views,
);

criterion_main!(benches);
