//! Integration tests for rapid_ngram

use rapid_ngram::*;
use std::sync::Arc;
use std::thread;

/// Sample text for testing
const SAMPLE_TEXT: &str = r#"
Machine learning is a subset of artificial intelligence (AI) that provides systems
the ability to automatically learn and improve from experience without being explicitly
programmed. Machine learning focuses on the development of computer programs that can
access data and use it to learn for themselves.

The process of learning begins with observations or data, such as examples, direct
experience, or instruction, in order to look for patterns in data. Dr. Smith said so,
e.g. in his lecture. Deep learning is a subset of machine learning!
"#;

fn standard() -> Pipeline {
    Pipeline::standard().unwrap()
}

fn with_threads(threads: usize) -> Pipeline {
    PipelineBuilder::standard()
        .unwrap()
        .with_config(IndexConfig::default().with_max_threads(threads))
        .build()
        .unwrap()
}

/// Count the non-empty cleaned windows the hard way.
fn expected_window_count(text: &str) -> u64 {
    let splitter = UnicodeSentenceSplitter::new();
    let sanitizer = RegexSanitizer::new().unwrap();
    let mut total = 0;
    for sentence in splitter.split(text).unwrap() {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        for i in 0..words.len() {
            for j in i + 1..=usize::min(i + 3, words.len()) {
                let cleaned = sanitizer.sanitize(&words[i..j].join(" ")).unwrap();
                if !cleaned.to_lowercase().trim().is_empty() {
                    total += 1;
                }
            }
        }
    }
    total
}

#[test]
fn test_full_pipeline() {
    let doc = Document::new(standard(), [SAMPLE_TEXT]).unwrap();

    assert_eq!(doc.state(), DocumentState::Scored);
    assert_eq!(doc.count("machine learning"), Some(3));
    assert_eq!(doc.count("learning"), Some(5));
    assert!(doc.count("ai").is_some());

    let frequencies = doc.frequencies().unwrap();
    let scored = doc.scored_index().unwrap();
    assert_eq!(scored.cache.len(), frequencies.len());
    for (ngram, _) in frequencies.iter() {
        assert!(scored.cache.get(ngram).is_some(), "{ngram} was not scored");
    }
    for scheme in Scheme::ALL {
        let index = scored.inverse.get(scheme);
        assert_eq!(index.entry_count(), frequencies.len());
        for (_, bucket) in index.iter() {
            assert!(bucket.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}

#[test]
fn test_cat_example() {
    let doc = Document::new(standard(), ["The cat sat. The cat ran."]).unwrap();

    let sorted = doc.sorted_substrings();
    let head: Vec<(&str, u64)> = sorted
        .iter()
        .take(3)
        .map(|e| (e.ngram.as_str(), e.count))
        .collect();
    assert_eq!(head, vec![("cat", 2), ("the", 2), ("the cat", 2)]);

    for ngram in ["sat", "cat sat", "the cat sat", "ran", "cat ran", "the cat ran"] {
        assert_eq!(doc.count(ngram), Some(1), "{ngram}");
    }
}

#[test]
fn test_sum_invariant() {
    let doc = Document::new(standard(), [SAMPLE_TEXT]).unwrap();
    assert_eq!(
        doc.frequencies().unwrap().total(),
        expected_window_count(SAMPLE_TEXT)
    );
}

#[test]
fn test_punctuation_windows_excluded() {
    let doc = Document::new(standard(), ["alpha -- beta"]).unwrap();
    let frequencies = doc.frequencies().unwrap();

    assert!(frequencies.get("").is_none());
    // Six raw windows, one of which cleans to nothing.
    assert_eq!(frequencies.total(), 5);
    assert!(frequencies.len() < 6);
}

#[test]
fn test_fragments_joined_with_space() {
    let doc = Document::new(standard(), ["one", "two", "three"]).unwrap();
    assert_eq!(doc.input(), "one two three");
    assert_eq!(doc.count("one two three"), Some(1));
}

#[test]
fn test_zero_fragments() {
    let err = Document::new(standard(), Vec::<&str>::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
}

#[test]
fn test_deterministic_across_thread_counts() {
    let baseline = Document::new(with_threads(1), [SAMPLE_TEXT]).unwrap();
    let expected_sorted = baseline.sorted_substrings();
    let expected_render = baseline.render();
    let expected_json = baseline.to_json().unwrap();

    for threads in [2, 4, 8] {
        let doc = Document::new(with_threads(threads), [SAMPLE_TEXT]).unwrap();
        assert_eq!(doc.sorted_substrings(), expected_sorted);
        assert_eq!(doc.render(), expected_render);
        assert_eq!(doc.to_json().unwrap(), expected_json);
        for scheme in Scheme::ALL {
            assert_eq!(
                view::render_inverse(&doc.inverse_index(scheme).unwrap()),
                view::render_inverse(&baseline.inverse_index(scheme).unwrap())
            );
        }
    }
}

#[test]
fn test_parallel_scoring_matches_serial() {
    let parallel = PipelineBuilder::standard()
        .unwrap()
        .with_config(IndexConfig::default().with_parallel_scoring(true))
        .build()
        .unwrap();

    let serial_doc = Document::new(standard(), [SAMPLE_TEXT]).unwrap();
    let parallel_doc = Document::new(parallel, [SAMPLE_TEXT]).unwrap();
    assert_eq!(
        serial_doc.scored_index().unwrap(),
        parallel_doc.scored_index().unwrap()
    );
}

#[test]
fn test_reextraction_is_not_cumulative() {
    let doc = Document::new(standard(), [SAMPLE_TEXT]).unwrap();
    let first = doc.sorted_substrings();

    doc.extract().unwrap();
    assert_eq!(doc.state(), DocumentState::Indexed);
    assert_eq!(doc.sorted_substrings(), first);

    doc.extract().unwrap();
    assert_eq!(doc.sorted_substrings(), first);
}

#[test]
fn test_render_switches_on_scores() {
    let doc = Document::from_fragments(standard(), ["go go"]).unwrap();
    doc.extract().unwrap();
    assert_eq!(doc.render(), "\"go\": 2\n\"go go\": 1\n");

    doc.score().unwrap();
    let rendered = doc.render();
    assert_eq!(rendered.lines().count(), 2);
    assert!(rendered.lines().all(|l| l.contains("[Eights ")));
}

#[test]
fn test_single_unscoreable_ngram_aborts_scoring() {
    let pipeline = PipelineBuilder::standard()
        .unwrap()
        .with_scorer(|input: &str| -> Result<SchemeScores> {
            if input == "cat ran" {
                Err(NgramError::scoring(input, "cannot score"))
            } else {
                LetterScorer.score(input)
            }
        })
        .build()
        .unwrap();

    // First pass over text without the poison n-gram succeeds.
    let doc = Document::from_fragments(pipeline.clone(), ["The cat sat."]).unwrap();
    doc.extract().unwrap();
    doc.score().unwrap();
    let scored_before = doc.scored_index().unwrap();

    // Re-scoring the same index still succeeds and is a full rebuild.
    doc.score().unwrap();
    assert_eq!(*doc.scored_index().unwrap(), *scored_before);

    // A document containing the poison n-gram never gets scores.
    let poisoned = Document::from_fragments(pipeline.clone(), ["The cat ran."]).unwrap();
    poisoned.extract().unwrap();
    let err = poisoned.score().unwrap_err();
    assert_eq!(err.failures().len(), 1);
    assert_eq!(poisoned.state(), DocumentState::Indexed);
    assert!(poisoned.scored_index().is_none());

    // The construction entrypoint wraps it as a pipeline error.
    let err = Document::new(pipeline, ["The cat ran."]).unwrap_err();
    match err {
        NgramError::Pipeline { stage, .. } => assert_eq!(stage, Pass::Scoring),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_failed_rescore_keeps_previous_scores() {
    let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    // Succeeds for the first pass, fails every pass after.
    let pipeline = PipelineBuilder::standard()
        .unwrap()
        .with_scorer(move |input: &str| -> Result<SchemeScores> {
            if input == "the cat sat" {
                let seen = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                if seen > 0 {
                    return Err(NgramError::scoring(input, "flaky"));
                }
            }
            LetterScorer.score(input)
        })
        .build()
        .unwrap();

    let doc = Document::new(pipeline, ["The cat sat."]).unwrap();
    let before = doc.scored_index().unwrap();

    assert!(doc.score().is_err());
    assert_eq!(doc.state(), DocumentState::Scored);
    assert!(Arc::ptr_eq(&before, &doc.scored_index().unwrap()));
}

#[test]
fn test_failed_reextraction_keeps_previous_indices() {
    let failing = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let switch = Arc::clone(&failing);
    let pipeline = PipelineBuilder::standard()
        .unwrap()
        .with_sanitizer(move |span: &str| -> Result<String> {
            if switch.load(std::sync::atomic::Ordering::SeqCst) {
                Err(NgramError::sanitize(span, "sanitizer went away"))
            } else {
                Ok(span.trim().to_lowercase())
            }
        })
        .build()
        .unwrap();

    let doc = Document::new(pipeline, ["The cat sat. The cat ran."]).unwrap();
    let frequencies = doc.frequencies().unwrap();
    let scored = doc.scored_index().unwrap();

    failing.store(true, std::sync::atomic::Ordering::SeqCst);
    let err = doc.extract().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Sanitize);

    assert_eq!(doc.state(), DocumentState::Scored);
    assert!(Arc::ptr_eq(&frequencies, &doc.frequencies().unwrap()));
    assert!(Arc::ptr_eq(&scored, &doc.scored_index().unwrap()));
    assert_eq!(doc.count("the cat"), Some(2));
}

#[test]
fn test_record_with_repeated_bucket_entry_rejected() {
    let doc = Document::new(standard(), ["ab cd"]).unwrap();
    let mut record = doc.to_record();
    record.simple = InverseScoreIndex::new();
    for _ in 0..3 {
        record.simple.push(3, "ab");
    }
    assert_eq!(record.simple.entry_count(), record.scores.len());

    let err = Document::from_record(standard(), record).unwrap_err();
    assert!(matches!(err, NgramError::InvalidRecord { .. }));
}

#[test]
fn test_render_prints_keys_verbatim() {
    let doc = Document::new(standard(), ["İstanbul"]).unwrap();
    assert_eq!(doc.count("i\u{307}stanbul"), Some(1));
    assert!(doc.render().starts_with("\"i\u{307}stanbul\": 1 [English "));
}

#[test]
fn test_failures_are_all_reported() {
    let pipeline = PipelineBuilder::standard()
        .unwrap()
        .with_sanitizer(|span: &str| -> Result<String> {
            if span.chars().any(|c| c.is_ascii_digit()) {
                Err(NgramError::sanitize(span, "digits not allowed"))
            } else {
                Ok(span.trim().to_string())
            }
        })
        .with_config(IndexConfig::default().with_max_window(1))
        .build()
        .unwrap();

    let err = Document::new(pipeline, ["a 1 b. c 2 d. e f."]).unwrap_err();
    let failures = err.failures();
    assert_eq!(failures.len(), 2);
    assert!(failures.iter().all(|f| f.kind() == ErrorKind::Sanitize));
}

#[test]
fn test_unconfigured_sanitizer() {
    let pipeline = PipelineBuilder::standard()
        .unwrap()
        .without_sanitizer()
        .build()
        .unwrap();
    let doc = Document::from_fragments(pipeline, ["text"]).unwrap();
    let err = doc.extract().unwrap_err();
    assert_eq!(err, NgramError::unconfigured("sanitizer"));
    assert_eq!(doc.state(), DocumentState::Empty);
}

#[test]
fn test_concurrent_readers_see_whole_indices() {
    let doc = Arc::new(Document::new(standard(), [SAMPLE_TEXT]).unwrap());
    let expected = doc.sorted_substrings();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let doc = Arc::clone(&doc);
            let expected = expected.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let sorted = doc.sorted_substrings();
                    assert_eq!(sorted, expected);
                    if let Some(scored) = doc.scored_index() {
                        assert_eq!(scored.cache.len(), expected.len());
                    }
                }
            })
        })
        .collect();

    for _ in 0..10 {
        doc.extract().unwrap();
        doc.score().unwrap();
    }
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(doc.state(), DocumentState::Scored);
}

#[test]
fn test_json_round_trip() {
    let doc = Document::new(standard(), [SAMPLE_TEXT]).unwrap();
    let json = doc.to_json().unwrap();
    let restored = Document::from_json(standard(), &json).unwrap();

    assert_eq!(restored.input(), doc.input());
    assert_eq!(restored.sorted_substrings(), doc.sorted_substrings());
    assert_eq!(restored.document_scores(), doc.document_scores());
    assert_eq!(
        restored.inverse_index(Scheme::Jewish),
        doc.inverse_index(Scheme::Jewish)
    );

    let indexed = Document::from_fragments(standard(), ["x y"]).unwrap();
    indexed.extract().unwrap();
    let restored = Document::from_json(standard(), &indexed.to_json().unwrap()).unwrap();
    assert_eq!(restored.state(), DocumentState::Indexed);
}

#[test]
fn test_tampered_record_rejected() {
    let doc = Document::new(standard(), ["The cat sat."]).unwrap();
    let mut record = doc.to_record();
    record.scores.remove("cat");

    let err = Document::from_record(standard(), record).unwrap_err();
    assert!(matches!(err, NgramError::InvalidRecord { .. }));
}

#[test]
fn test_unicode_text() {
    let doc = Document::new(standard(), ["Café résumé naïve. 日本語 テスト。"]).unwrap();
    assert_eq!(doc.count("café résumé"), Some(1));
    assert!(doc.count("日本語").is_some());
}
