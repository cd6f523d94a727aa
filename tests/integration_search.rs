#![expect(
    clippy::tests_outside_test_module,
    reason = "integration tests are only compiled in test mode"
)]

// End-to-end recommendation flow against an on-disk corpus, with a
// deterministic embedder standing in for the model server.

use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use travel_planner::corpus::Corpus;
use travel_planner::embeddings::Embedder;
use travel_planner::municipality;
use travel_planner::ranker::{RankError, build_location_index, rank_locations};

struct FixtureEmbedder {
    dimension: usize,
}

impl FixtureEmbedder {
    fn new() -> Self {
        Self { dimension: 32 }
    }
}

impl Embedder for FixtureEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0_f32; self.dimension];
        for word in text.to_lowercase().split_whitespace() {
            let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
            for byte in word.bytes() {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(0x0100_0000_01b3);
            }
            vector[usize::try_from(hash % self.dimension as u64)?] += 1.0;
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn seed_corpus() -> (TempDir, TempDir) {
    let landmarks = TempDir::new().expect("Failed to create landmarks dir");
    let municipalities = TempDir::new().expect("Failed to create municipalities dir");

    fs::write(
        landmarks.path().join("old_san_juan.txt"),
        "Historic colonial fort and cobblestone streets\n",
    )
    .expect("write failed");
    fs::write(
        landmarks.path().join("el_yunque.txt"),
        "Tropical rainforest with waterfalls and hiking trails\n",
    )
    .expect("write failed");
    fs::write(
        municipalities.path().join("san_juan.txt"),
        "Capital municipality containing the old_san_juan historic district\n",
    )
    .expect("write failed");

    (landmarks, municipalities)
}

#[test]
fn corpus_to_ranked_recommendations() {
    let (landmarks, municipalities) = seed_corpus();
    let corpus = Corpus::load(landmarks.path(), municipalities.path()).expect("Failed to load");
    let embedder = FixtureEmbedder::new();

    let index = build_location_index(&corpus, &embedder).expect("Failed to build index");
    assert_eq!(index.len(), corpus.len());

    let keys = corpus.location_ids();
    let ranked = rank_locations(
        "colonial fort and cobblestone streets",
        &keys,
        &index,
        &embedder,
        10,
    )
    .expect("Ranking failed");

    // The fort description shares the most words with the query.
    assert_eq!(ranked[0], "old_san_juan");
    assert_eq!(ranked.len(), corpus.len());

    // Enrichment joins the landmark back to its municipality.
    assert_eq!(
        municipality::resolve(&ranked[0], &corpus.municipalities),
        "san_juan"
    );
    assert_eq!(
        municipality::resolve("el_yunque", &corpus.municipalities),
        municipality::UNKNOWN_MUNICIPALITY
    );
}

#[test]
fn repeated_queries_are_stable() {
    let (landmarks, municipalities) = seed_corpus();
    let corpus = Corpus::load(landmarks.path(), municipalities.path()).expect("Failed to load");
    let embedder = FixtureEmbedder::new();
    let index = build_location_index(&corpus, &embedder).expect("Failed to build index");
    let keys = corpus.location_ids();

    let runs: Vec<_> = (0..3)
        .map(|_| {
            rank_locations("rainforest hiking", &keys, &index, &embedder, 10)
                .expect("Ranking failed")
        })
        .collect();

    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}

#[test]
fn empty_corpus_reports_no_data() {
    let landmarks = TempDir::new().expect("Failed to create temp dir");
    let municipalities = TempDir::new().expect("Failed to create temp dir");
    let corpus = Corpus::load(landmarks.path(), municipalities.path()).expect("Failed to load");
    let embedder = FixtureEmbedder::new();

    let index = build_location_index(&corpus, &embedder).expect("Failed to build index");
    assert!(index.is_empty());

    let err = rank_locations("anything", &corpus.location_ids(), &index, &embedder, 10)
        .expect_err("Empty corpus must signal EmptyIndex");
    assert!(matches!(err, RankError::EmptyIndex));
}
