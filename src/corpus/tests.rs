use super::*;
use std::fs;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, body: &str) {
    fs::write(dir.path().join(name), body).expect("Failed to write test file");
}

#[test]
fn loads_txt_files_with_stem_ids() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_file(&dir, "old_san_juan.txt", "Historic colonial fort\n");
    write_file(&dir, "ponce.txt", "  Art museum and colonial plaza  ");

    let documents = load_documents(dir.path()).expect("Failed to load");

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].id, "old_san_juan");
    assert_eq!(documents[0].text, "Historic colonial fort");
    assert_eq!(documents[1].id, "ponce");
    assert_eq!(documents[1].text, "Art museum and colonial plaza");
}

#[test]
fn skips_non_txt_and_empty_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_file(&dir, "keep.txt", "content");
    write_file(&dir, "ignore.md", "markdown");
    write_file(&dir, "blank.txt", "   \n\t  ");

    let documents = load_documents(dir.path()).expect("Failed to load");

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, "keep");
}

#[test]
fn missing_directory_yields_empty_corpus() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("does_not_exist");

    let documents = load_documents(&missing).expect("Missing dir should not error");
    assert!(documents.is_empty());
}

#[test]
fn documents_sorted_by_filename() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_file(&dir, "zebra.txt", "z");
    write_file(&dir, "alpha.txt", "a");
    write_file(&dir, "mango.txt", "m");

    let documents = load_documents(dir.path()).expect("Failed to load");
    let ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "mango", "zebra"]);
}

#[test]
fn corpus_concatenates_landmarks_before_municipalities() {
    let landmarks = TempDir::new().expect("Failed to create temp dir");
    let municipalities = TempDir::new().expect("Failed to create temp dir");
    write_file(&landmarks, "el_morro.txt", "Spanish fortress");
    write_file(&municipalities, "san_juan.txt", "Capital city, home of el morro");

    let corpus = Corpus::load(landmarks.path(), municipalities.path()).expect("Failed to load");

    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.location_ids(), vec!["el_morro", "san_juan"]);

    let texts: Vec<&str> = corpus.documents().map(|d| d.text.as_str()).collect();
    assert_eq!(texts, vec!["Spanish fortress", "Capital city, home of el morro"]);
}

#[test]
fn empty_corpus_is_valid() {
    let landmarks = TempDir::new().expect("Failed to create temp dir");
    let municipalities = TempDir::new().expect("Failed to create temp dir");

    let corpus = Corpus::load(landmarks.path(), municipalities.path()).expect("Failed to load");
    assert!(corpus.is_empty());
    assert!(corpus.location_ids().is_empty());
}

#[test]
fn display_name_formats_ids() {
    assert_eq!(display_name("old_san_juan"), "Old San Juan");
    assert_eq!(display_name("ponce"), "Ponce");
    assert_eq!(display_name("bosque__seco"), "Bosque Seco");
}

#[test]
fn capitalize_handles_empty_and_unicode() {
    assert_eq!(capitalize(""), "");
    assert_eq!(capitalize("ñublado"), "Ñublado");
    assert_eq!(capitalize("clear sky"), "Clear sky");
}
