use std::fs;

use harvester_engine::{ensure_output_dir, Article, AtomicFileWriter, RecordWriter};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn article(id: usize, title: &str) -> Article {
    Article {
        id,
        title: title.to_string(),
        url: format!("https://docs.example.com/pages/{id}"),
        content: Some("<div id=\"content_block\">Grüße</div>".to_string()),
    }
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    assert!(RecordWriter::create(&file_path).is_err());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("doc.json", b"hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "doc.json");
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("doc.json", b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("doc.json", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("doc.json").exists());
}

#[test]
fn record_is_a_self_contained_json_object() {
    let temp = TempDir::new().unwrap();
    let writer = RecordWriter::create(temp.path()).unwrap();

    let path = writer.persist(&article(7, "Getting Started")).unwrap();

    assert_eq!(path.file_name().unwrap(), "Getting Started--7.json");
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "{\n    \"id\": 7,\n    \"title\": \"Getting Started\",\n    \"url\": \"https://docs.example.com/pages/7\",\n    \"content\": \"<div id=\\\"content_block\\\">Grüße</div>\"\n}"
    );
    let back: Article = serde_json::from_str(&text).unwrap();
    assert_eq!(back, article(7, "Getting Started"));
}

#[test]
fn titles_that_sanitize_alike_do_not_overwrite_each_other() {
    let temp = TempDir::new().unwrap();
    let writer = RecordWriter::create(temp.path()).unwrap();

    let first = writer.persist(&article(0, "A/B")).unwrap();
    let second = writer.persist(&article(1, "A:B")).unwrap();

    assert_ne!(first, second);
    let count = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(count, 2);
}

#[test]
fn no_temp_files_are_left_behind() {
    let temp = TempDir::new().unwrap();
    let writer = RecordWriter::create(temp.path()).unwrap();
    writer.persist(&article(0, "Only")).unwrap();

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["Only--0.json".to_string()]);
}

#[test]
fn long_wide_character_titles_are_persisted() {
    let temp = TempDir::new().unwrap();
    let writer = RecordWriter::create(temp.path()).unwrap();
    let title = "\u{1F4D8}".repeat(90);

    let path = writer.persist(&article(3, &title)).unwrap();

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.len() <= 255, "{} bytes", name.len());
    assert!(name.ends_with("--3.json"));
    let record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(record["title"], title.as_str());

    let cjk = "文档".repeat(60);
    let path = writer.persist(&article(4, &cjk)).unwrap();
    assert!(path.file_name().unwrap().len() <= 255);
}
