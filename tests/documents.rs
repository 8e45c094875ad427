//! Loading instance documents and diffing a guess against a gold annotation

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use arcspan::{diff, document, DocumentError, RenderKind};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_gold_fixture() {
    let gold = document::load(&fixture("gold.toml")).unwrap();
    assert_eq!(gold.tokens.len(), 4);
    assert_eq!(gold.tokens[2].text(), "barks");
    assert_eq!(gold.tokens[2].property("pos"), Some("VBZ"));
    assert_eq!(gold.edges_of_kind(RenderKind::Dependency).len(), 3);
    assert_eq!(gold.edges_of_kind(RenderKind::Span).len(), 1);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = document::load(&fixture("no-such-file.toml"));
    assert!(matches!(result, Err(DocumentError::Io(_))));
}

#[test]
fn test_diff_of_fixtures() {
    let gold = document::load(&fixture("gold.toml")).unwrap();
    let guess = document::load(&fixture("guess.toml")).unwrap();
    let result = diff::diff(&gold, &guess);

    let summary: Vec<(usize, usize, &str, &str)> = result
        .edges
        .iter()
        .map(|e| (e.start, e.end, e.label.as_str(), e.edge_type.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, 1, "NP", "chunk:Match"),
            (1, 0, "det", "dep:Match"),
            (1, 3, "amod", "dep:FP"),
            (2, 1, "nsubj", "dep:Match"),
            (2, 3, "advmod", "dep:FN"),
            (3, 3, "ADVP", "chunk:FP"),
        ]
    );

    assert_eq!(result.edges[0].kind, RenderKind::Span);
    assert_eq!(result.edges[1].note.as_deref(), Some("0.98"));
    assert!(result.edges[4].properties.contains("FN"));
    assert_eq!(result.tokens, guess.tokens);
}

#[test]
fn test_diff_against_itself_has_no_errors() {
    let gold = document::load(&fixture("gold.toml")).unwrap();
    let result = diff::diff(&gold, &gold);
    assert_eq!(result.edges.len(), gold.edges.len());
    assert!(result
        .edges
        .iter()
        .all(|e| e.type_postfix() == Some("Match")));
}
