use citysheet_core::{
    load_snapshot, AnimationPhase, CityError, DocumentSource, EdgeKey, HoverEvent, Layer,
    LoadOptions, Session, SessionConfig, SheetSnapshot, Viewer,
};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHAIN: &str = r#"{
    "sheet": {
        "rows": [{"path": [[0, 0], [42, 0]]}],
        "cols": [{"path": [[0, 0], [0, -14]]}],
        "cells": [
            {"name": "A", "coord": [0, 0], "weight": 1, "width": 14, "height": 14,
             "value": "1", "used_by": ["B"]},
            {"name": "B", "coord": [14, 0], "weight": 2, "width": 14, "height": 14,
             "value": "2", "used_by": ["C"]},
            {"name": "C", "coord": [28, 0], "weight": 3, "width": 14, "height": 14,
             "value": "3", "used_by": []}
        ]
    }
}"#;

fn write_document(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write");
    file
}

fn path_source(file: &NamedTempFile) -> DocumentSource {
    DocumentSource::Path(file.path().to_path_buf())
}

fn slow_rise() -> SessionConfig {
    SessionConfig {
        animation_delay: Duration::from_secs(3600),
        ..SessionConfig::default()
    }
}

fn arc_highlighted(layers: &[Layer], source: &str, target: &str) -> bool {
    layers
        .iter()
        .find_map(|layer| match layer {
            Layer::Arc(arc) => arc
                .data
                .iter()
                .find(|item| item.source == source && item.target == target)
                .map(|item| item.highlighted),
            _ => None,
        })
        .expect("arc")
}

// ========================================================================
// Loading
// ========================================================================

#[tokio::test]
async fn test_load_from_file() {
    let file = write_document(CHAIN);
    let snapshot = load_snapshot(&path_source(&file), &LoadOptions::default())
        .await
        .unwrap();
    assert_eq!(snapshot.cell_count(), 3);
}

#[tokio::test]
async fn test_load_missing_file_is_load_failure() {
    let source = DocumentSource::Path("/definitely/not/here/sheet_info.json".into());
    let err = load_snapshot(&source, &LoadOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CityError::LoadFailure(_)));
}

#[tokio::test]
async fn test_load_invalid_json_is_load_failure() {
    let file = write_document("{ not json");
    let err = load_snapshot(&path_source(&file), &LoadOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CityError::LoadFailure(_)));
}

#[tokio::test]
async fn test_load_from_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet_info.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHAIN))
        .mount(&server)
        .await;

    let source = DocumentSource::Url(format!("{}/sheet_info.json", server.uri()));
    let snapshot = load_snapshot(&source, &LoadOptions::default())
        .await
        .unwrap();
    assert!(snapshot.contains("C"));
}

#[tokio::test]
async fn test_load_http_error_is_load_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = DocumentSource::Url(format!("{}/sheet_info.json", server.uri()));
    let err = load_snapshot(&source, &LoadOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CityError::LoadFailure(msg) if msg.contains("404")));
}

// ========================================================================
// Session
// ========================================================================

#[tokio::test]
async fn test_start_aborts_on_malformed_sheet() {
    let file = write_document(r#"{"sheet": {"rows": [], "cells": []}}"#);
    let err = Session::start(&path_source(&file), slow_rise())
        .await
        .unwrap_err();
    assert!(matches!(err, CityError::MalformedSheet(_)));
}

#[tokio::test]
async fn test_hover_flow() {
    let file = write_document(CHAIN);
    let session = Session::start(&path_source(&file), slow_rise())
        .await
        .unwrap();

    let idle = session.layers().await.unwrap();
    assert!(!arc_highlighted(&idle, "A", "B"));
    assert!(!arc_highlighted(&idle, "B", "C"));

    let layers = session
        .hover(HoverEvent::Tower {
            name: "C".to_string(),
        })
        .await
        .unwrap();
    assert!(arc_highlighted(&layers, "A", "B"));
    assert!(arc_highlighted(&layers, "B", "C"));
    assert_eq!(
        session.highlighted().await.unwrap(),
        vec![EdgeKey::new("B", "C"), EdgeKey::new("A", "B")]
    );

    let layers = session
        .hover(HoverEvent::Arc {
            source: "A".to_string(),
            target: "B".to_string(),
        })
        .await
        .unwrap();
    assert!(arc_highlighted(&layers, "A", "B"));
    assert!(!arc_highlighted(&layers, "B", "C"));

    session.hover(HoverEvent::Leave).await.unwrap();
    assert!(session.highlighted().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_animation_fires_once_after_delay() {
    let snapshot = SheetSnapshot::from_json_str(CHAIN).unwrap();
    let session = Session::spawn(Viewer::new(snapshot), Duration::from_millis(20));
    assert_eq!(session.phase().await.unwrap(), AnimationPhase::PreAnimation);

    let risen = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if session.phase().await.unwrap() == AnimationPhase::PostAnimation {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(risen.is_ok());

    // Hovering afterwards keeps the towers up.
    session
        .hover(HoverEvent::Tower {
            name: "A".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.phase().await.unwrap(), AnimationPhase::PostAnimation);
}

#[tokio::test]
async fn test_animation_waits_for_delay() {
    let file = write_document(CHAIN);
    let session = Session::start(&path_source(&file), slow_rise())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(session.phase().await.unwrap(), AnimationPhase::PreAnimation);
}

#[tokio::test]
async fn test_handles_share_one_session() {
    let file = write_document(CHAIN);
    let session = Session::start(&path_source(&file), slow_rise())
        .await
        .unwrap();
    let other = session.clone();

    other
        .hover(HoverEvent::Tower {
            name: "B".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        session.highlighted().await.unwrap(),
        vec![EdgeKey::new("A", "B")]
    );
}

#[tokio::test]
async fn test_demo_document_loads() {
    let demo =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/sheet_info.json");
    let session = Session::start(&DocumentSource::Path(demo), slow_rise())
        .await
        .unwrap();

    // D1 also lists Z9, which does not exist.
    let layers = session
        .hover(HoverEvent::Tower {
            name: "D2".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        session.highlighted().await.unwrap(),
        vec![
            EdgeKey::new("C2", "D2"),
            EdgeKey::new("D1", "D2"),
            EdgeKey::new("A2", "C2"),
            EdgeKey::new("B2", "C2"),
        ]
    );
    assert!(arc_highlighted(&layers, "A2", "C2"));
}
