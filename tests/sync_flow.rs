//! End-to-end flow: convert containers to JSON, discover artifacts, and sync
//! them into mocked vector stores.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use httpmock::{Method::GET, Method::POST, MockServer};
use serde_json::json;
use zip::ZipWriter;
use zip::write::FileOptions;

use docsync::config::EnvSource;
use docsync::extract::convert_directory;
use docsync::sync::{
    AccountOutcome, SyncError, SyncOptions, discover_documents, sync_accounts,
};
use docsync::vector_store::VectorStoreClient;

fn write_archive(path: &Path, entries: &[(&str, &str)]) {
    let file = fs::File::create(path).expect("create archive");
    let mut zip = ZipWriter::new(file);
    for (name, body) in entries {
        zip.start_file(*name, FileOptions::default())
            .expect("start entry");
        zip.write_all(body.as_bytes()).expect("write entry");
    }
    zip.finish().expect("finish archive");
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut xml = String::from(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for paragraph in paragraphs {
        xml.push_str(&format!("<w:p><w:r><w:t>{paragraph}</w:t></w:r></w:p>"));
    }
    xml.push_str("</w:body></w:document>");
    write_archive(path, &[("word/document.xml", &xml)]);
}

fn write_pptx(path: &Path, slides: &[(&str, &str)]) {
    let entries: Vec<(String, String)> = slides
        .iter()
        .map(|(entry, text)| {
            (
                format!("ppt/slides/{entry}"),
                format!(
                    r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><p:cSld><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:cSld></p:sld>"#
                ),
            )
        })
        .collect();
    let borrowed: Vec<(&str, &str)> = entries
        .iter()
        .map(|(name, body)| (name.as_str(), body.as_str()))
        .collect();
    write_archive(path, &borrowed);
}

fn env_with(pairs: &[(&str, &str)]) -> EnvSource {
    let process: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    EnvSource::from_parts(HashMap::new(), process)
}

#[test]
fn conversion_then_discovery_produces_renderable_artifacts() {
    let workspace = tempfile::tempdir().expect("tempdir");
    write_docx(&workspace.path().join("board minutes.docx"), &["A", "B"]);
    write_pptx(
        &workspace.path().join("kickoff.pptx"),
        &[("slide10.xml", "Closing"), ("slide2.xml", "Agenda")],
    );
    fs::write(workspace.path().join("corrupt.pptx"), b"junk").expect("write corrupt");

    let summary = convert_directory(workspace.path());
    assert_eq!(summary.converted, 2);
    assert_eq!(summary.failed, 1);

    let documents = discover_documents(workspace.path()).expect("discover");
    let ids: Vec<&str> = documents
        .iter()
        .map(|doc| doc.document_id.as_str())
        .collect();
    assert_eq!(ids, vec!["board_minutes", "kickoff"]);

    assert_eq!(
        documents[0].text,
        "# Source: board minutes.json\nType: docx\nA\nB"
    );
    // Slide 2 renders before slide 10 despite the archive listing order.
    assert_eq!(
        documents[1].text,
        "# Source: kickoff.json\nType: pptx\nSlide 2\nAgenda\n\nSlide 10\nClosing"
    );
}

#[tokio::test]
async fn upload_failures_abort_one_account_but_not_the_next() {
    let server = MockServer::start_async().await;

    let upload = server
        .mock_async(|when, then| {
            when.method(POST).path("/files");
            then.status(200).json_body(json!({ "id": "file-1" }));
        })
        .await;
    // MSD's store rejects the attachment; AG Barr's store accepts it.
    server
        .mock_async(|when, then| {
            when.method(POST).path("/vector_stores/vs-bad/files");
            then.status(500).body("boom");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/vector_stores/vs-good/files");
            then.status(200)
                .json_body(json!({ "id": "file-1", "status": "completed" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/vector_stores/vs-good/files/file-1");
            then.status(200)
                .json_body(json!({ "id": "file-1", "status": "completed" }));
        })
        .await;

    let data_root = tempfile::tempdir().expect("tempdir");
    let msd_dir = data_root.path().join("TMC/json");
    fs::create_dir_all(&msd_dir).expect("mkdir");
    for name in ["first.json", "second.json"] {
        fs::write(
            msd_dir.join(name),
            r#"{"type":"docx","file":"a.docx","paragraphs":["A"]}"#,
        )
        .expect("write artifact");
    }
    let agb_dir = data_root.path().join("AG Barr/json");
    fs::create_dir_all(&agb_dir).expect("mkdir");
    fs::write(
        agb_dir.join("brief.json"),
        r#"{"type":"pptx","file":"b.pptx","slides":[{"slide_number":1,"text":["Hi"]}]}"#,
    )
    .expect("write artifact");

    let client =
        VectorStoreClient::new("sk-test".to_string(), Some(server.base_url())).expect("client");
    let env = env_with(&[("TMC_VS", "vs-bad"), ("AGB_VS", "vs-good")]);
    let options = SyncOptions {
        clients: Some(vec!["msd".to_string(), "ag-barr".to_string()]),
        dry_run: false,
        data_root: data_root.path().to_path_buf(),
    };

    let reports = sync_accounts(&client, &env, &options).await;
    assert!(matches!(
        reports[0].outcome,
        AccountOutcome::Failed(SyncError::Upload(_))
    ));
    assert!(matches!(
        reports[1].outcome,
        AccountOutcome::Synced { documents: 1 }
    ));

    // MSD's first failure aborts its second document, so only two file
    // uploads happen in total: MSD's first and AG Barr's only document.
    assert_eq!(upload.hits_async().await, 2);
}

#[tokio::test]
async fn dry_run_syncs_without_any_network_calls() {
    let data_root = tempfile::tempdir().expect("tempdir");
    let dir = data_root.path().join("St Gobain/json");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(
        dir.join("plant tour.json"),
        r#"{"type":"docx","file":"p.docx","paragraphs":["Notes"]}"#,
    )
    .expect("write artifact");

    // Nothing listens on this port; any network call would fail the sync.
    let client = VectorStoreClient::new(
        "sk-test".to_string(),
        Some("http://127.0.0.1:9".to_string()),
    )
    .expect("client");
    let env = env_with(&[("SG_VS", "vs-sg")]);
    let options = SyncOptions {
        clients: Some(vec!["saint-gobain".to_string()]),
        dry_run: true,
        data_root: data_root.path().to_path_buf(),
    };

    let reports = sync_accounts(&client, &env, &options).await;
    assert!(matches!(
        reports[0].outcome,
        AccountOutcome::Synced { documents: 1 }
    ));
}
