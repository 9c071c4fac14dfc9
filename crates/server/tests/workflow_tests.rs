mod common;

use std::collections::HashSet;
use std::sync::Arc;

use mailform_email::{EmailError, MailComposer};
use mailform_server::workflow::{
    CONFIRMATION, ComposeForm, FileListItem, ModalState, Workflow, WorkflowError,
};

use common::{FailingBackend, data_uri, harness_with, recording_harness};

const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n";

fn form(to: &str, text: &str) -> ComposeForm {
    ComposeForm {
        to_address: Some(to.to_owned()),
        text: Some(text.to_owned()),
    }
}

#[tokio::test]
async fn upload_compose_send_cleanup() {
    let (h, backend) = recording_harness();

    // Upload report.pdf.
    let view = h
        .workflow
        .on_upload(
            Some(vec!["report.pdf".to_owned()]),
            Some(vec![data_uri("application/pdf", PDF_BYTES)]),
        )
        .await
        .unwrap();
    assert!(view.errors.is_empty());
    assert_eq!(view.items.len(), 1);
    match &view.items[0] {
        FileListItem::Link(link) => {
            assert_eq!(link.label, "report.pdf");
            assert_eq!(link.href, "/download/report.pdf");
        }
        FileListItem::Placeholder { .. } => panic!("expected a link"),
    }

    // Open the modal.
    let mut modal = ModalState::default();
    assert!(modal.toggle(Some(1), None));

    // Send.
    let output = h
        .workflow
        .on_send(Some(1), &form("a@example.com", "see attached"))
        .await
        .unwrap();
    assert_eq!(output, CONFIRMATION);

    let sent = backend.sent();
    assert_eq!(sent.len(), 1);
    let msg = &sent[0];
    assert_eq!(msg.subject, "Please find the attached document.");
    assert_eq!(msg.from, common::SENDER);
    assert_eq!(msg.to, vec!["a@example.com".to_owned()]);
    assert_eq!(msg.attachment_names(), vec!["report.pdf"]);
    assert_eq!(&msg.attachments[0].data[..], PDF_BYTES);
    assert_eq!(msg.attachments[0].content_type, "application/octet-stream");
    assert!(msg.html_body.contains("see attached"));

    // Store is empty afterwards.
    assert!(h.store().list().await.unwrap().is_empty());
    let view = h.workflow.file_list().await.unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].text(), "No files yet!");
}

#[tokio::test]
async fn empty_store_shows_placeholder() {
    let (h, _) = recording_harness();
    let view = h.workflow.on_upload(None, None).await.unwrap();
    assert_eq!(
        view.items,
        vec![FileListItem::Placeholder {
            text: "No files yet!".to_owned()
        }]
    );
}

#[tokio::test]
async fn failed_send_keeps_files() {
    let h = harness_with(Arc::new(FailingBackend));
    h.workflow
        .on_upload(
            Some(vec!["a.txt".to_owned(), "b.txt".to_owned()]),
            Some(vec![
                data_uri("text/plain", b"alpha"),
                data_uri("text/plain", b"beta"),
            ]),
        )
        .await
        .unwrap();

    let err = h
        .workflow
        .on_send(Some(1), &form("a@example.com", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Email(EmailError::Transport(_))));

    let names: HashSet<String> = h.store().list().await.unwrap().into_iter().collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains("a.txt") && names.contains("b.txt"));
    assert_eq!(&h.store().read("a.txt").await.unwrap()[..], b"alpha");
}

#[tokio::test]
async fn attachments_are_reread_at_send_time() {
    let (h, backend) = recording_harness();
    h.workflow
        .on_upload(
            Some(vec!["first.txt".to_owned()]),
            Some(vec![data_uri("text/plain", b"original")]),
        )
        .await
        .unwrap();

    // A second upload event and an on-disk edit both land before the send.
    h.workflow
        .on_upload(
            Some(vec!["second.txt".to_owned()]),
            Some(vec![data_uri("text/plain", b"later")]),
        )
        .await
        .unwrap();
    std::fs::write(h.store().root().join("first.txt"), b"edited").unwrap();

    h.workflow
        .on_send(Some(1), &form("a@example.com", "both"))
        .await
        .unwrap();

    let sent = backend.sent();
    let mut names = sent[0].attachment_names();
    names.sort_unstable();
    assert_eq!(names, vec!["first.txt", "second.txt"]);

    let first = sent[0]
        .attachments
        .iter()
        .find(|a| a.filename == "first.txt")
        .unwrap();
    assert_eq!(&first.data[..], b"edited");
}

#[tokio::test]
async fn bad_payload_does_not_block_other_files() {
    let (h, _) = recording_harness();
    let view = h
        .workflow
        .on_upload(
            Some(vec![
                "good.txt".to_owned(),
                "broken.bin".to_owned(),
                "also-good.txt".to_owned(),
            ]),
            Some(vec![
                data_uri("text/plain", b"ok"),
                "data:application/octet-stream,not-base64".to_owned(),
                data_uri("text/plain", b"fine"),
            ]),
        )
        .await
        .unwrap();

    assert_eq!(view.errors.len(), 1);
    assert_eq!(view.errors[0].filename, "broken.bin");
    assert!(view.errors[0].error.starts_with("decode error"));

    let mut names = view.filenames();
    names.sort_unstable();
    assert_eq!(names, vec!["also-good.txt", "good.txt"]);
}

#[tokio::test]
async fn unpaired_entries_are_ignored() {
    let (h, _) = recording_harness();
    let view = h
        .workflow
        .on_upload(
            Some(vec!["a.txt".to_owned(), "b.txt".to_owned()]),
            Some(vec![data_uri("text/plain", b"a")]),
        )
        .await
        .unwrap();
    assert_eq!(view.filenames(), vec!["a.txt"]);
}

#[tokio::test]
async fn missing_contents_saves_nothing() {
    let (h, _) = recording_harness();
    let view = h
        .workflow
        .on_upload(Some(vec!["a.txt".to_owned()]), None)
        .await
        .unwrap();
    assert!(view.filenames().is_empty());
    assert!(h.store().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn zero_send_clicks_do_nothing() {
    let (h, backend) = recording_harness();
    h.store().save_bytes("a.txt", &b"a"[..]).await.unwrap();

    for clicks in [None, Some(0)] {
        let output = h
            .workflow
            .on_send(clicks, &form("a@example.com", "x"))
            .await
            .unwrap();
        assert_eq!(output, "");
    }

    assert!(backend.sent().is_empty());
    assert_eq!(h.store().list().await.unwrap(), vec!["a.txt".to_owned()]);
}

#[tokio::test]
async fn send_with_no_files_sends_without_attachments() {
    let (h, backend) = recording_harness();
    let output = h
        .workflow
        .on_send(Some(1), &form("a@example.com", "nothing attached"))
        .await
        .unwrap();
    assert_eq!(output, CONFIRMATION);
    assert!(backend.sent()[0].attachments.is_empty());
}

#[tokio::test]
async fn missing_text_renders_empty_body_text() {
    let (h, backend) = recording_harness();
    let form = ComposeForm {
        to_address: Some("a@example.com".to_owned()),
        text: None,
    };
    h.workflow.on_send(Some(1), &form).await.unwrap();
    assert_eq!(
        backend.sent()[0].html_body,
        "<html><body><p></p></body></html>"
    );
}

#[tokio::test]
async fn missing_sender_fails_before_cleanup() {
    let dir = tempfile::tempdir().unwrap();
    let store = mailform_core::UploadStore::new(dir.path());
    store.save_bytes("a.txt", &b"a"[..]).await.unwrap();
    let composer = MailComposer::from_source(None, "mail.html", common::TEMPLATE).unwrap();
    let backend = Arc::new(common::RecordingBackend::default());
    let workflow = Workflow::new(store, composer, backend.clone());

    let err = workflow
        .on_send(Some(1), &form("a@example.com", "x"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Email(EmailError::Configuration(_))));
    assert!(backend.sent().is_empty());
    assert_eq!(workflow.store().list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn draft_reflects_form_and_store() {
    let (h, _) = recording_harness();
    h.store().save_bytes("x.bin", &b"xyz"[..]).await.unwrap();

    let draft = h.workflow.draft(&form("b@example.com", "hello")).await.unwrap();
    assert_eq!(draft.recipient, "b@example.com");
    assert_eq!(draft.body_text.as_deref(), Some("hello"));
    assert_eq!(draft.attachments.len(), 1);
    assert_eq!(draft.attachments[0].name, "x.bin");
}
