use hookbot_core::{texts, AttachmentKind, ChatAction, Handler, HandlerResponse, Lang};
use std::sync::Arc;

use super::{attachment_message, services_with, text_message, FakeDrive, FakeLlm, MockBot};
use crate::AttachmentHandler;

fn bot_with_file() -> Arc<MockBot> {
    Arc::new(MockBot {
        file_bytes: Some(vec![1, 2, 3, 4]),
        ..Default::default()
    })
}

#[tokio::test]
async fn test_text_message_continues() {
    let bot = Arc::new(MockBot::default());
    let response = AttachmentHandler::new(Arc::new(services_with(bot)))
        .handle(&text_message("hello"))
        .await
        .unwrap();
    assert_eq!(response, HandlerResponse::Continue);
}

/// **Test: A photo without drive mode lands in photo memory.**
///
/// **Setup:** No LLM configured.
/// **Action:** Handle a captioned photo.
/// **Expected:** One entry with a tg:// reference and the caption; reply photo_saved.
#[tokio::test]
async fn test_photo_saved_to_memory() {
    let bot = bot_with_file();
    let services = Arc::new(services_with(bot.clone()));
    AttachmentHandler::new(services.clone())
        .handle(&attachment_message(AttachmentKind::Photo, "sunset"))
        .await
        .unwrap();

    let photos = services.photos.load(42).await;
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].url, "tg://file/file-abc");
    assert_eq!(photos[0].caption.as_deref(), Some("sunset"));
    assert_eq!(photos[0].desc, None);
    assert_eq!(bot.last_text(), texts(Lang::En).photo_saved);
}

#[tokio::test]
async fn test_photo_described_when_llm_configured() {
    let bot = bot_with_file();
    let services = Arc::new(services_with(bot.clone()).with_llm(Arc::new(FakeLlm::default())));
    AttachmentHandler::new(services.clone())
        .handle(&attachment_message(AttachmentKind::Photo, ""))
        .await
        .unwrap();

    let photos = services.photos.load(42).await;
    assert_eq!(photos[0].caption, None);
    assert_eq!(photos[0].desc.as_deref(), Some("an image of 4 bytes"));
    assert!(bot.last_text().ends_with("an image of 4 bytes"));
}

#[tokio::test]
async fn test_voice_without_drive_gets_hint() {
    let bot = bot_with_file();
    AttachmentHandler::new(Arc::new(services_with(bot.clone())))
        .handle(&attachment_message(AttachmentKind::Voice, ""))
        .await
        .unwrap();
    assert_eq!(bot.last_text(), texts(Lang::En).attachment_hint);
}

/// **Test: Drive mode uploads the downloaded file.**
///
/// **Setup:** Drive mode on, fake Drive client, bot serving 4 bytes.
/// **Action:** Handle a document without a file name.
/// **Expected:** Upload named after the update id with the default MIME; reply carries the link.
#[tokio::test]
async fn test_drive_mode_uploads() {
    let bot = bot_with_file();
    let drive = Arc::new(FakeDrive::default());
    let services = Arc::new(services_with(bot.clone()).with_drive(drive.clone()));
    services.prefs.set_drive_mode(42, true).await.unwrap();

    AttachmentHandler::new(services)
        .handle(&attachment_message(AttachmentKind::Document, ""))
        .await
        .unwrap();

    let uploads = drive.uploads.lock().unwrap().clone();
    assert_eq!(
        uploads,
        vec![(
            "document-100".to_string(),
            "application/octet-stream".to_string(),
            4
        )]
    );
    assert!(bot.actions.lock().unwrap().contains(&ChatAction::UploadDocument));
    let reply = bot.last_text();
    assert!(reply.starts_with(texts(Lang::En).drive_saved));
    assert!(reply.contains("https://drive.example/drive-1"));
}

#[tokio::test]
async fn test_drive_mode_without_client() {
    let bot = bot_with_file();
    let services = Arc::new(services_with(bot.clone()));
    services.prefs.set_drive_mode(42, true).await.unwrap();
    AttachmentHandler::new(services)
        .handle(&attachment_message(AttachmentKind::Photo, ""))
        .await
        .unwrap();
    assert_eq!(bot.last_text(), texts(Lang::En).drive_not_connected);
}

#[tokio::test]
async fn test_drive_download_failure_reports_unavailable() {
    let bot = Arc::new(MockBot::default());
    let services = Arc::new(services_with(bot.clone()).with_drive(Arc::new(FakeDrive::default())));
    services.prefs.set_drive_mode(42, true).await.unwrap();
    AttachmentHandler::new(services)
        .handle(&attachment_message(AttachmentKind::Voice, ""))
        .await
        .unwrap();
    assert_eq!(bot.last_text(), texts(Lang::En).unavailable);
}
