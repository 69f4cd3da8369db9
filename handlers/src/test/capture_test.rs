use hookbot_core::{texts, AttachmentKind, Handler, HandlerResponse, Lang};
use std::sync::Arc;
use storage::NoteSource;

use super::{attachment_message, services_with, text_message, MockBot};
use crate::CaptureHandler;

#[tokio::test]
async fn test_capture_is_inactive_by_default() {
    let bot = Arc::new(MockBot::default());
    let services = Arc::new(services_with(bot.clone()));
    let response = CaptureHandler::new(services.clone())
        .handle(&text_message("just chatting"))
        .await
        .unwrap();
    assert_eq!(response, HandlerResponse::Continue);
    assert_eq!(services.brain.count(4242).await.unwrap(), 0);
}

/// **Test: Learn mode stores the note and acknowledges it.**
///
/// **Setup:** Learn mode on for the sender.
/// **Action:** Handle plain text.
/// **Expected:** One Learn note; reply "learned"; routing ends.
#[tokio::test]
async fn test_learn_mode_remembers_and_replies() {
    let bot = Arc::new(MockBot::default());
    let services = Arc::new(services_with(bot.clone()));
    services.prefs.set_learn_mode(42, true).await.unwrap();

    let response = CaptureHandler::new(services.clone())
        .handle(&text_message("the gate code is 1234"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply(texts(Lang::En).learned.to_string()));
    let notes = services.brain.list(4242).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].text, "the gate code is 1234");
    assert_eq!(notes[0].source, NoteSource::Learn);
}

/// **Test: Autolog stores quietly and lets routing continue.**
#[tokio::test]
async fn test_autolog_is_silent() {
    let bot = Arc::new(MockBot::default());
    let services = Arc::new(services_with(bot.clone()));
    services.prefs.set_autolog(42, true).await.unwrap();

    let response = CaptureHandler::new(services.clone())
        .handle(&text_message("lunch with Anna on Friday"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Continue);
    assert!(bot.texts().is_empty());
    let notes = services.brain.list(4242).await.unwrap();
    assert_eq!(notes[0].source, NoteSource::Autolog);
}

#[tokio::test]
async fn test_capture_skips_commands_and_attachments() {
    let bot = Arc::new(MockBot::default());
    let services = Arc::new(services_with(bot.clone()));
    services.prefs.set_learn_mode(42, true).await.unwrap();
    let h = CaptureHandler::new(services.clone());

    h.handle(&text_message("/todo x")).await.unwrap();
    h.handle(&attachment_message(AttachmentKind::Photo, "caption")).await.unwrap();
    h.handle(&text_message("   ")).await.unwrap();

    assert_eq!(services.brain.count(4242).await.unwrap(), 0);
    assert!(bot.texts().is_empty());
}
