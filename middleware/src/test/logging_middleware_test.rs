//! LoggingMiddleware never vetoes and never fails.

use super::sample_message;
use crate::LoggingMiddleware;
use hookbot_core::{HandlerResponse, Middleware};

#[tokio::test]
async fn test_logging_middleware_lets_every_message_through() {
    let mw = LoggingMiddleware;
    for content in ["/start", "weather in Kyiv", ""] {
        assert!(mw.before(&sample_message(1, content)).await.unwrap());
    }
}

#[tokio::test]
async fn test_logging_middleware_after_accepts_any_outcome() {
    let mw = LoggingMiddleware;
    let msg = sample_message(1, "hello");
    for response in [
        HandlerResponse::Reply("hi".to_string()),
        HandlerResponse::Stop,
        HandlerResponse::Continue,
    ] {
        assert!(mw.after(&msg, &response).await.is_ok());
    }
}
