//! State store selection: STATE_STORE=sqlite persists dedup markers and prefs in the file.

mod common;

use common::{test_config, text_update, MockBot, SECRET};
use hookbot::{build_bot_components, create_state_store, DispatchOutcome};
use middleware::SecretCandidates;
use std::sync::Arc;
use tempfile::TempDir;

fn secret() -> SecretCandidates {
    SecretCandidates {
        header: Some(SECRET.to_string()),
        ..Default::default()
    }
}

/// **Test: Dedup survives a restart on the SQLite store.**
///
/// **Setup:** STATE_STORE=sqlite in a temp dir; one update dispatched.
/// **Action:** Reopen the store with fresh components and redeliver the update.
/// **Expected:** The redelivery is a Duplicate and the bot sent only once.
#[tokio::test]
async fn test_sqlite_store_dedups_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = test_config(Some(SECRET), "production");
    config.base.state_store = "sqlite".to_string();
    config.base.database_url = temp_dir
        .path()
        .join("nested/state.db")
        .display()
        .to_string();

    let update = text_update(500, 3, "/start");
    let bot = Arc::new(MockBot::default());

    let kv = create_state_store(&config).await.unwrap();
    let components = build_bot_components(&config, kv, bot.clone()).unwrap();
    assert!(matches!(
        components.dispatcher.dispatch(&secret(), update.as_bytes()).await,
        DispatchOutcome::Routed(_)
    ));

    let kv = create_state_store(&config).await.unwrap();
    let components = build_bot_components(&config, kv, bot.clone()).unwrap();
    assert_eq!(
        components.dispatcher.dispatch(&secret(), update.as_bytes()).await,
        DispatchOutcome::Duplicate
    );
    assert_eq!(bot.sent().len(), 1);
}

#[tokio::test]
async fn test_memory_store_is_the_default() {
    let config = test_config(Some(SECRET), "production");
    let kv = create_state_store(&config).await.unwrap();
    kv.put("k", "v", None).await.unwrap();
    assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("v"));
}
