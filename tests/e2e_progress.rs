//! End-to-end progress flow: player session reconciliation and completion
//! propagation across cache and remote authority.

use std::collections::BTreeSet;

use coursebound::{
    MemoryStore, MockCompletionAuthority, ProgressCache, ProgressSynchronizer, SyncState,
};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn player_session(
    store: &MemoryStore,
    authority: &MockCompletionAuthority,
) -> ProgressSynchronizer<MemoryStore, MockCompletionAuthority> {
    ProgressSynchronizer::new(
        ProgressCache::new(store.clone()),
        authority.clone(),
        "u1",
        "7",
    )
}

#[tokio::test]
async fn full_player_session_online() {
    let store = MemoryStore::new();
    let cache = ProgressCache::new(store.clone());
    cache.write("u1", "7", &set(&["v1", "v2"])).unwrap();

    let authority = MockCompletionAuthority::new();
    authority.seed("u1", "7", &["v2", "v3"]);

    let mut player = player_session(&store, &authority);

    // entering the player reconciles
    let visible = player.reconcile().await;
    assert_eq!(visible, set(&["v1", "v2", "v3"]));
    assert_eq!(player.state(), SyncState::Ready);

    // watching a video to the end
    player.complete("v4").await.unwrap();
    assert_eq!(player.completed(), set(&["v1", "v2", "v3", "v4"]));
    assert!(authority.canonical("u1", "7").contains("v4"));
}

#[tokio::test]
async fn offline_session_then_recovery_on_next_entry() {
    let store = MemoryStore::new();
    let authority = MockCompletionAuthority::new();
    authority.seed("u1", "7", &["remote1"]);
    authority.set_unavailable();

    // first session: remote down throughout
    let mut player = player_session(&store, &authority);
    let visible = player.reconcile().await;
    assert!(visible.is_empty());

    player.complete("local1").await.unwrap();
    assert_eq!(player.completed(), set(&["local1"]));
    // the push never reached the authority
    assert!(!authority.canonical("u1", "7").contains("local1"));

    // re-entering the player after the remote recovers
    authority.set_available();
    let mut player = player_session(&store, &authority);
    let visible = player.reconcile().await;

    // nothing recorded on either side was lost
    assert_eq!(visible, set(&["local1", "remote1"]));
}

#[tokio::test]
async fn replayed_completion_events_change_nothing() {
    let store = MemoryStore::new();
    let authority = MockCompletionAuthority::new();

    let player = player_session(&store, &authority);

    player.complete("v1").await.unwrap();
    player.complete("v1").await.unwrap();
    player.complete("v1").await.unwrap();

    assert_eq!(player.completed(), set(&["v1"]));
    assert_eq!(authority.canonical("u1", "7"), set(&["v1"]));
}

#[tokio::test]
async fn racing_reconciliations_converge_on_the_superset() {
    let store = MemoryStore::new();
    let cache = ProgressCache::new(store.clone());
    cache.write("u1", "7", &set(&["local"])).unwrap();

    let authority = MockCompletionAuthority::new();
    authority.seed("u1", "7", &["remote"]);

    // a fast re-navigation spawns a second reconciliation before the
    // first one's result is observed
    let mut first = player_session(&store, &authority);
    let mut second = player_session(&store, &authority);

    let a = first.reconcile().await;
    let b = second.reconcile().await;

    let expected = set(&["local", "remote"]);
    assert_eq!(a, expected);
    assert_eq!(b, expected);
    assert_eq!(cache.read("u1", "7"), expected);
}

#[tokio::test]
async fn progress_is_scoped_per_identity_and_course() {
    let store = MemoryStore::new();
    let authority = MockCompletionAuthority::new();

    let player = player_session(&store, &authority);
    player.complete("v1").await.unwrap();

    let cache = ProgressCache::new(store.clone());
    assert!(cache.read("u1", "8").is_empty());
    assert!(cache.read("u2", "7").is_empty());
}

#[tokio::test]
async fn reconciled_state_survives_without_the_remote() {
    let store = MemoryStore::new();
    let authority = MockCompletionAuthority::new();
    authority.seed("u1", "7", &["v1", "v2"]);

    let mut player = player_session(&store, &authority);
    player.reconcile().await;

    // next session: remote gone, but the repaired cache serves the merge
    authority.set_unavailable();
    let mut player = player_session(&store, &authority);
    let visible = player.reconcile().await;

    assert_eq!(visible, set(&["v1", "v2"]));
}
