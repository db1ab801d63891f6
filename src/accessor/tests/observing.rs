use futures::StreamExt;

use super::{Profile, fresh_prefs};
use crate::store::PreferenceStore;

#[tokio::test]
async fn changes_forward_every_committed_key() {
    let prefs = fresh_prefs();
    let mut changes = prefs.changes();

    prefs.put("first", &1i32).unwrap();
    prefs.put("second", &2i32).unwrap();
    prefs.remove("first").unwrap();

    assert_eq!(changes.next().await.unwrap(), "first");
    assert_eq!(changes.next().await.unwrap(), "second");
    assert_eq!(changes.next().await.unwrap(), "first");
}

#[tokio::test]
async fn cancelled_changes_drain_and_terminate() {
    let prefs = fresh_prefs();
    let mut changes = prefs.changes();

    prefs.put("buffered", &1i32).unwrap();
    changes.cancel();
    prefs.put("after-cancel", &2i32).unwrap();

    assert_eq!(changes.next().await.unwrap(), "buffered");
    assert_eq!(changes.next().await, None);
}

#[tokio::test]
async fn cancel_is_idempotent() {
    let prefs = fresh_prefs();
    let mut changes = prefs.changes();

    changes.cancel();
    changes.cancel();

    assert_eq!(changes.next().await, None);
}

#[tokio::test]
async fn dropping_a_stream_releases_its_listener() {
    let prefs = fresh_prefs();

    {
        let _changes = prefs.changes();
    }

    // A commit after the drop must not hit a stale listener.
    prefs.put("k", &1i32).unwrap();
}

#[tokio::test]
async fn observe_emits_only_for_the_watched_key() {
    let prefs = fresh_prefs();
    let mut watched = prefs.observe("watched", 0i32).unwrap();

    prefs.put("other", &99i32).unwrap();
    prefs.put("watched", &7i32).unwrap();

    // The write to "other" produced nothing; the first emission is
    // already the watched key's value.
    assert_eq!(watched.next().await.unwrap().unwrap(), 7);
}

#[tokio::test]
async fn observe_reads_the_value_at_emission_time() {
    let prefs = fresh_prefs();
    let mut watched = prefs.observe("counter", 0i32).unwrap();

    prefs.put("counter", &1i32).unwrap();
    prefs.put("counter", &2i32).unwrap();

    // Two commits, two emissions; both re-read after the second write.
    assert_eq!(watched.next().await.unwrap().unwrap(), 2);
    assert_eq!(watched.next().await.unwrap().unwrap(), 2);
}

#[tokio::test]
async fn independent_subscribers_each_receive_the_notification() {
    let prefs = fresh_prefs();
    let mut first = prefs.observe("k", String::new()).unwrap();
    let mut second = prefs.observe("k", String::new()).unwrap();

    prefs.put("k", &"v".to_string()).unwrap();

    assert_eq!(first.next().await.unwrap().unwrap(), "v");
    assert_eq!(second.next().await.unwrap().unwrap(), "v");
}

#[tokio::test]
async fn dropping_one_subscriber_leaves_the_other_live() {
    let prefs = fresh_prefs();
    let first = prefs.observe("k", 0i32).unwrap();
    let mut second = prefs.observe("k", 0i32).unwrap();

    drop(first);
    prefs.put("k", &5i32).unwrap();

    assert_eq!(second.next().await.unwrap().unwrap(), 5);
}

#[tokio::test]
async fn get_and_observe_yields_the_current_value_first() {
    let prefs = fresh_prefs();
    prefs.put("k", &10i64).unwrap();

    let mut stream = prefs.get_and_observe("k", 0i64).unwrap();
    assert_eq!(stream.next().await.unwrap().unwrap(), 10);

    prefs.put("k", &11i64).unwrap();
    assert_eq!(stream.next().await.unwrap().unwrap(), 11);
}

#[tokio::test]
async fn get_and_observe_yields_the_default_when_absent() {
    let prefs = fresh_prefs();

    let mut stream = prefs.get_and_observe("never-written", 42i32).unwrap();
    assert_eq!(stream.next().await.unwrap().unwrap(), 42);
}

#[tokio::test]
async fn corrupt_value_surfaces_as_an_err_item() {
    let prefs = fresh_prefs();
    let default = Profile {
        name: String::new(),
        age: 0,
    };
    let mut watched = prefs.observe("profile", default).unwrap();

    prefs.store().put_string("profile", "{not json");

    let item = watched.next().await.unwrap();
    assert!(item.is_err());

    // The stream keeps going after the bad emission.
    let good = Profile {
        name: "ok".to_string(),
        age: 1,
    };
    prefs.put("profile", &good).unwrap();
    assert_eq!(watched.next().await.unwrap().unwrap(), good);
}
