#![allow(missing_docs)]

mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Timelike, Utc};
use vacancy_relay::{ActiveHours, ChatWorker, QueryCommandError, StartOutcome, WorkerConfig};
use vacancy_store::{Experience, MemoryQueryStore, Query, QueryStore};

use support::{GatedSearcher, RecordingChannel, StaticSearcher, fast_worker_config};

const CHAT: i64 = 42;

fn golang() -> Query {
    Query::new(1, 96, "golang", Experience::Between1And3)
}

fn rust() -> Query {
    Query::new(1, 96, "rust", Experience::Any)
}

struct Harness {
    worker: Arc<ChatWorker>,
    store: Arc<MemoryQueryStore>,
    searcher: Arc<StaticSearcher>,
    channel: Arc<RecordingChannel>,
}

fn harness(searcher: StaticSearcher, config: WorkerConfig) -> Harness {
    let store = Arc::new(MemoryQueryStore::new());
    let searcher = Arc::new(searcher);
    let channel = Arc::new(RecordingChannel::default());
    let worker = Arc::new(ChatWorker::new(
        CHAT,
        Vec::new(),
        store.clone(),
        searcher.clone(),
        channel.clone(),
        config,
    ));
    Harness {
        worker,
        store,
        searcher,
        channel,
    }
}

#[tokio::test]
async fn start_without_queries_stays_idle() {
    let h = harness(StaticSearcher::default(), WorkerConfig::default());
    assert_eq!(h.worker.start().await, StartOutcome::NoQueries);
    assert!(!h.worker.is_working());
    assert!(!h.worker.stop(), "stopping an idle worker is a no-op");
}

#[tokio::test]
async fn start_twice_reports_already_running() {
    let h = harness(StaticSearcher::default(), WorkerConfig::default());
    h.worker.add_query(golang()).await.expect("add query");

    assert_eq!(h.worker.start().await, StartOutcome::Started);
    assert_eq!(h.worker.start().await, StartOutcome::AlreadyRunning);
    assert!(h.worker.is_working());

    assert!(h.worker.stop());
    assert!(!h.worker.is_working());
    assert!(!h.worker.stop());
}

#[tokio::test]
async fn duplicate_query_is_rejected_without_second_record() {
    let h = harness(StaticSearcher::default(), WorkerConfig::default());
    h.worker.add_query(golang()).await.expect("first add");

    let error = h
        .worker
        .add_query(golang())
        .await
        .expect_err("duplicate add should fail");
    assert!(matches!(error, QueryCommandError::AlreadyExists));
    assert_eq!(h.worker.queries().await.len(), 1);
    assert_eq!(h.store.len(CHAT).await, 1);
}

#[tokio::test]
async fn remove_checks_bounds_before_storage() {
    let h = harness(StaticSearcher::default(), WorkerConfig::default());

    let error = h.worker.remove_query(1).await.expect_err("empty list");
    assert!(matches!(error, QueryCommandError::EmptyList));

    h.worker.add_query(golang()).await.expect("add golang");
    h.worker.add_query(rust()).await.expect("add rust");

    for index in [0, -1, 3] {
        let error = h
            .worker
            .remove_query(index)
            .await
            .expect_err("index out of range");
        assert!(
            matches!(error, QueryCommandError::IndexOutOfRange { len: 2, .. }),
            "index {index} should be out of range"
        );
    }
    assert_eq!(h.store.len(CHAT).await, 2);

    let removed = h.worker.remove_query(1).await.expect("remove first");
    assert_eq!(removed, golang());
    assert_eq!(h.worker.queries().await, vec![rust()]);
    assert!(!h.store.exists(CHAT, &golang()).await.expect("exists"));
}

#[tokio::test]
async fn remove_of_missing_record_reports_not_found() {
    let h = harness(StaticSearcher::default(), WorkerConfig::default());
    h.worker.add_query(golang()).await.expect("add");
    h.store.remove(CHAT, &golang()).await.expect("external remove");

    let error = h
        .worker
        .remove_query(1)
        .await
        .expect_err("record is gone");
    assert!(matches!(error, QueryCommandError::NotFound(_)));
    assert_eq!(error.user_message(), "This query was already removed.");
    assert!(
        h.worker.queries().await.is_empty(),
        "stale entry is dropped from memory"
    );
}

#[tokio::test]
async fn check_now_notifies_each_vacancy_once() {
    let searcher = StaticSearcher::default()
        .with_results("golang", &["101", "102"])
        .with_results("rust", &["102", "103"]);
    let h = harness(searcher, WorkerConfig::default());
    h.worker.add_query(golang()).await.expect("add golang");
    h.worker.add_query(rust()).await.expect("add rust");

    assert_eq!(h.worker.check_now().await, 2);
    assert_eq!(h.searcher.calls(), 2);
    let sent = h.channel.sent();
    assert_eq!(sent.len(), 3, "shared id 102 must be announced once");
    assert!(sent.iter().all(|(recipient, _)| recipient == "42"));
    for id in ["101", "102", "103"] {
        let link = format!("https://hh.ru/vacancy/{id}");
        assert_eq!(
            sent.iter().filter(|(_, text)| text.contains(&link)).count(),
            1,
            "vacancy {id} should be announced exactly once"
        );
    }

    assert_eq!(h.worker.check_now().await, 2);
    assert_eq!(h.channel.sent().len(), 3, "second pass finds nothing new");
}

#[tokio::test]
async fn search_failure_is_not_fatal() {
    let h = harness(StaticSearcher::failing(), WorkerConfig::default());
    h.worker.add_query(golang()).await.expect("add");

    assert_eq!(h.worker.check_now().await, 1);
    assert!(h.channel.sent().is_empty());
}

#[tokio::test]
async fn running_loop_searches_until_stopped() {
    let searcher = StaticSearcher::default().with_results("golang", &["201"]);
    let h = harness(searcher, fast_worker_config(Duration::from_millis(50)));
    h.worker.add_query(golang()).await.expect("add");

    assert_eq!(h.worker.start().await, StartOutcome::Started);
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(h.searcher.calls() >= 2, "loop should tick repeatedly");
    assert_eq!(h.channel.sent().len(), 1);

    assert!(h.worker.stop());
    tokio::time::sleep(Duration::from_millis(100)).await;
    let calls_after_stop = h.searcher.calls();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(h.searcher.calls(), calls_after_stop);
}

#[tokio::test]
async fn status_reflects_loop_state() {
    let h = harness(StaticSearcher::default(), WorkerConfig::default());
    h.worker.add_query(golang()).await.expect("add");

    let status = h.worker.status().await;
    assert!(!status.working);
    assert_eq!(status.query_count, 1);

    h.worker.start().await;
    assert!(h.worker.status().await.working);
    h.worker.stop();
}

#[tokio::test]
async fn ticks_outside_active_hours_do_not_search() {
    let hour = Utc::now().hour();
    // One-hour window starting two hours from now, so the test cannot drift into it.
    let config = WorkerConfig {
        active_hours: ActiveHours::new((hour + 2) % 24, (hour + 3) % 24, 0),
        ..fast_worker_config(Duration::from_millis(50))
    };
    let searcher = StaticSearcher::default().with_results("golang", &["401"]);
    let h = harness(searcher, config);
    h.worker.add_query(golang()).await.expect("add");

    assert_eq!(h.worker.start().await, StartOutcome::Started);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(h.worker.stop());

    assert_eq!(h.searcher.calls(), 0);
    assert!(h.channel.sent().is_empty());
}

#[tokio::test]
async fn stop_lets_in_flight_search_finish() {
    let searcher = Arc::new(GatedSearcher::new(&["501"]));
    let store = Arc::new(MemoryQueryStore::new());
    let channel = Arc::new(RecordingChannel::default());
    let worker = Arc::new(ChatWorker::new(
        CHAT,
        Vec::new(),
        store,
        searcher.clone(),
        channel.clone(),
        fast_worker_config(Duration::from_millis(50)),
    ));
    worker.add_query(golang()).await.expect("add");

    assert_eq!(worker.start().await, StartOutcome::Started);
    tokio::time::timeout(Duration::from_secs(2), searcher.wait_entered())
        .await
        .expect("first tick should launch a search");
    assert!(worker.stop());
    assert!(channel.sent().is_empty());

    searcher.release();
    tokio::time::timeout(Duration::from_secs(2), async {
        while channel.sent().is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("in-flight search should still notify after stop");

    let texts = channel.sent_texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].ends_with("https://hh.ru/vacancy/501"));
}
