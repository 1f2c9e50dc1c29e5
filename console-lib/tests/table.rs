//! Remote data table driven by in-memory loaders.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use console_lib::api::FnLoader;
use console_lib::api::Loader;
use console_lib::api::query::ListParams;
use console_lib::api::query::PageResult;
use console_lib::api::query::PageSize;
use console_lib::error::ApiError;
use console_lib::error::Error;
use console_lib::error::TableError;
use console_lib::model::Record;
use console_lib::model::Row;
use console_lib::model::RowId;
use console_lib::table::Column;
use console_lib::table::DeletePhase;
use console_lib::table::RemoteTable;
use console_lib::table::RowActions;
use console_lib::table::TableEvent;
use serde_json::json;
use tokio::sync::oneshot;

type Reply = Result<PageResult<Record>, Error>;

fn rows(prefix: &str, count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record::from_value(json!({"id": format!("{prefix}{i}"), "name": prefix})).unwrap())
        .collect()
}

/// A loader whose responses are released by the test, per page number.
#[derive(Default)]
struct GatedLoader {
    gates: Mutex<HashMap<u32, VecDeque<oneshot::Receiver<Reply>>>>,
    calls: Mutex<Vec<ListParams>>,
}

impl GatedLoader {
    /// Queues a gate for the next request of `page` (1-based).
    fn gate(&self, page: u32) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().entry(page).or_default().push_back(rx);
        tx
    }

    fn source(self: &Arc<Self>) -> Arc<dyn Loader<Record>> {
        Arc::clone(self) as Arc<dyn Loader<Record>>
    }

    fn calls(&self) -> Vec<ListParams> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Loader<Record> for GatedLoader {
    async fn load(&self, params: ListParams) -> Result<PageResult<Record>, Error> {
        self.calls.lock().unwrap().push(params.clone());
        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(&params.page)
            .and_then(VecDeque::pop_front);
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(ApiError::parse("gate dropped").into())),
            None => Ok(PageResult::default()),
        }
    }
}

/// A loader serving a fixed, mutable data set.
fn dataset(data: Arc<Mutex<Vec<Record>>>, calls: Arc<Mutex<Vec<ListParams>>>) -> Arc<dyn Loader<Record>> {
    Arc::new(FnLoader::new(move |params: ListParams| {
        calls.lock().unwrap().push(params.clone());
        let data = data.lock().unwrap().clone();
        async move {
            let limit = params.limit.get() as usize;
            let total = data.len();
            let pages = total.div_ceil(limit) as u32;
            let start = (params.page as usize - 1) * limit;
            let page = data.into_iter().skip(start).take(limit).collect();
            Ok(PageResult::new(page, total as u64, pages))
        }
    }))
}

#[derive(Default)]
struct DeleteRecorder {
    deleted: Mutex<Vec<RowId>>,
    fail: bool,
}

#[async_trait]
impl RowActions<Record> for DeleteRecorder {
    async fn on_delete(&self, row: &Record) -> Result<(), Error> {
        self.deleted.lock().unwrap().push(row.row_id());
        if self.fail {
            Err(ApiError::http(500, "could not delete").into())
        } else {
            Ok(())
        }
    }
}

#[tokio::test]
async fn test_first_page_scenario() {
    let loader = Arc::new(GatedLoader::default());
    let gate = loader.gate(1);
    let mut table = RemoteTable::builder(loader.source())
        .column(Column::new("Name", "name"))
        .build();

    gate.send(Ok(PageResult::new(rows("a", 10), 25, 3))).unwrap();
    table.settle().await;

    let calls = loader.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].page, 1);
    assert_eq!(calls[0].limit, PageSize::Ten);
    assert_eq!(calls[0].sort_by.to_string(), "createdAt:desc");

    let view = table.view();
    assert_eq!(view.rows.len(), 10);
    assert_eq!(view.footer.page_index, 0);
    assert_eq!(view.footer.page_label(), "Page 1 / 3");
    assert!(view.footer.can_next);
    assert!(!view.footer.can_previous);
    assert_eq!(view.footer.total_results, Some(25));
    assert!(!view.is_fetching);
}

#[tokio::test]
async fn test_late_response_for_old_query_does_not_replace_current() {
    let loader = Arc::new(GatedLoader::default());
    let first = loader.gate(1);
    let second = loader.gate(2);
    let mut table = RemoteTable::builder(loader.source()).build();
    table.set_page_index(1);
    assert!(table.is_fetching());
    assert!(table.rows().is_empty());

    second.send(Ok(PageResult::new(rows("b", 3), 13, 2))).unwrap();
    let event = table.next_event().await.unwrap();
    assert!(matches!(event, TableEvent::Loaded { current: true, .. }), "{event:?}");

    first.send(Ok(PageResult::new(rows("a", 10), 13, 2))).unwrap();
    let event = table.next_event().await.unwrap();
    assert!(matches!(event, TableEvent::Loaded { current: false, .. }), "{event:?}");
    assert_eq!(table.next_event().await, None);

    assert_eq!(table.state().page_index, 1);
    assert_eq!(table.rows()[0].row_id().as_str(), "b0");
    assert!(!table.is_placeholder());
}

#[tokio::test]
async fn test_previous_page_stays_visible_while_loading() {
    let loader = Arc::new(GatedLoader::default());
    loader.gate(1).send(Ok(PageResult::new(rows("a", 10), 20, 2))).unwrap();
    let second = loader.gate(2);
    let mut table = RemoteTable::builder(loader.source()).build();
    table.settle().await;

    table.next_page();
    assert!(table.is_fetching());
    assert!(table.is_placeholder());
    assert_eq!(table.rows()[0].row_id().as_str(), "a0");

    second.send(Ok(PageResult::new(rows("b", 10), 20, 2))).unwrap();
    table.settle().await;
    assert!(!table.is_placeholder());
    assert_eq!(table.rows()[0].row_id().as_str(), "b0");
}

#[tokio::test]
async fn test_superseded_response_is_dropped() {
    let loader = Arc::new(GatedLoader::default());
    loader.gate(1).send(Ok(PageResult::new(rows("v1-", 2), 2, 1))).unwrap();
    let mut table = RemoteTable::builder(loader.source()).build();
    table.settle().await;

    let older = loader.gate(1);
    let newer = loader.gate(1);
    table.refetch();
    table.refetch();

    newer.send(Ok(PageResult::new(rows("v3-", 1), 1, 1))).unwrap();
    let event = table.next_event().await.unwrap();
    assert!(matches!(event, TableEvent::Loaded { current: true, .. }), "{event:?}");

    older.send(Ok(PageResult::new(rows("v2-", 2), 2, 1))).unwrap();
    let event = table.next_event().await.unwrap();
    assert!(matches!(event, TableEvent::Superseded { .. }), "{event:?}");

    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.rows()[0].row_id().as_str(), "v3-0");
}

#[tokio::test]
async fn test_failed_fetch_keeps_last_good_page() {
    let loader = Arc::new(GatedLoader::default());
    loader.gate(1).send(Ok(PageResult::new(rows("a", 10), 30, 3))).unwrap();
    loader
        .gate(2)
        .send(Err(ApiError::http(500, "database unavailable").into()))
        .unwrap();
    let mut table = RemoteTable::builder(loader.source()).build();
    table.settle().await;

    table.next_page();
    let events = table.settle().await;
    assert!(matches!(events[..], [TableEvent::Failed { current: true, .. }]));

    assert_eq!(table.rows()[0].row_id().as_str(), "a0");
    assert!(!table.is_fetching());
    let error = table.view().error.unwrap();
    assert!(error.contains("database unavailable"), "{error}");

    table.previous_page();
    assert!(table.last_error().is_none());
}

#[tokio::test]
async fn test_missing_totals_disable_next() {
    let loader = Arc::new(GatedLoader::default());
    loader
        .gate(1)
        .send(Ok(PageResult::without_totals(rows("a", 10))))
        .unwrap();
    let mut table = RemoteTable::builder(loader.source()).build();
    table.settle().await;

    assert_eq!(table.rows().len(), 10);
    assert_eq!(table.page_count(), None);
    assert!(!table.can_next_page());
    assert_eq!(table.view().footer.page_label(), "Page 1 / ?");

    table.next_page();
    table.last_page();
    assert_eq!(table.state().page_index, 0);
    assert_eq!(loader.calls().len(), 1);
}

#[tokio::test]
async fn test_page_size_change_forgets_old_page_count() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let data = Arc::new(Mutex::new(rows("r", 100)));
    let mut table = RemoteTable::builder(dataset(data, calls.clone())).build();
    table.settle().await;
    assert_eq!(table.page_count(), Some(10));

    table.set_page_size(PageSize::Fifty);
    assert!(table.is_placeholder());
    assert_eq!(table.page_count(), None);
    assert_eq!(table.total_results(), None);
    assert!(!table.can_next_page());
    table.last_page();
    assert_eq!(table.state().page_index, 0);
    table.settle().await;

    assert_eq!(table.page_count(), Some(2));
    assert!(table.can_next_page());
    table.last_page();
    table.settle().await;
    assert_eq!(table.state().page_index, 1);
    assert_eq!(table.rows().len(), 50);
    let last = calls.lock().unwrap().last().cloned().unwrap();
    assert_eq!((last.page, last.limit), (2, PageSize::Fifty));
}

#[tokio::test(start_paused = true)]
async fn test_search_commits_once_after_typing_stops() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let data = Arc::new(Mutex::new(rows("u", 5)));
    let mut table = RemoteTable::builder(dataset(data, calls.clone()))
        .search(true)
        .search_debounce(Duration::from_millis(500))
        .build();
    table.settle().await;

    table.set_search("john");
    tokio::time::advance(Duration::from_millis(100)).await;
    table.set_search("johnny");
    assert_eq!(table.search_input(), "johnny");

    let events = table.settle().await;
    assert_eq!(events[0], TableEvent::SearchCommitted("johnny".to_string()));

    let queries: Vec<Option<String>> = calls.lock().unwrap().iter().map(|p| p.query.clone()).collect();
    assert_eq!(queries, [Some(String::new()), Some("johnny".to_string())]);
    assert_eq!(table.state().search, "johnny");
}

#[tokio::test(start_paused = true)]
async fn test_search_returns_to_first_page() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let data = Arc::new(Mutex::new(rows("u", 35)));
    let mut table = RemoteTable::builder(dataset(data, calls.clone()))
        .search(true)
        .build();
    table.settle().await;
    table.last_page();
    table.settle().await;
    assert_eq!(table.state().page_index, 3);

    table.set_search("u1");
    table.settle().await;
    assert_eq!(table.state().page_index, 0);
    let last = calls.lock().unwrap().last().cloned().unwrap();
    assert_eq!(last.page, 1);
    assert_eq!(last.query.as_deref(), Some("u1"));
}

#[tokio::test]
async fn test_confirmed_delete_refetches_once() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let data = Arc::new(Mutex::new(rows("r", 3)));
    let actions = Arc::new(DeleteRecorder::default());
    let mut table = RemoteTable::builder(dataset(data.clone(), calls.clone()))
        .actions(actions.clone())
        .delete_visible(true)
        .build();
    table.settle().await;

    assert!(table.request_delete(0));
    table.cancel_delete();
    assert_eq!(table.delete_phase(), DeletePhase::Idle);
    assert!(actions.deleted.lock().unwrap().is_empty());

    assert!(table.request_delete(1));
    assert_eq!(table.delete_phase(), DeletePhase::Confirming(RowId::new("r1")));
    assert!(table.view().confirm.is_some());

    data.lock().unwrap().remove(1);
    table.confirm_delete().await.unwrap();
    assert_eq!(*actions.deleted.lock().unwrap(), [RowId::new("r1")]);
    assert_eq!(table.delete_phase(), DeletePhase::Idle);
    assert!(table.is_fetching());

    table.settle().await;
    assert_eq!(calls.lock().unwrap().len(), 2);
    assert_eq!(table.rows().len(), 2);
    assert!(table.view().confirm.is_none());
}

#[tokio::test]
async fn test_failed_delete_keeps_dialog_open() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let data = Arc::new(Mutex::new(rows("r", 3)));
    let actions = Arc::new(DeleteRecorder {
        fail: true,
        ..DeleteRecorder::default()
    });
    let mut table = RemoteTable::builder(dataset(data, calls.clone()))
        .actions(actions.clone())
        .delete_visible(true)
        .build();
    table.settle().await;

    table.request_delete(2);
    let err = table.confirm_delete().await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(table.delete_phase(), DeletePhase::Confirming(RowId::new("r2")));
    assert!(!table.is_busy());
    assert_eq!(calls.lock().unwrap().len(), 1);

    table.cancel_delete();
    assert_eq!(table.delete_phase(), DeletePhase::Idle);
}

#[tokio::test]
async fn test_delete_target_gone_from_page() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let data = Arc::new(Mutex::new(rows("r", 3)));
    let actions = Arc::new(DeleteRecorder::default());
    let mut table = RemoteTable::builder(dataset(data.clone(), calls))
        .actions(actions.clone())
        .delete_visible(true)
        .build();
    table.settle().await;

    table.request_delete(0);
    data.lock().unwrap().remove(0);
    table.refetch();
    table.settle().await;

    let err = table.confirm_delete().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Table(TableError::DeleteTargetMissing(ref id)) if id.as_str() == "r0"
    ));
    assert_eq!(table.delete_phase(), DeletePhase::Idle);
    assert!(actions.deleted.lock().unwrap().is_empty());

    let err = table.confirm_delete().await.unwrap_err();
    assert!(matches!(err, Error::Table(TableError::NoDeleteTarget)));
}

#[tokio::test]
async fn test_rows_without_id_cannot_be_deleted() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let data = Arc::new(Mutex::new(
        (0..3)
            .map(|i| Record::from_value(json!({"name": format!("n{i}")})).unwrap())
            .collect::<Vec<_>>(),
    ));
    let actions = Arc::new(DeleteRecorder::default());
    let mut table = RemoteTable::builder(dataset(data, calls))
        .actions(actions.clone())
        .delete_visible(true)
        .build();
    table.settle().await;

    assert!(!table.request_delete(2));
    assert_eq!(table.delete_phase(), DeletePhase::Idle);
    assert!(matches!(
        table.confirm_delete().await,
        Err(Error::Table(TableError::NoDeleteTarget))
    ));
    assert!(actions.deleted.lock().unwrap().is_empty());
}
