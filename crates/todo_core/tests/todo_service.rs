use std::cell::Cell;
use todo_core::{
    FilterMode, KeyValueStorage, ListEvent, MemoryStorage, RenderModel, RowState, StorageError,
    StorageResult, TaskId, TaskStore, TodoService,
};

fn row_texts(model: &RenderModel) -> Vec<&str> {
    model.rows.iter().map(|row| row.text.as_str()).collect()
}

fn id_of(model: &RenderModel, text: &str) -> TaskId {
    model
        .rows
        .iter()
        .find(|row| row.text == text)
        .map(|row| row.id.clone())
        .unwrap()
}

fn open_service(storage: &MemoryStorage) -> TodoService<&MemoryStorage> {
    TodoService::new(TaskStore::load(storage))
}

#[test]
fn submit_adds_to_front_and_ignores_blank_input() {
    let storage = MemoryStorage::new();
    let mut service = open_service(&storage);

    service.dispatch(ListEvent::Submit("A".into())).unwrap();
    let model = service.dispatch(ListEvent::Submit("  B ".into())).unwrap();
    assert_eq!(row_texts(&model), ["B", "A"]);

    let model = service.dispatch(ListEvent::Submit("   ".into())).unwrap();
    assert_eq!(row_texts(&model), ["B", "A"]);
    assert_eq!(model.remaining_count, 2);
}

#[test]
fn toggle_then_clear_completed() {
    let storage = MemoryStorage::new();
    let mut service = open_service(&storage);
    service.dispatch(ListEvent::Submit("A".into())).unwrap();
    let model = service.dispatch(ListEvent::Submit("B".into())).unwrap();

    let b = id_of(&model, "B");
    let model = service.dispatch(ListEvent::Toggle(b)).unwrap();
    assert!(model.rows[0].completed);
    assert_eq!(model.remaining_count, 1);

    let model = service.dispatch(ListEvent::ClearCompleted).unwrap();
    assert_eq!(row_texts(&model), ["A"]);
}

#[test]
fn filter_and_search_are_view_state_only() {
    let storage = MemoryStorage::new();
    let mut service = open_service(&storage);
    service.dispatch(ListEvent::Submit("Buy milk".into())).unwrap();
    let model = service
        .dispatch(ListEvent::Submit("Pay bills".into()))
        .unwrap();
    let pay = id_of(&model, "Pay bills");
    service.dispatch(ListEvent::Toggle(pay)).unwrap();

    let model = service
        .dispatch(ListEvent::SetFilter(FilterMode::Active))
        .unwrap();
    assert_eq!(row_texts(&model), ["Buy milk"]);

    let model = service
        .dispatch(ListEvent::SetFilter(FilterMode::All))
        .unwrap();
    let model_after_search = service.dispatch(ListEvent::SetSearch("BILL".into())).unwrap();
    assert_eq!(row_texts(&model), ["Pay bills", "Buy milk"]);
    assert_eq!(row_texts(&model_after_search), ["Pay bills"]);
    assert_eq!(model_after_search.remaining_count, 1);

    // A fresh session starts from defaults; only tasks were persisted.
    let reopened = TodoService::new(TaskStore::load(&storage));
    assert_eq!(reopened.filter(), FilterMode::All);
    assert_eq!(reopened.search(), "");
    assert_eq!(row_texts(&reopened.render()), ["Pay bills", "Buy milk"]);
}

#[test]
fn edit_commit_saves_trimmed_draft() {
    let storage = MemoryStorage::new();
    let mut service = open_service(&storage);
    let model = service.dispatch(ListEvent::Submit("draft".into())).unwrap();
    let id = id_of(&model, "draft");

    let model = service.dispatch(ListEvent::BeginEdit(id.clone())).unwrap();
    assert_eq!(
        model.rows[0].state,
        RowState::Editing {
            draft: "draft".to_string(),
            cursor: 5,
        }
    );

    service
        .dispatch(ListEvent::UpdateDraft("  final ".into()))
        .unwrap();
    let model = service.dispatch(ListEvent::CommitEdit).unwrap();

    assert_eq!(model.rows[0].state, RowState::Display);
    assert_eq!(row_texts(&model), ["final"]);
    assert!(service.editing().is_none());
    assert_eq!(TaskStore::load(&storage).get(&id).unwrap().text, "final");
}

#[test]
fn edit_commit_with_blank_draft_keeps_text() {
    let storage = MemoryStorage::new();
    let mut service = open_service(&storage);
    let model = service.dispatch(ListEvent::Submit("keep me".into())).unwrap();
    let id = id_of(&model, "keep me");

    service.dispatch(ListEvent::BeginEdit(id)).unwrap();
    service.dispatch(ListEvent::UpdateDraft("   ".into())).unwrap();
    let model = service.dispatch(ListEvent::CommitEdit).unwrap();

    assert_eq!(row_texts(&model), ["keep me"]);
    assert_eq!(model.rows[0].state, RowState::Display);
}

#[test]
fn edit_cancel_discards_draft() {
    let storage = MemoryStorage::new();
    let mut service = open_service(&storage);
    let model = service.dispatch(ListEvent::Submit("original".into())).unwrap();
    let id = id_of(&model, "original");

    service.dispatch(ListEvent::BeginEdit(id)).unwrap();
    service
        .dispatch(ListEvent::UpdateDraft("changed".into()))
        .unwrap();
    let model = service.dispatch(ListEvent::CancelEdit).unwrap();

    assert_eq!(row_texts(&model), ["original"]);
    assert_eq!(model.rows[0].state, RowState::Display);
    assert_eq!(row_texts(&TodoService::new(TaskStore::load(&storage)).render()), ["original"]);
}

#[test]
fn beginning_another_edit_discards_the_first_draft() {
    let storage = MemoryStorage::new();
    let mut service = open_service(&storage);
    service.dispatch(ListEvent::Submit("A".into())).unwrap();
    let model = service.dispatch(ListEvent::Submit("B".into())).unwrap();
    let a = id_of(&model, "A");
    let b = id_of(&model, "B");

    service.dispatch(ListEvent::BeginEdit(a.clone())).unwrap();
    service
        .dispatch(ListEvent::UpdateDraft("A edited".into()))
        .unwrap();
    let model = service.dispatch(ListEvent::BeginEdit(b.clone())).unwrap();

    let editing: Vec<&TaskId> = model
        .rows
        .iter()
        .filter(|row| row.is_editing())
        .map(|row| &row.id)
        .collect();
    assert_eq!(editing, [&b]);

    service.dispatch(ListEvent::CommitEdit).unwrap();
    assert_eq!(service.store().get(&a).unwrap().text, "A");
}

#[test]
fn other_events_end_the_edit_session() {
    let storage = MemoryStorage::new();
    let mut service = open_service(&storage);
    let model = service.dispatch(ListEvent::Submit("A".into())).unwrap();
    let a = id_of(&model, "A");

    service.dispatch(ListEvent::BeginEdit(a.clone())).unwrap();
    service.dispatch(ListEvent::UpdateDraft("A2".into())).unwrap();
    let model = service
        .dispatch(ListEvent::SetSearch("a".into()))
        .unwrap();

    assert!(model.rows.iter().all(|row| !row.is_editing()));
    service.dispatch(ListEvent::CommitEdit).unwrap();
    assert_eq!(service.store().get(&a).unwrap().text, "A");
}

#[test]
fn unknown_ids_and_stray_edit_events_are_noops() {
    let storage = MemoryStorage::new();
    let mut service = open_service(&storage);
    let before = service.dispatch(ListEvent::Submit("A".into())).unwrap();
    let missing = TaskId::from("missing");

    for event in [
        ListEvent::Toggle(missing.clone()),
        ListEvent::Delete(missing.clone()),
        ListEvent::BeginEdit(missing),
        ListEvent::UpdateDraft("ignored".into()),
        ListEvent::CommitEdit,
        ListEvent::CancelEdit,
    ] {
        let model = service.dispatch(event).unwrap();
        assert_eq!(model, before);
    }
}

#[test]
fn deleting_task_under_edit_ends_session() {
    let storage = MemoryStorage::new();
    let mut service = open_service(&storage);
    let model = service.dispatch(ListEvent::Submit("A".into())).unwrap();
    let a = id_of(&model, "A");

    service.dispatch(ListEvent::BeginEdit(a.clone())).unwrap();
    let model = service.dispatch(ListEvent::Delete(a)).unwrap();

    assert!(model.empty_state_visible);
    assert!(service.editing().is_none());
}

/// Refuses every write.
struct ReadOnlyStorage {
    inner: MemoryStorage,
    writes: Cell<usize>,
}

impl KeyValueStorage for ReadOnlyStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        self.writes.set(self.writes.get() + 1);
        Err(StorageError::Unavailable("read-only".to_string()))
    }
}

#[test]
fn persist_failure_is_reported_but_view_keeps_mutation() {
    let storage = ReadOnlyStorage {
        inner: MemoryStorage::new(),
        writes: Cell::new(0),
    };
    let mut service = TodoService::new(TaskStore::load(&storage));

    let err = service
        .dispatch(ListEvent::Submit("A".into()))
        .unwrap_err();
    assert!(err.to_string().contains("read-only"));
    assert_eq!(storage.writes.get(), 1);

    let model = service.render();
    assert_eq!(row_texts(&model), ["A"]);
    assert_eq!(model.remaining_count, 1);
}
