mod support;

use chrono::{NaiveDate, Utc};
use support::{category, completed, task, Fixture, Op};
use shared::{
    CategoryFilter, PersistenceError, Priority, PriorityFilter, Status, StoreError, TaskInput,
    TaskPatch,
};
use uuid::Uuid;

#[tokio::test]
async fn load_replaces_state_and_becomes_ready() {
    let work = category("Work", 10);
    let buy = task("Buy milk", Priority::Low, Some(work.id), 1);
    let fixture = Fixture::new(vec![buy.clone()], vec![work.clone()]);
    assert_eq!(fixture.store.status(), Status::Loading);

    fixture.store.load().await.unwrap();

    assert_eq!(fixture.store.status(), Status::Ready);
    assert_eq!(fixture.store.tasks(), vec![buy]);
    assert_eq!(fixture.store.categories(), vec![work]);
    assert_eq!(fixture.tasks.calls(Op::GetAll), 1);
    assert_eq!(fixture.categories.calls(Op::GetAll), 1);
}

#[tokio::test]
async fn failed_load_exposes_no_partial_state() {
    let work = category("Work", 10);
    let fixture = Fixture::new(vec![task("Buy milk", Priority::Low, None, 1)], vec![work]);
    fixture.categories.fail(Op::GetAll);

    let err = fixture.store.load().await.unwrap_err();
    assert!(matches!(err, StoreError::Persistence(PersistenceError::Storage(_))));

    let status = fixture.store.status();
    assert!(matches!(status, Status::Errored(_)));
    assert!(status.error().is_some());
    assert!(fixture.store.tasks().is_empty());
    assert!(fixture.store.categories().is_empty());

    fixture.categories.recover(Op::GetAll);
    fixture.store.load().await.unwrap();
    assert!(fixture.store.is_ready());
    assert_eq!(fixture.store.tasks().len(), 1);
}

#[tokio::test]
async fn mutations_are_rejected_until_loaded() {
    let buy = task("Buy milk", Priority::Low, None, 1);
    let fixture = Fixture::new(vec![buy.clone()], vec![]);

    let err = fixture.store.quick_add("Walk dog").await.unwrap_err();
    assert_eq!(err, StoreError::NotReady("loading"));
    assert!(fixture.store.toggle_task(buy.id).await.is_err());
    assert!(fixture.store.delete_task(buy.id).await.is_err());
    assert_eq!(fixture.tasks.total_calls(), 0);

    fixture.tasks.fail(Op::GetAll);
    fixture.store.load().await.unwrap_err();
    let err = fixture.store.quick_add("Walk dog").await.unwrap_err();
    assert_eq!(err, StoreError::NotReady("errored"));
}

#[tokio::test]
async fn create_prepends_the_collaborator_record() {
    let existing = task("Old", Priority::Medium, None, 5);
    let fixture = Fixture::loaded(vec![existing.clone()], vec![]).await;

    let created = fixture.store.quick_add("  Write report  ").await.unwrap();

    assert_eq!(created.title, "Write report");
    assert!(fixture.tasks.inner().get(created.id).is_some());
    let tasks = fixture.store.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0], created);
    assert_eq!(tasks[1], existing);
}

#[tokio::test]
async fn blank_titles_never_reach_persistence() {
    let fixture = Fixture::loaded(vec![], vec![]).await;
    let before = fixture.store.snapshot();

    for title in ["", "   ", "\t\n "] {
        let err = fixture.store.quick_add(title).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    assert_eq!(fixture.tasks.calls(Op::Create), 0);
    assert_eq!(fixture.store.snapshot(), before);
}

#[tokio::test]
async fn create_fills_documented_defaults() {
    let work = category("Work", 10);
    let home = category("Home", 5);
    let fixture = Fixture::loaded(vec![], vec![work.clone(), home.clone()]).await;

    let created = fixture.store.quick_add("Plan week").await.unwrap();
    assert_eq!(created.priority, Priority::Medium);
    assert_eq!(created.category_id, Some(work.id));
    assert_eq!(created.description, "");
    assert_eq!(created.due_date, None);
    assert!(!created.completed);
    assert_eq!(created.completed_at, None);

    fixture.store.set_selected_category(home.id);
    let in_home = fixture.store.quick_add("Clean kitchen").await.unwrap();
    assert_eq!(in_home.category_id, Some(home.id));

    // A selection that does not resolve falls back to the first category.
    fixture.store.set_selected_category(Uuid::new_v4());
    let fallback = fixture.store.quick_add("Water plants").await.unwrap();
    assert_eq!(fallback.category_id, Some(work.id));
}

#[tokio::test]
async fn create_without_categories_leaves_category_empty() {
    let fixture = Fixture::loaded(vec![], vec![]).await;
    let created = fixture.store.quick_add("Plan week").await.unwrap();
    assert_eq!(created.category_id, None);
    assert!(fixture.store.resolve_category(created.category_id).is_uncategorized());
}

#[tokio::test]
async fn create_parses_due_dates() {
    let fixture = Fixture::loaded(vec![], vec![]).await;

    let created = fixture
        .store
        .create_task(TaskInput {
            title: "File taxes".to_string(),
            description: "before the deadline".to_string(),
            priority: Some(Priority::High),
            due_date: "2024-04-15".to_string(),
            ..TaskInput::default()
        })
        .await
        .unwrap();
    assert_eq!(created.due_date, NaiveDate::from_ymd_opt(2024, 4, 15));
    assert_eq!(created.priority, Priority::High);
    assert_eq!(created.description, "before the deadline");

    let err = fixture
        .store
        .create_task(TaskInput {
            title: "File taxes".to_string(),
            due_date: "15/04/2024".to_string(),
            ..TaskInput::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(fixture.tasks.calls(Op::Create), 1);
}

#[tokio::test]
async fn failed_create_leaves_state_unchanged() {
    let fixture = Fixture::loaded(vec![task("Old", Priority::Low, None, 5)], vec![]).await;
    let before = fixture.store.snapshot();
    fixture.tasks.fail(Op::Create);

    let err = fixture.store.quick_add("New").await.unwrap_err();

    assert!(matches!(err, StoreError::Persistence(_)));
    assert_eq!(fixture.store.snapshot(), before);
    assert_eq!(fixture.tasks.calls(Op::Create), 1);
}

#[tokio::test]
async fn update_changes_what_the_filter_sees() {
    let home = category("Home", 10);
    let buy = task("Buy milk", Priority::Low, Some(home.id), 1);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![home]).await;

    fixture.store.set_selected_category(CategoryFilter::All);
    fixture.store.set_search_query("");
    fixture.store.set_priority_filter(Priority::High);
    assert!(fixture.store.filtered_tasks().is_empty());

    let patch = TaskPatch {
        priority: Some(Priority::High),
        ..TaskPatch::default()
    };
    let updated = fixture.store.update_task(buy.id, patch).await.unwrap();

    assert_eq!(updated.priority, Priority::High);
    assert_eq!(fixture.store.find_task(buy.id), Some(updated.clone()));
    assert_eq!(fixture.store.filtered_tasks(), vec![updated]);
}

#[tokio::test]
async fn update_applies_the_response_not_the_request() {
    let buy = task("Buy milk", Priority::Low, None, 1);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![]).await;

    let updated = fixture
        .store
        .update_task(
            buy.id,
            TaskPatch {
                description: Some("two litres".to_string()),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap();

    let stored = fixture.tasks.inner().get(buy.id).unwrap();
    assert_eq!(updated, stored);
    assert_eq!(fixture.store.tasks(), vec![stored]);
}

#[tokio::test]
async fn update_of_unknown_task_is_not_found() {
    let fixture = Fixture::loaded(vec![], vec![]).await;
    let id = Uuid::new_v4();

    let err = fixture
        .store
        .update_task(id, TaskPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound(id));
    assert_eq!(fixture.store.toggle_task(id).await.unwrap_err(), StoreError::NotFound(id));
    assert_eq!(fixture.store.delete_task(id).await.unwrap_err(), StoreError::NotFound(id));
    assert_eq!(fixture.tasks.calls(Op::Update) + fixture.tasks.calls(Op::Delete), 0);
}

#[tokio::test]
async fn update_rejects_blank_title() {
    let buy = task("Buy milk", Priority::Low, None, 1);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![]).await;

    let err = fixture
        .store
        .update_task(
            buy.id,
            TaskPatch {
                title: Some("   ".to_string()),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(fixture.tasks.calls(Op::Update), 0);
}

#[tokio::test]
async fn bare_completion_flag_is_stamped_before_persisting() {
    let buy = task("Buy milk", Priority::Low, None, 1);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![]).await;

    let done = fixture
        .store
        .update_task(
            buy.id,
            TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap();
    assert!(done.completed);
    assert!(done.completed_at.is_some());
    assert_eq!(fixture.tasks.inner().get(buy.id), Some(done.clone()));
    assert_eq!(fixture.store.find_task(buy.id), Some(done));

    let reopened = fixture
        .store
        .update_task(
            buy.id,
            TaskPatch {
                completed: Some(false),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap();
    assert!(!reopened.completed);
    assert_eq!(reopened.completed_at, None);
}

#[tokio::test]
async fn update_rejects_contradicting_completion_timestamp() {
    let buy = task("Buy milk", Priority::Low, None, 1);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![]).await;

    let err = fixture
        .store
        .update_task(
            buy.id,
            TaskPatch {
                completed: Some(false),
                completed_at: Some(Some(Utc::now())),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(fixture.tasks.calls(Op::Update), 0);
    assert_eq!(fixture.store.tasks(), vec![buy]);
}

#[tokio::test]
async fn failed_update_leaves_state_unchanged() {
    let buy = task("Buy milk", Priority::Low, None, 1);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![]).await;
    fixture.tasks.fail(Op::Update);

    let err = fixture.store.toggle_task(buy.id).await.unwrap_err();

    assert!(matches!(err, StoreError::Persistence(_)));
    assert_eq!(fixture.store.tasks(), vec![buy]);
    assert_eq!(fixture.tasks.calls(Op::Update), 1);
}

#[tokio::test]
async fn toggle_twice_restores_the_flag_but_not_the_timestamp() {
    let buy = task("Buy milk", Priority::Low, None, 1);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![]).await;

    let done = fixture.store.toggle_task(buy.id).await.unwrap();
    assert!(done.completed);
    assert!(done.completed_at.is_some());
    assert_eq!(fixture.store.completion_percentage(), 100);

    let undone = fixture.store.toggle_task(buy.id).await.unwrap();
    assert!(!undone.completed);
    assert_eq!(undone.completed_at, None);
    assert_eq!(fixture.store.find_task(buy.id), Some(undone));
    assert_eq!(fixture.store.completion_percentage(), 0);
}

#[tokio::test]
async fn toggling_a_completed_task_clears_its_timestamp() {
    let done = completed(task("Buy milk", Priority::Low, None, 1));
    let fixture = Fixture::loaded(vec![done.clone()], vec![]).await;

    let reopened = fixture.store.toggle_task(done.id).await.unwrap();
    assert!(!reopened.completed);
    assert_eq!(reopened.completed_at, None);

    let again = fixture.store.toggle_task(done.id).await.unwrap();
    assert!(again.completed);
    assert!(again.completed_at.is_some());
}

#[tokio::test]
async fn edit_replaces_every_form_field() {
    let work = category("Work", 10);
    let home = category("Home", 5);
    let mut buy = task("Buy milk", Priority::Low, Some(work.id), 1);
    buy.due_date = NaiveDate::from_ymd_opt(2024, 3, 7);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![work, home.clone()]).await;

    let mut input = TaskInput::from_task(&buy);
    assert_eq!(input.due_date, "2024-03-07");
    input.title = " Buy oat milk ".to_string();
    input.category_id = Some(home.id);
    input.priority = Some(Priority::High);
    input.due_date = String::new();

    let edited = fixture.store.edit_task(buy.id, input).await.unwrap();
    assert_eq!(edited.title, "Buy oat milk");
    assert_eq!(edited.category_id, Some(home.id));
    assert_eq!(edited.priority, Priority::High);
    assert_eq!(edited.due_date, None);
    assert_eq!(edited.created_at, buy.created_at);
}

#[tokio::test]
async fn failed_delete_keeps_the_task() {
    let home = category("Home", 10);
    let buy = task("Buy milk", Priority::Low, Some(home.id), 1);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![home]).await;
    fixture.tasks.fail(Op::Delete);

    let err = fixture.store.delete_task(buy.id).await.unwrap_err();

    assert!(matches!(err, StoreError::Persistence(_)));
    assert_eq!(fixture.store.tasks(), vec![buy]);
}

#[tokio::test]
async fn delete_removes_the_task() {
    let buy = task("Buy milk", Priority::Low, None, 1);
    let walk = task("Walk dog", Priority::Low, None, 2);
    let fixture = Fixture::loaded(vec![buy.clone(), walk.clone()], vec![]).await;

    fixture.store.delete_task(buy.id).await.unwrap();

    assert_eq!(fixture.store.tasks(), vec![walk]);
    assert!(fixture.tasks.inner().get(buy.id).is_none());
}

#[tokio::test]
async fn clear_completed_reports_each_failure_once() {
    let a = completed(task("a", Priority::Low, None, 1));
    let b = completed(task("b", Priority::Low, None, 2));
    let c = task("c", Priority::Low, None, 3);
    let fixture = Fixture::loaded(vec![a.clone(), b.clone(), c.clone()], vec![]).await;
    fixture.tasks.fail_for(b.id);

    let outcomes = fixture.store.clear_completed().await.unwrap();

    assert_eq!(outcomes.len(), 2);
    let failures: Vec<Uuid> = outcomes
        .iter()
        .filter(|(_, outcome)| outcome.is_err())
        .map(|(id, _)| *id)
        .collect();
    assert_eq!(failures, vec![b.id]);
    assert_eq!(fixture.store.tasks(), vec![b, c]);
}

#[tokio::test]
async fn concurrent_updates_to_different_tasks_both_apply() {
    let a = task("a", Priority::Low, None, 1);
    let b = task("b", Priority::Low, None, 2);
    let fixture = Fixture::loaded(vec![a.clone(), b.clone()], vec![]).await;
    let gate = fixture.tasks.delay_next_update();

    let store = &fixture.store;
    let (first, second) = tokio::join!(store.toggle_task(a.id), async {
        let result = store.toggle_task(b.id).await;
        gate.notify_one();
        result
    });

    assert!(first.unwrap().completed);
    assert!(second.unwrap().completed);
    let tasks = fixture.store.tasks();
    assert!(tasks.iter().all(|task| task.completed));
    // Order is untouched by updates.
    assert_eq!(tasks[0].id, a.id);
    assert_eq!(tasks[1].id, b.id);
}

#[tokio::test]
async fn same_task_race_keeps_the_last_response() {
    let buy = task("Buy milk", Priority::Low, None, 1);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![]).await;
    let gate = fixture.tasks.delay_next_update();

    let high = TaskPatch {
        priority: Some(Priority::High),
        ..TaskPatch::default()
    };
    let medium = TaskPatch {
        priority: Some(Priority::Medium),
        ..TaskPatch::default()
    };

    let store = &fixture.store;
    let (slow, fast) = tokio::join!(store.update_task(buy.id, high), async {
        let result = store.update_task(buy.id, medium).await;
        gate.notify_one();
        result
    });

    assert_eq!(fast.unwrap().priority, Priority::Medium);
    assert_eq!(slow.unwrap().priority, Priority::High);
    // The slow response resolved last, so it wins in memory even though
    // storage saw the medium write last.
    assert_eq!(fixture.store.find_task(buy.id).unwrap().priority, Priority::High);
    assert_eq!(
        fixture.tasks.inner().get(buy.id).unwrap().priority,
        Priority::Medium
    );
}

#[tokio::test]
async fn late_update_does_not_resurrect_a_deleted_task() {
    let buy = task("Buy milk", Priority::Low, None, 1);
    let fixture = Fixture::loaded(vec![buy.clone()], vec![]).await;
    let gate = fixture.tasks.delay_next_update();

    let store = &fixture.store;
    let (updated, deleted) = tokio::join!(store.toggle_task(buy.id), async {
        let result = store.delete_task(buy.id).await;
        gate.notify_one();
        result
    });

    assert!(updated.is_ok());
    assert!(deleted.is_ok());
    assert!(fixture.store.tasks().is_empty());
}

#[tokio::test]
async fn filters_are_accepted_in_any_status() {
    let fixture = Fixture::new(vec![], vec![]);

    fixture.store.set_search_query("milk");
    fixture.store.set_priority_filter(PriorityFilter::Only(Priority::Low));
    let id = Uuid::new_v4();
    fixture.store.set_selected_category(id);

    let filter = fixture.store.filter();
    assert_eq!(filter.search_query, "milk");
    assert_eq!(filter.priority_filter, PriorityFilter::Only(Priority::Low));
    assert_eq!(filter.selected_category, CategoryFilter::Category(id));
    assert_eq!(fixture.store.status(), Status::Loading);
}

#[tokio::test]
async fn derived_views_track_state() {
    let work = category("Work", 10);
    let home = category("Home", 5);
    let tasks = vec![
        task("Write report", Priority::High, Some(work.id), 1),
        completed(task("Send invoice", Priority::Medium, Some(work.id), 2)),
        task("Buy milk", Priority::Low, Some(home.id), 3),
        task("Orphan", Priority::Low, Some(Uuid::new_v4()), 4),
    ];
    let fixture = Fixture::loaded(tasks, vec![work.clone(), home.clone()]).await;
    let store = &fixture.store;

    assert_eq!(store.completion_percentage(), 25);
    assert_eq!(store.category_task_count(work.id), 2);
    assert_eq!(store.category_task_count(home.id), 1);
    assert_eq!(store.active_tasks().len(), 3);
    assert_eq!(store.completed_tasks().len(), 1);

    store.set_selected_category(work.id);
    let active: Vec<String> = store.active_tasks().into_iter().map(|t| t.title).collect();
    assert_eq!(active, ["Write report"]);
    assert_eq!(store.completed_tasks()[0].title, "Send invoice");
    // Global metric ignores the filter.
    assert_eq!(store.completion_percentage(), 25);

    store.set_selected_category(CategoryFilter::All);
    store.set_search_query("ORPHAN");
    let orphan = store.filtered_tasks();
    assert_eq!(orphan.len(), 1);
    assert_eq!(store.resolve_category(orphan[0].category_id).name, "Uncategorized");

    let stats = store.stats();
    assert_eq!((stats.total, stats.active, stats.completed), (4, 3, 1));
}
