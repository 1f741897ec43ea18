use chrono::{Duration, NaiveDate, TimeZone, Utc};
use tasklist_core::{
    Category, CoreConfig, DueState, ManualClock, MemoryKeyValueStore, NewTask, Priority,
    SortKey, StatusFilter, TaskQuery, TaskService,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn created_sort_is_newest_first() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let mut service = TaskService::with_clock(
        MemoryKeyValueStore::new(),
        &clock,
        &CoreConfig::default(),
    );

    let mut ids = Vec::new();
    for text in ["t1", "t2", "t3"] {
        ids.push(
            service
                .create(NewTask::new(text, Category::Work, Priority::Low))
                .unwrap(),
        );
        clock.advance(Duration::minutes(5));
    }

    let view = service.query(&TaskQuery::default());
    let order: Vec<_> = view.iter().map(|task| task.id).collect();
    assert_eq!(order, vec![ids[2], ids[1], ids[0]]);
}

#[test]
fn due_date_sort_puts_missing_dates_last() {
    let mut service = TaskService::new(MemoryKeyValueStore::new());
    service
        .create(NewTask::new("none", Category::Other, Priority::Low))
        .unwrap();
    service
        .create(NewTask::new("fifth", Category::Other, Priority::Low).with_due_date(date(2024, 1, 5)))
        .unwrap();
    service
        .create(NewTask::new("first", Category::Other, Priority::Low).with_due_date(date(2024, 1, 1)))
        .unwrap();

    let view = service.query(&TaskQuery::default().sorted_by(SortKey::DueDate));
    let dates: Vec<_> = view.iter().map(|task| task.due_date).collect();
    assert_eq!(
        dates,
        vec![Some(date(2024, 1, 1)), Some(date(2024, 1, 5)), None]
    );
}

#[test]
fn combined_filters_return_exact_subset() {
    let mut service = TaskService::new(MemoryKeyValueStore::new());
    let specs = [
        (Category::Work, Priority::High, false),
        (Category::Work, Priority::High, true),
        (Category::Work, Priority::Low, false),
        (Category::Personal, Priority::High, false),
        (Category::Work, Priority::High, false),
        (Category::Health, Priority::Medium, true),
        (Category::Work, Priority::Medium, false),
        (Category::Shopping, Priority::High, false),
        (Category::Work, Priority::High, true),
        (Category::Education, Priority::Low, false),
    ];

    let mut expected = Vec::new();
    for (n, (category, priority, done)) in specs.into_iter().enumerate() {
        let id = service
            .create(NewTask::new(format!("task {n}"), category, priority))
            .unwrap();
        if done {
            service.toggle(id);
        }
        if category == Category::Work && priority == Priority::High && !done {
            expected.push(id);
        }
    }

    let query = TaskQuery::default()
        .with_status(StatusFilter::Active)
        .with_category(Category::Work)
        .with_priority(Priority::High);
    let mut found: Vec<_> = service.query(&query).iter().map(|task| task.id).collect();
    found.sort();
    assert_eq!(found, expected);
    assert_eq!(service.counts().all, 10);
    assert_eq!(service.counts().completed, 3);
}

#[test]
fn rows_classify_due_dates_against_one_today() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap());
    let mut service = TaskService::with_clock(
        MemoryKeyValueStore::new(),
        &clock,
        &CoreConfig::default(),
    );
    for (text, due) in [
        ("late", date(2024, 3, 8)),
        ("today", date(2024, 3, 10)),
        ("soon", date(2024, 3, 12)),
        ("later", date(2024, 4, 1)),
    ] {
        service
            .create(NewTask::new(text, Category::Work, Priority::Medium).with_due_date(due))
            .unwrap();
    }
    service
        .create(NewTask::new("undated", Category::Work, Priority::Medium))
        .unwrap();

    let rows = service.rows(&TaskQuery::default().sorted_by(SortKey::Alphabetical));
    let states: Vec<_> = rows.iter().map(|row| (row.task.text.as_str(), row.due)).collect();
    assert_eq!(
        states,
        vec![
            ("late", Some(DueState::Overdue { days: 2 })),
            ("later", Some(DueState::Upcoming { date: date(2024, 4, 1) })),
            ("soon", Some(DueState::DueSoon { days: 2 })),
            ("today", Some(DueState::DueToday)),
            ("undated", None),
        ]
    );
}

#[test]
fn alphabetical_sort_ignores_case() {
    let mut service = TaskService::new(MemoryKeyValueStore::new());
    for text in ["banana", "Cherry", "apple", "Apple"] {
        service
            .create(NewTask::new(text, Category::Shopping, Priority::Low))
            .unwrap();
    }

    let view = service.query(&TaskQuery::default().sorted_by(SortKey::Alphabetical));
    let texts: Vec<_> = view.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["Apple", "apple", "banana", "Cherry"]);
}
