// Benchmark for grid navigation and event list assembly
// Measures focus sweeps across large grids and list rendering over a
// populated store

use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use termcal::models::event::{EventData, EventStatus, EventTime, ZonedInstant};
use termcal::models::settings::Settings;
use termcal::models::ui::Action;
use termcal::services::store::{EventStore, SqliteStore};
use termcal::ui::event_list::EventList;
use termcal::ui::grid::CalendarGrid;

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 3, 5).unwrap()
}

fn bench_grid_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_sweep");

    for months in [3u32, 12, 24].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(months), months, |b, &months| {
            b.iter(|| {
                let mut grid = CalendarGrid::new(black_box(anchor()), anchor(), months);
                // walk right through every cell of the grid
                let cells = grid.rows().len() * 7;
                for _ in 0..cells {
                    grid.handle(black_box(Action::Right));
                }
                grid.focused_date()
            });
        });
    }

    group.finish();
}

fn populated_store(events: usize) -> SqliteStore {
    let store = SqliteStore::new(":memory:").unwrap();
    store.initialize_schema().unwrap();

    for i in 0..events {
        let start = Utc
            .with_ymd_and_hms(2014, 3, 5, (i % 23) as u32, (i % 60) as u32, 0)
            .unwrap();
        let data = EventData {
            summary: format!("event {}", i),
            description: String::new(),
            location: String::new(),
            start: EventTime::At(ZonedInstant::new(start, None)),
            end: EventTime::At(ZonedInstant::new(start + chrono::Duration::hours(1), None)),
            rrule: None,
            sequence: None,
        };
        store
            .update(
                &data.serialized().unwrap(),
                "private",
                &format!("{}.ics", i),
                EventStatus::Ok,
            )
            .unwrap();
    }

    store
}

fn bench_list_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_render");

    for events in [10usize, 100, 500].iter() {
        let store = populated_store(*events);
        let settings = Settings::default();
        group.bench_with_input(BenchmarkId::from_parameter(events), events, |b, _| {
            b.iter(|| {
                let list =
                    EventList::render(&store, &settings, black_box(anchor())).unwrap();
                black_box(list.rows().len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid_sweep, bench_list_render);
criterion_main!(benches);
