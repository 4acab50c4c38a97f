//! Metrics sink boundary.
//!
//! Core catalog logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between cache/scan logic and the
//! process-local metrics state.

use crate::obs::metrics::{self, CatalogCounters};
use std::{cell::RefCell, rc::Rc};

///
/// ScanKind
///

#[derive(Clone, Copy, Debug)]
pub enum ScanKind {
    Index,
    Full,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    CacheAcquired {
        fresh: bool,
    },
    TablePopulated {
        table: &'static str,
        records: u64,
        indexes: u64,
    },
    ScanStarted {
        kind: ScanKind,
        table: &'static str,
    },
    RowsScanned {
        table: &'static str,
        rows: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default process-local sink that writes into thread-local counter state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::CacheAcquired { fresh } => {
                if fresh {
                    m.caches_created = m.caches_created.saturating_add(1);
                } else {
                    m.caches_reused = m.caches_reused.saturating_add(1);
                }
            }
            MetricsEvent::TablePopulated {
                records, indexes, ..
            } => {
                m.tables_populated = m.tables_populated.saturating_add(1);
                m.records_materialized = m.records_materialized.saturating_add(records);
                m.indexes_built = m.indexes_built.saturating_add(indexes);
            }
            MetricsEvent::ScanStarted { kind, .. } => match kind {
                ScanKind::Index => m.index_scans = m.index_scans.saturating_add(1),
                ScanKind::Full => m.full_scans = m.full_scans.saturating_add(1),
            },
            MetricsEvent::RowsScanned { rows, .. } => {
                m.rows_scanned = m.rows_scanned.saturating_add(rows);
            }
        });
    }
}

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    if let Some(sink) = sink {
        sink.record(event);
    } else {
        GlobalMetricsSink.record(event);
    }
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous override is restored on all exits, including unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

/// Snapshot the current counters for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> CatalogCounters {
    metrics::snapshot()
}

/// Reset all counter state.
pub fn metrics_reset_all() {
    metrics::reset();
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::Cell,
        panic::{AssertUnwindSafe, catch_unwind},
    };

    struct CountingSink {
        calls: Cell<usize>,
    }

    impl MetricsSink for CountingSink {
        fn record(&self, _: MetricsEvent) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn with_metrics_sink_routes_and_restores_override() {
        metrics_reset_all();
        let sink = Rc::new(CountingSink {
            calls: Cell::new(0),
        });

        with_metrics_sink(sink.clone(), || {
            record(MetricsEvent::ScanStarted {
                kind: ScanKind::Index,
                table: "pg_namespace",
            });
        });
        assert_eq!(sink.calls.get(), 1);

        // Override removed: events land in global counters again.
        record(MetricsEvent::ScanStarted {
            kind: ScanKind::Index,
            table: "pg_namespace",
        });
        assert_eq!(sink.calls.get(), 1);
        assert_eq!(metrics_report().index_scans, 1);
    }

    #[test]
    fn with_metrics_sink_restores_override_on_panic() {
        metrics_reset_all();
        let sink = Rc::new(CountingSink {
            calls: Cell::new(0),
        });

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(sink.clone(), || {
                record(MetricsEvent::CacheAcquired { fresh: true });
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();
        assert!(panicked);
        assert_eq!(sink.calls.get(), 1);

        record(MetricsEvent::CacheAcquired { fresh: true });
        assert_eq!(sink.calls.get(), 1);
        assert_eq!(metrics_report().caches_created, 1);
    }

    #[test]
    fn global_sink_accumulates_population_counters() {
        metrics_reset_all();

        record(MetricsEvent::TablePopulated {
            table: "pg_constraint",
            records: 3,
            indexes: 2,
        });
        record(MetricsEvent::RowsScanned {
            table: "pg_constraint",
            rows: 2,
        });

        let report = metrics_report();
        assert_eq!(report.tables_populated, 1);
        assert_eq!(report.records_materialized, 3);
        assert_eq!(report.indexes_built, 2);
        assert_eq!(report.rows_scanned, 2);
    }
}
