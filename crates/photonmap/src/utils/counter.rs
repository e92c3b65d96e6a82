//! Process wide named counters, reported through the `counter_report` log target.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

pub enum Counter {
    CounterU64(CounterU64),
    CounterTime(CounterTime),
}

impl Counter {
    pub fn format(&self) -> String {
        match self {
            Counter::CounterU64(a) => a.format(),
            Counter::CounterTime(a) => a.format(),
        }
    }
}

#[derive(Default)]
pub struct CounterU64 {
    atomic: AtomicU64,
}

impl CounterU64 {
    pub const fn new() -> Self {
        Self {
            atomic: AtomicU64::new(0),
        }
    }
    pub fn inc(&self) {
        self.atomic.fetch_add(1, Ordering::Relaxed);
    }
    pub fn value(&self) -> u64 {
        self.atomic.load(Ordering::Acquire)
    }
    fn format(&self) -> String {
        format!("{}", self.value())
    }
}

#[derive(Default)]
pub struct CounterTime {
    nanos: AtomicU64,
}

impl CounterTime {
    pub const fn new() -> Self {
        Self {
            nanos: AtomicU64::new(0),
        }
    }
    pub fn add(&self, dur: Duration) {
        self.nanos.fetch_add(dur.as_nanos() as u64, Ordering::Relaxed);
    }
    pub fn value(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }
    pub fn format(&self) -> String {
        super::timer::format_elapsed(self.value())
    }
}

pub fn report_counters() {
    let counters = __COUNTERS.lock().unwrap_or_else(|e| e.into_inner());
    for (counter_name, counter) in counters.iter() {
        log::log!(target: "counter_report", log::Level::Info, "{}: {}", counter_name, counter.format())
    }
}

/// Current value of a `counter!`, if it has been hit at least once
pub fn counter_value(descr: &str) -> Option<u64> {
    let counters = __COUNTERS.lock().unwrap_or_else(|e| e.into_inner());
    match counters.get(descr).map(|c| &**c) {
        Some(Counter::CounterU64(c)) => Some(c.value()),
        _ => None,
    }
}

lazy_static::lazy_static! {
    pub static ref __COUNTERS: Mutex<BTreeMap<&'static str, Arc<Counter>>> = Mutex::new(BTreeMap::new());
}

pub fn insert_counter(descr: &'static str, counter: Counter) -> Arc<Counter> {
    let mut counters = __COUNTERS.lock().unwrap_or_else(|e| e.into_inner());
    let arc = Arc::new(counter);

    counters.entry(descr).or_insert(arc).clone()
}

#[macro_export]
macro_rules! counter {
    ($descr:literal) => {
        if cfg!(feature = "counter") {
            use $crate::utils::counter::{insert_counter, lazy_static, Counter, CounterU64};
            lazy_static::lazy_static! {
                static ref COUNTER_REF: std::sync::Arc<Counter> = {
                    insert_counter($descr, Counter::CounterU64(CounterU64::new()))
                };
            }

            match &**COUNTER_REF {
                Counter::CounterU64(c) => c.inc(),
                Counter::CounterTime(_) => unreachable!("{} is a time counter", $descr),
            }
        }
    };
}

pub use counter;
// Reexport for ease of use
pub use lazy_static;

#[cfg(test)]
mod tests {
    use super::{counter, counter_value};

    #[test]
    fn counter_test() {
        for _ in 0..3 {
            counter!("counter_test hits");
        }
        if cfg!(feature = "counter") {
            assert_eq!(counter_value("counter_test hits"), Some(3));
        } else {
            assert_eq!(counter_value("counter_test hits"), None);
        }
    }
}
