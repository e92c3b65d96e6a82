use std::{
    ops::{Deref, DerefMut},
    time::{Duration, Instant},
};

use super::counter::CounterTime;

pub struct TimedResult<T> {
    pub res: T,
    pub elapsed: Duration,
}

impl<T> Deref for TimedResult<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.res
    }
}

impl<T> DerefMut for TimedResult<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.res
    }
}

pub fn timed_scope<R, F: FnOnce() -> R>(f: F) -> TimedResult<R> {
    let begin = Instant::now();
    let res = f();

    let elapsed = begin.elapsed();

    TimedResult { res, elapsed }
}

pub fn timed_scope_log<R, F: FnOnce() -> R>(label: &'static str, f: F) -> TimedResult<R> {
    let time_res = timed_scope(f);
    log::log!(target: "scoped timer", log::Level::Info, "{}: {}", label, format_elapsed(time_res.elapsed));
    time_res
}

pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_millis(1) {
        let micro = elapsed.as_secs_f32() * 1000. * 1000.;
        format!("{micro:.3}µs")
    } else if elapsed < Duration::from_secs(1) {
        let milli = elapsed.as_secs_f32() * 1000.;
        format!("{milli:.3}ms")
    } else if elapsed < Duration::from_secs(60) {
        let s = elapsed.as_secs_f32();
        format!("{s:.3}s")
    } else {
        let elapsed_secs = elapsed.as_secs();
        let h = elapsed_secs / 3600;
        let m = (elapsed_secs / 60) % 60;
        let s = elapsed_secs % 60;
        format!("{h}h{m}m{s}s")
    }
}

pub fn timed_scope_accumulate_<R, F: FnOnce() -> R>(timer: &CounterTime, f: F) -> TimedResult<R> {
    let timed_res = timed_scope(f);
    timer.add(timed_res.elapsed);
    timed_res
}

/// Runs a closure, adding its duration to the named time counter when the
/// `counter_time` feature is on.
#[macro_export]
macro_rules! timed_scope_accumulate {
    ($descr:literal, $($arg: tt)+) => {
        if cfg!(feature = "counter_time") {
            use $crate::utils::counter::{insert_counter, lazy_static, Counter, CounterTime};
            use $crate::utils::timer::timed_scope_accumulate_;
            lazy_static::lazy_static! {
                static ref COUNTER_REF: std::sync::Arc<Counter> = {
                    insert_counter($descr, Counter::CounterTime(CounterTime::new()))
                };
            }
            match &**COUNTER_REF {
                Counter::CounterTime(c) => timed_scope_accumulate_(c, $($arg)*).res,
                Counter::CounterU64(_) => unreachable!("{} is not a time counter", $descr),
            }
        } else {
            ($($arg)+)()
        }
    };
}

pub use timed_scope_accumulate;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{format_elapsed, timed_scope};

    #[test]
    fn format_elapsed_test() {
        assert_eq!(format_elapsed(Duration::from_micros(250)), "250.000µs");
        assert_eq!(format_elapsed(Duration::from_millis(12)), "12.000ms");
        assert_eq!(format_elapsed(Duration::from_millis(2500)), "2.500s");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "1h2m5s");
    }

    #[test]
    fn timed_scope_test() {
        let timed = timed_scope(|| 21 * 2);
        assert_eq!(*timed, 42);
        assert!(timed.elapsed < Duration::from_secs(1));
    }
}
