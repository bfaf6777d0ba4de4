use std::sync::mpsc;
use std::time::Instant;

use crate::prettyprint_usize;

const PROGRESS_FREQUENCY_SECONDS: f64 = 0.2;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

struct Progress {
    label: String,
    processed_items: usize,
    total_items: usize,
    started_at: Instant,
    last_printed_at: Instant,
}

impl Progress {
    fn new(label: &str, total_items: usize) -> Progress {
        Progress {
            label: label.to_string(),
            processed_items: 0,
            total_items,
            started_at: Instant::now(),
            last_printed_at: Instant::now(),
        }
    }

    // Returns when done
    fn next(&mut self) -> Option<(f64, String)> {
        self.processed_items += 1;
        if self.processed_items > self.total_items {
            panic!(
                "{} is too few items for {} progress",
                prettyprint_usize(self.total_items),
                self.label
            );
        }

        if self.processed_items == self.total_items {
            let elapsed = elapsed_seconds(self.started_at);
            let line = format!(
                "{} ({})... {}",
                self.label,
                prettyprint_usize(self.total_items),
                prettyprint_time(elapsed)
            );
            info!("{}", line);
            return Some((elapsed, line));
        } else if elapsed_seconds(self.last_printed_at) >= PROGRESS_FREQUENCY_SECONDS {
            self.last_printed_at = Instant::now();
            info!(
                "{}: {}/{}... {}",
                self.label,
                prettyprint_usize(self.processed_items),
                prettyprint_usize(self.total_items),
                prettyprint_time(elapsed_seconds(self.started_at))
            );
        }
        None
    }
}

enum StackEntry {
    TimerSpan(TimerSpan),
    Progress(Progress),
}

struct TimerSpan {
    name: String,
    started_at: Instant,
}

/// Reports how long nested phases of some work take and tracks progress through loops.
/// Warnings are repeated when the Timer is dropped.
pub struct Timer {
    results: Vec<String>,
    stack: Vec<StackEntry>,

    outermost_name: String,

    warnings: Vec<String>,
}

impl Timer {
    pub fn new(name: &str) -> Timer {
        let mut t = Timer {
            results: Vec::new(),
            stack: Vec::new(),
            outermost_name: name.to_string(),
            warnings: Vec::new(),
        };
        t.start(name);
        t
    }

    pub fn throwaway() -> Timer {
        Timer::new("throwaway")
    }

    pub fn warn(&mut self, line: String) {
        warn!("{}", line);
        self.warnings.push(line);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn start(&mut self, name: &str) {
        debug!("{}...", name);
        self.stack.push(StackEntry::TimerSpan(TimerSpan {
            name: name.to_string(),
            started_at: Instant::now(),
        }));
    }

    pub fn stop(&mut self, name: &str) {
        let span = match self.stack.pop() {
            Some(StackEntry::TimerSpan(s)) => s,
            _ => panic!("stop({}) called without a matching start", name),
        };
        assert_eq!(span.name, name);
        let elapsed = elapsed_seconds(span.started_at);
        let line = format!("{} took {}", name, prettyprint_time(elapsed));
        self.add_result(line);
    }

    pub fn start_iter(&mut self, name: &str, total_items: usize) {
        if total_items == 0 {
            return;
        }
        if let Some(StackEntry::Progress(p)) = self.stack.last() {
            panic!(
                "Can't start_iter({}) while Progress({}) is top of the stack",
                name, p.label
            );
        }

        self.stack
            .push(StackEntry::Progress(Progress::new(name, total_items)));
    }

    pub fn next(&mut self) {
        let maybe_result =
            if let Some(StackEntry::Progress(ref mut progress)) = self.stack.last_mut() {
                progress.next()
            } else {
                panic!("Can't next() while a TimerSpan is top of the stack");
            };
        if let Some((_, result)) = maybe_result {
            self.stack.pop();
            self.add_result(result);
        }
    }

    fn add_result(&mut self, line: String) {
        let padding = "  ".repeat(self.stack.len());
        debug!("{}", line);
        self.results.push(format!("{}- {}", padding, line));
    }

    /// Runs `cb` over every request on a pool of `num_workers` threads. Each result is handed to
    /// `on_result` on the calling thread as soon as it's ready, so results arrive in completion
    /// order, not in the order of `requests`. The pool lives only for the duration of this call.
    pub fn parallelize_unordered<I, O, F, C>(
        &mut self,
        timer_name: &str,
        num_workers: usize,
        requests: Vec<I>,
        cb: F,
        mut on_result: C,
    ) where
        I: Send,
        O: Send,
        F: Fn(I) -> O + Send + Clone + Copy,
        C: FnMut(&mut Timer, O),
    {
        let total = requests.len();
        let mut pool = scoped_threadpool::Pool::new(num_workers.max(1) as u32);
        pool.scoped(|scope| {
            let (tx, rx) = mpsc::channel();
            for req in requests {
                let tx = tx.clone();
                scope.execute(move || {
                    // The receiver outlives every worker, so this can't fail
                    let _ = tx.send(cb(req));
                });
            }
            drop(tx);

            self.start_iter(timer_name, total);
            for result in rx.iter() {
                self.next();
                on_result(&mut *self, result);
            }
        });
    }
}

impl std::ops::Drop for Timer {
    fn drop(&mut self) {
        let stop_name = self.outermost_name.clone();

        // If we're in the middle of unwinding a panic, don't further blow up.
        match self.stack.last() {
            Some(StackEntry::TimerSpan(ref s)) => {
                if s.name != stop_name {
                    warn!("dropping Timer because of panic");
                    return;
                }
            }
            _ => {
                warn!("dropping Timer because of panic");
                return;
            }
        }

        self.stop(&stop_name);
        for line in &self.results {
            debug!("{}", line);
        }

        if !self.warnings.is_empty() {
            warn!("{} warnings:", self.warnings.len());
            for line in &self.warnings {
                warn!("{}", line);
            }
        }
    }
}
