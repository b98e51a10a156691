use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

/// Global toggle to enable or disable tracing.
pub static ENABLE_TRACE: AtomicBool = AtomicBool::new(false);

// Per-thread indentation tracking and the optional capture buffer.
thread_local! {
    static INDENT: Cell<usize> = const { Cell::new(0) };
    static CAPTURED: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

static CALL_ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Whether trace lines are currently emitted on this thread.
pub fn is_enabled() -> bool {
    ENABLE_TRACE.load(Ordering::Relaxed) || CAPTURED.with(|buf| buf.borrow().is_some())
}

/// Run a closure with the current indentation level and emit the line it builds.
pub fn with_indent<F: FnOnce(usize) -> String>(f: F) {
    let line = f(INDENT.with(Cell::get));
    CAPTURED.with(|buf| match buf.borrow_mut().as_mut() {
        Some(lines) => lines.push(line),
        None => eprintln!("{line}"),
    });
}

/// Run `f` with tracing enabled on this thread, collecting the emitted lines
/// instead of printing them.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let previous = CAPTURED.with(|buf| buf.replace(Some(Vec::new())));
    let output = f();
    let lines = CAPTURED.with(|buf| buf.replace(previous)).unwrap_or_default();
    (output, lines)
}

/// Increase indentation (on function entry).
fn indent_inc() {
    INDENT.with(|i| i.set(i.get() + 1));
}

/// Decrease indentation (on function exit).
fn indent_dec() {
    INDENT.with(|i| i.set(i.get().saturating_sub(1)));
}

/// Guard that logs entry/exit of a function.
pub struct TraceFnGuard {
    name: String,
    enabled: bool,
    start_time: Option<Instant>,
    id: usize,
}

impl TraceFnGuard {
    pub fn new(name: impl Into<String>, message: Option<&str>) -> Self {
        let name = name.into();
        let enabled = is_enabled();
        let start_time = if enabled { Some(Instant::now()) } else { None };
        let id = CALL_ID_COUNTER.fetch_add(1, Ordering::Relaxed);

        if enabled {
            with_indent(|i| {
                format!(
                    "{}[#{}]↳ Enter: {} {}",
                    "  ".repeat(i),
                    id,
                    name,
                    message.unwrap_or("")
                )
                .trim_end()
                .to_string()
            });
            indent_inc();
        }

        Self {
            name,
            enabled,
            start_time,
            id,
        }
    }
}

impl Drop for TraceFnGuard {
    fn drop(&mut self) {
        if self.enabled {
            indent_dec();
            if let Some(start) = self.start_time {
                let duration = start.elapsed();
                with_indent(|i| {
                    format!(
                        "{}[#{}]↳ Exit:  {} (took {:.2?})",
                        "  ".repeat(i),
                        self.id,
                        self.name,
                        duration
                    )
                });
            } else {
                with_indent(|i| format!("{}↳ Exit:  {}", "  ".repeat(i), self.name));
            }
        }
    }
}

/// Macro to insert tracing into functions.
#[macro_export]
macro_rules! trace_fn {
    ($name:expr) => {
        let _trace_guard = $crate::TraceFnGuard::new($name, None);
    };
    ($name:expr, $($tt:tt)*) => {
        let _trace_guard = $crate::TraceFnGuard::new(
            $name,
            $crate::is_enabled().then(|| format!($($tt)*)).as_deref(),
        );
    };
}

#[macro_export]
macro_rules! trace_log {
    ($($tt:tt)*) => {
        if $crate::is_enabled() {
            $crate::with_indent(|i| format!(
                "{}      {}",
                "  ".repeat(i),
                format!($($tt)*),
            ));
        }
    };
}
