//! Per-pass layout tracing.
//!
//! With the `layout-trace` feature enabled, [`layout_trace!`] prints to
//! stderr indented by the current recursion depth. Without it the macro
//! expands to nothing and its arguments are never evaluated.

#[cfg(feature = "layout-trace")]
use std::cell::Cell;

#[cfg(feature = "layout-trace")]
thread_local! {
    static TRACE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Guard that indents trace output for as long as it is alive.
///
/// Returned by [`enter`]; dropping it restores the previous depth.
#[derive(Debug)]
#[must_use = "the depth is restored as soon as the guard is dropped"]
pub struct TraceScope {
    _private: (),
}

/// Increase the trace indentation until the returned guard is dropped.
pub fn enter() -> TraceScope {
    #[cfg(feature = "layout-trace")]
    TRACE_DEPTH.with(|d| d.set(d.get() + 1));
    TraceScope { _private: () }
}

impl Drop for TraceScope {
    fn drop(&mut self) {
        #[cfg(feature = "layout-trace")]
        TRACE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Current indentation depth (always 0 without the `layout-trace` feature).
#[must_use]
pub fn depth() -> usize {
    #[cfg(feature = "layout-trace")]
    {
        TRACE_DEPTH.with(Cell::get)
    }
    #[cfg(not(feature = "layout-trace"))]
    {
        0
    }
}

/// Print a trace line tagged with `component`, indented by [`depth`].
///
/// ```ignore
/// layout_trace!("MEASURE", "box {} -> {}x{}", id, w, h);
/// ```
#[macro_export]
macro_rules! layout_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(feature = "layout-trace")]
        {
            eprintln!(
                "{:indent$}[{}] {}",
                "",
                $component,
                format_args!($($arg)*),
                indent = $crate::trace::depth() * 2
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_restores_depth() {
        let before = depth();
        {
            let _scope = enter();
            #[cfg(feature = "layout-trace")]
            assert_eq!(depth(), before + 1);
        }
        assert_eq!(depth(), before);
    }
}
