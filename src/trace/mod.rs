use tracing::{Level, Metadata};
use tracing_subscriber::layer::{Context, Filter};

/// Randomly samples TRACE and DEBUG events. The draw loop runs every 50ms and
/// traces each frame, so keeping all of them would flood the log file.
#[derive(Debug, Clone, Copy)]
pub struct TraceFilter {
    trace_rate: f32,
    debug_rate: f32,
}

impl Default for TraceFilter {
    fn default() -> Self {
        Self {
            trace_rate: 0.000_05,
            debug_rate: 1.0,
        }
    }
}

impl TraceFilter {
    fn is_enabled(&self, level: Level, roll: f32) -> bool {
        if level == Level::TRACE {
            roll < self.trace_rate
        } else if level == Level::DEBUG {
            roll < self.debug_rate
        } else {
            true
        }
    }
}

impl<S> Filter<S> for TraceFilter {
    fn enabled(&self, meta: &Metadata<'_>, _: &Context<'_, S>) -> bool {
        self.is_enabled(*meta.level(), rand::random::<f32>())
    }
}
