//! Parse tracing.
//!
//! Records an indented `BEGIN`/`END` line pair around each traced parse
//! function. The tracer belongs to one parser, so concurrent parses never
//! share a nesting level.

const TRACE_INDENT_PLACEHOLDER: &str = "\t";

#[derive(Debug, Default)]
pub struct Tracer {
    enabled: bool,
    level: usize,
    log: Vec<String>,
}

impl Tracer {
    pub fn new(enabled: bool) -> Self {
        Tracer {
            enabled,
            ..Default::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn trace(&mut self, msg: &str) {
        if !self.enabled {
            return;
        }

        self.level += 1;
        self.print(&format!("BEGIN {}", msg));
    }

    pub fn untrace(&mut self, msg: &str) {
        if !self.enabled {
            return;
        }

        self.print(&format!("END {}", msg));
        self.level = self.level.saturating_sub(1);
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    fn print(&mut self, line: &str) {
        let indent = TRACE_INDENT_PLACEHOLDER.repeat(self.level.saturating_sub(1));
        self.log.push(format!("{}{}", indent, line));
    }
}

#[cfg(test)]
mod tests {
    use super::Tracer;

    #[test]
    fn test_nested_trace_is_indented() {
        let mut tracer = Tracer::new(true);

        tracer.trace("outer");
        tracer.trace("inner");
        tracer.untrace("inner");
        tracer.untrace("outer");

        assert_eq!(
            tracer.log(),
            ["BEGIN outer", "\tBEGIN inner", "\tEND inner", "END outer"]
        );
    }

    #[test]
    fn test_disabled_tracer_records_nothing() {
        let mut tracer = Tracer::new(false);

        tracer.trace("outer");
        tracer.untrace("outer");

        assert!(tracer.log().is_empty());
        assert!(!tracer.is_enabled());
    }
}
