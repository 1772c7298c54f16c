use std::io;
use std::sync::{Arc, Mutex};

use callmock::*;

/// Collects everything the subscriber writes.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn find<'l>(lines: &'l [String], level: &str, text: &str) -> &'l str {
    lines
        .iter()
        .find(|line| line.contains(level) && line.contains(text))
        .unwrap_or_else(|| panic!("no {level} line with {text:?} in {lines:#?}"))
}

#[test]
fn outcomes_are_logged_as_events() {
    let f = MockFunction::<(i32,), ()>::new().named("traced");
    f.call((&1,));

    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer({
            let captured = captured.clone();
            move || captured.clone()
        })
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let passed = f
            .check(location!())
            .once()
            .reporter(Arc::new(TracingReporter))
            .evaluate();
        assert!(passed.passed());

        let failed = f
            .check_called()
            .never()
            .reporter(Arc::new(TracingReporter))
            .evaluate();
        assert!(!failed.passed());
    });

    let lines = captured.lines();

    let checkpoint = find(&lines, "TRACE", "evaluating mock assertion");
    assert!(
        checkpoint.contains("file=\"tests/it/tracing_reporter.rs\""),
        "{checkpoint}"
    );
    assert!(checkpoint.contains("line="), "{checkpoint}");
    assert!(
        checkpoint.contains("outcomes_are_logged_as_events"),
        "{checkpoint}"
    );

    let success = find(&lines, "DEBUG", "traced: check_called().exactly(1)");
    assert!(success.contains("severity=check"), "{success}");
    assert!(success.contains("function="), "{success}");
    assert!(success.contains("file=\"tests/it/tracing_reporter.rs\""), "{success}");

    let failure = find(&lines, "ERROR", "expected no calls, but 1 call matched");
    assert!(failure.contains("severity=check"), "{failure}");
    assert!(failure.contains("line="), "{failure}");
    assert!(!failure.contains("function="), "{failure}");

    assert_eq!(
        2,
        lines.iter().filter(|line| line.contains("TRACE")).count(),
        "{lines:#?}"
    );
    assert!(!lines.iter().any(|line| line.contains("DEBUG") && line.contains("never")));
}
