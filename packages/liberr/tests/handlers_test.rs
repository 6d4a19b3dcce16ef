//! Tests for the tracing pass-through hooks

use liberr::{on_error, on_result, with_error_level_msg, with_message, Error};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn with_capture<R>(f: impl FnOnce() -> R) -> (R, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, captured.text())
}

#[test]
fn test_on_error_returns_the_same_tagged_error() {
    let base = Error::new("redis put failed");
    let tagged = with_error_level_msg(Some(base), "giving up").unwrap();

    let (returned, logs) = with_capture(|| on_error(tagged.clone()));

    assert!(Error::ptr_eq(&returned, &tagged));
    assert!(logs.contains("ERROR"));
    assert!(logs.contains("giving up"));
    assert!(logs.contains("handlers_test.rs"));
}

#[test]
fn test_on_error_returns_the_same_untagged_error() {
    let base = Error::new("cache miss");
    let wrapped = with_message(Some(base), "load captcha").unwrap();

    let (returned, logs) = with_capture(|| on_error(wrapped.clone()));

    assert!(Error::ptr_eq(&returned, &wrapped));
    assert!(logs.contains("WARN"));
    assert!(logs.contains("load captcha: cache miss"));
    assert!(!logs.contains("handlers_test.rs"));
}

#[test]
fn test_on_result_passes_value_through() {
    let (value, logs) = with_capture(|| on_result(vec![1, 2, 3]));
    assert_eq!(value, vec![1, 2, 3]);
    assert!(logs.contains("DEBUG"));

    let ok: Result<u8, Error> = Ok(7);
    assert_eq!(on_result(ok).unwrap(), 7);
}
