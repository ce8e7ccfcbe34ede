//! One module per operation. Every repository operation runs as exactly one
//! store transaction, which is what keeps the content bucket and the title
//! index in step: either both sides of a change commit or neither does.

pub mod config;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod get;
pub mod helpers;
pub mod list;
pub mod update;

/// Runs `f` with a debug-level subscriber and returns what it logged.
#[cfg(test)]
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let logged = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (value, logged)
}
