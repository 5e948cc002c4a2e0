//! Single-shot asynchronous loads.
//!
//! Each load starts as soon as it is requested and resolves exactly once, with either the
//! payload or an error. There is no retry, timeout or cancellation.

use super::{HeadlessError, Result};
use futures::channel::oneshot;
use inksort_core::{FrequencyMap, read_frequency_map};
use std::future::Future;
use std::io::Read;
use std::path::PathBuf;

/// Where interactive input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Stdin,
    File(PathBuf),
}

impl TextSource {
    /// `None` and `-` mean stdin.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => Self::Stdin,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }
}

fn complete_once<T, F>(what: &'static str, work: F) -> impl Future<Output = Result<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        // The receiver may already be gone; nobody is left to tell.
        let _ = tx.send(work());
    });
    async move {
        let outcome = rx.await.map_err(|_| HeadlessError::Abandoned { what })?;
        tracing::debug!(what, ok = outcome.is_ok(), "load completed");
        outcome
    }
}

fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Reads `input` as UTF-8 text. Invalid sequences become U+FFFD; there is no size or type check.
pub fn read_text_input(input: TextSource) -> impl Future<Output = Result<String>> {
    complete_once("text input", move || {
        let mut bytes = Vec::new();
        match &input {
            TextSource::Stdin => {
                std::io::stdin()
                    .lock()
                    .read_to_end(&mut bytes)
                    .map_err(|source| inksort_core::Error::Read {
                        path: PathBuf::from("-"),
                        source,
                    })?;
            }
            TextSource::File(path) => {
                bytes = std::fs::read(path).map_err(|source| inksort_core::Error::Read {
                    path: path.clone(),
                    source,
                })?;
            }
        }
        Ok(decode_text(bytes))
    })
}

/// Loads a frequency map JSON file written by the offline counter.
pub fn load_frequency_map(path: PathBuf) -> impl Future<Output = Result<FrequencyMap>> {
    complete_once("frequency map", move || Ok(read_frequency_map(&path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn dash_and_missing_arg_mean_stdin() {
        assert_eq!(TextSource::from_arg(None), TextSource::Stdin);
        assert_eq!(TextSource::from_arg(Some("-")), TextSource::Stdin);
        assert_eq!(
            TextSource::from_arg(Some("book.txt")),
            TextSource::File(PathBuf::from("book.txt"))
        );
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        assert_eq!(decode_text(b"ok".to_vec()), "ok");
        assert_eq!(decode_text(vec![b'a', 0xff, b'b']), "a\u{FFFD}b");
    }

    #[test]
    fn completion_carries_the_error() {
        let outcome: Result<()> = block_on(complete_once("failing load", || {
            Err(HeadlessError::Core(inksort_core::Error::EmptyFontFamily))
        }));
        assert!(matches!(
            outcome,
            Err(HeadlessError::Core(inksort_core::Error::EmptyFontFamily))
        ));
    }

    #[test]
    fn panicking_work_is_reported_as_abandoned() {
        let outcome: Result<()> = block_on(complete_once("exploding load", || {
            panic!("worker died")
        }));
        assert!(matches!(
            outcome,
            Err(HeadlessError::Abandoned {
                what: "exploding load"
            })
        ));
    }
}
