//! Common test utilities and helpers

use std::io;
use std::sync::{Arc, Mutex};

#[allow(unused_imports)]
pub use steadfast::sleep::testing::RecordingSleeper;

/// An operation that fails a fixed number of times before succeeding.
#[allow(dead_code)]
pub struct Flaky {
    failures: u32,
    calls: u32,
    value: i32,
}

#[allow(dead_code)]
impl Flaky {
    pub fn new(failures: u32, value: i32) -> Self {
        Self {
            failures,
            calls: 0,
            value,
        }
    }

    pub fn always_failing() -> Self {
        Self::new(u32::MAX, 0)
    }

    pub fn call(&mut self) -> Result<i32, ValueError> {
        self.calls += 1;
        if self.calls <= self.failures {
            Err(ValueError(format!("call {} failed", self.calls)))
        } else {
            Ok(self.value)
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }
}

/// Error type raised by [`Flaky`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ValueError: {0}")]
pub struct ValueError(pub String);

/// In-memory sink for formatted log output.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct SharedBuf(pub Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
