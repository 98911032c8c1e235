//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the one operation the curator needs:
//! turn a downloaded file into a bounded web image.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::OptimizeParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
///
/// The rest of the crate only talks to this trait, so orchestration tests can
/// run against [`tests::MockBackend`] without decoding anything.
pub trait ImageBackend {
    /// Flatten onto white, shrink to fit, and encode to the output path.
    fn optimize(&self, params: &OptimizeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::Quality;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    ///
    /// `optimize` writes a small marker file to the output path so callers
    /// see a real file, and fails for any source listed in `failing`.
    #[derive(Default)]
    pub struct MockBackend {
        pub failing: Mutex<Vec<String>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Optimize {
            source: String,
            output: String,
            max_width: u32,
            max_height: u32,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make `optimize` fail for sources whose file name ends with `suffix`.
        pub fn failing_on(suffix: &str) -> Self {
            Self {
                failing: Mutex::new(vec![suffix.to_string()]),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn optimize(&self, params: &OptimizeParams) -> Result<(), BackendError> {
            let source = params.source.to_string_lossy().to_string();
            self.operations.lock().unwrap().push(RecordedOp::Optimize {
                source: source.clone(),
                output: params.output.to_string_lossy().to_string(),
                max_width: params.max_width,
                max_height: params.max_height,
                quality: params.quality.value(),
            });

            if self
                .failing
                .lock()
                .unwrap()
                .iter()
                .any(|suffix| source.ends_with(suffix.as_str()))
            {
                return Err(BackendError::ProcessingFailed(format!(
                    "mock decode failure: {source}"
                )));
            }
            std::fs::write(&params.output, b"mock")?;
            Ok(())
        }
    }

    #[test]
    fn mock_records_optimize() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = MockBackend::new();

        backend
            .optimize(&OptimizeParams {
                source: "/music_temp_1.jpg".into(),
                output: tmp.path().join("music_1.webp"),
                max_width: 400,
                max_height: 300,
                quality: Quality::new(85),
            })
            .unwrap();

        assert!(tmp.path().join("music_1.webp").exists());
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Optimize {
                max_width: 400,
                max_height: 300,
                quality: 85,
                ..
            }
        ));
    }

    #[test]
    fn mock_failing_source_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = MockBackend::failing_on("_temp_2.jpg");

        let result = backend.optimize(&OptimizeParams {
            source: "/music_temp_2.jpg".into(),
            output: tmp.path().join("music_2.webp"),
            max_width: 400,
            max_height: 300,
            quality: Quality::default(),
        });

        assert!(result.is_err());
        assert!(!tmp.path().join("music_2.webp").exists());
    }
}
