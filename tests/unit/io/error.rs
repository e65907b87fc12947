//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use scatter_contour::PlotError;
    use scatter_contour::io::error::{computation_error, parse_error};
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = PlotError::FileSystem {
            path: "/tmp/samples.dat".into(),
            operation: "read samples",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read samples"));
    }

    // Tests computation errors name the failing routine
    // Verified by omitting the operation from the message
    #[test]
    fn test_computation_error_message() {
        let error = computation_error("rbf fit", &"singular kernel matrix");

        let message = error.to_string();
        assert!(message.contains("rbf fit"));
        assert!(message.contains("singular kernel matrix"));
        assert!(error.source().is_none());
    }

    // Tests whole-file parse errors omit the line number
    // Verified by always printing the line
    #[test]
    fn test_parse_error_without_line() {
        let message = parse_error("empty.dat", 0, &"no data rows").to_string();

        assert!(message.contains("empty.dat"));
        assert!(!message.contains("line"));
    }

    // Tests conversion from I/O errors
    // Verified by mapping I/O errors to the computation variant
    #[test]
    fn test_from_io_error() {
        let error: PlotError = std::io::Error::other("disk full").into();

        assert!(matches!(error, PlotError::FileSystem { .. }));
    }
}
