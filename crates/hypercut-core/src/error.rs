use std::fmt;
use std::io;
use std::path::PathBuf;

/// Machine-readable error codes shared by every hypercut crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InputParse,
    InvalidWeight,
    InputIo,
    ConfigParse,
    SingularMatrix,
    Disconnected,
    NotConverged,
    InvalidArgument,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InputParse => "E1001",
            Self::InvalidWeight => "E1002",
            Self::InputIo => "E1003",
            Self::ConfigParse => "E1004",
            Self::SingularMatrix => "E2001",
            Self::Disconnected => "E2002",
            Self::NotConverged => "E2003",
            Self::InvalidArgument => "E2004",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InputParse => {
                Some("Each line needs `nodes<sep>weight` with nodes joined by the delimiter.")
            }
            Self::InvalidWeight => Some("Use a finite, non-negative weight."),
            Self::InputIo => Some("Check that the path exists and is readable/writable."),
            Self::ConfigParse => Some("Fix syntax in hypercut.toml and retry."),
            Self::SingularMatrix => Some(
                "Every node needs positive incident weight and every hyperedge at least one node.",
            ),
            Self::Disconnected => Some(
                "Partition each component separately, or pass --allow-disconnected to force a cut.",
            ),
            Self::NotConverged => Some("Raise max_iter, loosen the tolerance, or retry with another seed."),
            Self::InvalidArgument => None,
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while building or loading a hypergraph.
#[derive(Debug, thiserror::Error)]
pub enum HypergraphError {
    /// A hyperedge weight was negative, NaN, or infinite.
    #[error("invalid hyperedge weight {weight}: weights must be finite and non-negative")]
    InvalidWeight { weight: f64 },

    /// A weight read from a file was negative, NaN, or infinite.
    #[error(
        "file format error at line {line}: invalid hyperedge weight {weight}: weights must be finite and non-negative"
    )]
    InvalidWeightAt { line: usize, weight: f64 },

    /// A node name cannot be written because it contains a separator or a line break.
    #[error("node name {name:?} cannot be written: it contains {found:?}")]
    UnwritableName { name: String, found: String },

    /// A line of the text format could not be interpreted.
    #[error("file format error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading or writing a hypergraph file failed.
    #[error("I/O error on {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing a stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HypergraphError {
    /// Map this error onto its stable [`ErrorCode`].
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidWeight { .. } | Self::InvalidWeightAt { .. } => ErrorCode::InvalidWeight,
            Self::Parse { .. } => ErrorCode::InputParse,
            Self::File { .. } | Self::Io(_) => ErrorCode::InputIo,
            Self::UnwritableName { .. } => ErrorCode::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 9] = [
        ErrorCode::InputParse,
        ErrorCode::InvalidWeight,
        ErrorCode::InputIo,
        ErrorCode::ConfigParse,
        ErrorCode::SingularMatrix,
        ErrorCode::Disconnected,
        ErrorCode::NotConverged,
        ErrorCode::InvalidArgument,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let s = code.code();
            assert_eq!(s.len(), 5);
            assert!(s.starts_with('E'));
            assert!(s.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn parse_error_names_line() {
        let err = HypergraphError::Parse {
            line: 7,
            message: "expected 1 or 2 fields, found 3".into(),
        };
        assert!(err.to_string().contains("line 7"));
        assert_eq!(err.error_code(), ErrorCode::InputParse);
    }

    #[test]
    fn file_weight_error_keeps_weight_code() {
        let err = HypergraphError::InvalidWeightAt {
            line: 4,
            weight: -2.0,
        };
        assert!(err.to_string().contains("line 4"));
        assert_eq!(err.error_code(), ErrorCode::InvalidWeight);
    }

    #[test]
    fn file_error_names_path() {
        let err = HypergraphError::File {
            path: PathBuf::from("/tmp/missing.tsv"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/tmp/missing.tsv"));
        assert_eq!(err.error_code(), ErrorCode::InputIo);
    }
}
