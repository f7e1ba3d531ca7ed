use hypercut_core::ErrorCode;

/// Failures of the spectral pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpectralError {
    /// A diagonal degree matrix has a zero entry and cannot be inverted.
    #[error("{matrix} is singular: {label} has zero degree")]
    SingularMatrix {
        /// `"D_v"` or `"D_e"`.
        matrix: &'static str,
        /// Row of the zero entry (node id or edge index).
        index: usize,
        /// Node name or `hyperedge <n>`.
        label: String,
    },

    /// The clique expansion has more than one connected component.
    #[error(
        "hypergraph has {components} connected components; spectral bipartition needs exactly one"
    )]
    Disconnected { components: usize },

    /// Power iteration hit the iteration cap.
    #[error("random walk did not converge after {iterations} iterations")]
    NotConverged { iterations: usize },

    /// Malformed threshold, tolerance, matrix shape, or empty input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SpectralError {
    /// Map this error onto its stable [`ErrorCode`].
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::SingularMatrix { .. } => ErrorCode::SingularMatrix,
            Self::Disconnected { .. } => ErrorCode::Disconnected,
            Self::NotConverged { .. } => ErrorCode::NotConverged,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
        }
    }
}
