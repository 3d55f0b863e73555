use thiserror::Error;

/// Holds the root cause of a failure, without the chain of stages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidParameterCount,
    DimensionMismatch,
    SingularTensor,
    NonInvertibleDeformation,
}

/// Defines the error type of all operations
///
/// Errors are created where they are detected and then wrapped by every
/// enclosing stage with [MicroError::Stage], so that the final error carries
/// the full call-stack trace:
///
/// ```text
/// linear elasticity: push-forward: det(F) = -1 is not positive
/// ```
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MicroError {
    /// A group of material constants has the wrong number of values
    #[error("{what} requires {expected} values but {found} were given")]
    InvalidParameterCount {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A flat array does not have the length required by its tensor order
    #[error("{what} must have {expected} components but has {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// The inversion collaborator could not invert a tensor
    #[error("cannot invert {what}: {reason}")]
    SingularTensor { what: &'static str, reason: &'static str },

    /// The Jacobian of the deformation is not positive
    #[error("det(F) = {det} is not positive")]
    NonInvertibleDeformation { det: f64 },

    /// Wraps an error raised by an inner stage
    #[error("{stage}: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<MicroError>,
    },
}

impl MicroError {
    /// Wraps this error into a new stage
    pub fn within(self, stage: &'static str) -> Self {
        MicroError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error (the one actually detected)
    pub fn root(&self) -> &MicroError {
        let mut current = self;
        while let MicroError::Stage { source, .. } = current {
            current = source;
        }
        current
    }

    /// Returns the kind of the innermost error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MicroError::InvalidParameterCount { .. } => ErrorKind::InvalidParameterCount,
            MicroError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            MicroError::SingularTensor { .. } => ErrorKind::SingularTensor,
            MicroError::NonInvertibleDeformation { .. } => ErrorKind::NonInvertibleDeformation,
            MicroError::Stage { source, .. } => source.kind(),
        }
    }

    /// Returns the names of the stages crossed by this error (outermost first)
    pub fn trace(&self) -> Vec<&'static str> {
        let mut stages = Vec::new();
        let mut current = self;
        while let MicroError::Stage { stage, source } = current {
            stages.push(*stage);
            current = source;
        }
        stages
    }
}

/// Adds [MicroError::within] to results
pub trait Within<T> {
    /// Wraps the error (if any) into the given stage
    fn within(self, stage: &'static str) -> Result<T, MicroError>;
}

impl<T> Within<T> for Result<T, MicroError> {
    fn within(self, stage: &'static str) -> Result<T, MicroError> {
        self.map_err(|e| e.within(stage))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
