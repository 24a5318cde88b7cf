/// Underlying cause carried by the public error types (an `anyhow` chain).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Either feed could not be read or parsed. Nothing is drawn when this happens.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("[load] geometry feed failed")]
    Geometry(#[source] BoxError),

    #[error("[load] metric feed failed")]
    Metrics(#[source] BoxError),
}

impl LoadError {
    pub(crate) fn geometry(err: anyhow::Error) -> Self { Self::Geometry(err.into()) }

    pub(crate) fn metrics(err: anyhow::Error) -> Self { Self::Metrics(err.into()) }
}

/// Failure of a load-and-render cycle.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("[render] cannot set up the projection")]
    Projection(#[source] BoxError),
}
