/// Errors reported by the canvas layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    /// The pixel buffer or clip mask could not be allocated at this size.
    #[error("cannot allocate a {width}x{height} surface")]
    InvalidSize { width: u32, height: u32 },
    /// A caller-provided output buffer cannot hold the whole surface.
    #[error("output slice too small: {actual} < {needed}")]
    OutputTooSmall { needed: usize, actual: usize },
}

/// Errors reported when building a keyframe timeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyframeError {
    /// Every keyframe must carry one value per animated element.
    #[error("keyframe has {actual} values, expected {expected}")]
    ElementCount { expected: usize, actual: usize },
}
