/// Error categories.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The face buffer of a mesh could not be reserved.
    #[error("Allocation error: {0}")]
    Allocation(String),

    /// A frame buffer was requested with a zero dimension.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Malformed geometry input.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn face_buffer(faces: usize) -> Self {
        Self::Allocation(format!("Failed to reserve {faces} faces"))
    }

    pub fn truncated_stl(expected: usize, found: usize) -> Self {
        Self::Parse(format!("Binary STL truncated: expected {expected} bytes, found {found}"))
    }

    pub fn invalid_stl(detail: &str) -> Self {
        Self::Parse(format!("Invalid STL: {detail}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
