/// Contract violations reported by the checked entry points.
///
/// Unchecked entry points take `u32` keys and cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("key {key} is outside the 32-bit key space")]
    KeyOutOfRange { key: i128 },

    #[error("container threshold must be positive, got {0}")]
    InvalidThreshold(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
