use thiserror::Error;

use crate::mapgen::ExitSearchError;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("grid size {size} is below the minimum of {minimum}")]
    GridTooSmall { size: usize, minimum: usize },
    #[error("cannot place {required} items on {available} passage cells")]
    InsufficientPassages { required: usize, available: usize },
    #[error("no valid maze after {attempts} attempts: {last}")]
    AttemptsExhausted { attempts: u32, last: ExitSearchError },
    #[error("{size} cells of {cell_size}px plus a {border}px border do not fit in i32 pixel space")]
    PixelExtentOverflow { size: usize, cell_size: u32, border: u32 },
}
