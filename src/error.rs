use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze rows have unequal length")]
    RaggedGrid,
    #[error("invalid symbol {0:?} in maze text")]
    InvalidSymbol(char),
    #[error("maze has no entrance")]
    NoEntrance,
    #[error("maze has more than one entrance")]
    MultipleEntrance,
    #[error("maze has no exit")]
    NoExit,
    #[error("maze has more than one exit")]
    MultipleExit,
    #[error("corrupt snapshot: {0}")]
    CorruptState(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
