pub mod error;
pub mod maze;
pub mod routing;
pub mod snapshot;

pub use error::MazeError;
pub use maze::{Coordinate, Direction, Maze, Tile};
pub use routing::{RouteFinder, SearchState};
