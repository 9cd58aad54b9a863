use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::MazeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Corridor,
    Entrance,
    Exit,
}

impl Tile {
    pub fn from_symbol(symbol: char) -> Result<Self, MazeError> {
        match symbol {
            'e' => Ok(Tile::Entrance),
            '.' => Ok(Tile::Corridor),
            '#' => Ok(Tile::Wall),
            'x' => Ok(Tile::Exit),
            other => Err(MazeError::InvalidSymbol(other)),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Tile::Entrance => 'e',
            Tile::Corridor => '.',
            Tile::Wall => '#',
            Tile::Exit => 'x',
        }
    }

    pub fn is_navigable(self) -> bool {
        !matches!(self, Tile::Wall)
    }
}

// x counts columns from the left, y counts rows from the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    // rows[0] is the bottom row; input text reads top-down
    rows: Vec<Vec<Tile>>,
    entrance: Coordinate,
    exit: Coordinate,
}

impl Maze {
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let lines: Vec<&str> = text.lines().collect();
        if !lines.iter().map(|line| line.chars().count()).all_equal() {
            return Err(MazeError::RaggedGrid);
        }

        let mut rows = Vec::with_capacity(lines.len());
        for line in lines.iter().rev() {
            let row = line
                .chars()
                .map(Tile::from_symbol)
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        let entrance = find_unique(
            &rows,
            Tile::Entrance,
            MazeError::NoEntrance,
            MazeError::MultipleEntrance,
        )?;
        let exit = find_unique(&rows, Tile::Exit, MazeError::NoExit, MazeError::MultipleExit)?;

        let maze = Self { rows, entrance, exit };
        debug!(
            "parsed {}x{} maze, entrance ({}, {}), exit ({}, {})",
            maze.width(),
            maze.height(),
            entrance.x,
            entrance.y,
            exit.x,
            exit.y
        );
        Ok(maze)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn tile_at(&self, at: Coordinate) -> Option<Tile> {
        self.rows.get(at.y).and_then(|row| row.get(at.x)).copied()
    }

    pub fn neighbor(&self, at: Coordinate, direction: Direction) -> Option<(Coordinate, Tile)> {
        let Coordinate { x, y } = at;
        let to = match direction {
            Direction::North => Coordinate { x, y: y + 1 },
            Direction::South => Coordinate { x, y: y.checked_sub(1)? },
            Direction::East => Coordinate { x: x + 1, y },
            Direction::West => Coordinate { x: x.checked_sub(1)?, y },
        };
        let tile = self.tile_at(to)?;
        Some((to, tile))
    }

    pub fn entrance(&self) -> Coordinate {
        self.entrance
    }

    pub fn exit(&self) -> Coordinate {
        self.exit
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }
}

fn find_unique(
    rows: &[Vec<Tile>],
    wanted: Tile,
    missing: MazeError,
    multiple: MazeError,
) -> Result<Coordinate, MazeError> {
    let mut found = None;
    for (y, row) in rows.iter().enumerate() {
        for (x, &tile) in row.iter().enumerate() {
            if tile == wanted {
                if found.is_some() {
                    return Err(multiple);
                }
                found = Some(Coordinate { x, y });
            }
        }
    }
    found.ok_or(missing)
}

impl Display for Maze {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter().rev() {
            for tile in row {
                write!(f, "{}", tile.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
