use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::maze::{Coordinate, Direction, Maze, Tile};

// Probe order is a compatibility constant: it decides which of several
// simple routes gets found, and saved snapshots replay against it.
const PROBE_ORDER: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    Unstarted,
    InProgress,
    Succeeded,
    Exhausted,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Succeeded | SearchState::Exhausted)
    }
}

#[derive(Clone, Debug)]
pub struct RouteFinder {
    maze: Maze,
    route: Vec<Coordinate>,
    used: BTreeSet<Coordinate>,
    state: SearchState,
}

impl RouteFinder {
    pub fn new(maze: Maze) -> Self {
        Self {
            maze,
            route: Vec::new(),
            used: BTreeSet::new(),
            state: SearchState::Unstarted,
        }
    }

    pub(crate) fn from_parts(
        maze: Maze,
        route: Vec<Coordinate>,
        used: BTreeSet<Coordinate>,
        state: SearchState,
    ) -> Self {
        Self { maze, route, used, state }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    // Entrance-first; the final entry is the search frontier.
    pub fn route(&self) -> &[Coordinate] {
        &self.route
    }

    pub fn used(&self) -> &BTreeSet<Coordinate> {
        &self.used
    }

    // True once the search is finished, whether a route was found or the
    // maze was exhausted. The first call only pushes the entrance.
    pub fn step(&mut self) -> bool {
        match self.state {
            SearchState::Succeeded | SearchState::Exhausted => true,
            SearchState::Unstarted => {
                self.route.push(self.maze.entrance());
                self.state = SearchState::InProgress;
                false
            }
            SearchState::InProgress => self.advance(),
        }
    }

    fn advance(&mut self) -> bool {
        let top = *self.route.last().expect("in-progress route is never empty");
        for direction in PROBE_ORDER {
            let Some((next, tile)) = self.maze.neighbor(top, direction) else {
                continue;
            };
            if !self.is_open(next, tile) {
                continue;
            }
            self.route.push(next);
            if tile == Tile::Exit {
                debug!("route found, {} tiles long", self.route.len());
                self.state = SearchState::Succeeded;
                return true;
            }
            trace!("advanced to ({}, {})", next.x, next.y);
            return false;
        }

        let dead = self.route.pop().expect("in-progress route is never empty");
        self.used.insert(dead);
        trace!("backtracked from ({}, {})", dead.x, dead.y);
        if self.route.is_empty() {
            debug!("search exhausted, no route exists");
            self.state = SearchState::Exhausted;
            return true;
        }
        false
    }

    fn is_open(&self, at: Coordinate, tile: Tile) -> bool {
        tile.is_navigable() && !self.used.contains(&at) && !self.route.contains(&at)
    }
}

impl Display for RouteFinder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.state == SearchState::Unstarted {
            return self.maze.fmt(f);
        }
        for (y, row) in self.maze.rows().iter().enumerate().rev() {
            for (x, tile) in row.iter().enumerate() {
                let at = Coordinate { x, y };
                let symbol = if self.route.contains(&at) {
                    '*'
                } else if self.used.contains(&at) {
                    '-'
                } else {
                    tile.symbol()
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
