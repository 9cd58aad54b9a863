use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::maze::{Coordinate, Maze};
use crate::routing::{RouteFinder, SearchState};

// Bump on any schema change; load refuses every other version.
const VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    // the maze travels as its canonical rendered text and is re-parsed
    // (and so re-validated) on load
    maze: String,
    route: Vec<Coordinate>,
    used: Vec<Coordinate>,
    state: SearchState,
}

pub fn save<W: Write>(finder: &RouteFinder, writer: W) -> Result<(), MazeError> {
    let snapshot = Snapshot {
        version: VERSION,
        maze: finder.maze().to_string(),
        route: finder.route().to_vec(),
        used: finder.used().iter().copied().collect(),
        state: finder.state(),
    };
    serde_json::to_writer(writer, &snapshot).map_err(|err| MazeError::Io(err.into()))
}

pub fn load<R: Read>(reader: R) -> Result<RouteFinder, MazeError> {
    let snapshot: Snapshot = serde_json::from_reader(reader)
        .map_err(|err| corrupt(format!("undecodable snapshot: {err}")))?;
    restore(snapshot)
}

pub fn save_path<P: AsRef<Path>>(finder: &RouteFinder, path: P) -> Result<(), MazeError> {
    save(finder, BufWriter::new(File::create(path)?))
}

pub fn load_path<P: AsRef<Path>>(path: P) -> Result<RouteFinder, MazeError> {
    load(BufReader::new(File::open(path)?))
}

fn corrupt(detail: impl Into<String>) -> MazeError {
    MazeError::CorruptState(detail.into())
}

fn restore(snapshot: Snapshot) -> Result<RouteFinder, MazeError> {
    if snapshot.version != VERSION {
        return Err(corrupt(format!(
            "unsupported snapshot version {}",
            snapshot.version
        )));
    }
    let maze =
        Maze::parse(&snapshot.maze).map_err(|err| corrupt(format!("embedded maze: {err}")))?;

    for &at in snapshot.route.iter().chain(&snapshot.used) {
        match maze.tile_at(at) {
            None => return Err(corrupt(format!("({}, {}) is outside the maze", at.x, at.y))),
            Some(tile) if !tile.is_navigable() => {
                return Err(corrupt(format!("({}, {}) is not navigable", at.x, at.y)));
            }
            Some(_) => {}
        }
    }

    let used: BTreeSet<Coordinate> = snapshot.used.iter().copied().collect();
    if used.len() != snapshot.used.len() {
        return Err(corrupt("duplicate used entries"));
    }
    let mut on_route = BTreeSet::new();
    for &at in &snapshot.route {
        if !on_route.insert(at) {
            return Err(corrupt("route revisits a tile"));
        }
        if used.contains(&at) {
            return Err(corrupt("route and used overlap"));
        }
    }
    if let Some(&first) = snapshot.route.first() {
        if first != maze.entrance() {
            return Err(corrupt("route does not start at the entrance"));
        }
    }
    for pair in snapshot.route.windows(2) {
        if !adjacent(pair[0], pair[1]) {
            return Err(corrupt(format!(
                "route jumps from ({}, {}) to ({}, {})",
                pair[0].x, pair[0].y, pair[1].x, pair[1].y
            )));
        }
    }

    let consistent = match snapshot.state {
        SearchState::Unstarted => snapshot.route.is_empty() && used.is_empty(),
        SearchState::InProgress => !snapshot.route.is_empty(),
        SearchState::Succeeded => snapshot.route.last().copied() == Some(maze.exit()),
        SearchState::Exhausted => snapshot.route.is_empty(),
    };
    if !consistent {
        return Err(corrupt(format!(
            "{:?} state does not match the recorded search",
            snapshot.state
        )));
    }

    debug!(
        "restored {:?} snapshot, {} route tiles, {} used",
        snapshot.state,
        snapshot.route.len(),
        used.len()
    );
    Ok(RouteFinder::from_parts(maze, snapshot.route, used, snapshot.state))
}

fn adjacent(a: Coordinate, b: Coordinate) -> bool {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y) == 1
}
