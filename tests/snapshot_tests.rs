use mazer::{snapshot, Maze, MazeError, RouteFinder, SearchState};
use pretty_assertions::assert_eq;

const BRANCHED: &str = "#####\n#.#x#\n#.#.#\n#e..#\n#####\n";

fn finder() -> RouteFinder {
    RouteFinder::new(Maze::parse(BRANCHED).unwrap())
}

fn save_to_vec(finder: &RouteFinder) -> Vec<u8> {
    let mut buf = Vec::new();
    snapshot::save(finder, &mut buf).expect("save");
    buf
}

// snapshots of "#x#\n#.#\n#e#\n" with hand-written route/used/state
fn straight_snapshot_json(route: &str, used: &str, state: &str) -> String {
    format!(
        "{{\"version\":1,\"maze\":\"#x#\\n#.#\\n#e#\\n\",\"route\":{route},\"used\":{used},\"state\":{state}}}"
    )
}

#[test]
fn round_trip_preserves_state() {
    let mut original = finder();
    for _ in 0..4 {
        original.step();
    }
    let restored = snapshot::load(save_to_vec(&original).as_slice()).expect("load");
    assert_eq!(restored.state(), original.state());
    assert_eq!(restored.route().to_vec(), original.route().to_vec());
    assert_eq!(restored.used(), original.used());
    assert_eq!(restored.to_string(), original.to_string());
    assert_eq!(restored.maze().to_string(), original.maze().to_string());
}

#[test]
fn restored_finder_resumes_identically() {
    let mut original = finder();
    for _ in 0..3 {
        original.step();
    }
    let mut restored = snapshot::load(save_to_vec(&original).as_slice()).unwrap();
    loop {
        let done = original.step();
        assert_eq!(restored.step(), done);
        assert_eq!(restored.route().to_vec(), original.route().to_vec());
        assert_eq!(restored.to_string(), original.to_string());
        if done {
            break;
        }
    }
    assert_eq!(original.state(), SearchState::Succeeded);
    assert_eq!(restored.state(), SearchState::Succeeded);
}

#[test]
fn unstarted_round_trip() {
    let restored = snapshot::load(save_to_vec(&finder()).as_slice()).unwrap();
    assert_eq!(restored.state(), SearchState::Unstarted);
    assert!(restored.route().is_empty());
    assert!(restored.used().is_empty());
}

#[test]
fn finished_round_trip_stays_finished() {
    let mut original = finder();
    while !original.step() {}
    let mut restored = snapshot::load(save_to_vec(&original).as_slice()).unwrap();
    assert_eq!(restored.state(), SearchState::Succeeded);
    assert!(restored.step());
    assert_eq!(restored.route().to_vec(), original.route().to_vec());
}

#[test]
fn garbage_bytes_are_corrupt() {
    match snapshot::load(&b"not a snapshot"[..]) {
        Err(MazeError::CorruptState(detail)) => assert!(!detail.is_empty()),
        other => panic!("expected CorruptState, got {other:?}"),
    }
}

#[test]
fn version_mismatch_is_corrupt() {
    let buf = save_to_vec(&finder());
    let tampered = String::from_utf8(buf)
        .unwrap()
        .replace("\"version\":1", "\"version\":99");
    assert!(matches!(
        snapshot::load(tampered.as_bytes()),
        Err(MazeError::CorruptState(_))
    ));
}

#[test]
fn embedded_maze_is_validated() {
    // two entrances in the stored maze text
    let json = "{\"version\":1,\"maze\":\"ex\\ne.\\n\",\"route\":[],\"used\":[],\"state\":\"Unstarted\"}";
    assert!(matches!(
        snapshot::load(json.as_bytes()),
        Err(MazeError::CorruptState(_))
    ));
}

#[test]
fn route_through_wall_is_corrupt() {
    let json = straight_snapshot_json(
        "[{\"x\":1,\"y\":0},{\"x\":0,\"y\":0}]",
        "[]",
        "\"InProgress\"",
    );
    assert!(matches!(
        snapshot::load(json.as_bytes()),
        Err(MazeError::CorruptState(_))
    ));
}

#[test]
fn out_of_bounds_coordinate_is_corrupt() {
    let json = straight_snapshot_json("[{\"x\":1,\"y\":0}]", "[{\"x\":9,\"y\":9}]", "\"InProgress\"");
    assert!(matches!(
        snapshot::load(json.as_bytes()),
        Err(MazeError::CorruptState(_))
    ));
}

#[test]
fn route_used_overlap_is_corrupt() {
    let json = straight_snapshot_json(
        "[{\"x\":1,\"y\":0}]",
        "[{\"x\":1,\"y\":0}]",
        "\"InProgress\"",
    );
    assert!(matches!(
        snapshot::load(json.as_bytes()),
        Err(MazeError::CorruptState(_))
    ));
}

#[test]
fn disconnected_route_is_corrupt() {
    // (1,0) -> (1,2) skips the corridor between them
    let json = straight_snapshot_json(
        "[{\"x\":1,\"y\":0},{\"x\":1,\"y\":2}]",
        "[]",
        "\"InProgress\"",
    );
    assert!(matches!(
        snapshot::load(json.as_bytes()),
        Err(MazeError::CorruptState(_))
    ));
}

#[test]
fn route_not_from_entrance_is_corrupt() {
    let json = straight_snapshot_json("[{\"x\":1,\"y\":1}]", "[]", "\"InProgress\"");
    assert!(matches!(
        snapshot::load(json.as_bytes()),
        Err(MazeError::CorruptState(_))
    ));
}

#[test]
fn state_container_mismatch_is_corrupt() {
    // Exhausted must have an empty route
    let exhausted = straight_snapshot_json("[{\"x\":1,\"y\":0}]", "[]", "\"Exhausted\"");
    assert!(matches!(
        snapshot::load(exhausted.as_bytes()),
        Err(MazeError::CorruptState(_))
    ));
    // Unstarted must have touched nothing
    let unstarted = straight_snapshot_json("[{\"x\":1,\"y\":0}]", "[]", "\"Unstarted\"");
    assert!(matches!(
        snapshot::load(unstarted.as_bytes()),
        Err(MazeError::CorruptState(_))
    ));
    // Succeeded must end on the exit
    let succeeded = straight_snapshot_json("[{\"x\":1,\"y\":0}]", "[]", "\"Succeeded\"");
    assert!(matches!(
        snapshot::load(succeeded.as_bytes()),
        Err(MazeError::CorruptState(_))
    ));
}

#[test]
fn save_path_and_load_path_round_trip() {
    let path = std::env::temp_dir().join("mazer_snapshot_test.json");
    let mut original = finder();
    for _ in 0..2 {
        original.step();
    }
    snapshot::save_path(&original, &path).expect("save");
    let restored = snapshot::load_path(&path).expect("load");
    assert_eq!(restored.route().to_vec(), original.route().to_vec());
    assert_eq!(restored.state(), original.state());
    std::fs::remove_file(&path).ok();
    assert!(matches!(
        snapshot::load_path(&path),
        Err(MazeError::Io(_))
    ));
}
