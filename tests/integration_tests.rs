use hy6_schedule::feed::{ARCHIVE_NAME, create_temp_dir, extract_archive};
use hy6_schedule::gtfs::{Direction, STOP_TIMES_FILE, TRIPS_FILE};
use hy6_schedule::output::write_snippets;
use hy6_schedule::route::StopGroup;
use hy6_schedule::schedule::Schedule;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/gtfs")
}

fn render(dir: &Path) -> String {
    let timetable = Schedule::from_dir(dir).expect("Failed to read feed").timetable();
    let mut buf = Vec::new();
    write_snippets(&mut buf, &timetable).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_full_pipeline() {
    let output = render(&fixture_dir());
    let expected = include_str!("fixtures/expected_snippets.txt");

    assert_eq!(output, expected);
}

#[test]
fn test_rendering_is_idempotent() {
    assert_eq!(render(&fixture_dir()), render(&fixture_dir()));
}

#[test]
fn test_after_midnight_service_sorts_last() {
    let schedule = Schedule::from_dir(&fixture_dir()).unwrap();
    let avon_west = schedule.times(StopGroup::Avon, Direction::West);

    assert_eq!(avon_west.last().map(String::as_str), Some("0:10"));
}

#[test]
fn test_extracted_archive_matches_directory() {
    let dir = create_temp_dir("hy6_schedule_it_").unwrap();
    let zip_path = dir.join(ARCHIVE_NAME);

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for name in [TRIPS_FILE, STOP_TIMES_FILE] {
        writer.start_file(name, options).unwrap();
        writer
            .write_all(&fs::read(fixture_dir().join(name)).unwrap())
            .unwrap();
    }
    fs::write(&zip_path, writer.finish().unwrap().into_inner()).unwrap();

    let members = extract_archive(&zip_path, &dir).unwrap();
    assert_eq!(members, 2);
    assert_eq!(render(&dir), render(&fixture_dir()));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_missing_feed_dir_fails() {
    let dir = fixture_dir().join("does_not_exist");
    assert!(Schedule::from_dir(&dir).is_err());
}
