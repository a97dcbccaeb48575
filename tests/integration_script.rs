use std::fs::File;
use std::io::{BufReader, Write};

use ratatui::layout::Rect;

use nui_desktop::apps::builtin_registry;
use nui_desktop::config::WmConfig;
use nui_desktop::preview::Preview;
use nui_desktop::runner::{ErrorPolicy, Session};
use nui_desktop::{Desktop, DesktopError};

fn session() -> Session {
    let desktop = Desktop::new(builtin_registry().unwrap(), WmConfig::default());
    let area = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };
    Session::new(desktop, Preview::default(), area)
}

#[test]
fn script_file_drives_the_desktop() {
    let mut script = tempfile::NamedTempFile::new().unwrap();
    writeln!(script, "# open two apps and shuffle them").unwrap();
    writeln!(script, "open notes").unwrap();
    writeln!(script, "open vpn").unwrap();
    writeln!(script, "taskbar notes").unwrap();
    writeln!(script, "move vpn 200 120").unwrap();
    writeln!(script, "list").unwrap();

    let mut s = session();
    let mut out = Vec::new();
    let file = BufReader::new(File::open(script.path()).unwrap());
    s.run(file, &mut out, ErrorPolicy::Abort).unwrap();

    let out = String::from_utf8(out).unwrap();
    let listing: Vec<&str> = out.lines().filter(|l| l.starts_with("z=")).collect();
    assert_eq!(
        listing,
        [
            "z=3 vpn \"Turd VPN\" 200,120 800x450",
            "z=4 notes \"Notepad\" 50,50 400x450",
        ]
    );
}

#[test]
fn script_errors_report_the_line() {
    let mut script = tempfile::NamedTempFile::new().unwrap();
    writeln!(script, "open notes").unwrap();
    writeln!(script, "resize notes wide 10").unwrap();

    let mut s = session();
    let mut out = Vec::new();
    let file = BufReader::new(File::open(script.path()).unwrap());
    match s.run(file, &mut out, ErrorPolicy::Abort) {
        Err(DesktopError::Command { line, .. }) => assert_eq!(line, 2),
        other => panic!("unexpected {other:?}"),
    }
    assert!(s.desktop().windows().contains("notes"));
}
