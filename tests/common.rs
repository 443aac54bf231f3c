use assert_cmd::{cargo::cargo_bin_cmd, Command};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Get a Command for histfetch with config and data isolated in `home`
pub fn histfetch(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("histfetch");
    cmd.env("HISTFETCH_CONFIG_DIR", home.join("config"))
        .env("HISTFETCH_DATA_DIR", home.join("data"))
        .env_remove("HISTFETCH_CONFIG")
        .env_remove("HISTFETCH_LOG")
        .env_remove("RUST_LOG");
    cmd
}

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Write an Anki-format collection.
///
/// Notes (`id`, tags):
/// - 1: Step1 IDs 101, 102 (card 11, learning, reviewed 30 min ago)
/// - 2: Step1 ID 103 (card 12, mature, reviewed 40 min ago)
/// - 3: Step1 IDs 103, 201 (unreviewed neighbor)
/// - 4: Shelf ID 900 (card 14, young, reviewed 50 min ago)
/// - 5: Step2 ID 300 (card 15, young, reviewed 3 days ago)
pub fn write_collection(path: &Path) -> PathBuf {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE revlog (id INTEGER PRIMARY KEY, cid INTEGER NOT NULL, ease INTEGER);
         CREATE TABLE cards (id INTEGER PRIMARY KEY, nid INTEGER NOT NULL,
                             queue INTEGER NOT NULL, ivl INTEGER NOT NULL);
         CREATE TABLE notes (id INTEGER PRIMARY KEY, tags TEXT NOT NULL);",
    )
    .unwrap();

    let notes = [
        (1, " #UWorld::Step1::Cardio::101 #UWorld::Step1::Cardio::102 "),
        (2, " #UWorld::Step1::Renal::103 "),
        (3, " #UWorld::Step1::Renal::103 #UWorld::Step1::Renal::201 "),
        (4, " #UWorld::Shelf::Peds::900 "),
        (5, " #UWorld::Step2::300 "),
    ];
    for (id, tags) in notes {
        conn.execute("INSERT INTO notes (id, tags) VALUES (?1, ?2)", params![id, tags])
            .unwrap();
    }

    let cards = [(11, 1, 1, 0), (12, 2, 2, 45), (14, 4, 2, 3), (15, 5, 2, 5)];
    for (id, nid, queue, ivl) in cards {
        conn.execute(
            "INSERT INTO cards (id, nid, queue, ivl) VALUES (?1, ?2, ?3, ?4)",
            params![id, nid, queue, ivl],
        )
        .unwrap();
    }

    let now = now_ms();
    let minute = 60_000;
    let reviews = [
        (now - 30 * minute, 11),
        (now - 40 * minute, 12),
        (now - 50 * minute, 14),
        (now - 3 * 24 * 60 * minute, 15),
    ];
    for (id, cid) in reviews {
        conn.execute(
            "INSERT INTO revlog (id, cid, ease) VALUES (?1, ?2, 3)",
            params![id, cid],
        )
        .unwrap();
    }

    path.to_path_buf()
}
