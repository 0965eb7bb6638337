// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_member;
use crate::Persistence;
use std::path::PathBuf;

#[test]
fn test_in_memory_database_enforces_foreign_keys() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first = Persistence::new_in_memory().unwrap();
    let mut second = Persistence::new_in_memory().unwrap();

    create_test_member(&mut first, "Alice");

    assert_eq!(first.list_members().unwrap().len(), 1);
    assert!(second.list_members().unwrap().is_empty());
}

#[test]
fn test_file_database_survives_reopen() {
    let path: PathBuf =
        std::env::temp_dir().join(format!("muster-test-{}.sqlite", std::process::id()));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        create_test_member(&mut persistence, "Alice");
    }
    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let members = reopened.list_members().unwrap();

    assert_eq!(members.len(), 1);
    assert_eq!(members[0].display_name, "Alice");

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("sqlite-wal"));
    let _ = std::fs::remove_file(path.with_extension("sqlite-shm"));
}
