use chrono::{TimeZone, Utc};
use rusqlite::Connection;
use server::db;
use shared::model::{Exercise, NewExercise, NewUser, StoreError, User};
use tempfile::TempDir;

fn test_connection() -> (TempDir, Connection) {
    let dir = tempfile::tempdir().unwrap();
    let connection_string = dir
        .path()
        .join("test.sqlite")
        .to_str()
        .unwrap()
        .to_owned();

    db::run_migrations(&connection_string).unwrap();

    let conn = Connection::open(&connection_string).unwrap();
    db::run_pragmas(&conn).unwrap();

    (dir, conn)
}

#[test]
fn created_user_can_be_fetched() {
    let (_dir, mut conn) = test_connection();

    let user = User::create(&mut conn, NewUser::new("alice")).unwrap();
    assert_eq!(user.username, "alice");

    let fetched = User::fetch_by_id(&conn, user.id).unwrap();
    assert_eq!(fetched, Some(user));

    assert_eq!(User::fetch_by_id(&conn, 4711).unwrap(), None);
}

#[test]
fn duplicate_username_maps_to_duplicate_key() {
    let (_dir, mut conn) = test_connection();

    User::create(&mut conn, NewUser::new("alice")).unwrap();

    let err = User::create(&mut conn, NewUser::new("alice")).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey), "got {err:?}");
}

#[test]
fn users_list_in_creation_order() {
    let (_dir, mut conn) = test_connection();

    for username in ["alice", "bob", "carol"] {
        User::create(&mut conn, NewUser::new(username)).unwrap();
    }

    let usernames: Vec<_> = User::list(&conn)
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(usernames, ["alice", "bob", "carol"]);
}

#[test]
fn appended_exercises_come_back_in_insertion_order() {
    let (_dir, mut conn) = test_connection();

    let user = User::create(&mut conn, NewUser::new("alice")).unwrap();

    // Insertion order deliberately differs from date order
    let dates = [
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
    ];
    for (i, date) in dates.iter().enumerate() {
        let exercise = Exercise::append(&mut conn, NewExercise {
            user_id: user.id,
            description: format!("exercise {i}"),
            duration: 10 + i as i64,
            date: *date,
        })
        .unwrap();
        assert_eq!(exercise.user_id, user.id);
        assert_eq!(exercise.date, *date);
    }

    let log = Exercise::fetch_for_user(&conn, user.id).unwrap();
    let descriptions: Vec<_> = log.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, ["exercise 0", "exercise 1", "exercise 2"]);
}

#[test]
fn logs_are_scoped_to_their_user() {
    let (_dir, mut conn) = test_connection();

    let alice = User::create(&mut conn, NewUser::new("alice")).unwrap();
    let bob = User::create(&mut conn, NewUser::new("bob")).unwrap();

    Exercise::append(&mut conn, NewExercise {
        user_id: alice.id,
        description: "run".to_owned(),
        duration: 30,
        date: Utc::now(),
    })
    .unwrap();

    assert_eq!(Exercise::fetch_for_user(&conn, alice.id).unwrap().len(), 1);
    assert_eq!(Exercise::fetch_for_user(&conn, bob.id).unwrap().len(), 0);
}
