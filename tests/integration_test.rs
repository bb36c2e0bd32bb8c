// Integration tests for userdir-browser

use std::sync::mpsc;
use std::time::Duration;

use httpmock::prelude::*;

use userdir_browser::api::{Address, ApiClient, Company, Geo, User};
use userdir_browser::app::fetch::{FetchPayload, FetchReply};
use userdir_browser::app::keymap::{KeyAction, Keymap};
use userdir_browser::app::update::{apply_search, goto_user, handle_reply, set_page};
use userdir_browser::app::{AppState, InputMode, LoadState, Theme, View};
use userdir_browser::error::FetchError;
use userdir_browser::query::{filter_users, paginate_users};

fn tmp_path(tag: &str) -> std::path::PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let mut p = std::env::temp_dir();
    let n = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    p.push(format!("udb_{tag}_{}_{}", std::process::id(), n));
    p
}

fn mk_user(id: u64, name: &str, username: &str, email: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        phone: "555-0100".to_string(),
        website: "example.org".to_string(),
        company: Company {
            name: "Acme".to_string(),
            catch_phrase: "turnkey solutions".to_string(),
            bs: "deliver deliverables".to_string(),
        },
        address: Address {
            street: "Main St".to_string(),
            suite: "1".to_string(),
            city: "Town".to_string(),
            zipcode: "00000".to_string(),
            geo: Geo {
                lat: "0.0".to_string(),
                lng: "0.0".to_string(),
            },
        },
    }
}

fn user_json(id: u64, name: &str, username: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "username": username,
        "email": email,
        "phone": "555-0100",
        "website": "example.org",
        "company": {
            "name": "Acme",
            "catchPhrase": "turnkey solutions",
            "bs": "deliver deliverables"
        },
        "address": {
            "street": "Main St",
            "suite": "1",
            "city": "Town",
            "zipcode": "00000",
            "geo": { "lat": "0.0", "lng": "0.0" }
        }
    })
}

fn mk_app(users: Vec<User>) -> AppState {
    AppState {
        view: View::List,
        input_mode: InputMode::Normal,
        filtered: users.clone(),
        users: LoadState::Ready(users),
        search_query: String::new(),
        page: 1,
        page_size: 5,
        selected: 0,
        detail: LoadState::Loading,
        detail_id: None,
        goto_input: String::new(),
        show_help: false,
        theme: Theme::dark(),
        keymap: Keymap::new_defaults(),
        seq: 0,
        list_seq: 0,
        detail_seq: 0,
    }
}

// 1) Theme config roundtrip and init
#[test]
fn theme_roundtrip_and_init() {
    let path = tmp_path("theme");
    let path_str = path.to_string_lossy().to_string();

    let t = Theme::mocha();
    t.write_file(&path_str).expect("write theme");
    let t2 = Theme::from_file(&path_str).expect("read theme");
    assert_eq!(format!("{:?}", t.text), format!("{:?}", t2.text));
    assert_eq!(format!("{:?}", t.title), format!("{:?}", t2.title));
    assert_eq!(format!("{:?}", t.error_fg), format!("{:?}", t2.error_fg));

    // load_or_init creates the file if missing
    let init_path = tmp_path("theme_init");
    let init_str = init_path.to_string_lossy().to_string();
    let _created = Theme::load_or_init(&init_str);
    assert!(init_path.exists());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&init_path);
}

// 2) Keymap file parsing: overrides on top of defaults, both line orders
#[test]
fn keymap_file_overrides_defaults() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    let path = tmp_path("keys");
    std::fs::write(
        &path,
        "# custom bindings\nQuit = x\nNextPage = n\np = PrevPage\nnot a line\n",
    )
    .unwrap();

    let km = Keymap::from_file(&path.to_string_lossy()).expect("read keymap");
    let resolve = |c: char| km.resolve(&KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));

    assert_eq!(resolve('x'), Some(KeyAction::Quit));
    assert_eq!(resolve('n'), Some(KeyAction::NextPage));
    assert_eq!(resolve('p'), Some(KeyAction::PrevPage));
    // Defaults survive underneath the overrides
    assert_eq!(resolve('q'), Some(KeyAction::Quit));
    assert_eq!(resolve('/'), Some(KeyAction::StartSearch));

    let _ = std::fs::remove_file(&path);
}

// 3) Full list pipeline against a mock server: fetch, filter, paginate
#[test]
fn list_pipeline_fetch_filter_paginate() {
    let server = MockServer::start();
    let body = serde_json::Value::Array(
        (1..=12)
            .map(|i| user_json(i, &format!("User {i}"), &format!("u{i}"), &format!("u{i}@x.org")))
            .collect(),
    )
    .to_string();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200)
            .header("content-type", "application/json")
            .body(body.as_str());
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    let users = client.fetch_all_users().unwrap();
    mock.assert();
    assert_eq!(users.len(), 12);

    // Blank search keeps the collection; page 2 of 5 is records 6..=10.
    let filtered = filter_users(&users, "");
    let page = paginate_users(&filtered, 2, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(
        page.items.iter().map(|u| u.id).collect::<Vec<_>>(),
        vec![6, 7, 8, 9, 10]
    );
}

// 4) Search scenario: two of three names contain the term
#[test]
fn search_keeps_exactly_the_matching_names_in_order() {
    let users = vec![
        mk_user(1, "Alice Carol", "one", "one@box.io"),
        mk_user(2, "Bob", "two", "two@box.io"),
        mk_user(3, "Dana", "three", "three@box.io"),
    ];
    let hit = filter_users(&users, "a");
    assert_eq!(hit.len(), 2);
    assert_eq!(hit[0].name, "Alice Carol");
    assert_eq!(hit[1].name, "Dana");
}

// 5) Search input resets pagination; page changes clamp to the valid range
#[test]
fn search_resets_page_and_page_changes_clamp() {
    let users: Vec<User> = (1..=12)
        .map(|i| mk_user(i, &format!("User {i}"), &format!("u{i}"), &format!("u{i}@x.org")))
        .collect();
    let mut app = mk_app(users);

    set_page(&mut app, 3);
    assert_eq!(app.page, 3);

    app.search_query = "user 1".to_string();
    apply_search(&mut app);
    // "User 1", "User 10", "User 11", "User 12"
    assert_eq!(app.filtered.len(), 4);
    assert_eq!(app.page, 1);

    set_page(&mut app, 99);
    assert_eq!(app.page, app.max_page());
    set_page(&mut app, 0);
    assert_eq!(app.page, 1);

    // An empty filtered set still has one (empty) view page.
    app.search_query = "zzz".to_string();
    apply_search(&mut app);
    assert!(app.filtered.is_empty());
    assert_eq!(app.max_page(), 1);
}

// 6) Superseded fetch replies are dropped; the latest request wins
#[test]
fn stale_replies_are_discarded() {
    let mut app = mk_app(vec![]);
    app.users = LoadState::Loading;
    app.filtered.clear();
    app.list_seq = 2;

    let stale = vec![mk_user(1, "Old", "old", "old@box.io")];
    handle_reply(
        &mut app,
        FetchReply {
            seq: 1,
            payload: FetchPayload::Users(Ok(stale)),
        },
    );
    assert_eq!(app.users, LoadState::Loading, "stale reply must not apply");

    let fresh = vec![mk_user(2, "New", "new", "new@box.io")];
    handle_reply(
        &mut app,
        FetchReply {
            seq: 2,
            payload: FetchPayload::Users(Ok(fresh.clone())),
        },
    );
    assert_eq!(app.users, LoadState::Ready(fresh));

    // Same rule on the detail side, including errors.
    app.detail_seq = 5;
    handle_reply(
        &mut app,
        FetchReply {
            seq: 4,
            payload: FetchPayload::User(Ok(mk_user(9, "Stale", "s", "s@box.io"))),
        },
    );
    assert_eq!(app.detail, LoadState::Loading);
    handle_reply(
        &mut app,
        FetchReply {
            seq: 5,
            payload: FetchPayload::User(Err(FetchError::new("Failed to fetch user: Not Found", 404))),
        },
    );
    assert_eq!(
        app.detail,
        LoadState::Error("Failed to fetch user: Not Found".to_string())
    );
}

// 7) Goto: an identifier that does not parse surfaces an error state and
// issues no request at all
#[test]
fn invalid_goto_identifier_issues_no_fetch() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path_matches(r"/users.*");
        then.status(200).body("[]");
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    let (tx, rx) = mpsc::channel();

    for raw in ["abc", "-1.5", ""] {
        let mut app = mk_app(vec![]);
        goto_user(&mut app, &client, &tx, raw);
        assert_eq!(app.view, View::Detail);
        assert_eq!(app.detail_id, None);
        match &app.detail {
            LoadState::Error(msg) => assert!(msg.contains("invalid user identifier")),
            other => panic!("expected error state for {raw:?}, got {other:?}"),
        }
    }
    assert!(rx.try_recv().is_err(), "no fetch reply may be produced");
    assert_eq!(mock.hits(), 0);
}

// 8) Goto with a valid identifier fetches and lands in the ready state
#[test]
fn valid_goto_identifier_loads_the_user() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/users/3");
        then.status(200)
            .header("content-type", "application/json")
            .body(user_json(3, "Dana", "dwhite", "dana@box.io").to_string());
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    let (tx, rx) = mpsc::channel();
    let mut app = mk_app(vec![]);

    goto_user(&mut app, &client, &tx, " 3 ");
    assert_eq!(app.view, View::Detail);
    assert_eq!(app.detail_id, Some(3));
    assert_eq!(app.detail, LoadState::Loading);

    let reply = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("fetch reply must arrive");
    handle_reply(&mut app, reply);

    mock.assert();
    match &app.detail {
        LoadState::Ready(user) => {
            assert_eq!(user.id, 3);
            assert_eq!(user.name, "Dana");
        }
        other => panic!("expected loaded user, got {other:?}"),
    }
}
