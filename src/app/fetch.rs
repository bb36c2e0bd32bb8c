//! Background fetches.
//!
//! Each request runs on its own worker thread and reports back over an
//! mpsc channel, so the event loop keeps drawing while a request is in
//! flight. Every request carries the sequence token it was issued with;
//! the receiving side only applies the reply whose token is the latest
//! issued for its view, so a slow earlier response can never overwrite a
//! newer one.

use std::sync::mpsc::Sender;
use std::thread;

use tracing::debug;

use crate::api::{ApiClient, User};
use crate::error::FetchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchKind {
    UserList,
    UserDetail(u64),
}

#[derive(Debug)]
pub enum FetchPayload {
    Users(Result<Vec<User>, FetchError>),
    User(Result<User, FetchError>),
}

#[derive(Debug)]
pub struct FetchReply {
    pub seq: u64,
    pub payload: FetchPayload,
}

/// Run one request on a worker thread, delivering the outcome to `tx`.
pub fn spawn_fetch(client: ApiClient, kind: FetchKind, seq: u64, tx: Sender<FetchReply>) {
    thread::spawn(move || {
        debug!(?kind, seq, "fetch started");
        let payload = match kind {
            FetchKind::UserList => FetchPayload::Users(client.fetch_all_users()),
            FetchKind::UserDetail(id) => FetchPayload::User(client.fetch_user_by_id(id)),
        };
        // The receiver is gone when the app exits mid-flight; nothing to do.
        let _ = tx.send(FetchReply { seq, payload });
    });
}
