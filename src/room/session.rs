//! One room: two seats, the match they play, and the pending wormhole transit.

use std::sync::{Arc, Weak};
use std::time::SystemTime;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::game::{Action, Game, GameConfig, Outcome, Role, StateView};
use crate::protocol::ServerMessage;

use super::RoomError;

pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

#[derive(Debug)]
pub struct Room {
    pub id: String,
    pub created_at: SystemTime,
    config: GameConfig,
    inner: Mutex<RoomInner>,
}

#[derive(Debug, Default)]
struct RoomInner {
    a: Option<Outbox>,
    b: Option<Outbox>,
    game: Option<Game>,
    /// Bumped whenever the match is replaced, so a stale transit cannot land on a new one.
    epoch: u64,
    transit: Option<CancellationToken>,
    closed: bool,
}

impl RoomInner {
    fn seat(&self, role: Role) -> &Option<Outbox> {
        match role {
            Role::A => &self.a,
            Role::B => &self.b,
        }
    }

    fn seat_mut(&mut self, role: Role) -> &mut Option<Outbox> {
        match role {
            Role::A => &mut self.a,
            Role::B => &mut self.b,
        }
    }

    fn send_to(&self, role: Role, msg: ServerMessage) -> bool {
        let Some(tx) = self.seat(role) else { return false };
        if tx.send(msg).is_err() {
            tracing::trace!(%role, "seat receiver gone, message dropped");
            return false;
        }
        true
    }

    fn broadcast_state(&self) {
        let Some(game) = &self.game else { return };
        for role in [Role::A, Role::B] {
            self.send_to(role, ServerMessage::State { state: game.view(role) });
        }
    }

    fn broadcast_start(&self) {
        let Some(game) = &self.game else { return };
        for role in [Role::A, Role::B] {
            self.send_to(role, ServerMessage::GameStart { role, state: game.view(role) });
        }
    }

    fn cancel_transit(&mut self) {
        if let Some(token) = self.transit.take() {
            token.cancel();
        }
    }
}

impl Room {
    pub fn new(id: String, config: GameConfig) -> Self {
        Self { id, created_at: SystemTime::now(), config, inner: Mutex::new(RoomInner::default()) }
    }

    /// Takes the first free seat, A before B.
    pub fn seat(&self, tx: Outbox) -> Result<Role, RoomError> {
        let mut inner = self.inner.lock();
        if inner.closed { return Err(RoomError::NotFound); }
        let role = match (&inner.a, &inner.b) {
            (None, _) => Role::A,
            (Some(_), None) => Role::B,
            _ => return Err(RoomError::Full),
        };
        *inner.seat_mut(role) = Some(tx);
        tracing::info!(room = %self.id, %role, "player seated");
        Ok(role)
    }

    pub fn is_full(&self) -> bool {
        let inner = self.inner.lock();
        inner.a.is_some() && inner.b.is_some()
    }

    pub fn is_closed(&self) -> bool { self.inner.lock().closed }

    /// Returns whether the message reached a live connection.
    pub fn send_to(&self, role: Role, msg: ServerMessage) -> bool { self.inner.lock().send_to(role, msg) }

    /// Generates a fresh match once both players are seated.
    pub fn start(&self) -> Result<(), RoomError> {
        self.start_with(Game::from_entropy(self.config.clone()))
    }

    /// Starts with a prepared match. Used when the board has to be known in advance.
    pub fn start_with(&self, game: Game) -> Result<(), RoomError> {
        let mut inner = self.inner.lock();
        if inner.a.is_none() || inner.b.is_none() { return Err(RoomError::NotReady); }
        inner.cancel_transit();
        inner.game = Some(game);
        inner.epoch += 1;
        tracing::info!(room = %self.id, epoch = inner.epoch, "match started");
        inner.broadcast_start();
        Ok(())
    }

    /// Replaces the running match wholesale.
    pub fn restart(&self, role: Role) -> Result<(), RoomError> {
        let mut inner = self.inner.lock();
        if inner.seat(role).is_none() { return Err(RoomError::NotSeated); }
        if inner.a.is_none() || inner.b.is_none() { return Err(RoomError::NotReady); }
        inner.cancel_transit();
        let game = inner.game.as_mut().ok_or(RoomError::NotStarted)?;
        game.restart();
        inner.epoch += 1;
        tracing::info!(room = %self.id, %role, epoch = inner.epoch, "match restarted");
        inner.broadcast_start();
        Ok(())
    }

    /// Runs one action and broadcasts the result. A wormhole entry also
    /// schedules the landing.
    pub fn submit(self: &Arc<Self>, role: Role, action: Action) -> Result<Outcome, RoomError> {
        let mut inner = self.inner.lock();
        if inner.seat(role).is_none() { return Err(RoomError::NotSeated); }
        let game = inner.game.as_mut().ok_or(RoomError::NotStarted)?;
        let outcome = game.handle(role, action);
        let delay = game.config().wormhole_delay;
        inner.broadcast_state();

        if let Outcome::Transit { entry } = outcome {
            let token = CancellationToken::new();
            inner.transit = Some(token.clone());
            let epoch = inner.epoch;
            let room = Arc::downgrade(self);
            tracing::debug!(room = %self.id, %role, entry, ?delay, "transit scheduled");
            tokio::spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => release_transit(room, epoch),
                    _ = tokio::time::sleep(delay) => finish_transit(room, epoch, entry),
                }
            });
        }
        Ok(outcome)
    }

    /// Tears the room down after `role` left and tells the other player.
    pub fn close(&self, role: Role) {
        let mut inner = self.inner.lock();
        if inner.closed { return; }
        inner.closed = true;
        inner.cancel_transit();
        inner.game = None;
        *inner.seat_mut(role) = None;
        inner.send_to(role.other(), ServerMessage::OpponentDisconnected);
        tracing::info!(room = %self.id, %role, "room closed");
    }

    /// Snapshot of the match as `role` sees it.
    pub fn view(&self, role: Role) -> Option<StateView> {
        self.inner.lock().game.as_ref().map(|g| g.view(role))
    }
}

fn finish_transit(room: Weak<Room>, epoch: u64, entry: usize) {
    let Some(room) = room.upgrade() else { return };
    let mut inner = room.inner.lock();
    if inner.closed || inner.epoch != epoch { return; }
    inner.transit = None;
    let Some(game) = inner.game.as_mut() else { return };
    if let Err(err) = game.complete_transit(entry) {
        tracing::warn!(room = %room.id, error = %err, "transit landing failed");
        game.abort_transit();
    }
    inner.broadcast_state();
}

/// Cancelled transit: free the guard if the same match is somehow still live.
fn release_transit(room: Weak<Room>, epoch: u64) {
    let Some(room) = room.upgrade() else { return };
    let mut inner = room.inner.lock();
    tracing::debug!(room = %room.id, "transit cancelled");
    if inner.closed || inner.epoch != epoch { return; }
    if let Some(game) = inner.game.as_mut() {
        game.abort_transit();
    }
}
