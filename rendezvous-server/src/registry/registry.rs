use crate::error::{SignalError, SignalResult};
use crate::registry::clock::{Clock, SystemClock};
use crate::room::Room;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rendezvous_core::{RoomSummary, is_simple_room_name};
use std::sync::Arc;

/// Every live room, keyed by name.
///
/// Cloning is cheap and every clone sees the same rooms. Create one at
/// startup and hand it to whatever serves requests.
#[derive(Clone)]
pub struct Registry {
    rooms: Arc<DashMap<String, Arc<Room>>>,
    clock: Arc<dyn Clock>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            clock,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn create_room(
        &self,
        name: &str,
        host_secret: &str,
        password: Option<String>,
        is_private: bool,
    ) -> SignalResult<Arc<Room>> {
        if name.is_empty() {
            return Err(SignalError::InvalidInput("room name is required"));
        }
        if host_secret.is_empty() {
            return Err(SignalError::InvalidInput("host secret is required"));
        }

        match self.rooms.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(SignalError::RoomExists(name.to_owned())),
            Entry::Vacant(entry) => {
                let room = Arc::new(Room::new(
                    name.to_owned(),
                    host_secret.to_owned(),
                    password,
                    is_private,
                    self.clock.clone(),
                ));
                entry.insert(room.clone());
                Ok(room)
            }
        }
    }

    /// Like [`Registry::create_room`], but only for names made of ASCII
    /// letters.
    pub fn create_simple_room(
        &self,
        name: &str,
        host_secret: &str,
        password: Option<String>,
        is_private: bool,
    ) -> SignalResult<Arc<Room>> {
        if !is_simple_room_name(name) {
            return Err(SignalError::InvalidInput(
                "room name must only contain alphabetic characters (a-z, A-Z)",
            ));
        }
        self.create_room(name, host_secret, password, is_private)
    }

    pub fn get_room(&self, name: &str) -> SignalResult<Arc<Room>> {
        self.rooms
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SignalError::RoomNotFound(name.to_owned()))
    }

    /// Public rooms sorted by name.
    pub fn list_public_rooms(&self) -> Vec<RoomSummary> {
        let mut rooms: Vec<RoomSummary> = self
            .rooms
            .iter()
            .map(|entry| entry.value().summary())
            .filter(|summary| !summary.is_private)
            .collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        rooms
    }

    pub fn delete_room(&self, name: &str, host_secret: &str) -> SignalResult<()> {
        let room = self.get_room(name)?;
        room.authorize_host(host_secret)?;

        // a concurrent delete or sweep may already have taken it
        self.rooms
            .remove_if(name, |_, current| {
                if Arc::ptr_eq(current, &room) {
                    room.close();
                    true
                } else {
                    false
                }
            })
            .map(|_| ())
            .ok_or_else(|| SignalError::RoomNotFound(name.to_owned()))
    }

    /// Replaces the room's password and privacy flag.
    pub fn update_room(
        &self,
        name: &str,
        host_secret: &str,
        password: Option<String>,
        is_private: bool,
    ) -> SignalResult<()> {
        let room = self.get_room(name)?;
        room.authorize_host(host_secret)?;
        room.update_settings(password, is_private)
    }

    /// Drops every room idle for more than `timeout_secs` and returns their
    /// names. Dropped rooms are closed, so stale handles cannot revive them.
    pub fn sweep_inactive(&self, timeout_secs: u64, now: u64) -> Vec<String> {
        let mut removed = Vec::new();
        self.rooms.retain(|name, room| {
            let keep = !room.close_if_inactive(timeout_secs, now);
            if !keep {
                removed.push(name.clone());
            }
            keep
        });
        removed.sort();
        removed
    }

    pub fn is_name_taken(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
