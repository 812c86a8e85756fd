use crate::error::{SignalError, SignalResult};
use crate::registry::Clock;
use crate::room::peer_slot::PeerSlot;
use parking_lot::{RwLock, RwLockWriteGuard};
use rendezvous_core::{
    Answer, MAX_PEERS_PER_ROOM, PeerId, PeerSnapshot, PeerState, RoomSummary,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Result of a successful admission. The secret is only ever handed out here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub peer_id: PeerId,
    pub slot: u8,
    pub peer_secret: String,
}

/// A named signaling session with a fixed number of peer slots.
///
/// All mutable state sits behind one lock, and every read-modify-write
/// holds the write guard from the first check to the last write. Once the
/// registry drops a room it is closed, and handles still held elsewhere
/// can no longer change it.
pub struct Room {
    name: String,
    host_secret: String,
    created_at: u64,
    clock: Arc<dyn Clock>,
    state: RwLock<RoomState>,
}

struct RoomState {
    password: Option<String>,
    is_private: bool,
    last_active: u64,
    closed: bool,
    slots: [Option<PeerSlot>; MAX_PEERS_PER_ROOM],
}

impl RoomState {
    fn peer_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    fn index_of(&self, peer_id: &PeerId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|peer| &peer.id == peer_id))
    }

    fn index_by_secret(&self, secret: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|peer| peer.secret_matches(secret)))
    }

    fn secret_in_use(&self, secret: &str) -> bool {
        self.index_by_secret(secret).is_some()
    }

    /// Slot index of the peer owning `secret`, as long as it still accepts
    /// offer material.
    fn available_index(&self, secret: &str) -> SignalResult<usize> {
        let index = self
            .index_by_secret(secret)
            .ok_or(SignalError::InvalidSecret)?;
        match &self.slots[index] {
            Some(peer) if peer.state() == PeerState::Offered => Ok(index),
            _ => Err(SignalError::NoAvailableSlot),
        }
    }

    fn password_accepts(&self, supplied: Option<&str>) -> bool {
        match &self.password {
            Some(password) => supplied == Some(password.as_str()),
            None => true,
        }
    }
}

impl Room {
    pub(crate) fn new(
        name: String,
        host_secret: String,
        password: Option<String>,
        is_private: bool,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        Self {
            name,
            host_secret,
            created_at: now,
            clock,
            state: RwLock::new(RoomState {
                password: normalize_password(password),
                is_private,
                last_active: now,
                closed: false,
                slots: std::array::from_fn(|_| None),
            }),
        }
    }

    /// Write guard over the state, unless the room has been closed.
    fn write_open(&self) -> SignalResult<RwLockWriteGuard<'_, RoomState>> {
        let state = self.state.write();
        if state.closed {
            return Err(SignalError::RoomNotFound(self.name.clone()));
        }
        Ok(state)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn last_active(&self) -> u64 {
        self.state.read().last_active
    }

    pub fn is_private(&self) -> bool {
        self.state.read().is_private
    }

    pub fn has_password(&self) -> bool {
        self.state.read().password.is_some()
    }

    pub fn peer_count(&self) -> usize {
        self.state.read().peer_count()
    }

    pub fn available_slots(&self) -> usize {
        MAX_PEERS_PER_ROOM - self.peer_count()
    }

    pub fn summary(&self) -> RoomSummary {
        let state = self.state.read();
        let peer_count = state.peer_count();
        RoomSummary {
            name: self.name.clone(),
            peer_count,
            available_slots: MAX_PEERS_PER_ROOM - peer_count,
            is_private: state.is_private,
            password_protected: state.password.is_some(),
        }
    }

    pub fn authorize_host(&self, host_secret: &str) -> SignalResult<()> {
        if !host_secret.is_empty() && host_secret == self.host_secret {
            Ok(())
        } else {
            Err(SignalError::InvalidSecret)
        }
    }

    /// Places a new peer in the lowest free slot.
    ///
    /// Without an explicit `peer_id` the peer is addressed by its slot index.
    pub fn admit_peer(
        &self,
        peer_id: Option<PeerId>,
        password: Option<&str>,
        offer_sdp: String,
        offer_ice_candidates: Vec<String>,
    ) -> SignalResult<Admission> {
        if offer_sdp.is_empty() {
            return Err(SignalError::InvalidInput("offerSdp is required"));
        }
        if offer_ice_candidates.is_empty() {
            return Err(SignalError::InvalidInput("offerIceCandidates[] is required"));
        }
        if let Some(id) = &peer_id {
            if id.is_empty() {
                return Err(SignalError::InvalidInput("peerId must not be empty"));
            }
            if id.slot_index().is_some() {
                return Err(SignalError::InvalidInput("peerId is reserved for slot addressing"));
            }
        }

        let mut state = self.write_open()?;

        if !state.password_accepts(password) {
            return Err(SignalError::InvalidPassword);
        }

        let Some(index) = state.slots.iter().position(Option::is_none) else {
            return Err(SignalError::RoomFull);
        };

        if let Some(id) = &peer_id {
            if state.index_of(id).is_some() {
                return Err(SignalError::PeerExists(id.clone()));
            }
        }

        // slot indices never exceed MAX_PEERS_PER_ROOM
        let slot = index as u8;
        let id = peer_id.unwrap_or_else(|| PeerId::from_slot(slot));
        let mut peer = PeerSlot::new(id.clone(), offer_sdp, offer_ice_candidates);
        while state.secret_in_use(peer.secret()) {
            peer.reroll_secret();
        }
        let peer_secret = peer.secret().to_owned();

        state.slots[index] = Some(peer);
        state.last_active = self.clock.now();

        Ok(Admission {
            peer_id: id,
            slot,
            peer_secret,
        })
    }

    /// Looks up the caller's own slot while it still waits for an answer.
    pub fn find_available_slot(&self, peer_secret: &str) -> SignalResult<(u8, PeerSnapshot)> {
        let state = self.state.read();
        let index = state.available_index(peer_secret)?;
        let snapshot = state.slots[index]
            .as_ref()
            .map(|peer| peer.snapshot(index as u8))
            .ok_or(SignalError::NoAvailableSlot)?;
        Ok((index as u8, snapshot))
    }

    /// Appends trickled ICE candidates to the caller's stored offer.
    pub fn record_offer_candidates(
        &self,
        peer_secret: &str,
        candidates: Vec<String>,
    ) -> SignalResult<u8> {
        if candidates.is_empty() {
            return Err(SignalError::InvalidInput("candidates[] is required"));
        }

        let mut state = self.write_open()?;
        let index = state.available_index(peer_secret)?;
        let peer = state.slots[index]
            .as_mut()
            .ok_or(SignalError::NoAvailableSlot)?;
        peer.append_offer_candidates(candidates);
        state.last_active = self.clock.now();

        Ok(index as u8)
    }

    /// Stores the host's answer for one peer, replacing any earlier answer.
    pub fn record_answer(
        &self,
        host_secret: &str,
        peer_id: &PeerId,
        answer_sdp: String,
        answer_ice_candidates: Vec<String>,
    ) -> SignalResult<()> {
        if answer_sdp.is_empty() {
            return Err(SignalError::InvalidInput("answerSdp is required"));
        }
        if answer_ice_candidates.is_empty() {
            return Err(SignalError::InvalidInput("answerIceCandidates[] is required"));
        }
        self.authorize_host(host_secret)?;

        let mut state = self.write_open()?;
        let index = state
            .index_of(peer_id)
            .ok_or_else(|| SignalError::PeerNotFound(peer_id.clone()))?;
        if let Some(peer) = state.slots[index].as_mut() {
            peer.set_answer(Answer {
                answer_sdp,
                answer_ice_candidates,
            });
        }
        state.last_active = self.clock.now();

        Ok(())
    }

    /// Hands the host's answer to the peer that owns `peer_secret`.
    ///
    /// `NotReady` means the host has not answered yet and the caller should
    /// poll again.
    pub fn fetch_answer(&self, peer_id: &PeerId, peer_secret: &str) -> SignalResult<Answer> {
        let state = self.state.read();
        let peer = state
            .index_of(peer_id)
            .and_then(|index| state.slots[index].as_ref())
            .ok_or_else(|| SignalError::PeerNotFound(peer_id.clone()))?;

        if !peer.secret_matches(peer_secret) {
            return Err(SignalError::InvalidSecret);
        }

        peer.answer().cloned().ok_or(SignalError::NotReady)
    }

    /// Frees a slot and wipes everything stored in it.
    pub fn remove_peer(&self, peer_id: &PeerId) -> SignalResult<PeerSnapshot> {
        let mut state = self.write_open()?;
        let index = state
            .index_of(peer_id)
            .ok_or_else(|| SignalError::PeerNotFound(peer_id.clone()))?;
        let peer = state.slots[index]
            .take()
            .ok_or_else(|| SignalError::PeerNotFound(peer_id.clone()))?;
        state.last_active = self.clock.now();

        Ok(peer.snapshot(index as u8))
    }

    pub fn list_peers(&self, host_secret: &str) -> SignalResult<BTreeMap<PeerId, PeerSnapshot>> {
        self.authorize_host(host_secret)?;

        let state = self.state.read();
        Ok(state
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.as_ref()
                    .map(|peer| (peer.id.clone(), peer.snapshot(index as u8)))
            })
            .collect())
    }

    pub(crate) fn update_settings(
        &self,
        password: Option<String>,
        is_private: bool,
    ) -> SignalResult<()> {
        let mut state = self.write_open()?;
        state.password = normalize_password(password);
        state.is_private = is_private;
        state.last_active = self.clock.now();
        Ok(())
    }

    /// Closes the room if it has been idle for more than `timeout_secs`.
    ///
    /// The check and the close share one write guard, so a mutation either
    /// lands before and keeps the room alive or fails with `RoomNotFound`.
    pub(crate) fn close_if_inactive(&self, timeout_secs: u64, now: u64) -> bool {
        let mut state = self.state.write();
        if now.saturating_sub(state.last_active) > timeout_secs {
            state.closed = true;
        }
        state.closed
    }

    pub(crate) fn close(&self) {
        self.state.write().closed = true;
    }
}

impl fmt::Debug for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Room")
            .field("name", &self.name)
            .field("is_private", &state.is_private)
            .field("peers", &state.peer_count())
            .field("last_active", &state.last_active)
            .finish_non_exhaustive()
    }
}

fn normalize_password(password: Option<String>) -> Option<String> {
    password.filter(|p| !p.is_empty())
}
