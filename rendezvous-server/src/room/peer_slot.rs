use rendezvous_core::{Answer, PeerId, PeerSnapshot, PeerState};
use uuid::Uuid;

/// One occupied position of a room.
///
/// `answer` holds SDP and candidates together so a half-written answer
/// cannot exist.
#[derive(Debug)]
pub(crate) struct PeerSlot {
    pub(crate) id: PeerId,
    secret: String,
    offer_sdp: String,
    offer_ice_candidates: Vec<String>,
    answer: Option<Answer>,
}

impl PeerSlot {
    pub(crate) fn new(id: PeerId, offer_sdp: String, offer_ice_candidates: Vec<String>) -> Self {
        Self {
            id,
            secret: new_secret(),
            offer_sdp,
            offer_ice_candidates,
            answer: None,
        }
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }

    pub(crate) fn reroll_secret(&mut self) {
        self.secret = new_secret();
    }

    pub(crate) fn secret_matches(&self, secret: &str) -> bool {
        !secret.is_empty() && self.secret == secret
    }

    pub(crate) fn state(&self) -> PeerState {
        match self.answer {
            Some(_) => PeerState::Answered,
            None => PeerState::Offered,
        }
    }

    pub(crate) fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    pub(crate) fn set_answer(&mut self, answer: Answer) {
        self.answer = Some(answer);
    }

    pub(crate) fn append_offer_candidates(&mut self, candidates: Vec<String>) {
        self.offer_ice_candidates.extend(candidates);
    }

    pub(crate) fn snapshot(&self, slot: u8) -> PeerSnapshot {
        let (answer_sdp, answer_ice_candidates) = match &self.answer {
            Some(answer) => (
                answer.answer_sdp.clone(),
                answer.answer_ice_candidates.clone(),
            ),
            None => (String::new(), Vec::new()),
        };

        PeerSnapshot {
            peer_id: self.id.clone(),
            slot,
            state: self.state(),
            offer_sdp: self.offer_sdp.clone(),
            offer_ice_candidates: self.offer_ice_candidates.clone(),
            answer_sdp,
            answer_ice_candidates,
        }
    }
}

/// Fresh opaque token for hosts and peers.
pub fn new_secret() -> String {
    Uuid::new_v4().to_string()
}
