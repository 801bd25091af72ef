//! ScanGate - single active decode session
//!
//! The camera collaborator runs a decode loop and hands every decoded string
//! to the engine. Only one loop may be live: opening a scan supersedes the
//! previous ticket, and strings fed with a stale ticket are dropped. Results
//! already returned stay valid.

use serde::{Deserialize, Serialize};

use crate::extract::payload::{LocationCode, PayloadCortex, PersonCode};

/// Payload class a scan session expects
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PayloadKind {
    Person,
    Location,
}

/// Handle for one decode session
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanTicket {
    pub serial: u32,
    pub kind: PayloadKind,
}

/// Decoded payload from a live session
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScanPayload {
    Person(PersonCode),
    Location(LocationCode),
}

/// Gate between the decode loop and the payload parser
#[derive(Debug, Default)]
pub struct ScanGate {
    active: Option<ScanTicket>,
    last_serial: u32,
    /// Strings dropped because their ticket was stale or closed
    rejected: u64,
}

impl ScanGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session; any previous session is cancelled first
    pub fn open(&mut self, kind: PayloadKind) -> ScanTicket {
        if let Some(previous) = self.active.take() {
            crate::console_log!("[ScanGate] cancel scan #{} ({:?})", previous.serial, previous.kind);
        }
        self.last_serial = self.last_serial.wrapping_add(1);
        let ticket = ScanTicket {
            serial: self.last_serial,
            kind,
        };
        self.active = Some(ticket);
        ticket
    }

    pub fn active(&self) -> Option<ScanTicket> {
        self.active
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Parse a decoded string if `ticket` is the live session.
    ///
    /// Blank strings (decoder produced nothing) yield `None` without counting
    /// as rejected.
    pub fn feed(&mut self, ticket: ScanTicket, raw: &str, cortex: &PayloadCortex) -> Option<ScanPayload> {
        if self.active != Some(ticket) {
            self.rejected += 1;
            return None;
        }
        if raw.trim().is_empty() {
            return None;
        }
        Some(match ticket.kind {
            PayloadKind::Person => ScanPayload::Person(cortex.parse_person_code(raw)),
            PayloadKind::Location => ScanPayload::Location(cortex.parse_location_code(raw)),
        })
    }

    /// Stop the session; returns false for a ticket that is not live
    pub fn close(&mut self, ticket: ScanTicket) -> bool {
        if self.active == Some(ticket) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
