// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

use serde::Deserialize;

use crate::config::PushConfig;

/// A push notification forwarded by the host page's socket client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushEvent {
    Connected,
    VoteCast { poll_id: Option<u64> },
    PollActivated { poll_id: Option<u64> },
}

#[derive(Deserialize)]
struct PollPayload {
    poll_id: Option<u64>,
}

impl PushEvent {
    /// Map an event name and its JSON payload to a known event.
    ///
    /// Unknown names yield `None`. A payload that is absent or does not carry a
    /// numeric `poll_id` still produces the event, without an id.
    #[must_use]
    pub fn parse(name: &str, payload: Option<&str>, names: &PushConfig) -> Option<Self> {
        let poll_id = || {
            payload
                .and_then(|text| serde_json::from_str::<PollPayload>(text).ok())
                .and_then(|body| body.poll_id)
        };

        if name == names.connect_event {
            Some(Self::Connected)
        } else if name == names.vote_cast_event {
            Some(Self::VoteCast { poll_id: poll_id() })
        } else if name == names.poll_activated_event {
            Some(Self::PollActivated { poll_id: poll_id() })
        } else {
            None
        }
    }
}

impl Display for PushEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, poll_id) = match self {
            Self::Connected => return write!(f, "connected"),
            Self::VoteCast { poll_id } => ("vote cast", poll_id),
            Self::PollActivated { poll_id } => ("poll activated", poll_id),
        };
        match poll_id {
            Some(id) => write!(f, "{label} (poll {id})"),
            None => write!(f, "{label}"),
        }
    }
}
