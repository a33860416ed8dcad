//! Requester identity supplied by the authentication layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque account identifier owning links and API tokens.
///
/// The service never interprets the value beyond equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(i64);

impl OwnerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who is performing a request.
///
/// Inserted into request extensions by [`crate::api::middleware::auth`] and
/// passed explicitly to every registry operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requester {
    #[default]
    Anonymous,
    Owner(OwnerId),
}

impl Requester {
    pub fn owner_id(&self) -> Option<OwnerId> {
        match self {
            Requester::Anonymous => None,
            Requester::Owner(id) => Some(*id),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Requester::Anonymous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requester_owner_id() {
        assert_eq!(Requester::Anonymous.owner_id(), None);
        assert_eq!(
            Requester::Owner(OwnerId::new(3)).owner_id(),
            Some(OwnerId::new(3))
        );
        assert!(Requester::default().is_anonymous());
    }

    #[test]
    fn test_owner_id_serializes_transparently() {
        let json = serde_json::to_value(OwnerId::new(42)).unwrap();
        assert_eq!(json, serde_json::json!(42));
    }
}
