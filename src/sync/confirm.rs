use serde::Deserialize;

/// Two-step deletion: a removal is requested, then confirmed or cancelled.
///
/// `Idle → PendingConfirm → Applied | Cancelled`. Only an `Applied` flow
/// removes anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    #[default]
    Idle,
    PendingConfirm {
        id: String,
    },
    Applied {
        id: String,
    },
    Cancelled {
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Confirm,
    Cancel,
}

impl DeleteFlow {
    /// Ask to delete `id`. Replaces any earlier pending request.
    pub fn request(self, id: impl Into<String>) -> Self {
        DeleteFlow::PendingConfirm { id: id.into() }
    }

    /// Resolve a pending request. Any other state is returned unchanged.
    pub fn resolve(self, decision: Decision) -> Self {
        match (self, decision) {
            (DeleteFlow::PendingConfirm { id }, Decision::Confirm) => DeleteFlow::Applied { id },
            (DeleteFlow::PendingConfirm { id }, Decision::Cancel) => DeleteFlow::Cancelled { id },
            (other, _) => other,
        }
    }

    /// The id to remove, if the flow reached `Applied`.
    pub fn applied_id(&self) -> Option<&str> {
        match self {
            DeleteFlow::Applied { id } => Some(id),
            _ => None,
        }
    }

    pub fn pending_id(&self) -> Option<&str> {
        match self {
            DeleteFlow::PendingConfirm { id } => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_applies_pending_request() {
        let flow = DeleteFlow::Idle.request("p1").resolve(Decision::Confirm);
        assert_eq!(flow.applied_id(), Some("p1"));
    }

    #[test]
    fn cancel_never_applies() {
        let flow = DeleteFlow::Idle.request("p1").resolve(Decision::Cancel);
        assert_eq!(flow, DeleteFlow::Cancelled { id: "p1".into() });
        assert_eq!(flow.applied_id(), None);
    }

    #[test]
    fn resolving_without_request_is_inert() {
        assert_eq!(DeleteFlow::Idle.resolve(Decision::Confirm), DeleteFlow::Idle);
    }

    #[test]
    fn resolved_flow_cannot_be_resolved_again() {
        let cancelled = DeleteFlow::Idle.request("a").resolve(Decision::Cancel);
        assert_eq!(cancelled.clone().resolve(Decision::Confirm), cancelled);
    }
}
