use super::error::MeterError;

/// Meter session state machine.
///
/// State transitions:
/// ```text
/// idle → listening → idle
///   ↑        ↓
///   └──── failed ──→ listening (explicit retry)
/// ```
///
/// Both `Idle` and `Failed` can re-enter `Listening`; any failure during
/// acquisition lands in `Failed` with the triggering error attached.
#[derive(Debug, Clone, PartialEq)]
pub enum MeterState {
    Idle,
    Listening,
    Failed(MeterError),
}

impl MeterState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_listening(&self) -> bool {
        matches!(self, Self::Listening)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Short status label for display surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Failed(_) => "error",
        }
    }

    /// The error carried by `Failed`, if any.
    pub fn error(&self) -> Option<&MeterError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_match_variants() {
        assert!(MeterState::Idle.is_idle());
        assert!(MeterState::Listening.is_listening());
        assert!(MeterState::Failed(MeterError::Unknown("x".into())).is_failed());
        assert!(!MeterState::Idle.is_listening());
    }

    #[test]
    fn failed_exposes_error() {
        let state = MeterState::Failed(MeterError::PermissionDenied("no".into()));
        assert_eq!(
            state.error(),
            Some(&MeterError::PermissionDenied("no".into()))
        );
        assert_eq!(MeterState::Listening.error(), None);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(MeterState::Idle.label(), "idle");
        assert_eq!(MeterState::Listening.label(), "listening");
        assert_eq!(
            MeterState::Failed(MeterError::Unknown(String::new())).label(),
            "error"
        );
    }
}
