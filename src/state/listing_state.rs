/// Listing walker state definitions
///
/// The walker moves from `NotStarted` to `HasPage` when the first listing page
/// loads, stays in `HasPage` while "next" links keep resolving, and ends in
/// `Exhausted`.
use std::fmt;

/// Represents where a listing walk currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingState {
    /// The schema's listing URL has not been requested yet
    NotStarted,

    /// A listing page is loaded; its entries are being consumed
    HasPage,

    /// No further pages: no next control, a next control without href,
    /// or a page failed to load
    Exhausted,
}

impl ListingState {
    /// Returns true if no more entries will be produced
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Returns true if the transition is allowed by the walker's state machine
    pub fn can_transition_to(&self, next: ListingState) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::HasPage)
                | (Self::NotStarted, Self::Exhausted)
                | (Self::HasPage, Self::HasPage)
                | (Self::HasPage, Self::Exhausted)
                | (Self::Exhausted, Self::Exhausted)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::HasPage => "has_page",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for ListingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!ListingState::NotStarted.is_terminal());
        assert!(!ListingState::HasPage.is_terminal());
        assert!(ListingState::Exhausted.is_terminal());
    }

    #[test]
    fn test_transitions() {
        assert!(ListingState::NotStarted.can_transition_to(ListingState::HasPage));
        assert!(ListingState::HasPage.can_transition_to(ListingState::HasPage));
        assert!(ListingState::HasPage.can_transition_to(ListingState::Exhausted));

        assert!(!ListingState::Exhausted.can_transition_to(ListingState::HasPage));
        assert!(!ListingState::HasPage.can_transition_to(ListingState::NotStarted));
        assert!(!ListingState::Exhausted.can_transition_to(ListingState::NotStarted));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ListingState::HasPage), "has_page");
        assert_eq!(format!("{}", ListingState::Exhausted), "exhausted");
    }
}
