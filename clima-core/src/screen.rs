//! Per-screen fetch-cycle state.
//!
//! Every screen performs the same cycle: acquire an input (a fix or a
//! query), run one HTTP round trip, replace the displayed state wholesale.
//! The state is a tagged variant, so stale data and an error can never be
//! shown together, and every attempt carries a [`Ticket`] so results that
//! resolve after the user has moved on are discarded instead of clobbering
//! a screen that no longer expects them.

use std::future::Future;

use crate::error::FetchError;

/// Display state of one screen.
#[derive(Debug, Default)]
pub enum FetchState<T> {
    /// Nothing fetched yet.
    #[default]
    NotLoaded,
    /// A fetch is in flight.
    Loading,
    /// Last fetch succeeded; this is the full replacement state.
    Loaded(T),
    /// Last fetch failed; nothing is displayed besides the message.
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Handle for one fetch attempt. Single-use: completing spends it, and a
/// spent or superseded ticket is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// One screen's state plus the generation counter that invalidates
/// abandoned attempts.
#[derive(Debug)]
pub struct Screen<T> {
    state: FetchState<T>,
    generation: u64,
}

impl<T> Default for Screen<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Screen<T> {
    pub fn new() -> Self {
        Self { state: FetchState::NotLoaded, generation: 0 }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Start a fetch attempt. Any earlier in-flight attempt becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = FetchState::Loading;
        Ticket(self.generation)
    }

    /// Resolve a fetch attempt. Returns `false` when the ticket is stale
    /// and the result was discarded.
    pub fn complete(&mut self, ticket: Ticket, result: Result<T, FetchError>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }

        // Spend the ticket so a double completion cannot land.
        self.generation += 1;
        self.state = match result {
            Ok(data) => FetchState::Loaded(data),
            Err(err) => FetchState::Failed(err),
        };
        true
    }

    /// Abandon the screen: in-flight attempts become stale, and a pending
    /// `Loading` falls back to `NotLoaded`. Loaded data stays for the next
    /// visit.
    pub fn leave(&mut self) {
        self.generation += 1;
        if self.state.is_loading() {
            self.state = FetchState::NotLoaded;
        }
    }

    /// Run one full fetch cycle against an already-acquired input.
    ///
    /// An acquisition failure (`input` is `Err`) comes straight back as the
    /// alert value without touching screen state and without invoking
    /// `fetch` at all. Otherwise the screen goes through
    /// `Loading` → `Loaded`/`Failed` exactly once.
    pub async fn run_cycle<In, E, F, Fut>(&mut self, input: Result<In, E>, fetch: F) -> Result<(), E>
    where
        F: FnOnce(In) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let input = input?;
        let ticket = self.begin();
        let result = fetch(input).await;
        self.complete(ticket, result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn begin_and_complete_transition_loading_exactly_once() {
        let mut screen = Screen::new();
        assert!(matches!(screen.state(), FetchState::NotLoaded));

        let ticket = screen.begin();
        assert!(screen.state().is_loading());

        assert!(screen.complete(ticket, Ok(41)));
        assert!(!screen.state().is_loading());
        assert_eq!(screen.state().data(), Some(&41));

        // The ticket is spent: a second completion cannot land.
        assert!(!screen.complete(ticket, Ok(99)));
        assert_eq!(screen.state().data(), Some(&41));
    }

    #[test]
    fn a_failed_fetch_replaces_data_with_the_failure() {
        let mut screen = Screen::new();
        let ticket = screen.begin();
        screen.complete(ticket, Ok(7));

        let ticket = screen.begin();
        assert!(screen.complete(ticket, Err(FetchError::CityNotFound)));

        assert!(matches!(screen.state(), FetchState::Failed(FetchError::CityNotFound)));
        assert!(screen.state().data().is_none());
    }

    #[test]
    fn a_newer_attempt_invalidates_the_older_ticket() {
        let mut screen = Screen::new();
        let stale = screen.begin();
        let fresh = screen.begin();

        assert!(!screen.complete(stale, Ok(1)));
        assert!(screen.state().is_loading());

        assert!(screen.complete(fresh, Ok(2)));
        assert_eq!(screen.state().data(), Some(&2));
    }

    #[test]
    fn leaving_mid_fetch_discards_the_late_result() {
        let mut screen = Screen::new();
        let ticket = screen.begin();
        screen.leave();

        assert!(matches!(screen.state(), FetchState::NotLoaded));
        assert!(!screen.complete(ticket, Ok(1)));
        assert!(matches!(screen.state(), FetchState::NotLoaded));
    }

    #[test]
    fn leaving_keeps_loaded_data_for_the_next_visit() {
        let mut screen = Screen::new();
        let ticket = screen.begin();
        screen.complete(ticket, Ok(5));

        screen.leave();
        assert_eq!(screen.state().data(), Some(&5));
    }

    #[tokio::test]
    async fn acquisition_failure_skips_the_fetch_and_keeps_prior_data() {
        let mut screen = Screen::new();
        let ticket = screen.begin();
        screen.complete(ticket, Ok(21));

        let fetched = Cell::new(false);
        let outcome = screen
            .run_cycle(Err::<(), _>("permiso denegado"), |()| {
                fetched.set(true);
                async { Ok::<_, FetchError>(0) }
            })
            .await;

        assert_eq!(outcome, Err("permiso denegado"));
        assert!(!fetched.get(), "a denied acquisition must not fetch");
        assert_eq!(screen.state().data(), Some(&21));
    }

    #[tokio::test]
    async fn run_cycle_lands_the_fetched_data() {
        let mut screen = Screen::new();

        let outcome = screen
            .run_cycle(Ok::<_, &str>(3), |n| async move { Ok::<_, FetchError>(n * 2) })
            .await;

        assert_eq!(outcome, Ok(()));
        assert_eq!(screen.state().data(), Some(&6));
    }
}
