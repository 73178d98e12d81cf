// desk.rs — CheckInDesk: the stateful command surface.
//
// The desk holds the current snapshot and threads it through the pure
// commands on `EventState`. After a command is accepted it persists the
// new blob, swaps in the new snapshot and notifies sinks. Rejections are
// reported to sinks too but leave both state and storage untouched.
//
// Results are nested: the outer `Result` is infrastructure (the blob could
// not be written), the inner one is the user-correctable verdict.

use uuid::Uuid;

use crate::error::{CheckInError, ValidationError};
use crate::events::{CheckInEvent, EventDispatcher, NotificationSink};
use crate::goal::{GoalStatus, TeamTallies};
use crate::state::{EventState, Outcome};
use crate::store::BlobStore;
use crate::team::Team;

/// What a desk command returns.
pub type CommandResult = Result<Result<Outcome, ValidationError>, CheckInError>;

pub struct CheckInDesk<S: BlobStore> {
    state: EventState,
    store: S,
    dispatcher: EventDispatcher,
}

impl<S: BlobStore> CheckInDesk<S> {
    /// Load and repair whatever `store` holds. A failed read is absorbed
    /// and the desk starts with an empty roster.
    pub fn open(store: S, capacity: usize) -> Self {
        let state = match store.load() {
            Ok(Some(blob)) => EventState::rehydrate(&blob, capacity),
            Ok(None) => EventState::new(capacity),
            Err(e) => {
                tracing::warn!("could not read stored roster, starting empty: {}", e);
                EventState::new(capacity)
            }
        };
        tracing::debug!(
            count = state.len(),
            capacity,
            celebrated = state.celebrated(),
            "check-in desk opened"
        );
        Self {
            state,
            store,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Add a notification sink.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.dispatcher.add_sink(sink);
    }

    /// The current snapshot.
    pub fn state(&self) -> &EventState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn check_in(&mut self, name: &str, team: &str) -> CommandResult {
        let result = self.state.check_in(name, team);
        self.commit(result, |out| {
            CheckInEvent::checked_in(&out.record, out.state.len())
        })
    }

    pub fn edit(&mut self, id: Uuid, name: &str, team: &str) -> CommandResult {
        let result = self.state.edit(id, name, team);
        self.commit(result, |out| CheckInEvent::edited(&out.record))
    }

    pub fn remove(&mut self, id: Uuid) -> CommandResult {
        let result = self.state.remove(id);
        self.commit(result, |out| {
            CheckInEvent::removed(&out.record, out.state.len())
        })
    }

    /// Remove the newest check-in. `None` when the roster is empty.
    pub fn remove_last(&mut self) -> Result<Option<Outcome>, CheckInError> {
        let Some(outcome) = self.state.remove_last() else {
            return Ok(None);
        };
        self.apply(outcome, |out| {
            CheckInEvent::removed(&out.record, out.state.len())
        })
        .map(Some)
    }

    /// Clear the roster. Cannot be rejected.
    pub fn reset(&mut self) -> Result<(), CheckInError> {
        let next = self.state.reset();
        self.store.save(&next.to_blob()?)?;
        let was_celebrated = self.state.celebrated();
        let previous = self.state.len();
        self.state = next;
        tracing::info!(removed = previous, "roster reset");
        let mut events = vec![CheckInEvent::reset()];
        if was_celebrated {
            events.push(CheckInEvent::goal_lost(0, self.state.capacity()));
        }
        self.dispatcher.dispatch(&events);
        Ok(())
    }

    pub fn tallies(&self) -> TeamTallies {
        self.state.tallies()
    }

    pub fn winners(&self) -> Vec<Team> {
        self.state.winners()
    }

    pub fn is_full(&self) -> bool {
        self.state.is_full()
    }

    /// Goal status of the current snapshot. Never `just_reached`: that edge
    /// is only reported on the command that crossed it.
    pub fn goal(&self) -> GoalStatus {
        self.state.evaluate_goal()
    }

    pub fn export(&self) -> Result<String, CheckInError> {
        self.state.export()
    }

    fn commit(
        &mut self,
        result: Result<Outcome, ValidationError>,
        event: impl FnOnce(&Outcome) -> CheckInEvent,
    ) -> CommandResult {
        match result {
            Ok(outcome) => self.apply(outcome, event).map(Ok),
            Err(err) => {
                tracing::debug!(kind = err.kind(), "command rejected: {}", err);
                self.dispatcher.dispatch(&[CheckInEvent::rejected(&err)]);
                Ok(Err(err))
            }
        }
    }

    /// Persist an accepted outcome, adopt its snapshot and notify sinks.
    fn apply(
        &mut self,
        outcome: Outcome,
        event: impl FnOnce(&Outcome) -> CheckInEvent,
    ) -> Result<Outcome, CheckInError> {
        self.store.save(&outcome.state.to_blob()?)?;

        let was_celebrated = self.state.celebrated();
        self.state = outcome.state.clone();
        tracing::debug!(
            check_in_id = %outcome.record.id(),
            count = self.state.len(),
            "command applied"
        );

        let mut events = vec![event(&outcome)];
        if outcome.goal.just_reached() {
            tracing::info!(
                capacity = self.state.capacity(),
                winners = ?outcome.goal.winners(),
                "goal reached"
            );
            events.push(CheckInEvent::goal_reached(
                self.state.capacity(),
                outcome.goal.winners(),
            ));
        } else if was_celebrated && !self.state.celebrated() {
            tracing::info!(count = self.state.len(), "roster dropped below capacity");
            events.push(CheckInEvent::goal_lost(
                self.state.len(),
                self.state.capacity(),
            ));
        }
        self.dispatcher.dispatch(&events);

        Ok(outcome)
    }
}
