//! Split session service
//!
//! Owns the single split and applies one edit event at a time.

use tracing::{debug, info};

use crate::application::command::SplitCommand;
use crate::application::ApplicationResult;
use crate::domain::Split;

/// What the caller should do after a command was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The split changed; render it again.
    Updated,
    /// Nothing changed (blank line or comment).
    Unchanged,
    /// The user asked to see the split.
    Show,
    /// The user asked for the command summary.
    Help,
    /// The user ended the session.
    Quit,
}

/// Service forwarding edit events into the allocation engine.
#[derive(Debug, Clone)]
pub struct SessionService {
    split: Split,
}

impl SessionService {
    /// Create a new session around an initial split.
    pub fn new(split: Split) -> Self {
        Self { split }
    }

    /// The current, fully consistent split.
    pub fn split(&self) -> &Split {
        &self.split
    }

    /// Consume the session and return the final split.
    pub fn into_split(self) -> Split {
        self.split
    }

    /// Parse `line` and apply it.
    pub fn run_line(&mut self, line: &str) -> ApplicationResult<SessionOutcome> {
        match SplitCommand::parse_line(line)? {
            Some(command) => self.apply(command),
            None => Ok(SessionOutcome::Unchanged),
        }
    }

    /// Apply one command to completion.
    ///
    /// On error the split is left as it was before the call.
    pub fn apply(&mut self, command: SplitCommand) -> ApplicationResult<SessionOutcome> {
        debug!("apply: {:?}", command);
        let split = &mut self.split;
        match command {
            SplitCommand::Total(amount) => {
                split.set_total_bill(amount);
            }
            SplitCommand::People(people) => {
                split.set_people_count(people);
            }
            SplitCommand::AddPerson => {
                split.add_person();
            }
            SplitCommand::Set { person, percentage } => {
                split.set_percentage(person.get() - 1, percentage)?;
            }
            SplitCommand::Equal => {
                split.split_equally();
            }
            SplitCommand::Currency(currency) => {
                split.set_currency(currency);
            }
            SplitCommand::Show => return Ok(SessionOutcome::Show),
            SplitCommand::Help => return Ok(SessionOutcome::Help),
            SplitCommand::Quit => return Ok(SessionOutcome::Quit),
        }

        info!(
            people = split.num_people(),
            allocated = split.allocated_percentage(),
            "split updated"
        );
        Ok(SessionOutcome::Updated)
    }
}
