use std::fmt;

/// What happened to one term definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Unchanged,
    Failed,
}

/// Outcome counts for one term kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncTally {
    pub created: u64,
    pub updated: u64,
    pub unchanged: u64,
    pub failed: u64,
}

impl SyncTally {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut tally = Self::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Created => tally.created += 1,
                Outcome::Updated => tally.updated += 1,
                Outcome::Unchanged => tally.unchanged += 1,
                Outcome::Failed => tally.failed += 1,
            }
        }
        tally
    }
}

impl fmt::Display for SyncTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Created: {}. Updated: {}. Unchanged: {}. Failed: {}.",
            self.created, self.updated, self.unchanged, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_count_each_outcome() {
        let tally = SyncTally::from_outcomes(&[
            Outcome::Created,
            Outcome::Unchanged,
            Outcome::Unchanged,
            Outcome::Failed,
            Outcome::Updated,
            Outcome::Unchanged,
        ]);
        assert_eq!(
            tally,
            SyncTally {
                created: 1,
                updated: 1,
                unchanged: 3,
                failed: 1,
            }
        );
    }

    #[test]
    fn tallies_render_in_summary_form() {
        let tally = SyncTally {
            created: 2,
            updated: 0,
            unchanged: 17,
            failed: 1,
        };
        assert_eq!(
            tally.to_string(),
            "Created: 2. Updated: 0. Unchanged: 17. Failed: 1."
        );
        assert_eq!(
            SyncTally::default().to_string(),
            "Created: 0. Updated: 0. Unchanged: 0. Failed: 0."
        );
    }
}
