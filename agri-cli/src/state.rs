//! In-memory state for one run of the `agri` command.
//!
//! Nothing here outlives the process; a new run starts with a fresh chat
//! transcript.

use agri_core::assistant::ChatSession;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// State shared by the subcommands.
pub struct AppState {
    /// Single random source for confidence figures and diagnoses.
    pub rng: StdRng,

    /// Transcript for `ask` and `chat`.
    pub chat: ChatSession,
}

impl AppState {
    /// Seeded state replays the same random draws on every run.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            chat: ChatSession::new(),
        }
    }

    /// Starts the conversation over.
    pub fn clear_chat(&mut self) {
        self.chat.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let mut a = AppState::new(Some(5));
        let mut b = AppState::new(Some(5));

        assert_eq!(a.rng.gen_range(0..1000), b.rng.gen_range(0..1000));
    }

    #[test]
    fn clear_chat_keeps_only_greeting() {
        let mut state = AppState::new(Some(1));
        state.chat.send("soil").unwrap();

        state.clear_chat();

        assert_eq!(state.chat.messages().len(), 1);
    }
}
