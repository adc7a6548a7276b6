//! In-memory game sessions.
//!
//! Each browser tab gets one [`GameSession`] keyed by a server-issued UUID.
//! The registry owns the mismatch-cooldown timers: a mismatch spawns a task
//! that releases the engine's input lock once [`MISMATCH_COOLDOWN`] has
//! elapsed. Restarting or discarding a session aborts the pending task, and
//! the engine's cooldown handle goes stale at the same time, so a timer
//! from an old round can never unlock a new one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Duration, Utc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use vocabmatch_core::deck;
use vocabmatch_core::engine::{MatchingEngine, Selection, MISMATCH_COOLDOWN};
use vocabmatch_core::types::Student;
use vocabmatch_core::vocab;

use crate::error::{ApiError, Result};
use crate::models::{SelectionOutcome, SessionView};

/// Sessions idle longer than this are swept.
fn idle_ttl() -> Duration {
    Duration::hours(2)
}

/// One student's page session: identity, the live round, submission state.
pub struct GameSession {
    id: Uuid,
    student: Student,
    engine: MatchingEngine,
    submitted: bool,
    last_touched: DateTime<Utc>,
    cooldown_task: Option<JoinHandle<()>>,
}

impl GameSession {
    fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            student_name: self.student.name.clone(),
            student_id: self.student.student_id.clone(),
            deck: self.engine.deck().to_vec(),
            matched: self.engine.matched().collect(),
            first_selected: self.engine.first_selected(),
            input_locked: self.engine.is_locked(),
            complete: self.engine.is_complete(),
            submitted: self.submitted,
        }
    }

    fn cancel_cooldown(&mut self) {
        if let Some(task) = self.cooldown_task.take() {
            task.abort();
        }
    }
}

/// All live sessions, keyed by session ID. Sessions are independent; the
/// registry lock only guards the map, each session carries its own.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<GameSession>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Deal a fresh shuffled deck and open a session for the student.
    pub fn start(&self, student: Student) -> Result<SessionView> {
        let cards = deck::deal(&vocab::builtin_pairs());
        let engine = MatchingEngine::new(cards, &mut rand::thread_rng())
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let id = Uuid::new_v4();
        let session = GameSession {
            id,
            student,
            engine,
            submitted: false,
            last_touched: Utc::now(),
            cooldown_task: None,
        };
        let view = session.view();

        self.sessions
            .write()
            .expect("session registry lock")
            .insert(id, Arc::new(Mutex::new(session)));

        Ok(view)
    }

    /// Current state of a session.
    pub fn view(&self, id: Uuid) -> Result<SessionView> {
        let session = self.session(id)?;
        let mut session = session.lock().expect("session lock");
        session.last_touched = Utc::now();
        Ok(session.view())
    }

    /// Apply one card selection. A mismatch arms the fire-once unlock timer.
    pub fn select(&self, id: Uuid, card_id: i64) -> Result<(SelectionOutcome, SessionView)> {
        let session = self.session(id)?;
        let mut guard = session.lock().expect("session lock");
        guard.last_touched = Utc::now();

        let selection = guard.engine.select_card(card_id)?;
        let outcome = SelectionOutcome::from(&selection);

        if let Selection::Mismatched { cooldown } = selection {
            let unlock = Arc::clone(&session);
            guard.cooldown_task = Some(tokio::spawn(async move {
                tokio::time::sleep(MISMATCH_COOLDOWN).await;
                let mut session = unlock.lock().expect("session lock");
                session.engine.release_cooldown(cooldown);
            }));
        }

        Ok((outcome, guard.view()))
    }

    /// Reshuffle the same cards into a fresh round. Cancels any pending
    /// unlock; submission state is untouched.
    pub fn restart(&self, id: Uuid) -> Result<SessionView> {
        let session = self.session(id)?;
        let mut session = session.lock().expect("session lock");
        session.cancel_cooldown();
        session.engine.reset(&mut rand::thread_rng());
        session.last_touched = Utc::now();
        Ok(session.view())
    }

    /// Drop a session. Unknown IDs are already gone, which is fine.
    pub fn discard(&self, id: Uuid) {
        let removed = self
            .sessions
            .write()
            .expect("session registry lock")
            .remove(&id);
        if let Some(session) = removed {
            session.lock().expect("session lock").cancel_cooldown();
        }
    }

    /// First half of submit: check the gates and hand back the identity to
    /// record. The session lock is not held while the caller talks to the
    /// store; [`Self::mark_submitted`] closes the session afterwards.
    pub fn begin_submit(&self, id: Uuid) -> Result<Student> {
        let session = self.session(id)?;
        let mut session = session.lock().expect("session lock");
        session.last_touched = Utc::now();

        if session.submitted {
            return Err(ApiError::AlreadySubmitted(format!("session {id}")));
        }
        if !session.engine.is_complete() {
            return Err(ApiError::Validation(
                "game is not complete yet".to_string(),
            ));
        }

        Ok(session.student.clone())
    }

    /// Mark the session submitted once its record is stored.
    pub fn mark_submitted(&self, id: Uuid) -> Result<SessionView> {
        let session = self.session(id)?;
        let mut session = session.lock().expect("session lock");
        session.submitted = true;
        Ok(session.view())
    }

    /// Drop sessions idle past the TTL. Returns how many were removed.
    pub fn evict_idle(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().expect("session registry lock");
        let expired: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, session)| {
                now - session.lock().expect("session lock").last_touched > idle_ttl()
            })
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            if let Some(session) = sessions.remove(id) {
                session.lock().expect("session lock").cancel_cooldown();
            }
        }

        if !expired.is_empty() {
            tracing::info!("Evicted {} idle sessions", expired.len());
        }
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().expect("session registry lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn session(&self, id: Uuid) -> Result<Arc<Mutex<GameSession>>> {
        self.sessions
            .read()
            .expect("session registry lock")
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("session {id}")))
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student::new("张三", "2024001").unwrap()
    }

    /// Card IDs for a guaranteed mismatch: two lexemes never pair.
    fn mismatch_ids(view: &SessionView) -> (i64, i64) {
        let mut lexemes = view
            .deck
            .iter()
            .filter(|c| c.kind == vocabmatch_core::types::CardKind::Lexeme);
        let first = lexemes.next().expect("at least one lexeme").id;
        let second = lexemes.next().expect("at least two lexemes").id;
        (first, second)
    }

    /// Play every pair to completion.
    fn complete_game(registry: &SessionRegistry, view: &SessionView) {
        let pair_count = (view.deck.len() / 2) as i64;
        for pair_id in 1..=pair_count {
            let ids: Vec<i64> = view
                .deck
                .iter()
                .filter(|c| c.pair_id == pair_id)
                .map(|c| c.id)
                .collect();
            for card_id in ids {
                registry.select(view.session_id, card_id).unwrap();
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn mismatch_unlocks_after_the_cooldown() {
        let registry = SessionRegistry::new();
        let view = registry.start(student()).unwrap();
        let (first, second) = mismatch_ids(&view);

        registry.select(view.session_id, first).unwrap();
        let (outcome, locked) = registry.select(view.session_id, second).unwrap();
        assert_eq!(outcome, SelectionOutcome::Mismatched);
        assert!(locked.input_locked);

        // Still locked just before the cooldown elapses.
        tokio::time::sleep(MISMATCH_COOLDOWN / 2).await;
        assert!(registry.view(view.session_id).unwrap().input_locked);

        tokio::time::sleep(MISMATCH_COOLDOWN).await;
        assert!(!registry.view(view.session_id).unwrap().input_locked);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_cancels_the_pending_unlock() {
        let registry = SessionRegistry::new();
        let view = registry.start(student()).unwrap();
        let (first, second) = mismatch_ids(&view);

        registry.select(view.session_id, first).unwrap();
        registry.select(view.session_id, second).unwrap();

        let fresh = registry.restart(view.session_id).unwrap();
        assert!(!fresh.input_locked);
        assert!(fresh.matched.is_empty());

        // Mismatch again in the new round, then let the old deadline pass.
        let (first, second) = mismatch_ids(&fresh);
        registry.select(view.session_id, first).unwrap();
        registry.select(view.session_id, second).unwrap();

        tokio::time::sleep(MISMATCH_COOLDOWN / 4).await;
        assert!(registry.view(view.session_id).unwrap().input_locked);

        tokio::time::sleep(MISMATCH_COOLDOWN).await;
        assert!(!registry.view(view.session_id).unwrap().input_locked);
    }

    #[tokio::test]
    async fn submit_requires_a_complete_game() {
        let registry = SessionRegistry::new();
        let view = registry.start(student()).unwrap();

        let err = registry.begin_submit(view.session_id).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        complete_game(&registry, &view);
        assert!(registry.view(view.session_id).unwrap().complete);

        let identity = registry.begin_submit(view.session_id).unwrap();
        assert_eq!(identity.student_id, "2024001");

        let submitted = registry.mark_submitted(view.session_id).unwrap();
        assert!(submitted.submitted);

        let err = registry.begin_submit(view.session_id).unwrap_err();
        assert!(matches!(err, ApiError::AlreadySubmitted(_)));
    }

    #[tokio::test]
    async fn restart_keeps_the_submitted_flag() {
        let registry = SessionRegistry::new();
        let view = registry.start(student()).unwrap();
        complete_game(&registry, &view);
        registry.begin_submit(view.session_id).unwrap();
        registry.mark_submitted(view.session_id).unwrap();

        let fresh = registry.restart(view.session_id).unwrap();
        assert!(fresh.submitted);
        assert!(fresh.matched.is_empty());
    }

    #[tokio::test]
    async fn discard_removes_the_session() {
        let registry = SessionRegistry::new();
        let view = registry.start(student()).unwrap();
        assert_eq!(registry.len(), 1);

        registry.discard(view.session_id);
        assert!(registry.is_empty());
        assert!(matches!(
            registry.view(view.session_id),
            Err(ApiError::NotFound(_))
        ));

        // Discarding twice is a no-op.
        registry.discard(view.session_id);
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted() {
        let registry = SessionRegistry::new();
        let stale = registry.start(student()).unwrap();
        let active = registry
            .start(Student::new("李四", "2024002").unwrap())
            .unwrap();

        {
            let sessions = registry.sessions.read().expect("session registry lock");
            sessions
                .get(&stale.session_id)
                .unwrap()
                .lock()
                .expect("session lock")
                .last_touched = Utc::now() - Duration::hours(3);
        }

        assert_eq!(registry.evict_idle(), 1);
        assert!(registry.view(stale.session_id).is_err());
        assert!(registry.view(active.session_id).is_ok());
    }
}
