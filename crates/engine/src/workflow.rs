//! Screen-level orchestration over the bank and the active session.
//!
//! `QuizFlow` owns the handful of things that outlive a single run: the
//! selected subject and its question pool, the clock, and the parameters of
//! the last run (for restart). The session itself remains the only
//! mutation surface over run state; the flow adds the transitions between
//! screens around it.

use std::sync::Arc;

use rand::Rng;

use bank::{QuestionBank, SubjectOverview};
use quiz_core::Clock;
use quiz_core::model::{Question, RunSettings, Subject, SubjectId};

use crate::error::SessionError;
use crate::run::RunBuilder;
use crate::session::{PendingAction, QuizSession, RunPhase};
use crate::view::QuestionView;

/// Which screen the application should be showing.
///
/// Derived from flow state rather than stored, so it can never disagree
/// with the session underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Subject selection.
    Home,
    /// Subject chosen; picking question count and run settings.
    CountSelect,
    InProgress,
    /// Results screen, including the review sub-mode.
    Completed,
}

/// A selected subject with its full question pool loaded up front, so run
/// starts and restarts never touch the bank again.
#[derive(Debug, Clone)]
pub struct LoadedSubject {
    subject: Subject,
    pool: Vec<Question>,
}

impl LoadedSubject {
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    #[must_use]
    pub fn pool(&self) -> &[Question] {
        &self.pool
    }
}

pub struct QuizFlow {
    bank: Arc<dyn QuestionBank>,
    clock: Clock,
    subject: Option<LoadedSubject>,
    session: Option<QuizSession>,
    last_count: Option<usize>,
    last_settings: RunSettings,
}

impl QuizFlow {
    #[must_use]
    pub fn new(bank: Arc<dyn QuestionBank>) -> Self {
        Self::with_clock(bank, Clock::default())
    }

    #[must_use]
    pub fn with_clock(bank: Arc<dyn QuestionBank>, clock: Clock) -> Self {
        Self {
            bank,
            clock,
            subject: None,
            session: None,
            last_count: None,
            last_settings: RunSettings::default(),
        }
    }

    //
    // ─── STATE ─────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn state(&self) -> FlowState {
        match (&self.session, &self.subject) {
            (Some(session), _) => match session.phase() {
                RunPhase::InProgress => FlowState::InProgress,
                RunPhase::Completed => FlowState::Completed,
            },
            (None, Some(_)) => FlowState::CountSelect,
            (None, None) => FlowState::Home,
        }
    }

    #[must_use]
    pub fn subject(&self) -> Option<&LoadedSubject> {
        self.subject.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        self.session.as_mut()
    }

    //
    // ─── SUBJECT SELECTION ─────────────────────────────────────────────────────
    //

    /// Subjects with their question counts for the selection screen.
    ///
    /// A subject whose question data fails to load is omitted rather than
    /// failing the whole listing; one broken data file should not take the
    /// application down.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Bank` if the subject manifest itself cannot
    /// be read.
    pub async fn subject_overviews(&self) -> Result<Vec<SubjectOverview>, SessionError> {
        let subjects = self.bank.subjects().await?;
        let mut overviews = Vec::with_capacity(subjects.len());
        for subject in subjects {
            match self.bank.load_questions(subject.id()).await {
                Ok(questions) => overviews.push(SubjectOverview {
                    subject,
                    question_count: questions.len(),
                }),
                Err(_) => continue,
            }
        }
        Ok(overviews)
    }

    /// Selects a subject and loads its pool. Any active session is
    /// discarded; on failure the previous selection is kept untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Bank` if the subject or its questions cannot
    /// be loaded, or `SessionError::Empty` if the subject has no questions.
    pub async fn select_subject(&mut self, id: &SubjectId) -> Result<(), SessionError> {
        let subjects = self.bank.subjects().await?;
        let subject = subjects
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| SessionError::Bank(bank::BankError::SubjectNotFound(id.clone())))?;

        let pool = self.bank.load_questions(id).await?;
        if pool.is_empty() {
            return Err(SessionError::Empty);
        }

        if let Some(session) = &mut self.session {
            session.abort();
        }
        self.session = None;
        self.subject = Some(LoadedSubject { subject, pool });
        self.last_count = None;
        Ok(())
    }

    //
    // ─── RUN LIFECYCLE ─────────────────────────────────────────────────────────
    //

    /// Starts a run over the selected subject with the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSubject` if no subject is selected.
    pub fn start_run(&mut self, count: usize, settings: RunSettings) -> Result<(), SessionError> {
        self.start_run_with_rng(count, settings, &mut rand::rng())
    }

    /// Starts a run with a caller-provided RNG (deterministic in tests).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSubject` if no subject is selected.
    pub fn start_run_with_rng(
        &mut self,
        count: usize,
        settings: RunSettings,
        rng: &mut impl Rng,
    ) -> Result<(), SessionError> {
        let subject = self.subject.as_ref().ok_or(SessionError::NoSubject)?;

        let run = RunBuilder::new(subject.pool.clone(), count)
            .with_settings(settings)
            .build_with_rng(rng)?;

        self.session = Some(QuizSession::start(run, self.clock));
        self.last_count = Some(count);
        self.last_settings = settings;
        Ok(())
    }

    /// Starts a fresh run with the same subject, count, and settings as
    /// the last one; the question subset and order are re-drawn.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` if no run was started yet.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.restart_with_rng(&mut rand::rng())
    }

    /// Restart with a caller-provided RNG.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` if no run was started yet.
    pub fn restart_with_rng(&mut self, rng: &mut impl Rng) -> Result<(), SessionError> {
        let count = self.last_count.ok_or(SessionError::NotStarted)?;
        self.start_run_with_rng(count, self.last_settings, rng)
    }

    /// Confirms the session's pending action. A confirmed `Exit` drops the
    /// session, returning the flow to count selection.
    pub fn confirm_pending(&mut self) -> Option<PendingAction> {
        let action = self.session.as_mut()?.confirm_pending()?;
        if action == PendingAction::Exit {
            self.session = None;
        }
        Some(action)
    }

    /// Returns to subject selection, discarding any session and selection.
    pub fn go_home(&mut self) {
        if let Some(session) = &mut self.session {
            session.abort();
        }
        self.session = None;
        self.subject = None;
        self.last_count = None;
    }

    //
    // ─── VIEWS ─────────────────────────────────────────────────────────────────
    //

    /// Snapshot of the current question, with boolean options labeled per
    /// the selected subject. `None` outside an active session.
    pub fn question_view(&mut self) -> Option<QuestionView> {
        let labels = self.subject.as_ref()?.subject.boolean_labels().clone();
        self.session.as_mut()?.question_view(&labels)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
