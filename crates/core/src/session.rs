use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::{CredentialError, Identity, Question, SubjectCatalog, SubjectId};
use crate::scoring::ScoreReport;
use crate::time::TIME_LIMIT_SECS;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("please enter your full name and the correct authentication id")]
    InvalidCredentials(#[from] CredentialError),

    #[error("unknown subject: {0}")]
    UnknownSubject(SubjectId),

    #[error("cannot {action} while {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: SessionPhase,
    },

    #[error("{choice:?} is not an option of the current question")]
    InvalidChoice { choice: String },

    #[error("no question to render at index {index}")]
    NoQuestion { index: usize },
}

//
// ─── PHASES, ACTIONS, EFFECTS ──────────────────────────────────────────────────
//

/// Screen-level position of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    LoggedOut,
    SubjectPending,
    InstructionsShown,
    InProgress,
    Completed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionPhase::LoggedOut => "logged out",
            SessionPhase::SubjectPending => "choosing a subject",
            SessionPhase::InstructionsShown => "showing instructions",
            SessionPhase::InProgress => "a test is in progress",
            SessionPhase::Completed => "the test is completed",
        };
        f.write_str(label)
    }
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionReason {
    AllAnswered,
    TimeExpired,
    NoQuestions,
}

/// Everything a user (or the countdown) can do to a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    Login { full_name: String, credential: String },
    Logout,
    DismissWelcome,
    SelectSubject(SubjectId),
    DismissInstructions,
    StartTest,
    SelectAnswer(String),
    SubmitAnswer(String),
    Tick,
    Abandon,
    Retake,
    ToggleCorrectAnswers,
    EndCelebration,
}

impl SessionAction {
    /// Short name for logs; never includes user input.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::Login { .. } => "login",
            SessionAction::Logout => "logout",
            SessionAction::DismissWelcome => "dismiss_welcome",
            SessionAction::SelectSubject(_) => "select_subject",
            SessionAction::DismissInstructions => "dismiss_instructions",
            SessionAction::StartTest => "start_test",
            SessionAction::SelectAnswer(_) => "select_answer",
            SessionAction::SubmitAnswer(_) => "submit_answer",
            SessionAction::Tick => "tick",
            SessionAction::Abandon => "abandon",
            SessionAction::Retake => "retake",
            SessionAction::ToggleCorrectAnswers => "toggle_correct_answers",
            SessionAction::EndCelebration => "end_celebration",
        }
    }
}

/// Side effects requested by a transition. The reducer never performs them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEffect {
    ShowWelcome,
    ShowInstructions,
    AcquireCamera,
    ReleaseCamera,
    Celebrate,
    TimeExpired,
}

/// Output of a successful transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<SessionEffect>,
}

impl Transition {
    fn new(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: SessionEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if the transition asked for `effect`.
    #[must_use]
    pub fn requests(&self, effect: SessionEffect) -> bool {
        self.effects.contains(&effect)
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// The whole assessment session as a value.
///
/// Transitions never mutate in place: each returns a new state plus the effects
/// the caller must run. A rejected action leaves the input state untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct SessionState {
    phase: SessionPhase,
    identity: Option<Identity>,
    selected_subject: Option<SubjectId>,
    current_index: usize,
    selected_answer: Option<String>,
    score: u32,
    remaining_seconds: u32,
    total_questions: usize,
    completion: Option<CompletionReason>,
    welcome_open: bool,
    instructions_open: bool,
    show_correct_answers: bool,
    celebrating: bool,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// A fresh, logged-out session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::LoggedOut,
            identity: None,
            selected_subject: None,
            current_index: 0,
            selected_answer: None,
            score: 0,
            remaining_seconds: TIME_LIMIT_SECS,
            total_questions: 0,
            completion: None,
            welcome_open: false,
            instructions_open: false,
            show_correct_answers: false,
            celebrating: false,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.identity.as_ref().map(Identity::full_name)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn selected_subject(&self) -> Option<&SubjectId> {
        self.selected_subject.as_ref()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Question count of the subject captured when the test started.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    #[must_use]
    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.completion
    }

    #[must_use]
    pub fn welcome_open(&self) -> bool {
        self.welcome_open
    }

    #[must_use]
    pub fn instructions_open(&self) -> bool {
        self.instructions_open
    }

    #[must_use]
    pub fn show_correct_answers(&self) -> bool {
        self.show_correct_answers
    }

    #[must_use]
    pub fn celebrating(&self) -> bool {
        self.celebrating
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// True only while the countdown should be running.
    #[must_use]
    pub fn timer_active(&self) -> bool {
        self.phase == SessionPhase::InProgress
    }

    /// Question shown at `current_index`, if any.
    #[must_use]
    pub fn current_question<'a>(&self, catalog: &'a SubjectCatalog) -> Option<&'a Question> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        let subject = self.selected_subject.as_ref()?;
        catalog.question(subject, self.current_index)
    }

    /// True when the current question is the last one of the run.
    #[must_use]
    pub fn on_last_question(&self) -> bool {
        self.current_index + 1 >= self.total_questions
    }

    #[must_use]
    pub fn score_report(&self) -> ScoreReport {
        let total = u32::try_from(self.total_questions).unwrap_or(u32::MAX);
        ScoreReport::new(self.score, total)
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Apply one action.
    ///
    /// `now` stamps start and completion times; it is ignored by actions that
    /// do not record time.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the action is not valid in the current phase
    /// or its input fails validation.
    pub fn apply(
        &self,
        catalog: &SubjectCatalog,
        action: SessionAction,
        now: DateTime<Utc>,
    ) -> Result<Transition, SessionError> {
        match action {
            SessionAction::Login {
                full_name,
                credential,
            } => self.login(&full_name, &credential),
            SessionAction::Logout => Ok(self.logout()),
            SessionAction::DismissWelcome => Ok(self.dismiss_welcome()),
            SessionAction::SelectSubject(id) => self.select_subject(catalog, id),
            SessionAction::DismissInstructions => self.dismiss_instructions(),
            SessionAction::StartTest => self.start_test(catalog, now),
            SessionAction::SelectAnswer(choice) => self.select_answer(catalog, choice),
            SessionAction::SubmitAnswer(choice) => self.submit_answer(catalog, &choice, now),
            SessionAction::Tick => Ok(self.tick(now)),
            SessionAction::Abandon => self.abandon(),
            SessionAction::Retake => self.retake(),
            SessionAction::ToggleCorrectAnswers => self.toggle_correct_answers(),
            SessionAction::EndCelebration => Ok(self.end_celebration()),
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidCredentials` for a blank name or wrong passphrase,
    /// and `SessionError::InvalidPhase` once a subject has been chosen.
    pub fn login(&self, full_name: &str, credential: &str) -> Result<Transition, SessionError> {
        self.require_any(
            "log in",
            &[SessionPhase::LoggedOut, SessionPhase::SubjectPending],
        )?;
        let identity = Identity::authenticate(full_name, credential)?;

        let mut next = Self::new();
        next.phase = SessionPhase::SubjectPending;
        next.identity = Some(identity);
        next.welcome_open = true;
        Ok(Transition::new(next).with(SessionEffect::ShowWelcome))
    }

    /// Drop identity and every quiz field. Releases the camera mid-test.
    pub fn logout(&self) -> Transition {
        let transition = Transition::new(Self::new());
        if self.phase == SessionPhase::InProgress {
            transition.with(SessionEffect::ReleaseCamera)
        } else {
            transition
        }
    }

    pub fn dismiss_welcome(&self) -> Transition {
        let mut next = self.clone();
        next.welcome_open = false;
        Transition::new(next)
    }

    /// # Errors
    ///
    /// Returns `SessionError::UnknownSubject` if `id` is not in the catalog and
    /// `SessionError::InvalidPhase` outside subject selection.
    pub fn select_subject(
        &self,
        catalog: &SubjectCatalog,
        id: SubjectId,
    ) -> Result<Transition, SessionError> {
        self.require("select a subject", SessionPhase::SubjectPending)?;
        if !catalog.contains(&id) {
            return Err(SessionError::UnknownSubject(id));
        }

        let mut next = self.clone();
        next.phase = SessionPhase::InstructionsShown;
        next.selected_subject = Some(id);
        next.welcome_open = false;
        next.instructions_open = true;
        Ok(Transition::new(next).with(SessionEffect::ShowInstructions))
    }

    /// Close the instructions without starting; the subject is unselected.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless instructions are showing.
    pub fn dismiss_instructions(&self) -> Result<Transition, SessionError> {
        self.require("dismiss instructions", SessionPhase::InstructionsShown)?;
        Ok(Transition::new(self.back_to_subjects()))
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless instructions are showing.
    pub fn start_test(
        &self,
        catalog: &SubjectCatalog,
        now: DateTime<Utc>,
    ) -> Result<Transition, SessionError> {
        self.require("start the test", SessionPhase::InstructionsShown)?;
        let total = self
            .selected_subject
            .as_ref()
            .map_or(0, |subject| catalog.total_questions(subject));

        let mut next = self.clone();
        next.current_index = 0;
        next.score = 0;
        next.remaining_seconds = TIME_LIMIT_SECS;
        next.selected_answer = None;
        next.total_questions = total;
        next.completion = None;
        next.instructions_open = false;
        next.show_correct_answers = false;
        next.celebrating = false;
        next.started_at = Some(now);
        next.completed_at = None;

        if total == 0 {
            next.complete(CompletionReason::NoQuestions, now);
            return Ok(Transition::new(next));
        }

        next.phase = SessionPhase::InProgress;
        Ok(Transition::new(next).with(SessionEffect::AcquireCamera))
    }

    /// Mark `choice` as the pending answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidChoice` if `choice` is not an option,
    /// `SessionError::NoQuestion` if nothing is shown, and
    /// `SessionError::InvalidPhase` outside a running test.
    pub fn select_answer(
        &self,
        catalog: &SubjectCatalog,
        choice: String,
    ) -> Result<Transition, SessionError> {
        self.require("select an answer", SessionPhase::InProgress)?;
        let question = self.require_question(catalog)?;
        if !question.has_option(&choice) {
            return Err(SessionError::InvalidChoice { choice });
        }

        let mut next = self.clone();
        next.selected_answer = Some(choice);
        Ok(Transition::new(next))
    }

    /// Score `choice` against the current question and move on.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidChoice` if `choice` is not an option,
    /// `SessionError::NoQuestion` if nothing is shown, and
    /// `SessionError::InvalidPhase` outside a running test.
    pub fn submit_answer(
        &self,
        catalog: &SubjectCatalog,
        choice: &str,
        now: DateTime<Utc>,
    ) -> Result<Transition, SessionError> {
        self.require("submit an answer", SessionPhase::InProgress)?;
        let question = self.require_question(catalog)?;
        if !question.has_option(choice) {
            return Err(SessionError::InvalidChoice {
                choice: choice.to_owned(),
            });
        }

        let mut next = self.clone();
        if question.is_correct(choice) {
            next.score = next.score.saturating_add(1);
        }
        next.selected_answer = None;

        if self.on_last_question() {
            next.complete(CompletionReason::AllAnswered, now);
            next.celebrating = true;
            return Ok(Transition::new(next)
                .with(SessionEffect::ReleaseCamera)
                .with(SessionEffect::Celebrate));
        }

        next.current_index += 1;
        Ok(Transition::new(next))
    }

    /// One second of countdown. A no-op unless a test is running.
    ///
    /// The tick that reaches zero completes the run; later ticks see a
    /// completed session and change nothing.
    pub fn tick(&self, now: DateTime<Utc>) -> Transition {
        let mut next = self.clone();
        if self.phase != SessionPhase::InProgress {
            return Transition::new(next);
        }

        if next.remaining_seconds <= 1 {
            next.remaining_seconds = 0;
            next.selected_answer = None;
            next.complete(CompletionReason::TimeExpired, now);
            return Transition::new(next)
                .with(SessionEffect::ReleaseCamera)
                .with(SessionEffect::TimeExpired);
        }

        next.remaining_seconds -= 1;
        Transition::new(next)
    }

    /// Leave the instructions or a running test and go back to subjects.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside instructions or a running test.
    pub fn abandon(&self) -> Result<Transition, SessionError> {
        self.require_any(
            "abandon the test",
            &[SessionPhase::InstructionsShown, SessionPhase::InProgress],
        )?;
        let transition = Transition::new(self.back_to_subjects());
        if self.phase == SessionPhase::InProgress {
            Ok(transition.with(SessionEffect::ReleaseCamera))
        } else {
            Ok(transition)
        }
    }

    /// Return to subject selection after a finished run.
    ///
    /// Already choosing a subject is accepted and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` from any other phase.
    pub fn retake(&self) -> Result<Transition, SessionError> {
        match self.phase {
            SessionPhase::SubjectPending => Ok(Transition::new(self.clone())),
            SessionPhase::Completed => Ok(Transition::new(self.back_to_subjects())),
            phase => Err(SessionError::InvalidPhase {
                action: "take another quiz",
                phase,
            }),
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` before the run is completed.
    pub fn toggle_correct_answers(&self) -> Result<Transition, SessionError> {
        self.require("show correct answers", SessionPhase::Completed)?;
        let mut next = self.clone();
        next.show_correct_answers = !next.show_correct_answers;
        Ok(Transition::new(next))
    }

    pub fn end_celebration(&self) -> Transition {
        let mut next = self.clone();
        next.celebrating = false;
        Transition::new(next)
    }

    //
    // ─── HELPERS ───────────────────────────────────────────────────────────────
    //

    fn require(&self, action: &'static str, phase: SessionPhase) -> Result<(), SessionError> {
        self.require_any(action, &[phase])
    }

    fn require_any(
        &self,
        action: &'static str,
        phases: &[SessionPhase],
    ) -> Result<(), SessionError> {
        if phases.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn require_question<'a>(
        &self,
        catalog: &'a SubjectCatalog,
    ) -> Result<&'a Question, SessionError> {
        self.current_question(catalog)
            .ok_or(SessionError::NoQuestion {
                index: self.current_index,
            })
    }

    fn complete(&mut self, reason: CompletionReason, now: DateTime<Utc>) {
        self.phase = SessionPhase::Completed;
        self.completion = Some(reason);
        self.completed_at = Some(now);
    }

    fn back_to_subjects(&self) -> Self {
        let mut next = Self::new();
        next.phase = SessionPhase::SubjectPending;
        next.identity = self.identity.clone();
        next
    }
}
