use dioxus::prelude::*;
use quiz_core::{SessionAction, SessionPhase, SessionState, Transition};

#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

use crate::context::AppContext;
use crate::views::dialogs::{InstructionsDialog, WelcomeDialog};
use crate::views::login::LoginView;
use crate::views::quiz::QuizView;
use crate::views::results::ResultsView;
use crate::views::state::ViewError;
use crate::views::subjects::SubjectsView;

/// Root screen. Owns the session and routes every action through the quiz loop.
#[component]
pub fn AssessmentView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz_loop();
    let catalog = ctx.catalog();
    let mut session = use_signal(SessionState::new);
    let mut error = use_signal(|| None::<ViewError>);

    let dispatch = use_callback(move |action: SessionAction| {
        let current = session.peek().clone();
        match quiz.apply(&current, action) {
            Ok(Transition { state, effects }) => {
                error.set(None);
                session.set(state);
                if !effects.is_empty() {
                    let quiz = quiz.clone();
                    spawn(async move {
                        quiz.run_effects(&effects).await;
                    });
                }
            }
            Err(err) => error.set(Some(ViewError::from(&err))),
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<AssessmentTestHandles>() {
                handles.register(dispatch, session);
            }
        }
    }

    let state = session.read().clone();
    let question_count = state
        .selected_subject()
        .map_or(0, |id| catalog.total_questions(id));
    let view = match state.phase() {
        SessionPhase::LoggedOut => rsx! { LoginView { on_action: dispatch } },
        SessionPhase::SubjectPending | SessionPhase::InstructionsShown => {
            rsx! { SubjectsView { on_action: dispatch } }
        }
        SessionPhase::InProgress => rsx! {
            QuizView { state: state.clone(), on_action: dispatch }
        },
        SessionPhase::Completed => rsx! {
            ResultsView { state: state.clone(), on_action: dispatch }
        },
    };

    rsx! {
        div { class: "page assessment-page",
            if let Some(name) = state.full_name() {
                header { class: "assessment-header",
                    span { class: "assessment-header__name", "Signed in as {name}" }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| dispatch.call(SessionAction::Logout),
                        "Log out"
                    }
                }
            }
            if let Some(err) = error() {
                p { class: "error", role: "alert", "{err.message()}" }
            }
            {view}
            if state.welcome_open() {
                WelcomeDialog {
                    name: state.full_name().unwrap_or_default().to_owned(),
                    on_action: dispatch,
                }
            }
            if state.instructions_open() {
                InstructionsDialog { question_count, on_action: dispatch }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct AssessmentTestHandles {
    dispatch: Rc<RefCell<Option<Callback<SessionAction>>>>,
    session: Rc<RefCell<Option<Signal<SessionState>>>>,
}

#[cfg(test)]
impl AssessmentTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<SessionAction>,
        session: Signal<SessionState>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<SessionAction> {
        (*self.dispatch.borrow()).expect("assessment dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<SessionState> {
        (*self.session.borrow()).expect("assessment session registered")
    }
}
