use quiz_core::model::SubjectId;
use quiz_core::{SessionAction, SessionPhase, TIME_LIMIT_SECS};

use super::results::export_certificate;
use super::state::ViewError;
use super::test_harness::setup_view_harness;

fn web() -> SubjectId {
    SubjectId::new("web-development").unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let harness = setup_view_harness();
    let html = harness.render();
    assert!(html.contains("Student Login"), "missing heading in {html}");
    assert!(html.contains("Authentication ID"), "missing field in {html}");
    assert!(!html.contains("Log out"));
}

#[tokio::test(flavor = "current_thread")]
async fn wrong_passphrase_shows_hint() {
    let mut harness = setup_view_harness();
    harness.dispatch(SessionAction::Login {
        full_name: "Alice".into(),
        credential: "letmein".into(),
    });

    assert_eq!(harness.session().phase(), SessionPhase::LoggedOut);
    let html = harness.render();
    assert!(
        html.contains("the correct Authentication ID (INFO.TEST)"),
        "missing credential hint in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn login_greets_then_lists_subjects() {
    let mut harness = setup_view_harness();
    harness.dispatch(SessionAction::Login {
        full_name: "Alice".into(),
        credential: "info.test".into(),
    });

    let html = harness.render();
    assert!(html.contains("Welcome to CyberWave Assessment Portal"), "{html}");
    assert!(html.contains("Signed in as Alice"), "{html}");

    harness.dispatch(SessionAction::DismissWelcome);
    let html = harness.render();
    assert!(!html.contains("Welcome to CyberWave"), "{html}");
    assert!(html.contains("Web Development"), "{html}");
    assert!(html.contains("5 questions"), "{html}");
    assert!(html.contains("Cloud Computing"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn instructions_show_question_count() {
    let mut harness = setup_view_harness();
    harness.login("Alice");
    harness.dispatch(SessionAction::SelectSubject(web()));

    let html = harness.render();
    assert!(html.contains("There are 5 multiple-choice questions."), "{html}");
    assert!(html.contains("30 minutes"), "{html}");
    assert!(html.contains("Start Test"), "{html}");

    harness.dispatch(SessionAction::DismissInstructions);
    assert!(!harness.render().contains("Test Instructions"));
    assert!(harness.session().selected_subject().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness();
    harness.login("Alice");
    harness.dispatch(SessionAction::SelectSubject(web()));
    harness.dispatch(SessionAction::StartTest);

    let html = harness.render();
    assert!(html.contains("Web Development Quiz"), "{html}");
    assert!(html.contains("Time Left: 30:00"), "{html}");
    assert!(html.contains("Question 1 of 5"), "{html}");
    assert!(html.contains("What does HTML stand for?"), "{html}");
    assert!(html.contains("proctor-video"), "{html}");
    assert!(html.contains("Next Question"), "{html}");

    harness.dispatch(SessionAction::Tick);
    assert!(harness.render().contains("Time Left: 29:59"));
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_score_and_answers() {
    let mut harness = setup_view_harness();
    harness.login("Alice");
    harness.dispatch(SessionAction::SelectSubject(web()));
    harness.dispatch(SessionAction::StartTest);
    harness.answer_all();

    let html = harness.render();
    assert!(html.contains("You scored 5 out of 5 (100.00%)"), "{html}");
    assert!(html.contains("Congratulations!"), "{html}");
    assert!(html.contains("Download Certificate"), "{html}");
    assert!(!html.contains("Q1: Hyper Text Markup Language"), "{html}");

    harness.dispatch(SessionAction::ToggleCorrectAnswers);
    let html = harness.render();
    assert!(html.contains("Q1: Hyper Text Markup Language"), "{html}");
    assert!(html.contains("Hide Correct Answers"), "{html}");

    harness.dispatch(SessionAction::EndCelebration);
    assert!(!harness.render().contains("Congratulations!"));

    harness.dispatch(SessionAction::Retake);
    let html = harness.render();
    assert!(html.contains("Select a Subject"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn expired_timer_shows_results_note() {
    let mut harness = setup_view_harness();
    harness.login("Alice");
    harness.dispatch(SessionAction::SelectSubject(web()));
    harness.dispatch(SessionAction::StartTest);
    for _ in 0..TIME_LIMIT_SECS {
        harness.dispatch(SessionAction::Tick);
    }

    assert!(harness.session().is_completed());
    let html = harness.render();
    assert!(html.contains("Time is up."), "{html}");
    assert!(html.contains("You scored 0 out of 5 (0.00%)"), "{html}");
    assert!(!html.contains("Congratulations!"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn logout_returns_to_login() {
    let mut harness = setup_view_harness();
    harness.login("Alice");
    harness.dispatch(SessionAction::Logout);

    assert_eq!(harness.session().phase(), SessionPhase::LoggedOut);
    let html = harness.render();
    assert!(html.contains("Student Login"), "{html}");
    assert!(!html.contains("Signed in as"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn certificate_export_writes_into_export_dir() {
    let mut harness = setup_view_harness();
    harness.login("Alice");
    harness.dispatch(SessionAction::SelectSubject(web()));
    harness.dispatch(SessionAction::StartTest);

    let certificates = harness.services.certificates();
    let early = export_certificate(&certificates, &harness.session());
    assert_eq!(early, Err(ViewError::ExportFailed));

    harness.answer_all();
    let path = export_certificate(&certificates, &harness.session()).unwrap();
    assert_eq!(path, harness.export_dir.path().join("TechTest_Certificate.svg"));
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains(">Alice</text>"), "{svg}");
    assert!(svg.contains(">100.00%</text>"), "{svg}");
}

#[tokio::test(flavor = "current_thread")]
async fn disabled_camera_is_not_reported_as_active() {
    let mut harness = setup_view_harness();
    harness.login("Alice");
    harness.dispatch(SessionAction::SelectSubject(web()));
    harness.dispatch(SessionAction::StartTest);

    let html = harness.render();
    assert!(html.contains("Camera preview unavailable"), "{html}");
    assert!(!html.contains("Camera proctoring active"), "{html}");
}
