use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::{SubjectCatalog, SubjectId};
use quiz_core::time::fixed_now;
use quiz_core::{SessionAction, SessionPhase, SessionState, TIME_LIMIT_SECS};
use services::{
    AppServices, CameraDevice, CameraError, CertificateError, Clock, Countdown, QuizLoopService,
    QuizProgress, ServicesConfig, StreamHandle,
};
use tokio::sync::Notify;

#[derive(Default)]
struct FakeCamera {
    fail: bool,
    next: AtomicU64,
    acquired: Mutex<Vec<StreamHandle>>,
    released: Mutex<Vec<StreamHandle>>,
}

impl FakeCamera {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait(?Send)]
impl CameraDevice for FakeCamera {
    async fn acquire(&self) -> Result<StreamHandle, CameraError> {
        if self.fail {
            return Err(CameraError::PermissionDenied);
        }
        let handle = StreamHandle::new(self.next.fetch_add(1, Ordering::SeqCst) + 1);
        self.acquired.lock().unwrap().push(handle);
        Ok(handle)
    }

    async fn release(&self, handle: StreamHandle) {
        self.released.lock().unwrap().push(handle);
    }
}

/// Camera whose permission prompt stays open until the test opens the gate.
#[derive(Default)]
struct GatedCamera {
    gate: Notify,
    released: Mutex<Vec<StreamHandle>>,
}

#[async_trait(?Send)]
impl CameraDevice for GatedCamera {
    async fn acquire(&self) -> Result<StreamHandle, CameraError> {
        self.gate.notified().await;
        Ok(StreamHandle::new(7))
    }

    async fn release(&self, handle: StreamHandle) {
        self.released.lock().unwrap().push(handle);
    }
}

fn services_with(camera: Arc<dyn CameraDevice>, export_dir: &std::path::Path) -> AppServices {
    AppServices::new(ServicesConfig {
        clock: Clock::fixed(fixed_now()),
        export_dir: export_dir.to_path_buf(),
        camera,
    })
    .unwrap()
}

fn web() -> SubjectId {
    SubjectId::new("web-development").unwrap()
}

async fn instructions_shown(quiz: &QuizLoopService) -> SessionState {
    let state = quiz
        .dispatch(
            &SessionState::new(),
            SessionAction::Login {
                full_name: "Alice".into(),
                credential: "info.test".into(),
            },
        )
        .await
        .unwrap();
    quiz.dispatch(&state, SessionAction::SelectSubject(web()))
        .await
        .unwrap()
}

async fn answer_all_correctly(quiz: &QuizLoopService, mut state: SessionState) -> SessionState {
    let catalog = quiz.catalog();
    while state.phase() == SessionPhase::InProgress {
        let answer = state
            .current_question(&catalog)
            .unwrap()
            .correct_answer()
            .to_owned();
        state = quiz
            .dispatch(&state, SessionAction::SubmitAnswer(answer))
            .await
            .unwrap();
    }
    state
}

#[tokio::test]
async fn full_run_holds_camera_only_while_in_progress() {
    let dir = tempfile::tempdir().unwrap();
    let camera = Arc::new(FakeCamera::default());
    let services = services_with(camera.clone(), dir.path());
    let quiz = services.quiz_loop();

    let state = instructions_shown(&quiz).await;
    let state = quiz.dispatch(&state, SessionAction::StartTest).await.unwrap();
    assert_eq!(state.phase(), SessionPhase::InProgress);
    assert!(quiz.camera().active().is_some());

    let progress = QuizProgress::of(&state).unwrap();
    assert_eq!(progress.position, 1);
    assert_eq!(progress.total, 5);
    assert_eq!(progress.remaining_seconds, TIME_LIMIT_SECS);

    let state = answer_all_correctly(&quiz, state).await;
    assert!(state.is_completed());
    assert!(state.celebrating());
    assert_eq!(state.score(), 5);
    assert!(quiz.camera().active().is_none());
    assert_eq!(
        *camera.acquired.lock().unwrap(),
        *camera.released.lock().unwrap()
    );

    let path = services.certificates().export(&state).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(path.ends_with("TechTest_Certificate.svg"));
    assert!(svg.contains("Alice"));
    assert!(svg.contains("Web Development"));
    assert!(svg.contains("100.00%"));

    let state = quiz.dispatch(&state, SessionAction::Retake).await.unwrap();
    assert_eq!(state.phase(), SessionPhase::SubjectPending);
    assert!(state.selected_subject().is_none());
}

#[tokio::test]
async fn camera_failure_does_not_block_the_quiz() {
    let dir = tempfile::tempdir().unwrap();
    let services = services_with(Arc::new(FakeCamera::failing()), dir.path());
    let quiz = services.quiz_loop();

    let state = instructions_shown(&quiz).await;
    let state = quiz.dispatch(&state, SessionAction::StartTest).await.unwrap();
    assert_eq!(state.phase(), SessionPhase::InProgress);
    assert!(quiz.camera().active().is_none());

    let state = quiz
        .dispatch(
            &state,
            SessionAction::SubmitAnswer("Hyper Text Markup Language".into()),
        )
        .await
        .unwrap();
    assert_eq!(state.score(), 1);
    assert_eq!(state.current_index(), 1);
}

#[tokio::test]
async fn late_stream_is_closed_when_test_already_ended() {
    let dir = tempfile::tempdir().unwrap();
    let camera = Arc::new(GatedCamera::default());
    let services = services_with(camera.clone(), dir.path());
    let quiz = services.quiz_loop();

    let state = instructions_shown(&quiz).await;
    let started = quiz.apply(&state, SessionAction::StartTest).unwrap();

    let acquire = quiz.run_effects(&started.effects);
    let abandon = async {
        tokio::task::yield_now().await;
        let left = quiz.apply(&started.state, SessionAction::Abandon).unwrap();
        quiz.run_effects(&left.effects).await;
        camera.gate.notify_one();
        left.state
    };
    let ((), left) = tokio::join!(acquire, abandon);

    assert_eq!(left.phase(), SessionPhase::SubjectPending);
    assert_eq!(*camera.released.lock().unwrap(), vec![StreamHandle::new(7)]);
    assert!(quiz.camera().active().is_none());
}

#[tokio::test(start_paused = true)]
async fn countdown_expires_after_time_limit() {
    let dir = tempfile::tempdir().unwrap();
    let camera = Arc::new(FakeCamera::default());
    let services = services_with(camera.clone(), dir.path());
    let quiz = services.quiz_loop();

    let state = instructions_shown(&quiz).await;
    let mut state = quiz.dispatch(&state, SessionAction::StartTest).await.unwrap();

    let started = tokio::time::Instant::now();
    let mut countdown = Countdown::new();
    while state.timer_active() {
        countdown.tick().await;
        state = quiz.dispatch(&state, SessionAction::Tick).await.unwrap();
    }

    assert_eq!(started.elapsed().as_secs(), u64::from(TIME_LIMIT_SECS));
    assert!(state.is_completed());
    assert_eq!(state.remaining_seconds(), 0);
    assert_eq!(state.score(), 0);
    assert!(!state.celebrating());
    assert_eq!(camera.released.lock().unwrap().len(), 1);

    let frozen = quiz.dispatch(&state, SessionAction::Tick).await.unwrap();
    assert_eq!(frozen, state);
}

#[tokio::test]
async fn export_before_completion_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let services = services_with(Arc::new(FakeCamera::default()), dir.path());
    let state = instructions_shown(&services.quiz_loop()).await;

    let err = services.certificates().export(&state).unwrap_err();
    assert!(matches!(err, CertificateError::NotCompleted));
    assert!(!dir.path().join("TechTest_Certificate.svg").exists());
}

#[tokio::test]
async fn empty_subject_completes_without_camera() {
    let dir = tempfile::tempdir().unwrap();
    let camera = Arc::new(FakeCamera::default());
    let empty = SubjectId::new("empty").unwrap();
    let catalog = SubjectCatalog::new()
        .with_subject(empty.clone(), Vec::new())
        .unwrap();
    let services = AppServices::with_catalog(
        ServicesConfig {
            clock: Clock::fixed(fixed_now()),
            export_dir: dir.path().to_path_buf(),
            camera: camera.clone(),
        },
        catalog,
    );
    let quiz = services.quiz_loop();

    let state = quiz
        .dispatch(
            &SessionState::new(),
            SessionAction::Login {
                full_name: "Bo".into(),
                credential: "INFO.TEST".into(),
            },
        )
        .await
        .unwrap();
    let state = quiz
        .dispatch(&state, SessionAction::SelectSubject(empty))
        .await
        .unwrap();
    let state = quiz.dispatch(&state, SessionAction::StartTest).await.unwrap();

    assert!(state.is_completed());
    assert_eq!(state.score_report().percentage_label(), "0.00%");
    assert!(camera.acquired.lock().unwrap().is_empty());
}
