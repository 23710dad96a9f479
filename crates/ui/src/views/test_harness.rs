use std::path::Path;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::time::fixed_now;
use quiz_core::{SessionAction, SessionPhase, SessionState};
use services::{
    AppServices, CertificateService, Clock, DisabledCamera, QuizLoopService, ServicesConfig,
};
use tempfile::TempDir;

use crate::context::{UiApp, build_app_context};
use crate::platform::{FileOpenerRef, UiFileOpener};
use crate::views::AssessmentView;
use crate::views::assessment::AssessmentTestHandles;

/// Tests never launch an external viewer.
struct NoopOpener;

impl UiFileOpener for NoopOpener {
    fn open_path(&self, _path: &Path) {}
}

struct TestApp {
    services: AppServices,
    opener: Arc<NoopOpener>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn certificates(&self) -> Arc<CertificateService> {
        self.services.certificates()
    }

    fn file_opener(&self) -> FileOpenerRef {
        self.opener.clone()
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: AssessmentTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn AssessmentHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { AssessmentView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub export_dir: TempDir,
    handles: AssessmentTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn dispatch(&mut self, action: SessionAction) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(action));
        drive_dom(&mut self.dom);
    }

    pub fn session(&self) -> SessionState {
        let session = self.handles.session();
        self.dom.in_runtime(|| session.peek().clone())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn login(&mut self, name: &str) {
        self.dispatch(SessionAction::Login {
            full_name: name.to_owned(),
            credential: "INFO.TEST".to_owned(),
        });
        self.dispatch(SessionAction::DismissWelcome);
    }

    /// Answers every remaining question correctly.
    pub fn answer_all(&mut self) {
        let catalog = self.services.catalog();
        while self.session().phase() == SessionPhase::InProgress {
            let answer = self
                .session()
                .current_question(&catalog)
                .expect("current question")
                .correct_answer()
                .to_owned();
            self.dispatch(SessionAction::SelectAnswer(answer.clone()));
            self.dispatch(SessionAction::SubmitAnswer(answer));
        }
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness() -> ViewHarness {
    let export_dir = tempfile::tempdir().expect("temp dir");
    let services = AppServices::new(ServicesConfig {
        clock: Clock::fixed(fixed_now()),
        export_dir: export_dir.path().to_path_buf(),
        camera: Arc::new(DisabledCamera),
    })
    .expect("builtin catalog");
    let handles = AssessmentTestHandles::default();
    let app = Arc::new(TestApp {
        services: services.clone(),
        opener: Arc::new(NoopOpener),
    });

    let dom = VirtualDom::new_with_props(
        AssessmentHarness,
        HarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    let mut harness = ViewHarness {
        dom,
        services,
        export_dir,
        handles,
    };
    harness.rebuild();
    harness
}
