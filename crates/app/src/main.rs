use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, CameraDevice, CertificateService, Clock, DisabledCamera, QuizLoopService,
    ServicesConfig,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};
use ui::{App, DesktopFileOpener, FileOpenerRef, UiApp, WebviewCamera, build_app_context};

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidExportDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidExportDir { raw } => write!(f, "invalid --export-dir value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    file_opener: FileOpenerRef,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn certificates(&self) -> Arc<CertificateService> {
        self.services.certificates()
    }

    fn file_opener(&self) -> FileOpenerRef {
        Arc::clone(&self.file_opener)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    export_dir: PathBuf,
    camera_enabled: bool,
    log_level: String,
    show_help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--export-dir <path>] [--no-camera] [--log-level <filter>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --export-dir .");
    eprintln!("  --log-level {DEFAULT_LOG_LEVEL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_EXPORT_DIR, QUIZ_DISABLE_CAMERA=1, QUIZ_LOG, RUST_LOG");
}

impl Args {
    /// Flags win over environment values, which win over defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut export_dir = env("QUIZ_EXPORT_DIR")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        let mut camera_enabled = env("QUIZ_DISABLE_CAMERA").as_deref() != Some("1");
        let mut log_level = env("QUIZ_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned());
        let mut show_help = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--export-dir" => {
                    let value = require_value(args, "--export-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidExportDir { raw: value });
                    }
                    export_dir = PathBuf::from(value);
                }
                "--no-camera" => camera_enabled = false,
                "--log-level" => log_level = require_value(args, "--log-level")?,
                "--help" | "-h" => show_help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            export_dir,
            camera_enabled,
            log_level,
            show_help,
        })
    }
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };
    log_fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| err.to_string())?;
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if parsed.show_help {
        print_usage();
        return Ok(());
    }

    init_tracing(&parsed.log_level)?;

    let camera: Arc<dyn CameraDevice> = if parsed.camera_enabled {
        Arc::new(WebviewCamera)
    } else {
        Arc::new(DisabledCamera)
    };
    let services = AppServices::new(ServicesConfig {
        clock: Clock::default_clock(),
        export_dir: parsed.export_dir.clone(),
        camera,
    })?;
    info!(
        export_dir = %parsed.export_dir.display(),
        camera = parsed.camera_enabled,
        subjects = services.catalog().len(),
        "starting assessment portal"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        file_opener: Arc::new(DesktopFileOpener),
    });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("CyberWave Assessment Portal")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|arg| (*arg).to_owned());
        Args::parse(&mut iter, |key| {
            env.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned())
        })
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let args = parse(&[], &[]).unwrap();
        assert_eq!(args.export_dir, PathBuf::from("."));
        assert!(args.camera_enabled);
        assert_eq!(args.log_level, "info");
        assert!(!args.show_help);
    }

    #[test]
    fn flags_override_environment() {
        let args = parse(
            &["--export-dir", "/tmp/certs", "--log-level", "debug"],
            &[("QUIZ_EXPORT_DIR", "/srv/out"), ("QUIZ_LOG", "warn")],
        )
        .unwrap();
        assert_eq!(args.export_dir, PathBuf::from("/tmp/certs"));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn camera_can_be_disabled_either_way() {
        assert!(!parse(&["--no-camera"], &[]).unwrap().camera_enabled);
        assert!(!parse(&[], &[("QUIZ_DISABLE_CAMERA", "1")]).unwrap().camera_enabled);
        assert!(parse(&[], &[("QUIZ_DISABLE_CAMERA", "0")]).unwrap().camera_enabled);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(
            parse(&["--export-dir"], &[]),
            Err(ArgsError::MissingValue { flag: "--export-dir" })
        ));
        assert!(matches!(
            parse(&["--export-dir", " "], &[]),
            Err(ArgsError::InvalidExportDir { .. })
        ));
        assert!(matches!(
            parse(&["--db"], &[]),
            Err(ArgsError::UnknownArg(arg)) if arg == "--db"
        ));
    }
}
