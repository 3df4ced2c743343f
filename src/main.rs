//! Lucky Draw - pick a winner from a list with a countdown, beeps and confetti
//!
//! Space, Enter or a left click starts a draw; Escape quits.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use luckydraw::audio::{export_tones, SoundManager};
use luckydraw::cli::Args;
use luckydraw::confetti::{ConfettiAnimation, Surface};
use luckydraw::draw::{DrawEvent, DrawOrchestrator, DrawView, RandomPicker};
use luckydraw::params::{audio_constants::EXPORT_SAMPLE_RATE, ConfettiParams, RenderConfig};
use luckydraw::participants::ParticipantList;
use luckydraw::rendering::{LineBatch, RenderSystem};

type Orchestrator = DrawOrchestrator<SoundManager, RandomPicker<StdRng>>;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    batch: LineBatch,

    // Draw state and the overlay mounted while a winner is shown
    draw: Orchestrator,
    confetti: Option<ConfettiAnimation>,
    confetti_drained: bool,
    confetti_rng: StdRng,

    // Configuration
    render_config: RenderConfig,
    confetti_params: ConfettiParams,

    // Window or renderer failure that stopped the event loop
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(args: &Args, participants: ParticipantList) -> Self {
        let sounds = if args.mute {
            SoundManager::muted(args.tone_params())
        } else {
            SoundManager::new(args.tone_params())
        };
        sounds.prepare();

        let (picker, confetti_rng) = match args.seed {
            Some(seed) => (
                RandomPicker::seeded(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (RandomPicker::from_entropy(), StdRng::from_os_rng()),
        };

        let render_config = args.render_config();

        Self {
            window: None,
            render_system: None,
            batch: LineBatch::new(render_config.window_width, render_config.window_height),
            draw: DrawOrchestrator::new(participants, args.draw_timing(), sounds, picker),
            confetti: None,
            confetti_drained: false,
            confetti_rng,
            render_config,
            confetti_params: args.confetti_params(),
            init_error: None,
        }
    }

    /// Record a fatal startup failure and stop the event loop
    fn fail_init(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("Startup failed: {:#}", err);
        self.init_error = Some(err);
        event_loop.exit();
    }

    /// Outcome of the run once the event loop has returned
    fn take_init_error(&mut self) -> anyhow::Result<()> {
        match self.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The start trigger; ignored while a countdown is running
    fn trigger_draw(&mut self) {
        if !self.draw.start_draw(Instant::now()) {
            debug!("Draw trigger disabled during countdown");
            return;
        }

        // Status left Winner, so the overlay goes away
        if let Some(mut confetti) = self.confetti.take() {
            confetti.unmount();
        }
        self.batch.clear();

        if let DrawView::Countdown(n) = self.draw.view() {
            println!("\nDrawing... {}", n);
        }
        self.refresh_view();
    }

    fn handle_draw_event(&mut self, event: DrawEvent) {
        match event {
            DrawEvent::Tick(n) => println!("Drawing... {}", n),
            DrawEvent::WinnerSelected { name, .. } => {
                println!("\nThe winner is: {}", name);
                println!("Congratulations!\n");
                self.confetti = Some(ConfettiAnimation::mount(
                    &self.batch,
                    &self.confetti_params,
                    &mut self.confetti_rng,
                ));
                self.confetti_drained = false;
            }
        }
        self.refresh_view();
    }

    /// Push the current draw status to the window title and schedule a repaint
    fn refresh_view(&self) {
        let Some(window) = &self.window else {
            return;
        };
        window.set_title(&status_title(
            &self.render_config.title,
            self.draw.view(),
            self.draw.participants().len(),
        ));
        window.request_redraw();
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        if let Some(confetti) = self.confetti.as_mut() {
            confetti.render_frame(&mut self.batch);
            if confetti.on_screen_count() == 0 && !self.confetti_drained {
                self.confetti_drained = true;
                debug!(frames = confetti.frames_drawn(), "All confetti has fallen");
            }
        }

        match render_system.render(&self.batch) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    render_system.resize(size.width, size.height);
                }
            }
            Err(e) => warn!(error = ?e, "Render error"),
        }
    }

    fn shutdown(&mut self) {
        self.draw.teardown();
        if let Some(mut confetti) = self.confetti.take() {
            confetti.unmount();
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(event) = self.draw.poll(Instant::now()) {
            self.handle_draw_event(event);
        }

        if let (Some(window), Some(confetti)) = (&self.window, &self.confetti) {
            if confetti.wants_frame() {
                window.request_redraw();
            }
        }

        match self.draw.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                let err = anyhow::Error::new(e).context("Failed to create window");
                self.fail_init(event_loop, err);
                return;
            }
        };

        // Initialize rendering system
        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.render_config.background,
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                let err = anyhow::Error::new(e).context("Failed to initialize renderer");
                self.fail_init(event_loop, err);
                return;
            }
        };

        let size = window.inner_size();
        self.batch.resize(size.width, size.height);

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.refresh_view();

        println!("Press Space to draw, ESC to quit\n");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Space | KeyCode::Enter | KeyCode::NumpadEnter => self.trigger_draw(),
                _ => {}
            },
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.trigger_draw(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
                self.batch.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
        info!("Shutting down");
    }
}

fn status_title(title: &str, view: DrawView<'_>, participants: usize) -> String {
    match view {
        DrawView::Idle => format!(
            "{} - {} participants - press Space to draw",
            title, participants
        ),
        DrawView::Countdown(n) => format!("{} - {}", title, n),
        DrawView::Winner(name) => format!("{} - Winner: {} - press Space to draw again", title, name),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    if let Some(dir) = &args.export_tones {
        let paths = export_tones(dir, &args.tone_params(), EXPORT_SAMPLE_RATE)
            .with_context(|| format!("Failed to export tones to {}", dir.display()))?;
        for path in paths {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let participants = args
        .participants()
        .context("Invalid participant list")?;

    println!("{}", args.title);
    println!("Participants:");
    for name in participants.iter() {
        println!("  {}", name);
    }
    println!();

    let mut app = App::new(&args, participants);
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated with an error")?;
    app.take_init_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use luckydraw::error::RenderError;

    fn quiet_app() -> App {
        let args = Args::try_parse_from(["luckydraw", "--mute", "--seed", "7"]).unwrap();
        App::new(&args, ParticipantList::default())
    }

    #[test]
    fn test_clean_run_exits_ok() {
        let mut app = quiet_app();
        assert!(app.take_init_error().is_ok());
    }

    #[test]
    fn test_renderer_failure_is_returned() {
        let mut app = quiet_app();
        app.init_error =
            Some(anyhow::Error::new(RenderError::NoAdapter).context("Failed to initialize renderer"));

        let err = app.take_init_error().unwrap_err();
        assert_eq!(err.to_string(), "Failed to initialize renderer");
        assert!(err.downcast_ref::<RenderError>().is_some());
        assert!(app.take_init_error().is_ok());
    }

    #[test]
    fn test_status_title_tracks_view() {
        assert_eq!(status_title("Lucky Draw", DrawView::Countdown(2), 8), "Lucky Draw - 2");
        assert_eq!(
            status_title("Lucky Draw", DrawView::Winner("Ada"), 8),
            "Lucky Draw - Winner: Ada - press Space to draw again"
        );
    }
}
