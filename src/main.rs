mod compositor;
mod display;
mod math3d;
mod torus;
mod util;

use compositor::Compositor;
use display::{
    Display, InputEvent, PixelBuffer, RenderTarget, CELL_HEIGHT, CELL_WIDTH, WINDOW_HEIGHT,
    WINDOW_WIDTH,
};
use log::{debug, info, trace};
use sdl2::keyboard::Keycode;
use torus::{FrameBuffers, Palette, RenderState, Sampler, TorusGeometry};
use util::{FpsCounter, FrameLimiter};

const TARGET_FPS: u32 = 60;

/// Host loop state. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    /// Keeps sampling and advancing, skips presentation
    Paused,
    Stopped,
}

impl AppState {
    fn on_event(self, event: &InputEvent) -> Self {
        match (self, event) {
            (Self::Stopped, _) => Self::Stopped,
            (_, InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape)) => Self::Stopped,
            (Self::Running, InputEvent::KeyDown(Keycode::Space)) => Self::Paused,
            (Self::Paused, InputEvent::KeyDown(Keycode::Space)) => Self::Running,
            (state, _) => state,
        }
    }

    fn presents(self) -> bool {
        self == Self::Running
    }
}

/// Sample, composite and advance one frame. Returns whether the frame
/// should be presented; the state advances either way.
fn step(
    sampler: &Sampler,
    compositor: &Compositor,
    frame: &mut FrameBuffers,
    state: &mut RenderState,
    buffer: &mut PixelBuffer,
    app: AppState,
) -> bool {
    let stats = sampler.render(state, frame);
    trace!(
        "frame {}: {} drawn, {} occluded, {} clipped, {} cells lit",
        state.frame,
        stats.drawn,
        stats.occluded,
        stats.clipped,
        frame.filled()
    );
    compositor.compose(frame, state, buffer);
    app.presents()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (mut display, texture_creator) = Display::new("glyph-torus", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut target = RenderTarget::new(&texture_creator, display.width(), display.height())?;
    let mut buffer = PixelBuffer::with_size(display.width(), display.height());

    let grid_width = (display.width() / CELL_WIDTH) as usize;
    let grid_height = (display.height() / CELL_HEIGHT) as usize;

    let sampler = Sampler::new(
        TorusGeometry::for_grid(grid_width, grid_height),
        Palette::DEFAULT,
    );
    let compositor = Compositor::new(CELL_WIDTH, CELL_HEIGHT);
    let mut frame = FrameBuffers::new(grid_width, grid_height);
    let mut state = RenderState::default();
    let mut app = AppState::Running;

    let mut limiter = FrameLimiter::new(TARGET_FPS);
    let mut fps_counter = FpsCounter::new(TARGET_FPS as usize);

    let shape = sampler.geometry().shape();
    info!("=== glyph-torus ===");
    info!(
        "Grid {}x{} cells of {}x{} px, {} samples/frame, capped at {} FPS",
        grid_width,
        grid_height,
        CELL_WIDTH,
        CELL_HEIGHT,
        sampler.geometry().sample_count(),
        TARGET_FPS
    );
    debug!(
        "Torus R1={} R2={} K2={} K1={} palette={} glyphs",
        shape.tube_radius,
        shape.ring_radius,
        shape.camera_distance,
        sampler.geometry().scale(),
        sampler.palette().len()
    );
    info!("Controls: Space - pause/resume, Escape - quit");

    while app != AppState::Stopped {
        limiter.wait();
        let (_dt, avg_fps) = fps_counter.tick();
        display.set_title(&format!("FPS: {:.2}", avg_fps))?;

        if step(&sampler, &compositor, &mut frame, &mut state, &mut buffer, app) {
            display.present(&mut target, &buffer)?;
        }

        for event in display.poll_events() {
            let next = app.on_event(&event);
            if next != app {
                info!("{:?} -> {:?}", app, next);
            }
            app = next;
        }
    }

    info!("Stopped after {} frames", state.frame);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: Keycode) -> InputEvent {
        InputEvent::KeyDown(k)
    }

    #[test]
    fn test_space_toggles_pause() {
        let paused = AppState::Running.on_event(&key(Keycode::Space));
        assert_eq!(paused, AppState::Paused);
        assert_eq!(paused.on_event(&key(Keycode::Space)), AppState::Running);
    }

    #[test]
    fn test_quit_and_escape_stop() {
        for state in [AppState::Running, AppState::Paused] {
            assert_eq!(state.on_event(&InputEvent::Quit), AppState::Stopped);
            assert_eq!(state.on_event(&key(Keycode::Escape)), AppState::Stopped);
        }
    }

    #[test]
    fn test_stopped_is_terminal() {
        let stopped = AppState::Stopped;
        assert_eq!(stopped.on_event(&key(Keycode::Space)), AppState::Stopped);
        assert_eq!(stopped.on_event(&InputEvent::Quit), AppState::Stopped);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(AppState::Running.on_event(&key(Keycode::A)), AppState::Running);
        assert_eq!(AppState::Paused.on_event(&key(Keycode::Return)), AppState::Paused);
    }

    #[test]
    fn test_only_running_presents() {
        assert!(AppState::Running.presents());
        assert!(!AppState::Paused.presents());
        assert!(!AppState::Stopped.presents());
    }

    struct Pipeline {
        sampler: Sampler,
        compositor: Compositor,
        frame: FrameBuffers,
        buffer: PixelBuffer,
    }

    impl Pipeline {
        fn new() -> Self {
            Self {
                sampler: Sampler::new(TorusGeometry::for_grid(40, 40), Palette::DEFAULT),
                compositor: Compositor::new(CELL_WIDTH, CELL_HEIGHT),
                frame: FrameBuffers::new(40, 40),
                buffer: PixelBuffer::with_size(WINDOW_WIDTH, WINDOW_HEIGHT),
            }
        }

        fn step(&mut self, state: &mut RenderState, app: AppState) -> bool {
            step(
                &self.sampler,
                &self.compositor,
                &mut self.frame,
                state,
                &mut self.buffer,
                app,
            )
        }
    }

    #[test]
    fn test_step_presents_only_when_running() {
        let mut pipeline = Pipeline::new();
        let mut state = RenderState::default();

        assert!(pipeline.step(&mut state, AppState::Running));
        assert!(!pipeline.step(&mut state, AppState::Paused));
        assert_eq!(state.frame, 2);
    }

    #[test]
    fn test_state_advances_while_paused() {
        let mut pipeline = Pipeline::new();
        let mut running = RenderState::default();
        let mut paused = RenderState::default();

        for _ in 0..5 {
            assert!(pipeline.step(&mut running, AppState::Running));
            let before = paused;
            assert!(!pipeline.step(&mut paused, AppState::Paused));
            assert_ne!(paused, before);
        }

        assert_eq!(paused, running);
        assert_eq!(paused.frame, 5);
        assert!(pipeline.frame.filled() > 0);
    }
}
