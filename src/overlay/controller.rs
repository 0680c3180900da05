use std::io::Write;

use tracing::{debug, info};

use super::config::OverlayConfig;
use super::error::OverlayError;
use super::events::{Clock, EventSource, KeyPress, OverlayEvent};
use super::surface::{ExStyle, Scene, TransparencySurface};
use super::waveform::Waveform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Owns the overlay surface and drives its opacity animation.
///
/// Lifecycle: [`initialize`](Self::initialize) marks the surface layered,
/// [`draw_static_scene`](Self::draw_static_scene) paints the holes once, and
/// [`run_loop`](Self::run_loop) animates the alpha until a close or quit key
/// is observed. `Terminated` is final.
pub struct OverlayController<S: TransparencySurface> {
    surface: S,
    config: OverlayConfig,
    waveform: Waveform,
    scene: Scene,
    frame: u64,
    state: LoopState,
}

impl<S: TransparencySurface> OverlayController<S> {
    /// Take ownership of `surface` and OR the layered bit into its extended style.
    pub fn initialize(mut surface: S, config: OverlayConfig) -> Result<Self, OverlayError> {
        let waveform = Waveform::new(config.amplitude)?;

        let current = surface.style()?;
        let style = current | ExStyle::LAYERED;
        surface.set_style(style)?;
        debug!(before = current.0, after = style.0, "extended style applied");

        let scene = Scene::from_config(&config);
        Ok(Self {
            surface,
            config,
            waveform,
            scene,
            frame: 0,
            state: LoopState::Running,
        })
    }

    pub fn draw_static_scene(&mut self) -> Result<(), OverlayError> {
        self.surface.present(&self.scene)?;
        info!(holes = self.scene.holes.len(), "static scene presented");
        Ok(())
    }

    /// Run one frame: handle `events`, apply the next alpha and report it on `out`.
    ///
    /// A quit observed here still lets the current frame's alpha through.
    pub fn step(
        &mut self,
        events: &[OverlayEvent],
        out: &mut impl Write,
    ) -> Result<u8, OverlayError> {
        for event in events {
            match *event {
                OverlayEvent::CloseRequested => self.terminate("close requested"),
                OverlayEvent::KeyPressed(key) if self.is_quit_key(key) => {
                    self.terminate("quit key pressed")
                }
                OverlayEvent::KeyPressed(_) => {}
                OverlayEvent::RedrawRequested => self.surface.present(&self.scene)?,
            }
        }

        let blend = self.waveform.at(self.frame);
        self.frame += 1;

        self.surface
            .set_color_key_and_alpha(self.scene.key_color, blend)?;

        write!(out, "\rAlpha= {blend}")?;
        out.flush()?;
        Ok(blend)
    }

    /// Step until terminated, sleeping one frame interval after every frame.
    ///
    /// Returns the number of frames shown.
    pub fn run_loop(
        &mut self,
        events: &mut impl EventSource,
        clock: &mut impl Clock,
        out: &mut impl Write,
    ) -> Result<u64, OverlayError> {
        let mut pending = Vec::new();
        while self.state == LoopState::Running {
            pending.clear();
            events.poll(&mut pending);
            self.step(&pending, out)?;
            clock.sleep(self.config.frame_interval);
        }
        info!(frames = self.frame, "overlay loop finished");
        Ok(self.frame)
    }

    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    #[cfg(test)]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[cfg(test)]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn is_quit_key(&self, key: KeyPress) -> bool {
        match key {
            KeyPress::Char(c) => c.eq_ignore_ascii_case(&self.config.quit_key),
            KeyPress::Escape => true,
            KeyPress::Other => false,
        }
    }

    fn terminate(&mut self, reason: &str) {
        if self.state == LoopState::Running {
            debug!(frame = self.frame, reason, "terminating overlay loop");
        }
        self.state = LoopState::Terminated;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::overlay::config::Rgb;
    use crate::overlay::surface::RecordingSurface;

    /// Yields `event` on the `at`-th poll (1-based) and nothing otherwise.
    struct ScriptedEvents {
        polls: usize,
        script: Vec<(usize, OverlayEvent)>,
    }

    impl ScriptedEvents {
        fn new(script: Vec<(usize, OverlayEvent)>) -> Self {
            Self { polls: 0, script }
        }
    }

    impl EventSource for ScriptedEvents {
        fn poll(&mut self, out: &mut Vec<OverlayEvent>) {
            self.polls += 1;
            out.extend(
                self.script
                    .iter()
                    .filter(|(at, _)| *at == self.polls)
                    .map(|&(_, event)| event),
            );
        }
    }

    #[derive(Default)]
    struct RecordingClock {
        sleeps: Vec<Duration>,
    }

    impl Clock for RecordingClock {
        fn sleep(&mut self, interval: Duration) {
            self.sleeps.push(interval);
        }
    }

    const PRIOR_STYLE: ExStyle = ExStyle(0x0000_0108);

    fn controller() -> OverlayController<RecordingSurface> {
        OverlayController::initialize(
            RecordingSurface::with_style(PRIOR_STYLE),
            OverlayConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn initialize_sets_layered_and_keeps_other_bits() {
        let ctl = controller();
        let surface = ctl.surface();
        assert_eq!(surface.style, ExStyle(0x0008_0108));
        assert_eq!(surface.style_writes, 1);
        assert!(surface.presented.is_empty());
        assert_eq!(ctl.state(), LoopState::Running);
        assert_eq!(ctl.frame(), 0);
    }

    #[test]
    fn initialize_on_already_layered_window_is_stable() {
        let style = ExStyle::LAYERED | ExStyle(0x8);
        let surface = RecordingSurface::with_style(style);
        let ctl = OverlayController::initialize(surface, OverlayConfig::default()).unwrap();
        assert_eq!(ctl.surface().style, style);
    }

    #[test]
    fn initialize_fails_when_style_is_rejected() {
        let surface = RecordingSurface {
            reject_style: true,
            ..Default::default()
        };
        let err = OverlayController::initialize(surface, OverlayConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, OverlayError::StyleRejected { .. }));
    }

    #[test]
    fn initialize_rejects_bad_amplitude() {
        let config = OverlayConfig {
            amplitude: 0,
            ..OverlayConfig::default()
        };
        let err = OverlayController::initialize(RecordingSurface::default(), config)
            .err()
            .unwrap();
        assert!(matches!(err, OverlayError::Amplitude(0)));
    }

    #[test]
    fn static_scene_is_presented_once() {
        let mut ctl = controller();
        ctl.draw_static_scene().unwrap();
        let presented = &ctl.surface().presented;
        assert_eq!(presented.len(), 1);
        assert_eq!(presented[0].background, Rgb::new(0, 0, 0));
        assert_eq!(presented[0].holes.len(), 2);
    }

    #[test]
    fn two_hundred_frames_follow_the_waveform() {
        let mut ctl = controller();
        let mut out = Vec::<u8>::new();
        for _ in 0..200 {
            ctl.step(&[], &mut out).unwrap();
        }
        assert_eq!(ctl.frame(), 200);
        assert_eq!(ctl.state(), LoopState::Running);
        assert_eq!(ctl.surface().alphas(), ctl.waveform().values());
        assert!(
            ctl.surface()
                .attributes
                .iter()
                .all(|&(key, _)| key == Rgb::new(255, 0, 128))
        );

        // Wraps around to the start of the period.
        assert_eq!(ctl.step(&[], &mut out).unwrap(), ctl.waveform().at(0));
    }

    #[test]
    fn blend_matches_waveform_at_boundaries() {
        let mut ctl = controller();
        let mut out = Vec::<u8>::new();
        let blends: Vec<u8> = (0..200).map(|_| ctl.step(&[], &mut out).unwrap()).collect();
        assert_eq!(blends[0], ctl.waveform().values()[0]);
        assert_eq!(blends[199], ctl.waveform().values()[199]);
    }

    #[test]
    fn quit_key_on_tenth_poll_stops_after_ten_frames() {
        let mut ctl = controller();
        let mut events = ScriptedEvents::new(vec![(
            10,
            OverlayEvent::KeyPressed(KeyPress::Char('q')),
        )]);
        let mut clock = RecordingClock::default();
        let mut out = Vec::<u8>::new();

        let frames = ctl.run_loop(&mut events, &mut clock, &mut out).unwrap();

        assert_eq!(frames, 10);
        assert_eq!(ctl.frame(), 10);
        assert_eq!(ctl.state(), LoopState::Terminated);
        assert_eq!(events.polls, 10);
        assert_eq!(ctl.surface().alphas(), &ctl.waveform().values()[..10]);
        assert_eq!(clock.sleeps, vec![Duration::from_millis(15); 10]);
    }

    #[test]
    fn close_and_escape_terminate() {
        for event in [
            OverlayEvent::CloseRequested,
            OverlayEvent::KeyPressed(KeyPress::Escape),
            OverlayEvent::KeyPressed(KeyPress::Char('Q')),
        ] {
            let mut ctl = controller();
            let mut events = ScriptedEvents::new(vec![(3, event)]);
            let frames = ctl
                .run_loop(&mut events, &mut RecordingClock::default(), &mut std::io::sink())
                .unwrap();
            assert_eq!(frames, 3, "{event:?}");
        }
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut ctl = controller();
        let mut out = Vec::<u8>::new();
        ctl.step(
            &[
                OverlayEvent::KeyPressed(KeyPress::Char('w')),
                OverlayEvent::KeyPressed(KeyPress::Other),
            ],
            &mut out,
        )
        .unwrap();
        assert_eq!(ctl.state(), LoopState::Running);
    }

    #[test]
    fn redraw_repaints_the_same_scene() {
        let mut ctl = controller();
        ctl.draw_static_scene().unwrap();
        ctl.step(&[OverlayEvent::RedrawRequested], &mut std::io::sink())
            .unwrap();
        let presented = &ctl.surface().presented;
        assert_eq!(presented.len(), 2);
        assert_eq!(presented[0], presented[1]);
    }

    #[test]
    fn progress_line_is_overwritten_in_place() {
        let mut ctl = controller();
        let mut out = Vec::<u8>::new();
        for _ in 0..3 {
            ctl.step(&[], &mut out).unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "\rAlpha= 0\rAlpha= 1\rAlpha= 2");
    }

    #[test]
    fn surface_failure_ends_the_loop_with_an_error() {
        let surface = RecordingSurface {
            fail_attributes_after: Some(4),
            ..Default::default()
        };
        let mut ctl = OverlayController::initialize(surface, OverlayConfig::default()).unwrap();
        let mut events = ScriptedEvents::new(Vec::new());
        let err = ctl
            .run_loop(&mut events, &mut RecordingClock::default(), &mut std::io::sink())
            .unwrap_err();
        assert!(matches!(err, OverlayError::DeviceContext));
        assert_eq!(ctl.surface().attributes.len(), 4);
    }
}
