//! Mount/unmount lifecycle and the per-frame tick.

use log::{info, warn};

use crate::{
    clock::{Clock, Tick},
    error::SceneError,
    scene::{Scene, SceneAssembler},
    skins::{SkinConfig, SkinId},
    theme::ThemeSubscription,
    window::Viewport,
};

/// Receives the scene once per tick. The renderer is one implementation;
/// tests use recording sinks.
pub trait DisplaySink {
    fn present(&mut self, frame: &Frame<'_>);

    /// Called on unmount. Per-scene resources must be dropped here.
    fn release(&mut self) {}
}

/// Identifies one mount. Tokens from earlier mounts never become live again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MountToken(u64);

impl MountToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// What a sink gets to draw for one tick.
#[derive(Debug)]
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub tick: Tick,
    pub token: MountToken,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Stats {
    pub frames: u64,
    pub elapsed: f32,
    /// Ticks whose delta was NaN, infinite or negative.
    pub glitches: u64,
}

#[derive(Debug)]
enum State {
    Unmounted,
    Mounted {
        token: MountToken,
        scene: Scene,
        clock: Clock,
    },
}

/// `Unmounted -> Mounted -> Unmounted`. Owns the live scene and its clock;
/// once [`FrameScheduler::unmount`] returns, no tick can reach either.
pub struct FrameScheduler<S> {
    assembler: SceneAssembler,
    theme: ThemeSubscription,
    sink: S,
    next_generation: u64,
    state: State,
}

impl<S: DisplaySink> FrameScheduler<S> {
    pub fn new(assembler: SceneAssembler, theme: ThemeSubscription, sink: S) -> Self {
        Self {
            assembler,
            theme,
            sink,
            next_generation: 1,
            state: State::Unmounted,
        }
    }

    pub fn mount(&mut self, skin: SkinId) -> Result<MountToken, SceneError> {
        self.mount_config(skin.config())
    }

    /// Assembles `config` and starts ticking it. A scene that is already
    /// mounted is unmounted first; if assembly fails nothing is mounted.
    pub fn mount_config(&mut self, config: &SkinConfig) -> Result<MountToken, SceneError> {
        self.unmount();

        self.theme.poll();
        let scene = self.assembler.assemble(config, self.theme.mode())?;

        let token = MountToken(self.next_generation);
        self.next_generation += 1;
        info!(
            "Mounted {} (generation {})",
            scene.skin(),
            token.generation()
        );

        self.state = State::Mounted {
            token,
            scene,
            clock: Clock::new(),
        };
        Ok(token)
    }

    /// Stops ticking and drops the scene. Returns whether anything was
    /// mounted; calling it again is a no-op.
    pub fn unmount(&mut self) -> bool {
        match std::mem::replace(&mut self.state, State::Unmounted) {
            State::Unmounted => false,
            State::Mounted {
                token,
                scene,
                clock,
            } => {
                self.sink.release();
                info!(
                    "Unmounted {} (generation {}) after {} frames, {:.2}s",
                    scene.skin(),
                    token.generation(),
                    clock.frames(),
                    clock.elapsed()
                );
                true
            }
        }
    }

    /// Advances the mounted scene by `delta` seconds and presents it.
    ///
    /// `token` must be the one returned by the current mount. Anything else
    /// is a lifecycle bug: it panics in debug builds and is dropped in
    /// release builds. Returns whether a frame was presented.
    pub fn tick(&mut self, token: MountToken, delta: f32) -> bool {
        let (scene, clock) = match &mut self.state {
            State::Mounted {
                token: live,
                scene,
                clock,
            } if *live == token => (scene, clock),
            _ => {
                debug_assert!(
                    false,
                    "tick for generation {} delivered to an unmounted scene",
                    token.generation()
                );
                warn!(
                    "Dropping stray tick for generation {}",
                    token.generation()
                );
                return false;
            }
        };

        if let Some(mode) = self.theme.poll() {
            scene.apply_theme(mode);
        }

        let tick = clock.advance(delta);
        scene.advance(tick);
        self.sink.present(&Frame {
            scene: &*scene,
            tick,
            token,
        });
        true
    }

    /// Token of the live mount, if any.
    pub fn active(&self) -> Option<MountToken> {
        match &self.state {
            State::Unmounted => None,
            State::Mounted { token, .. } => Some(*token),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.active().is_some()
    }

    pub fn scene(&self) -> Option<&Scene> {
        match &self.state {
            State::Unmounted => None,
            State::Mounted { scene, .. } => Some(scene),
        }
    }

    pub fn stats(&self) -> Option<Stats> {
        match &self.state {
            State::Unmounted => None,
            State::Mounted { clock, .. } => Some(Stats {
                frames: clock.frames(),
                elapsed: clock.elapsed(),
                glitches: clock.glitches(),
            }),
        }
    }

    /// Applies to the live scene and to every later mount.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.assembler.set_viewport(viewport);
        if let State::Mounted { scene, .. } = &mut self.state {
            scene.set_viewport(viewport);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
