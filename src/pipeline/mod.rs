//! Preview pipeline: payload and design options in, composite out.
//!
//! Each request takes a generation number before it awaits the codec. A result
//! that arrives after a newer request has started is dropped, so a slow encode
//! can never overwrite a fresher preview. The last rendered input is memoized
//! and compared by value.
//!
//! The generation counter, the current input and the memo live behind one lock,
//! and every state is published while that lock is held. A request that is no
//! longer current can therefore never publish, not even its loading placeholder.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;
use tokio::sync::watch;

use crate::codec::SymbolCodec;
use crate::common::Size;
use crate::compose::{Composite, Compositor};
use crate::config::RenderConfig;
use crate::error::QRError;
use crate::options::DesignOptions;

pub const DEFAULT_PREVIEW_SIZE: u32 = 512;

// Input & state
//------------------------------------------------------------------------------

/// Preview surface in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

impl PreviewSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self { width: side, height: side }
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

impl From<u32> for PreviewSize {
    fn from(side: u32) -> Self {
        Self::square(side)
    }
}

impl From<(u32, u32)> for PreviewSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl Default for PreviewSize {
    fn default() -> Self {
        Self::square(DEFAULT_PREVIEW_SIZE)
    }
}

/// Everything a preview depends on. Two equal inputs always produce equal composites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RenderInput {
    pub payload: String,
    pub options: DesignOptions,
    pub size: PreviewSize,
}

impl RenderInput {
    pub fn new(payload: impl Into<String>, options: DesignOptions, size: PreviewSize) -> Self {
        Self { payload: payload.into(), options, size }
    }

    fn canvas(&self) -> Size {
        self.size.to_size()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    Idle,
    /// Waiting on the codec; the composite shows the loading placeholder.
    Loading(Composite),
    Ready(Composite),
    /// The codec rejected the payload. `fallback` keeps the chosen frame and
    /// container so the preview never goes blank.
    Failed { reason: String, fallback: Composite },
}

impl PreviewState {
    /// Composite to display, if any.
    pub fn composite(&self) -> Option<&Composite> {
        match self {
            Self::Idle => None,
            Self::Loading(c) | Self::Ready(c) => Some(c),
            Self::Failed { fallback, .. } => Some(fallback),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Encoded and published.
    Rendered,
    /// Same input as the last render; the memoized composite was republished.
    Memoized,
    /// An update carried the value already in place; nothing ran.
    Unchanged,
    /// A newer request started while this one was encoding; its result was dropped.
    Stale,
    Failed(QRError),
}

// Pipeline
//------------------------------------------------------------------------------

#[derive(Default)]
struct Slot {
    generation: u64,
    current: RenderInput,
    memo: Option<(RenderInput, Composite)>,
}

pub struct PreviewPipeline<C> {
    codec: C,
    compositor: Compositor,
    slot: Mutex<Slot>,
    state: watch::Sender<PreviewState>,
}

impl<C: SymbolCodec> PreviewPipeline<C> {
    pub fn new(codec: C, config: RenderConfig) -> Self {
        let (state, _) = watch::channel(PreviewState::Idle);
        Self { codec, compositor: Compositor::new(config), slot: Mutex::new(Slot::default()), state }
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> PreviewState {
        self.state.borrow().clone()
    }

    /// Latest requested input, whether or not its render has finished.
    pub fn input(&self) -> RenderInput {
        lock(&self.slot).current.clone()
    }

    pub fn generation(&self) -> u64 {
        lock(&self.slot).generation
    }

    pub async fn render(&self, input: RenderInput) -> RenderOutcome {
        let canvas = input.canvas();
        let placeholder = self.compositor.compose_modules(&input.options, None, canvas);

        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.current = input.clone();

            let memoized = slot.memo.as_ref().filter(|(last, _)| *last == input).map(|(_, c)| c.clone());
            if let Some(composite) = memoized {
                debug!("Preview #{} served from memo", slot.generation);
                self.state.send_replace(PreviewState::Ready(composite));
                return RenderOutcome::Memoized;
            }
            self.state.send_replace(PreviewState::Loading(placeholder.clone()));
            slot.generation
        };

        let ec_level = input.options.resolve().ec_level;
        debug!("Preview #{generation} encoding {} bytes at {ec_level:?}", input.payload.len());
        let encoded = self.codec.encode(&input.payload, ec_level).await;
        let composed = encoded.map(|matrix| self.compositor.compose_modules(&input.options, Some(&matrix), canvas));

        let mut slot = lock(&self.slot);
        if slot.generation != generation {
            debug!("Preview #{generation} superseded by #{}, dropping result", slot.generation);
            return RenderOutcome::Stale;
        }

        match composed {
            Ok(composite) => {
                slot.memo = Some((input, composite.clone()));
                self.state.send_replace(PreviewState::Ready(composite));
                RenderOutcome::Rendered
            }
            Err(err) => {
                debug!("Preview #{generation} failed: {err}");
                let reason = format!("Unable to generate preview: {err}");
                self.state.send_replace(PreviewState::Failed { reason, fallback: placeholder });
                RenderOutcome::Failed(err)
            }
        }
    }

    /// Replaces the whole option set and re-renders if it differs.
    pub async fn update_options(&self, options: DesignOptions) -> RenderOutcome {
        let current = self.input();
        if current.options == options {
            return RenderOutcome::Unchanged;
        }
        self.render(RenderInput { options, ..current }).await
    }

    pub async fn update_payload(&self, payload: impl Into<String>) -> RenderOutcome {
        let payload = payload.into();
        let current = self.input();
        if current.payload == payload {
            return RenderOutcome::Unchanged;
        }
        self.render(RenderInput { payload, ..current }).await
    }

    pub async fn resize(&self, size: PreviewSize) -> RenderOutcome {
        let current = self.input();
        if current.size == size {
            return RenderOutcome::Unchanged;
        }
        self.render(RenderInput { size, ..current }).await
    }
}

// Every write stores a whole value, so a poisoned lock is still readable
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
