use super::keys::CarouselKeyMap;
use super::sequence::{self, display_sequence, Direction, Target, FIRST_REAL_SLOT};
use super::tween::{Ease, Tween};
use super::Item;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, MouseMsg, Msg};
use crossterm::event::MouseEventKind;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for carousel instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const FPS: u32 = 60;

/// Behaviour knobs for a carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Wrap from the last item to the first and back. When false, steps past
    /// either end are ignored.
    pub loop_around: bool,
    /// Length of one animated transition.
    pub duration: Duration,
    /// Easing curve of each transition.
    pub ease: Ease,
    /// How far item text lags behind the scroll, as a fraction of the item
    /// extent. 0 disables the parallax shift.
    pub parallax: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            loop_around: true,
            duration: Duration::from_millis(700),
            ease: Ease::Power2Out,
            parallax: 0.5,
        }
    }
}

/// The rendered surface the carousel scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Visible rows.
    pub height: usize,
}

/// Extent of one item in rows. Measured on every operation so a resize is
/// picked up without any cached state.
pub fn measure(viewport: &Viewport) -> f64 {
    viewport.height as f64
}

/// Drives one animation frame of a specific carousel transition.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    pub(super) id: i64,
    pub(super) tag: i64,
}

/// Emitted when a transition (including any wrap correction) has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledMsg {
    /// Carousel that settled.
    pub id: i64,
    /// Logical index after settling.
    pub index: usize,
}

/// Emitted when a transition was cancelled before completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptedMsg {
    /// Carousel that was interrupted.
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Stepping,
    AnimatingToBoundary { snap_slot: usize, index: usize },
    SnappingToReal { snap_slot: usize, index: usize },
}

/// Renders the content of one slot.
///
/// Returned lines are placed vertically centred in the slot and shifted by
/// the parallax offset; lines that fall outside the slot are clipped.
pub trait Delegate<I> {
    /// Renders `item` into at most `height` lines of `width` columns.
    /// `current` is true for the slot holding the logical index.
    fn render(&self, item: &I, width: usize, height: usize, current: bool) -> Vec<String>;
}

impl<I, F> Delegate<I> for F
where
    F: Fn(&I, usize, usize, bool) -> Vec<String>,
{
    fn render(&self, item: &I, width: usize, height: usize, current: bool) -> Vec<String> {
        self(item, width, height, current)
    }
}

/// Infinite circular carousel showing one item per viewport height.
///
/// The carousel owns the scroll offset. Discrete steps animate it one slot
/// at a time; crossing either end animates onto a boundary duplicate and then
/// jumps, without animation, to the matching real slot on the other side.
#[derive(Debug, Clone)]
pub struct Model<I: Item> {
    id: i64,
    tag: i64,
    items: Vec<I>,
    display: Vec<I>,
    index: usize,
    slot: usize,
    offset: f64,
    progress: f64,
    viewport: Option<Viewport>,
    tween: Option<Tween>,
    target_slot: usize,
    phase: Phase,
    options: Options,
    /// Key bindings for stepping and interrupting.
    pub keymap: CarouselKeyMap,
}

impl<I: Item> Default for Model<I> {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl<I: Item> Model<I> {
    /// Creates an empty carousel without a viewport.
    pub fn new(options: Options) -> Self {
        Self {
            id: next_id(),
            tag: 0,
            items: Vec::new(),
            display: Vec::new(),
            index: 0,
            slot: 0,
            offset: 0.0,
            progress: 0.0,
            viewport: None,
            tween: None,
            target_slot: 0,
            phase: Phase::Idle,
            options,
            keymap: CarouselKeyMap::default(),
        }
    }

    /// Builder-style viewport setter.
    pub fn with_viewport(mut self, height: usize) -> Self {
        std::mem::drop(self.set_viewport(height));
        self
    }

    /// Builder-style item setter.
    pub fn with_items(mut self, items: Vec<I>) -> Self {
        let options = self.options.clone();
        std::mem::drop(self.configure(items, options));
        self
    }

    /// Unique id used to route frame messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The caller-supplied items.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Items padded with boundary duplicates, in slot order.
    pub fn display_items(&self) -> &[I] {
        &self.display
    }

    /// Render key for a slot: the item key plus its slot, unique even for
    /// duplicates.
    pub fn display_key(&self, slot: usize) -> Option<String> {
        self.display
            .get(slot)
            .map(|item| format!("{}-{}", item.key(), slot))
    }

    /// Number of real items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical index into [`items`](Self::items).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Item at the logical index.
    pub fn current(&self) -> Option<&I> {
        self.items.get(self.index)
    }

    /// Display slot the offset rests on, or last rested on while animating.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Scroll offset in rows.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Fractional position within the current slot, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether a transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// The viewport, once one has been supplied.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Rebuilds the display sequence from `items` and resets to the first item
    /// without animation. Any transition in flight is interrupted first; the
    /// returned command carries that interruption, if any.
    pub fn configure(&mut self, items: Vec<I>, options: Options) -> Option<Cmd> {
        let interrupted = self.interrupt();

        self.options = options;
        self.display = display_sequence(&items);
        self.items = items;
        self.index = 0;
        self.slot = if self.items.is_empty() { 0 } else { FIRST_REAL_SLOT };
        self.rebase();

        tracing::debug!(
            id = self.id,
            items = self.items.len(),
            slots = self.display.len(),
            "carousel configured"
        );
        interrupted
    }

    /// Replaces the items only when they differ from the current ones.
    pub fn set_items(&mut self, items: Vec<I>) -> Option<Cmd> {
        if items == self.items {
            return None;
        }
        let options = self.options.clone();
        self.configure(items, options)
    }

    /// Sets the viewport height. A height of 0 marks the viewport unready.
    ///
    /// A resize interrupts any transition and re-bases the offset onto the
    /// slot it rests on, so the settle invariant holds for the new extent.
    pub fn set_viewport(&mut self, height: usize) -> Option<Cmd> {
        let next = (height > 0).then_some(Viewport { height });
        if next == self.viewport {
            return None;
        }
        let interrupted = self.interrupt();
        self.viewport = next;
        self.rebase();
        interrupted
    }

    /// Handles one discrete scroll input. Inputs arriving while a transition
    /// is in flight are dropped.
    pub fn step(&mut self, direction: Direction) -> Option<Cmd> {
        if self.viewport.is_none() || self.items.is_empty() {
            return None;
        }
        if self.is_animating() {
            tracing::trace!(id = self.id, ?direction, "step dropped while animating");
            return None;
        }

        let len = self.items.len();
        if len == 1 && !self.is_on_slot(FIRST_REAL_SLOT) {
            self.snap(FIRST_REAL_SLOT);
            self.index = 0;
            return None;
        }

        match sequence::resolve(self.slot, direction, len, self.options.loop_around) {
            Target::Stay => None,
            Target::Recenter => {
                self.snap(FIRST_REAL_SLOT);
                self.index = 0;
                None
            }
            Target::Step { slot, index } => {
                self.index = index;
                self.begin(slot, Phase::Stepping)
            }
            Target::Wrap {
                boundary,
                snap_slot,
                index,
            } => {
                tracing::debug!(id = self.id, boundary, snap_slot, "wrapping");
                self.begin(boundary, Phase::AnimatingToBoundary { snap_slot, index })
            }
        }
    }

    /// Discrete input from a signed wheel or swipe delta.
    pub fn scroll_delta(&mut self, delta: f64) -> Option<Cmd> {
        Direction::from_delta(delta).and_then(|direction| self.step(direction))
    }

    /// Reports a raw scroll offset in rows and refreshes [`progress`](Self::progress).
    /// Never changes the logical index.
    pub fn on_scroll(&mut self, raw_offset: f64) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let extent = measure(&viewport);
        if extent <= 0.0 || !raw_offset.is_finite() {
            return;
        }
        let units = raw_offset / extent;
        self.progress = (units - units.floor()).clamp(0.0, 1.0 - f64::EPSILON);
    }

    /// Cancels the transition in flight, skipping any pending wrap correction,
    /// and snaps to the nearest slot. Returns the interruption hook command,
    /// or `None` when idle.
    ///
    /// Landing on a real slot re-derives the index from it. An interrupted
    /// wrap can instead land on a boundary duplicate, leaving the index stale
    /// until the next step resolves it.
    pub fn interrupt(&mut self) -> Option<Cmd> {
        if !self.is_animating() {
            return None;
        }
        self.tag += 1;
        self.tween = None;
        self.phase = Phase::Idle;

        let nearest = match self.viewport {
            Some(viewport) if measure(&viewport) > 0.0 => {
                let last = self.display.len().saturating_sub(1) as f64;
                (self.offset / measure(&viewport)).round().clamp(0.0, last) as usize
            }
            _ => self.slot,
        };
        self.snap(nearest);
        if let Some(index) = sequence::real_index(nearest, self.items.len()) {
            self.index = index;
        }
        tracing::debug!(id = self.id, slot = nearest, index = self.index, "carousel interrupted");

        let id = self.id;
        Some(Box::pin(async move { Some(Box::new(InterruptedMsg { id }) as Msg) }))
    }

    /// Handles frame, key and mouse-wheel messages.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(frame) = msg.downcast_ref::<FrameMsg>() {
            return self.on_frame(frame);
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next.matches(key_msg) {
                return self.step(Direction::Forward);
            } else if self.keymap.prev.matches(key_msg) {
                return self.step(Direction::Backward);
            } else if self.keymap.interrupt.matches(key_msg) {
                return self.interrupt();
            }
            return None;
        }

        if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            return match mouse.button {
                MouseEventKind::ScrollDown => self.step(Direction::Forward),
                MouseEventKind::ScrollUp => self.step(Direction::Backward),
                _ => None,
            };
        }

        None
    }

    /// Renders the rows currently inside the viewport.
    pub fn view_with<D: Delegate<I>>(&self, delegate: &D, width: usize) -> String {
        let Some(viewport) = self.viewport else {
            return String::new();
        };
        if self.display.is_empty() {
            return String::new();
        }

        let height = viewport.height;
        let top = self.offset.max(0.0).round() as usize;
        let mut rows = vec![String::new(); height];

        let first_slot = top / height;
        let last_slot = (top + height - 1) / height;
        for slot in first_slot..=last_slot.min(self.display.len() - 1) {
            let current = sequence::real_index(slot, self.items.len()) == Some(self.index)
                && slot == self.slot;
            let lines = delegate.render(&self.display[slot], width, height, current);

            let slot_top = (slot * height) as isize;
            let relative = self.offset / height as f64 - slot as f64;
            let shift = (relative * self.options.parallax * height as f64).round() as isize;
            let content_top = (height.saturating_sub(lines.len()) / 2) as isize + shift;

            for (i, line) in lines.into_iter().enumerate() {
                let within_slot = content_top + i as isize;
                if within_slot < 0 || within_slot >= height as isize {
                    continue;
                }
                let row = slot_top + within_slot - top as isize;
                if (0..height as isize).contains(&row) {
                    rows[row as usize] = line;
                }
            }
        }

        rows.join("\n")
    }

    fn begin(&mut self, slot: usize, phase: Phase) -> Option<Cmd> {
        let viewport = self.viewport?;
        let target = slot as f64 * measure(&viewport);

        self.tag += 1;
        self.target_slot = slot;
        self.phase = phase;
        self.tween = Some(Tween::new(
            self.offset,
            target,
            self.options.duration,
            self.options.ease,
        ));

        if self.options.duration.is_zero() {
            self.set_offset(target);
            return self.complete();
        }
        Some(self.next_frame())
    }

    fn on_frame(&mut self, frame: &FrameMsg) -> Option<Cmd> {
        if frame.id != self.id || frame.tag != self.tag {
            return None;
        }
        let tween = self.tween.as_mut()?;
        let value = tween.advance(frame_interval());
        let done = tween.is_done();
        self.set_offset(value);

        if done {
            self.complete()
        } else {
            Some(self.next_frame())
        }
    }

    // Runs the completion side of the current phase. A boundary animation
    // hands over to the snap, which repositions without animation.
    fn complete(&mut self) -> Option<Cmd> {
        self.tween = None;
        self.slot = self.target_slot;

        self.phase = match self.phase {
            Phase::AnimatingToBoundary { snap_slot, index } => {
                Phase::SnappingToReal { snap_slot, index }
            }
            _ => Phase::Idle,
        };
        if let Phase::SnappingToReal { snap_slot, index } = self.phase {
            self.snap(snap_slot);
            self.index = index;
            self.phase = Phase::Idle;
        }

        tracing::trace!(id = self.id, slot = self.slot, index = self.index, "carousel settled");
        let id = self.id;
        let index = self.index;
        Some(Box::pin(async move {
            Some(Box::new(SettledMsg { id, index }) as Msg)
        }))
    }

    fn snap(&mut self, slot: usize) {
        self.slot = slot;
        if let Some(viewport) = self.viewport {
            self.set_offset(slot as f64 * measure(&viewport));
        }
    }

    fn rebase(&mut self) {
        match self.viewport {
            Some(_) => self.snap(self.slot),
            None => {
                self.offset = 0.0;
                self.progress = 0.0;
            }
        }
    }

    fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.on_scroll(offset);
    }

    fn is_on_slot(&self, slot: usize) -> bool {
        match self.viewport {
            Some(viewport) => (self.offset - slot as f64 * measure(&viewport)).abs() < 0.5,
            None => true,
        }
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(frame_interval(), move |_| Box::new(FrameMsg { id, tag }) as Msg)
    }

    #[cfg(test)]
    pub(super) fn frame_msg(&self) -> FrameMsg {
        FrameMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    #[cfg(test)]
    pub(super) fn drift_to(&mut self, offset: f64) {
        self.offset = offset;
    }
}

fn frame_interval() -> Duration {
    Duration::from_nanos(1_000_000_000 / FPS as u64)
}
