use crate::coords::Viewport;
use crate::draw::{DrawList, Frame};
use crate::error::Result;
use crate::input::{ButtonState, InputEvent, InputFrame, InputState, Key};

use super::Surface;

/// In-memory surface with scripted input.
///
/// Scripted events are queued and delivered on the next `poll_events`, the
/// same way a window delivers platform events.
#[derive(Debug)]
pub struct HeadlessSurface {
    viewport: Viewport,
    title: String,

    input: InputState,
    input_frame: InputFrame,
    pending: Vec<InputEvent>,

    draw_list: DrawList,
    cursor_captured: bool,

    close_after: Option<u64>,
    close_requested: bool,
    resize_after: Option<(u64, Viewport)>,

    polls: u64,
    presented: u64,
    last_presented_len: usize,
}

impl HeadlessSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            title: String::new(),
            input: InputState { focused: true, ..InputState::default() },
            input_frame: InputFrame::default(),
            pending: Vec::new(),
            draw_list: DrawList::new(),
            cursor_captured: false,
            close_after: None,
            close_requested: false,
            resize_after: None,
            polls: 0,
            presented: 0,
            last_presented_len: 0,
        }
    }

    /// Requests close once `frames` frames have been presented.
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Switches to `viewport` on the first poll after `frames` frames have
    /// been presented, the way a window reports a resize mid-run.
    pub fn resize_after(mut self, frames: u64, viewport: Viewport) -> Self {
        self.resize_after = Some((frames, viewport));
        self
    }

    pub fn press(&mut self, key: Key) {
        self.pending.push(InputEvent::Key { key, state: ButtonState::Pressed, repeat: false });
    }

    pub fn release(&mut self, key: Key) {
        self.pending.push(InputEvent::Key { key, state: ButtonState::Released, repeat: false });
    }

    pub fn move_cursor(&mut self, x: f32, y: f32) {
        self.pending.push(InputEvent::PointerMoved { x, y });
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.pending.push(InputEvent::Focused(focused));
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Command count of the most recently presented frame.
    pub fn last_presented_len(&self) -> usize {
        self.last_presented_len
    }

    /// Commands recorded since the last present.
    pub fn pending_draws(&self) -> &DrawList {
        &self.draw_list
    }
}

impl Surface for HeadlessSurface {
    fn poll_events(&mut self) -> Result<()> {
        self.polls += 1;
        self.input_frame.clear();
        if let Some((frames, viewport)) = self.resize_after
            && self.presented >= frames
        {
            self.viewport = viewport;
            self.resize_after = None;
        }
        for ev in self.pending.drain(..) {
            self.input.apply_event(&mut self.input_frame, ev);
        }
        Ok(())
    }

    fn present_frame(&mut self) -> Result<()> {
        self.presented += 1;
        self.last_presented_len = self.draw_list.len();
        self.draw_list.clear();
        Ok(())
    }

    fn requested_close(&self) -> bool {
        self.close_requested || self.close_after.is_some_and(|n| self.presented >= n)
    }

    fn dimensions(&self) -> Viewport {
        self.viewport
    }

    fn input(&self) -> &InputState {
        &self.input
    }

    fn input_frame(&self) -> &InputFrame {
        &self.input_frame
    }

    fn set_cursor_position(&mut self, x: f32, y: f32) {
        // Warps report back as a move, like a real pointer.
        self.input.pointer_pos = Some((x, y));
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn frame(&mut self) -> Frame<'_> {
        Frame::new(self.viewport, &mut self.draw_list)
    }
}
