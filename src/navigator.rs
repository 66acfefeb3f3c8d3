//! Navigation and playback over one loaded sprite entity
//!
//! [`Navigator`] owns the active [`SpriteEntity`] together with the current
//! state/sprite position and the playback clock. Callers drive it with
//! discrete commands (next/previous frame or state, play/pause, speed) and a
//! `tick(dt)` from their event loop, typically at 60 Hz.
//!
//! # Timing Model
//!
//! Frame delay is `1 / (speed * 5)` seconds, so speed 1 plays 5 frames per
//! second and speed 10 plays 50. Every elapsed frame period is processed on
//! its own, so a long stall advances by the right number of frames instead of
//! skipping.
//!
//! # Chaining
//!
//! When playback runs past the last frame of a state it continues with the
//! first frame of the next state, wrapping from the last state back to the
//! first. Sequences play end to end rather than looping a single state.

use std::path::{Path, PathBuf};

use crate::bitmap::{Background, Bitmap};
use crate::error::{Result, StashError};
use crate::models::{Sprite, SpriteEntity, StateSequence};
use crate::persist;
use crate::slicer;

/// Slowest playback speed
pub const MIN_SPEED: u32 = 1;
/// Fastest playback speed
pub const MAX_SPEED: u32 = 10;
/// Frames per second at speed 1
pub const FRAMES_PER_SPEED_STEP: f64 = 5.0;

/// Current position and playback clock (never persisted)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationState {
    pub state_index: usize,
    pub sprite_index: usize,
    pub playing: bool,
    pub speed: u32,
    pub frame_timer: f64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self { state_index: 0, sprite_index: 0, playing: false, speed: MIN_SPEED, frame_timer: 0.0 }
    }
}

/// Text fields an operator can edit on the active entity.
///
/// State and sprite fields refer to the current state/sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    EntityName,
    EntityDescription,
    StateName,
    StateDescription,
    SpriteName,
    SpriteDescription,
}

/// Playback and navigation automaton for one owned entity
#[derive(Debug, Clone)]
pub struct Navigator {
    entity: SpriteEntity,
    nav: NavigationState,
}

impl Navigator {
    /// Take ownership of `entity`, starting at the first frame of the first
    /// state, paused, at speed 1.
    ///
    /// # Errors
    ///
    /// * `InvalidDimensions` if the frame size is zero
    /// * `NoVisibleFrames` if the entity has no states or an empty state
    pub fn new(entity: SpriteEntity) -> Result<Self> {
        validate(&entity)?;
        Ok(Self { entity, nav: NavigationState::default() })
    }

    pub fn entity(&self) -> &SpriteEntity {
        &self.entity
    }

    /// Give the entity back, dropping navigation state.
    pub fn into_entity(self) -> SpriteEntity {
        self.entity
    }

    pub fn state(&self) -> NavigationState {
        self.nav
    }

    pub fn state_index(&self) -> usize {
        self.nav.state_index
    }

    pub fn sprite_index(&self) -> usize {
        self.nav.sprite_index
    }

    pub fn is_playing(&self) -> bool {
        self.nav.playing
    }

    pub fn speed(&self) -> u32 {
        self.nav.speed
    }

    /// Seconds between frame advances at the current speed
    pub fn frame_delay(&self) -> f64 {
        1.0 / (self.nav.speed as f64 * FRAMES_PER_SPEED_STEP)
    }

    pub fn current_state(&self) -> Result<&StateSequence> {
        self.entity.states().get(self.nav.state_index).ok_or_else(|| self.out_of_range())
    }

    pub fn current_sprite(&self) -> Result<&Sprite> {
        self.current_state()?.sprites().get(self.nav.sprite_index).ok_or_else(|| self.out_of_range())
    }

    fn out_of_range(&self) -> StashError {
        StashError::IndexOutOfRange { state: self.nav.state_index, sprite: self.nav.sprite_index }
    }

    fn state_len(&self) -> usize {
        self.entity.states().get(self.nav.state_index).map_or(0, StateSequence::len)
    }

    /// Move `delta` frames within the current state, wrapping at both ends.
    ///
    /// Returns `true` when a forward move wrapped back to the first frame.
    pub fn advance_sprite(&mut self, delta: i64) -> bool {
        self.clamp_indices();
        let len = self.state_len();
        if len == 0 {
            return false;
        }
        let previous = self.nav.sprite_index;
        self.nav.sprite_index = wrap(previous, delta, len);
        delta > 0 && self.nav.sprite_index == 0
    }

    /// Move `delta` states, wrapping at both ends. Always lands on the first
    /// frame of the new state.
    pub fn advance_state(&mut self, delta: i64) {
        self.clamp_indices();
        let len = self.entity.states().len();
        if len == 0 {
            return;
        }
        self.nav.state_index = wrap(self.nav.state_index, delta, len);
        self.nav.sprite_index = 0;
        log::debug!("State -> {}", self.nav.state_index);
    }

    /// Jump straight to a position, e.g. from a click on the overview.
    ///
    /// An out-of-range `sprite` falls back to the state's first frame; an
    /// out-of-range `state` is rejected and nothing changes.
    pub fn select(&mut self, state: usize, sprite: usize) -> Result<()> {
        let Some(target) = self.entity.states().get(state) else {
            log::warn!("Ignoring selection of missing state {}", state);
            return Err(StashError::IndexOutOfRange { state, sprite });
        };
        self.nav.state_index = state;
        self.nav.sprite_index = if sprite < target.len() { sprite } else { 0 };
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        self.nav.playing = !self.nav.playing;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.nav.playing = playing;
    }

    /// Set playback speed, clamped to `1..=10`.
    pub fn set_speed(&mut self, speed: i64) {
        self.nav.speed = speed.clamp(MIN_SPEED as i64, MAX_SPEED as i64) as u32;
    }

    pub fn speed_up(&mut self) {
        self.set_speed(self.nav.speed as i64 + 1);
    }

    pub fn slow_down(&mut self) {
        self.set_speed(self.nav.speed as i64 - 1);
    }

    /// Advance the playback clock by `dt` seconds.
    ///
    /// Does nothing while paused. Returns the number of frames advanced.
    pub fn tick(&mut self, dt: f64) -> usize {
        if !self.nav.playing || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        let delay = self.frame_delay();
        self.nav.frame_timer += dt;
        let mut advanced = 0;
        while self.nav.frame_timer >= delay {
            self.nav.frame_timer -= delay;
            if self.advance_sprite(1) {
                self.advance_state(1);
            }
            advanced += 1;
        }
        advanced
    }

    /// Reset the position to `(0, 0)` if it no longer fits the entity.
    pub fn clamp_indices(&mut self) {
        let fits = self
            .entity
            .states()
            .get(self.nav.state_index)
            .is_some_and(|s| self.nav.sprite_index < s.len());
        if !fits {
            log::warn!(
                "Position ({}, {}) out of range, resetting",
                self.nav.state_index,
                self.nav.sprite_index
            );
            self.nav.state_index = 0;
            self.nav.sprite_index = 0;
        }
    }

    /// Swap in a different entity (another sheet, or a reload).
    ///
    /// Position, playback flag and clock reset; speed is kept. If the new
    /// entity is rejected the current one stays active.
    pub fn replace(&mut self, entity: SpriteEntity) -> Result<()> {
        validate(&entity)?;
        self.entity = entity;
        self.nav = NavigationState { speed: self.nav.speed, ..NavigationState::default() };
        log::info!("Active entity is now '{}'", self.entity.name());
        Ok(())
    }

    /// Re-slice `sheet` with a new frame size.
    ///
    /// The entity's name, description and source carry over. On failure the
    /// current entity and position are untouched.
    pub fn reslice(
        &mut self,
        sheet: &Bitmap,
        frame_width: u32,
        frame_height: u32,
        background: Background,
    ) -> Result<()> {
        let mut entity =
            slicer::slice(sheet, frame_width, frame_height, self.entity.source(), background)?;
        entity.set_name(self.entity.name());
        entity.set_description(self.entity.description());
        self.replace(entity)
    }

    /// Save the active entity into `<root>/<entity name>/`.
    ///
    /// Returns the path of the written metadata document.
    pub fn save(&mut self, root: &Path) -> Result<PathBuf> {
        let folder = persist::entity_folder(root, self.entity.name());
        persist::save(&mut self.entity, &folder)
    }

    /// Reload the active entity's last save from `<root>/<entity name>/`.
    ///
    /// Returns `Ok(false)` when there is nothing to load; the current entity
    /// then stays active.
    pub fn reload(&mut self, root: &Path) -> Result<bool> {
        let path = persist::metadata_path(root, self.entity.name());
        match persist::try_load(&path)? {
            Some(entity) => {
                self.replace(entity)?;
                Ok(true)
            }
            None => {
                log::info!("No saved sprite entity found for '{}'", self.entity.name());
                Ok(false)
            }
        }
    }

    /// Current text of an editable field.
    pub fn text(&self, target: EditTarget) -> Result<&str> {
        Ok(match target {
            EditTarget::EntityName => self.entity.name(),
            EditTarget::EntityDescription => self.entity.description(),
            EditTarget::StateName => self.current_state()?.name(),
            EditTarget::StateDescription => self.current_state()?.description(),
            EditTarget::SpriteName => self.current_sprite()?.name(),
            EditTarget::SpriteDescription => self.current_sprite()?.description(),
        })
    }

    /// Replace the text of an editable field.
    pub fn set_text(&mut self, target: EditTarget, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let (state, sprite) = (self.nav.state_index, self.nav.sprite_index);
        let missing = StashError::IndexOutOfRange { state, sprite };
        match target {
            EditTarget::EntityName => self.entity.set_name(value),
            EditTarget::EntityDescription => self.entity.set_description(value),
            EditTarget::StateName => self.entity.state_mut(state).ok_or(missing)?.set_name(value),
            EditTarget::StateDescription => {
                self.entity.state_mut(state).ok_or(missing)?.set_description(value)
            }
            EditTarget::SpriteName => {
                self.entity.sprite_mut(state, sprite).ok_or(missing)?.set_name(value)
            }
            EditTarget::SpriteDescription => {
                self.entity.sprite_mut(state, sprite).ok_or(missing)?.set_description(value)
            }
        }
        Ok(())
    }

    /// Heads-up summary of the current position.
    pub fn status_lines(&self) -> Result<Vec<String>> {
        let state = self.current_state()?;
        let sprite = self.current_sprite()?;
        Ok(vec![
            format!("Spritesheet: {}", self.entity.source_file_name()),
            format!(
                "State: {} ({}/{})",
                or_placeholder(state.name(), "Unnamed"),
                self.nav.state_index + 1,
                self.entity.states().len()
            ),
            format!(
                "Sprite: {} ({}/{})",
                or_placeholder(sprite.name(), "Unnamed"),
                self.nav.sprite_index + 1,
                state.len()
            ),
            format!("Sprite Description: {}", or_placeholder(sprite.description(), "No description")),
            format!("Sprite Size: {}x{}", self.entity.frame_width(), self.entity.frame_height()),
            format!("Speed: {}", self.nav.speed),
        ])
    }
}

fn validate(entity: &SpriteEntity) -> Result<()> {
    if entity.frame_width() == 0 || entity.frame_height() == 0 {
        return Err(StashError::InvalidDimensions {
            width: entity.frame_width(),
            height: entity.frame_height(),
        });
    }
    if entity.states().is_empty() || entity.states().iter().any(StateSequence::is_empty) {
        return Err(StashError::NoVisibleFrames { source_name: entity.source().to_string() });
    }
    Ok(())
}

fn wrap(index: usize, delta: i64, len: usize) -> usize {
    (index as i64 + delta).rem_euclid(len as i64) as usize
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.is_empty() {
        placeholder
    } else {
        text
    }
}
