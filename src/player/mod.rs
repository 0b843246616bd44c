//! Terminal film player
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `host`: playback time, versioned seek requests, narration driving
//! - `surface`: the `VideoSurface` trait and the wall-clock `ClockSurface`
//! - `session`: one loaded film with its host, surface, chat and UI state
//! - `state`: UI state and shared types (MarkerPosition, InputResult)
//! - `input/`: Keyboard input handling
//! - `playback/`: Chapter markers and place rows
//! - `render/`: ratatui rendering (progress bar, panes, footer, help)
//! - `native`: the terminal loop

pub mod host;
pub(crate) mod input;
mod native;
pub(crate) mod playback;
pub mod render;
pub mod session;
pub mod state;
pub mod surface;

pub use host::{JumpOrigin, PlaybackHost, PlaybackSnapshot, SeekMailbox, SeekRequest, TimeUpdate};
pub use input::handle_key_event;
pub use native::{run_player, PlaybackResult, PlayerOptions};
pub use playback::{collect_markers, collect_place_rows, PlaceRow};
pub use session::{PlayerSession, SessionOptions};
pub use state::{InputResult, MarkerPosition, Pane, UiState};
pub use surface::{ClockSurface, VideoSurface};
