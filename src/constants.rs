// src/constants.rs
//
// Application-wide constants shared by the elements, the HTTP adapter and the CLI.

/// Base URL of the public notes API used when neither flag, env nor config sets one.
pub const DEFAULT_BASE_URL: &str = "https://notes-api.dicoding.dev/v2";

/// Request timeout applied to every call against the notes API.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Capacity of the "note added" broadcast channel.
///
/// The signal carries no payload, so a lagging subscriber only needs to know that
/// it missed something; a small buffer is enough.
pub const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Tag names under which the three elements are registered.
pub const NOTES_LIST_TAG: &str = "notes-list";
pub const NOTES_FORM_TAG: &str = "notes-form";
pub const NOTES_FOOTER_TAG: &str = "notes-footer";

/// Delay in milliseconds after spawning the browser before returning.
///
/// The page lives in a temporary directory that is removed when the renderer is
/// dropped; the browser needs a moment to read it first.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;

/// Maximum width of the body preview in terminal listings.
pub const BODY_PREVIEW_CHARS: usize = 60;
