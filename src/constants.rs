// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you how a deck is
//! drafted, how large it may grow, and how it lands in Google Slides.

// ---------------------------------------------------------------------------
// Generation defaults
// ---------------------------------------------------------------------------

/// Gemini model used when no `--model` is given.
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";

/// Sampling temperature. 0 is focused, 1 is creative; decks want focused.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Upper bound on tokens the model may emit for one deck.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 10_000;

/// Fewest slides a deck is expected to contain.
pub const DEFAULT_MIN_SLIDES: usize = 7;

/// Most slides a deck is expected to contain.
pub const DEFAULT_MAX_SLIDES: usize = 10;

/// Hard ceiling for the configurable slide range.
pub const SLIDES_HARD_LIMIT: usize = 50;

// ---------------------------------------------------------------------------
// Slide content shape
// ---------------------------------------------------------------------------

/// Leading character every bullet line must carry.
pub const BULLET_MARKER: char = '•';

/// Delimiter between bullet lines inside a slide body.
pub const BULLET_DELIMITER: char = '\n';

/// Word ceiling for a single bullet sentence.
pub const MAX_BULLET_WORDS: usize = 15;

/// Title used when the model omits one.
pub const UNTITLED_PRESENTATION: &str = "Untitled Presentation";

// ---------------------------------------------------------------------------
// Remote endpoints
// ---------------------------------------------------------------------------

pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const SLIDES_API_BASE_URL: &str = "https://slides.googleapis.com/v1";

/// Prefix of the public edit link; the presentation id and `/edit` follow.
pub const PRESENTATION_URL_PREFIX: &str = "https://docs.google.com/presentation/d/";

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Title accent colors, cycled by slide position.
pub const TITLE_PALETTE: [(f32, f32, f32); 8] = [
    (0.2, 0.4, 0.8),
    (0.8, 0.2, 0.4),
    (0.4, 0.7, 0.3),
    (0.9, 0.5, 0.2),
    (0.6, 0.3, 0.8),
    (0.2, 0.7, 0.7),
    (0.9, 0.3, 0.5),
    (0.3, 0.6, 0.9),
];

pub const TITLE_FONT_SIZE_PT: f32 = 28.0;

pub const BODY_FONT_SIZE_PT: f32 = 16.0;

pub const BODY_TEXT_COLOR: (f32, f32, f32) = (0.2, 0.2, 0.2);

pub const BULLET_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Request bodies above this size are rejected before parsing.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
