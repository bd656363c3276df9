//! Pipeline stages for proposal-to-SoW generation.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch an extraction backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ normalize ──▶ section ──▶ render
//! (readers)   (cleanup)     (backend)   (5 formats)
//! ```
//!
//! 1. [`extract`]   — pull raw text out of the uploaded file, dispatched on
//!    its extension
//! 2. [`normalize`] — strip proposal boilerplate and collapse whitespace;
//!    also the line-deduplication pass applied to generated bodies
//! 3. [`section`]   — route one section through its body policy; the only
//!    stage with network I/O
//! 4. [`render`]    — serialise the composed document into the requested
//!    byte format; all renderers are pure functions of the composed text

pub mod extract;
pub mod normalize;
pub mod render;
pub mod section;
