//! Card-canvas engine for the RetroPress desktop.
//!
//! This crate owns the full lifecycle of the card table: translating raw
//! pointer events into card mutations, assigning stacking order, printing new
//! cards from submitted text, and keeping the on-disk collection in sync with
//! every mutation. The host layer is responsible only for rendering the cards
//! it reads back from the engine and for wiring UI events to the engine's
//! entry points, processing the returned [`engine::Action`]s as it goes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Host-facing engine facade and [`engine::Action`] |
//! | [`card`] | Card model, wire format, and the owning [`card::CardStore`] |
//! | [`input`] | Drag-session state machine |
//! | [`printer`] | Spawn/print policy and enhancement gating |
//! | [`storage`] | Durable card-collection storage backends |
//! | [`enhance`] | Text-enhancement providers and fallback policy |
//! | [`consts`] | Shared numeric constants (spawn geometry, jitter, etc.) |

pub mod card;
pub mod consts;
pub mod engine;
pub mod enhance;
pub mod input;
pub mod printer;
pub mod storage;
