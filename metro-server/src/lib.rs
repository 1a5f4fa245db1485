//! Metro arrival tracker server.
//!
//! A voice-assistant backend that answers: "when is my train?"
//! Spoken station names are normalized and resolved against the static
//! network graph, the trip is validated, and the live arrival feed is
//! filtered down to trains the rider can actually catch.

pub mod domain;
pub mod engine;
pub mod home;
pub mod incidents;
pub mod resolve;
pub mod stations;
pub mod trip;
pub mod web;
pub mod wmata;
