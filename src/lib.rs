//! Manhattan connector routing with sticky snapping onto node edges.
//!
//! The router is a pure function of a [`connector::ConnectorRequest`] and a
//! [`scene::SceneView`]; [`scene::SceneStore`] wraps live editor state around it.

pub mod config;
pub mod connector;
pub mod error;
pub mod preview;
pub mod scene;
pub mod xml;

pub use error::{Error, Result};
