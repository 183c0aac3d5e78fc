//! UI-independent core of the HelmetWatch client shell.
//!
//! The [`domain::backend_client::BackendClient`] trait describes the five
//! operations the detection backend exposes; [`infrastructure`] provides the
//! HTTP implementation, and [`domain::shell_controller::ShellController`]
//! implements the action boundary (display state, live-session flag, error
//! collapsing) so the interaction logic is testable without a display.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
