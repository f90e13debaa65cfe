//! Route definitions and request handlers.
//!
//! ```text
//! /health                          service + database health
//!
//! /api/children/register           child registration (public)
//! /api/children/login              child login (public)
//! /api/children/me                 own profile (child token)
//! /api/children/save-session       record a practice session (child token)
//! /api/children/my-sessions        recent sessions, newest first (child token)
//! /api/child/{public_id}           shareable profile (public)
//!
//! /auth/register-parent            parent registration (public)
//! /auth/login-parent               parent login (public)
//! /auth/me                         parent profile + children (parent token)
//!
//! /generate-task                   one multiplication task (public)
//! /explain                         explanation for a wrong answer (public)
//!
//! /save-session                    legacy name-keyed session write (public)
//! /last-session-stats              legacy name-keyed latest session (public)
//! ```

pub mod children;
pub mod health;
pub mod parents;
pub mod sessions;
pub mod tasks;
