//! # lpa-journey — Donor Journey Navigation
//!
//! Every page of the donor journey is a [`Path`]. [`Path::can_visit`]
//! decides whether the donor may visit it now; [`can_go_to`] applies the
//! same decision to a raw URL, such as a `from` redirect target.
//!
//! ## Design
//!
//! Guards are total functions over the task states cached on the
//! application. They never derive task state themselves, so a stale
//! application gives a stale answer rather than an error.

pub mod guard;
pub mod path;

pub use guard::can_go_to;
pub use path::{Path, LPA_PREFIX};
