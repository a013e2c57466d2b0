//! Shared test harness modules for the Wayfare CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod fit_unit;
mod helpers;
