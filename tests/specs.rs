//! Workspace integration tests for jd.
//!
//! Each spec drives the engine against an in-memory coordination tree built
//! the way executors and the console lay it out.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/status"]
mod status {
    mod crash;
    mod derivation;
}

#[path = "specs/schedule"]
mod schedule {
    mod next_fire;
    mod pause;
}

#[path = "specs/fleet"]
mod fleet {
    mod versions;
}

#[path = "specs/migration"]
mod migration {
    mod batch;
}

#[path = "specs/settings"]
mod settings {
    mod snapshot;
}
