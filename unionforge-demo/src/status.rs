//! The generated `Status` union with its combinators and test assertions.

include!(concat!(env!("OUT_DIR"), "/status_union.rs"));
include!(concat!(env!("OUT_DIR"), "/status_match.rs"));
include!(concat!(env!("OUT_DIR"), "/status_switch.rs"));
include!(concat!(env!("OUT_DIR"), "/status_map.rs"));
include!(concat!(env!("OUT_DIR"), "/status_bind.rs"));
include!(concat!(env!("OUT_DIR"), "/status_test_extensions.rs"));

impl Status {
    /// Returns `true` once the job can no longer make progress.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.is_aborted()
    }
}
