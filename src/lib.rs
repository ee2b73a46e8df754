// staffdesk — contract and allocation tracking core.
//
// The crate is split the way the data flows: base entity collections
// (owned by `store`, persisted by `storage`) feed the pure computation
// modules under `services/`, which produce the derived dashboard
// structures. Every time-dependent computation takes `today` as an
// explicit parameter; nothing below `store` reads the clock.

pub mod dates;
pub mod error;
pub mod lookup;
pub mod seed;
pub mod services;
pub mod storage;
pub mod store;
pub mod types;
