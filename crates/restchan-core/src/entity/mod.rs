//! Id-scoped handles over a shared `RestClient`.

pub mod channel;
