pub(crate) mod helpers;
mod preconditions;
mod responses;
mod transport;
