mod admin;
pub(crate) mod player;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use player::PlayerView;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
pub(crate) use admin::AdminTestHandles;
