mod scripts;
mod view;

pub use view::PlayerView;

#[cfg(test)]
pub(crate) use view::PlayerTestHandles;
