pub mod config;
pub mod contact;
pub mod log;
pub mod navigation;
pub mod notification;
pub mod projects;
pub mod reveal;
pub mod scroll_state;
pub mod throttle;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
