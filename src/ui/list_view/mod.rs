pub mod app;
pub mod picker;
pub mod view;

pub use app::run;
