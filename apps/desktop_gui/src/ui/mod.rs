//! UI layer for the desktop GUI: app shell, predictor form, gauge painting.

pub mod app;

pub use app::PredictorApp;
