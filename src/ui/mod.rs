// UI module - eframe application and its three screens

pub mod app;
mod builder;
mod home;
mod player;

pub use app::MyRepsApp;
