pub mod zoom_api;
