mod band_test;
mod config_test;
mod failure_test;
mod grid_test;
mod middleware_test;
mod request_test;
mod slot_config_test;
mod slot_test;
