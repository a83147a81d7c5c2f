mod config_tests;
mod uninstall_tests;
