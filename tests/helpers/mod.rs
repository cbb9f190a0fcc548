pub mod env_helpers;
