/// Domain layer: package network model and pure build services
pub mod domain;
pub mod services;
