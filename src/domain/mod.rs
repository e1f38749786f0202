// Domain layer - Core naming and planning logic

pub mod errors;
pub mod model;
pub mod rules;
pub mod settings;
