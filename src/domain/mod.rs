// Domain layer: leaderboard models and the ports the pipelines and stores implement.

pub mod model;
pub mod ports;
