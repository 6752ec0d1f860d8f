mod auto_spawn;
mod controller;
mod waitlist;

pub use auto_spawn::{AutoSpawn, AutoSpawnState};
pub use controller::{AutoSpawnController, DestroyOutcome, SpawnOutcome};
pub use waitlist::{SpawnRequest, SpawnWaitlist};
