
pub use fixtures::{pump, scene, EntityFixture};
