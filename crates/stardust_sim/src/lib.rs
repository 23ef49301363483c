pub mod camera;
pub mod clock;
pub mod command;
pub mod gesture;
pub mod pipeline;
pub mod simulation;

pub use camera::Camera;
pub use clock::SimClock;
pub use command::SimCommand;
pub use gesture::PointerGesture;
pub use pipeline::SimulationPlugin;
pub use simulation::{Simulation, TickReport};
