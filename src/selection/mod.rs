pub mod roulette;

pub use roulette::RouletteWheelSelection;
