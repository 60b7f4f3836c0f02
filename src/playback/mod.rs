pub mod clock;
pub mod render;
pub mod session;

pub use clock::{BeatClock, QuarterNote};
pub use render::{ClickSink, TerminalSink};
pub use session::PracticeSession;
