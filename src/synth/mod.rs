pub mod chord;
pub mod voice;

pub use chord::Chord;
pub use voice::Voice;
