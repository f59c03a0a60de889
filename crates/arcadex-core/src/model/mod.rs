pub mod catalog;
pub mod chunithm;
pub mod maimai;
pub mod ongeki;
pub mod platform;
pub mod platform_song;
pub mod song;

pub use catalog::CatalogSong;
pub use chunithm::ChunithmSong;
pub use maimai::MaimaiSong;
pub use ongeki::OngekiSong;
pub use platform::Platform;
pub use platform_song::PlatformSong;
pub use song::SongAttributes;
