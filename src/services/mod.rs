pub mod essays;
pub mod gradings;

pub use essays::EssayService;
pub use gradings::GradingService;
