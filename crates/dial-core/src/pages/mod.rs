pub mod calculator;
pub mod calendar;
pub mod chrome;
pub mod clock;
pub mod constants;
pub mod datetime_set;
pub mod dice;
pub mod eight_ball;
pub mod extra;
pub mod page;
pub mod page_manager;
pub mod settings;
pub mod timer;

pub use calculator::CalculatorPage;
pub use calendar::CalendarPage;
pub use clock::ClockPage;
pub use datetime_set::DateTimeSetPage;
pub use dice::DicePage;
pub use eight_ball::EightBallPage;
pub use extra::ExtraPage;
pub use page::{Page, PageWrapper};
pub use page_manager::PageManager;
pub use settings::SettingsPage;
pub use timer::TimerPage;
