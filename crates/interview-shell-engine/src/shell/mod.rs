//! Navigation state for the dashboard and a launched pattern, independent of
//! how it is drawn.

pub mod pager;
pub mod route;
pub mod session;
pub mod tabs;

pub use pager::InstructionPager;
pub use route::Route;
pub use session::{Session, ShellView};
pub use tabs::{TabLayout, TabMetrics, layout_tabs};
