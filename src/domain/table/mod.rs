pub mod column;
pub mod config;
pub mod filter;
pub mod model;
pub mod pagination;
pub mod sort;
pub mod virtualizer;

pub use column::{CellValue, ColumnDef, ColumnWidth, TableRow};
pub use config::{ConfigError, TableConfig};
pub use model::{Reaction, RenderMode, RenderedRow, TableEvent, TableModel};
pub use pagination::ScrollMetrics;
pub use sort::SortDirection;
